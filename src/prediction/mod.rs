//! Collector prediction capability.
//!
//! Callers inject a `CollectorPredictor`; the mapping engine only ever sees
//! the resulting `LogCurve` and cannot tell measured from predicted data.
//!
//! - `mock`: deterministic stand-in producing alternating binary zones
//! - `stats`: summary statistics over a set of predictions

pub mod mock;
pub mod stats;

pub use mock::MockPredictor;
pub use stats::PredictionStats;

use crate::config::defaults::MAX_SAMPLE_COUNT;
use crate::types::{step_count, CurveError, LogCurve};
use serde::{Deserialize, Serialize};

/// What to predict: one well, one MD interval, a fixed number of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub well_id: String,
    pub x: f64,
    pub y: f64,
    pub md_min: f64,
    pub md_max: f64,
    pub num_points: usize,
}

impl PredictionRequest {
    /// Sample count `max(floor(range / step) + 1, min_points)`, capped at
    /// `MAX_SAMPLE_COUNT`.
    pub fn for_depth_range(
        well_id: &str,
        x: f64,
        y: f64,
        (md_min, md_max): (f64, f64),
        depth_step: f64,
        min_points: usize,
    ) -> Self {
        let range = (md_max - md_min).abs();
        let from_step = if range.is_finite() && depth_step.is_finite() && depth_step > 0.0 {
            step_count(range, depth_step).unwrap_or(MAX_SAMPLE_COUNT)
        } else {
            0
        };
        Self {
            well_id: well_id.to_string(),
            x,
            y,
            md_min,
            md_max,
            num_points: from_step.max(min_points).min(MAX_SAMPLE_COUNT),
        }
    }

    /// `num_points` depths evenly spaced over `[md_min, md_max]`, both ends included.
    pub fn depths(&self) -> Vec<f64> {
        match self.num_points {
            0 => Vec::new(),
            1 => vec![self.md_min],
            n => {
                let step = (self.md_max - self.md_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.md_max
                        } else {
                            self.md_min + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Predicted values for one well. Values are probabilities in `[0, 1]`;
/// a binary predictor returns exactly 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub well_id: String,
    pub x: f64,
    pub y: f64,
    pub depth: Vec<f64>,
    pub value: Vec<f64>,
}

impl Prediction {
    /// Binarized curve ready for mapping.
    pub fn to_curve(&self, threshold: f64) -> Result<LogCurve, CurveError> {
        LogCurve::from_predictions(&self.depth, &self.value, threshold)
    }

    /// Fraction of samples above 0.5.
    pub fn collector_ratio(&self) -> f64 {
        if self.value.is_empty() {
            return 0.0;
        }
        self.value.iter().filter(|&&v| v > 0.5).count() as f64 / self.value.len() as f64
    }
}

/// Source of collector predictions for a well.
pub trait CollectorPredictor: Send + Sync {
    /// Predictor name for logs (e.g., "mock")
    fn name(&self) -> &str;

    fn predict(&self, request: &PredictionRequest) -> Prediction;

    /// Predict several wells, in request order.
    fn predict_many(&self, requests: &[PredictionRequest]) -> Vec<Prediction> {
        requests.iter().map(|r| self.predict(r)).collect()
    }
}
