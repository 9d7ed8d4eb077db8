//! Depth-indexed log curve with a null sentinel.

use crate::config::defaults::NULL_SENTINEL;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("depth and value arrays differ in length ({depth} vs {value})")]
    LengthMismatch { depth: usize, value: usize },
}

/// One valid `(depth, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub depth: f64,
    pub value: f64,
}

/// Collector / non-collector / anything else, over valid samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub collector: usize,
    pub non_collector: usize,
    pub other: usize,
}

/// Parallel depth/value arrays for one well.
///
/// The curve is not sorted; sample order is whatever the source produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogCurve {
    depth: Vec<f64>,
    value: Vec<f64>,
    null_sentinel: f64,
}

impl LogCurve {
    pub fn new(depth: Vec<f64>, value: Vec<f64>, null_sentinel: f64) -> Result<Self, CurveError> {
        if depth.len() != value.len() {
            return Err(CurveError::LengthMismatch {
                depth: depth.len(),
                value: value.len(),
            });
        }
        Ok(Self {
            depth,
            value,
            null_sentinel,
        })
    }

    /// Curve using the canonical `-999.25` sentinel.
    pub fn with_default_sentinel(depth: Vec<f64>, value: Vec<f64>) -> Result<Self, CurveError> {
        Self::new(depth, value, NULL_SENTINEL)
    }

    /// Build a binary curve from continuous predictions.
    ///
    /// Values `>= threshold` become 1, everything else 0. Depths are taken
    /// as absolute values since MD is never negative.
    pub fn from_predictions(
        depths: &[f64],
        probabilities: &[f64],
        threshold: f64,
    ) -> Result<Self, CurveError> {
        if depths.len() != probabilities.len() {
            return Err(CurveError::LengthMismatch {
                depth: depths.len(),
                value: probabilities.len(),
            });
        }
        let depth = depths.iter().map(|d| d.abs()).collect();
        let value = probabilities
            .iter()
            .map(|&p| if p >= threshold { 1.0 } else { 0.0 })
            .collect();
        Self::with_default_sentinel(depth, value)
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub const fn null_sentinel(&self) -> f64 {
        self.null_sentinel
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    fn is_valid(&self, depth: f64, value: f64) -> bool {
        // a NaN depth can't be placed anywhere either
        !value.is_nan() && value != self.null_sentinel && depth.is_finite()
    }

    /// Samples whose value is neither the sentinel nor NaN, in source order.
    pub fn valid_samples(&self) -> Vec<Sample> {
        self.depth
            .iter()
            .zip(&self.value)
            .filter(|(&d, &v)| self.is_valid(d, v))
            .map(|(&depth, &value)| Sample { depth, value })
            .collect()
    }

    pub fn is_empty_valid(&self) -> bool {
        !self
            .depth
            .iter()
            .zip(&self.value)
            .any(|(&d, &v)| self.is_valid(d, v))
    }

    /// Depth window `[min, max]`, either bound optional. Invalid samples are
    /// kept so the result is still a faithful copy of the source.
    #[must_use]
    pub fn filter_depth(&self, min: Option<f64>, max: Option<f64>) -> Self {
        let keep = |d: f64| min.map_or(true, |m| d >= m) && max.map_or(true, |m| d <= m);
        let (depth, value) = self
            .depth
            .iter()
            .zip(&self.value)
            .filter(|(&d, _)| keep(d))
            .map(|(&d, &v)| (d, v))
            .unzip();
        Self {
            depth,
            value,
            null_sentinel: self.null_sentinel,
        }
    }

    pub fn class_counts(&self) -> ClassCounts {
        self.valid_samples()
            .iter()
            .fold(ClassCounts::default(), |mut c, s| {
                if s.value == 1.0 {
                    c.collector += 1;
                } else if s.value == 0.0 {
                    c.non_collector += 1;
                } else {
                    c.other += 1;
                }
                c
            })
    }
}
