//! Summary statistics over predictions from several wells.

use super::Prediction;
use serde::Serialize;
use statrs::statistics::Statistics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionStats {
    pub total_points: usize,
    pub mean_prediction: f64,
    /// Population standard deviation
    pub std_prediction: f64,
    pub collector_ratio_mean: f64,
    pub collector_ratio_std: f64,
    pub num_wells: usize,
}

impl PredictionStats {
    /// `None` when there are no predictions at all.
    pub fn compute(predictions: &[Prediction]) -> Option<Self> {
        if predictions.is_empty() {
            return None;
        }

        let all: Vec<f64> = predictions
            .iter()
            .flat_map(|p| p.value.iter().copied())
            .collect();
        let ratios: Vec<f64> = predictions.iter().map(Prediction::collector_ratio).collect();

        let (mean_prediction, std_prediction) = if all.is_empty() {
            (0.0, 0.0)
        } else {
            (all.iter().mean(), all.iter().population_std_dev())
        };

        Some(Self {
            total_points: all.len(),
            mean_prediction,
            std_prediction,
            collector_ratio_mean: ratios.iter().mean(),
            collector_ratio_std: ratios.iter().population_std_dev(),
            num_wells: predictions.len(),
        })
    }
}
