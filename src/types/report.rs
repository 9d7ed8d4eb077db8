//! Per-well mapping outcome: segments, classified points, and the non-fatal
//! issues raised along the way.

use super::{ClassifiedPoint, CollectorClass, Segment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How depth was turned into elevation for a well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElevationStrategy {
    /// Trajectory interpolation. `md_offset` is subtracted from curve depths
    /// before lookup (zero when the ranges already agree).
    Direct { md_offset: f64 },
    /// Linear top/thickness approximation.
    Fallback,
    /// Every available path collapsed to (near) constant elevation.
    Degenerate,
}

impl ElevationStrategy {
    pub const fn is_direct(&self) -> bool {
        matches!(self, Self::Direct { .. })
    }
}

/// Non-fatal conditions. None of these stop a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum MappingIssue {
    #[error("trajectory has {stations} station(s), need at least 2")]
    EmptyTrajectory { stations: usize },

    #[error("curve has no valid samples")]
    EmptyCurve,

    #[error("trajectory stations were not in MD order and have been re-sorted")]
    NonMonotonicMd,

    #[error(
        "curve depth [{curve_min:.2}, {curve_max:.2}] outside trajectory MD [{md_min:.2}, {md_max:.2}], {skipped} sample(s) skipped"
    )]
    RangeMismatch {
        curve_min: f64,
        curve_max: f64,
        md_min: f64,
        md_max: f64,
        skipped: usize,
    },

    #[error("elevation mapping is approximate (z spread {z_spread:.3})")]
    LowConfidenceMapping { z_spread: f64 },

    #[error("{count} sample(s) with values outside {{0, 1}} skipped")]
    MalformedSample { count: usize },
}

/// Everything computed for one well.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WellReport {
    pub well_id: String,
    pub segments: Vec<Segment>,
    /// One entry per located, well-formed sample
    pub points: Vec<ClassifiedPoint>,
    pub strategy: Option<ElevationStrategy>,
    pub low_confidence: bool,
    pub issues: Vec<MappingIssue>,
}

impl WellReport {
    pub fn empty(well_id: &str) -> Self {
        Self {
            well_id: well_id.to_string(),
            ..Self::default()
        }
    }

    /// Total MD covered by collector segments.
    pub fn collector_md(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.class == CollectorClass::Collector)
            .map(Segment::md_length)
            .sum()
    }

    pub fn has_issue(&self, predicate: impl Fn(&MappingIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}
