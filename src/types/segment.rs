//! Classified samples and run-length encoded segments.

use super::Point3;
use serde::{Deserialize, Serialize};

/// Binary classification of a rock interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorClass {
    NonCollector,
    Collector,
}

impl CollectorClass {
    /// Classify a binary curve value. Anything other than exactly 0 or 1 is
    /// malformed and yields `None`.
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(Self::Collector)
        } else if value == 0.0 {
            Some(Self::NonCollector)
        } else {
            None
        }
    }

    pub const fn as_value(self) -> u8 {
        match self {
            Self::NonCollector => 0,
            Self::Collector => 1,
        }
    }
}

/// A valid sample with its resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatedSample {
    pub md: f64,
    pub value: f64,
    pub position: Point3,
}

/// A maximal run of one class along a well's depth axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub class: CollectorClass,
    pub md_start: f64,
    pub md_end: f64,
    pub start: Point3,
    pub end: Point3,
    /// Number of original samples in the run
    pub sample_count: usize,
}

impl Segment {
    pub fn is_collector(&self) -> bool {
        self.class == CollectorClass::Collector
    }

    /// Absolute MD extent of the run.
    pub fn md_length(&self) -> f64 {
        (self.md_end - self.md_start).abs()
    }
}

/// A classified 3-D point, the unit the profile projector works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub well_id: String,
    pub position: Point3,
    pub class: CollectorClass,
}
