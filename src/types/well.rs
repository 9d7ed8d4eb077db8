//! Per-well attributes and the mapping input bundle.

use super::{LogCurve, Trajectory};
use serde::{Deserialize, Serialize};

/// Reservoir attributes for a well: top elevation, gross thickness (H) and
/// effective (collector) thickness (EFF_H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellAttributes {
    pub well_id: String,
    pub x: f64,
    pub y: f64,
    pub z_top: f64,
    pub thickness: f64,
    pub effective_thickness: f64,
}

impl WellAttributes {
    /// EFF_H / H, zero when H is not positive.
    pub fn collector_ratio(&self) -> f64 {
        if self.thickness > 0.0 {
            self.effective_thickness / self.thickness
        } else {
            0.0
        }
    }

    pub fn location(&self) -> WellLocation {
        WellLocation {
            well_id: self.well_id.clone(),
            x: self.x,
            y: self.y,
            z_top: self.z_top,
        }
    }

    /// Top and thickness in the form the elevation resolver needs.
    pub const fn anchor(&self) -> ElevationAnchor {
        ElevationAnchor {
            z_top: self.z_top,
            thickness: self.thickness,
        }
    }
}

/// Top elevation and top-minus-base thickness used by the linear fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationAnchor {
    pub z_top: f64,
    pub thickness: f64,
}

impl ElevationAnchor {
    /// Finite top and a positive finite thickness.
    pub fn is_usable(&self) -> bool {
        self.z_top.is_finite() && self.thickness.is_finite() && self.thickness > 0.0
    }
}

/// Surface/top reference point of a well on a cross-section profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLocation {
    pub well_id: String,
    pub x: f64,
    pub y: f64,
    pub z_top: f64,
}

/// Everything the mapper needs for one well.
#[derive(Debug, Clone)]
pub struct WellInput {
    pub well_id: String,
    pub trajectory: Trajectory,
    pub curve: LogCurve,
    pub anchor: Option<ElevationAnchor>,
}
