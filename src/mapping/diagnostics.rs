//! MD mapping diagnostics.
//!
//! Summarises how well a curve lines up with its trajectory before any
//! segments are drawn: ranges, verticality, containment offsets, and the
//! interpolated elevation span against the expected thickness.

use crate::config::MappingConfig;
use crate::types::{ClassCounts, LogCurve, Trajectory, WellAttributes};
use serde::Serialize;
use tracing::{info, warn};

/// Interpolated Z span compared with the expected thickness H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThicknessVerdict {
    Ok,
    Notable,
    Severe,
}

impl ThicknessVerdict {
    /// `|span - H|` against `warning_ratio * H` and `severe_ratio * H`.
    pub fn classify(span: f64, thickness: f64, warning_ratio: f64, severe_ratio: f64) -> Self {
        let diff = (span - thickness).abs();
        if diff > severe_ratio * thickness {
            Self::Severe
        } else if diff > warning_ratio * thickness {
            Self::Notable
        } else {
            Self::Ok
        }
    }
}

/// Range containment of the curve within the trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Containment {
    pub contained: bool,
    /// `d_min - md_min`; negative when the curve starts above the trajectory
    pub start_offset: f64,
    /// `md_max - d_max`; negative when the curve runs past the trajectory
    pub end_offset: f64,
}

/// Thickness comparison, present when attributes are known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThicknessCheck {
    pub expected: f64,
    pub interpolated_span: f64,
    pub difference: f64,
    pub verdict: ThicknessVerdict,
}

/// Per-well MD mapping report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdMappingCheck {
    pub well_id: String,
    pub stations: usize,
    pub md_range: Option<(f64, f64)>,
    pub z_range: Option<(f64, f64)>,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub sigma_x: f64,
    pub sigma_y: f64,
    pub vertical: bool,
    pub valid_samples: usize,
    pub classes: ClassCounts,
    pub curve_depth_range: Option<(f64, f64)>,
    pub containment: Option<Containment>,
    pub interpolated_z_span: Option<f64>,
    pub thickness: Option<ThicknessCheck>,
}

impl MdMappingCheck {
    pub fn run(
        well_id: &str,
        trajectory: &Trajectory,
        curve: &LogCurve,
        attributes: Option<&WellAttributes>,
        config: &MappingConfig,
    ) -> Self {
        let (sigma_x, sigma_y) = trajectory.xy_sigma();
        let samples = curve.valid_samples();
        let curve_depth_range = samples.iter().fold(None, |acc: Option<(f64, f64)>, s| {
            Some(match acc {
                None => (s.depth, s.depth),
                Some((lo, hi)) => (lo.min(s.depth), hi.max(s.depth)),
            })
        });

        let tol = config.resolver.range_tolerance;
        let containment = match (trajectory.md_range(), curve_depth_range) {
            (Some((m_min, m_max)), Some((d_min, d_max))) => Some(Containment {
                contained: d_min >= m_min - tol && d_max <= m_max + tol,
                start_offset: d_min - m_min,
                end_offset: m_max - d_max,
            }),
            _ => None,
        };

        // span of the trajectory between the curve's end depths
        let interpolated_z_span = match curve_depth_range {
            Some((d_min, d_max)) if trajectory.is_usable() => {
                match (trajectory.interpolate(d_min), trajectory.interpolate(d_max)) {
                    (Some(top), Some(base)) => Some((top.z - base.z).abs()),
                    _ => None,
                }
            }
            _ => None,
        };

        let d = &config.diagnostics;
        let thickness = match (attributes, interpolated_z_span) {
            (Some(a), Some(span)) if a.thickness > 0.0 => Some(ThicknessCheck {
                expected: a.thickness,
                interpolated_span: span,
                difference: span - a.thickness,
                verdict: ThicknessVerdict::classify(
                    span,
                    a.thickness,
                    d.thickness_warning_ratio,
                    d.thickness_severe_ratio,
                ),
            }),
            _ => None,
        };

        Self {
            well_id: well_id.to_string(),
            stations: trajectory.len(),
            md_range: trajectory.md_range(),
            z_range: trajectory.z_range(),
            x_range: trajectory.x_range(),
            y_range: trajectory.y_range(),
            sigma_x,
            sigma_y,
            vertical: trajectory.is_vertical(config.resolver.vertical_xy_sigma),
            valid_samples: samples.len(),
            classes: curve.class_counts(),
            curve_depth_range,
            containment,
            interpolated_z_span,
            thickness,
        }
    }

    /// Log a one-line summary, at `warn` when something looks off.
    pub fn log(&self) {
        let contained = self.containment.map(|c| c.contained);
        let verdict = self.thickness.map(|t| t.verdict);
        let suspicious = contained == Some(false)
            || matches!(verdict, Some(ThicknessVerdict::Notable | ThicknessVerdict::Severe))
            || self.valid_samples == 0;

        if suspicious {
            warn!(
                well = %self.well_id,
                stations = self.stations,
                vertical = self.vertical,
                valid = self.valid_samples,
                contained = ?contained,
                z_span = ?self.interpolated_z_span,
                thickness = ?verdict,
                "MD mapping check"
            );
        } else {
            info!(
                well = %self.well_id,
                stations = self.stations,
                vertical = self.vertical,
                valid = self.valid_samples,
                z_span = ?self.interpolated_z_span,
                "MD mapping check"
            );
        }
    }
}
