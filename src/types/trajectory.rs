//! Wellbore trajectory: an ordered polyline of stations keyed by measured depth.

use crate::config::defaults::MAX_SAMPLE_COUNT;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

/// A single survey station along the wellbore.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Measured depth along the bore
    pub md: f64,
}

impl Station {
    pub const fn new(x: f64, y: f64, z: f64, md: f64) -> Self {
        Self { x, y, z, md }
    }

    pub const fn point(&self) -> Point3 {
        Point3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// Spatial coordinate produced by interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("station {index} has a non-finite coordinate")]
    NonFiniteStation { index: usize },

    #[error("vertical well must go down: z_bottom ({z_bottom}) >= z_top ({z_top})")]
    NotDescending { z_top: f64, z_bottom: f64 },

    #[error("station spacing must be positive, got {0}")]
    InvalidSpacing(f64),

    #[error("spacing {spacing} over length {length} needs more than {} stations", MAX_SAMPLE_COUNT)]
    TooManyStations { length: f64, spacing: f64 },
}

/// Immutable trajectory snapshot.
///
/// Stations are kept in MD order. If the producer handed them over out of
/// order they are stably re-sorted and `md_reordered()` reports it, so the
/// mapping layer can flag the well instead of interpolating garbage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    stations: Vec<Station>,
    md_reordered: bool,
}

impl Trajectory {
    /// Build a trajectory from stations. Non-finite values are rejected here,
    /// not at point of use.
    pub fn new(mut stations: Vec<Station>) -> Result<Self, TrajectoryError> {
        if let Some(index) = stations
            .iter()
            .position(|s| !(s.x.is_finite() && s.y.is_finite() && s.z.is_finite() && s.md.is_finite()))
        {
            return Err(TrajectoryError::NonFiniteStation { index });
        }

        let md_reordered = stations.windows(2).any(|w| w[1].md < w[0].md);
        if md_reordered {
            stations.sort_by(|a, b| a.md.total_cmp(&b.md));
        }

        Ok(Self {
            stations,
            md_reordered,
        })
    }

    /// Build from raw `[x, y, z, md]` rows as produced by the file loaders.
    pub fn from_rows(rows: &[[f64; 4]]) -> Result<Self, TrajectoryError> {
        Self::new(
            rows.iter()
                .map(|r| Station::new(r[0], r[1], r[2], r[3]))
                .collect(),
        )
    }

    /// Synthetic vertical well: constant X/Y, Z linearly spaced from `z_top`
    /// down to `z_bottom`, MD running from 0 to the vertical length.
    pub fn vertical(
        x: f64,
        y: f64,
        z_top: f64,
        z_bottom: f64,
        spacing: f64,
    ) -> Result<Self, TrajectoryError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(TrajectoryError::InvalidSpacing(spacing));
        }
        if z_bottom >= z_top {
            return Err(TrajectoryError::NotDescending { z_top, z_bottom });
        }

        let length = (z_top - z_bottom).abs();
        let count = step_count(length, spacing)
            .ok_or(TrajectoryError::TooManyStations { length, spacing })?
            .max(2);
        let last = (count - 1) as f64;

        let stations = (0..count)
            .map(|i| {
                let f = i as f64 / last;
                Station::new(x, y, z_top + (z_bottom - z_top) * f, length * f)
            })
            .collect();
        Self::new(stations)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// At least two stations are needed to interpolate anything.
    pub fn is_usable(&self) -> bool {
        self.stations.len() >= 2
    }

    /// True when the producer supplied stations with decreasing MD.
    pub const fn md_reordered(&self) -> bool {
        self.md_reordered
    }

    pub fn head(&self) -> Option<&Station> {
        self.stations.first()
    }

    /// `(md_min, md_max)`, `None` for an empty trajectory.
    pub fn md_range(&self) -> Option<(f64, f64)> {
        Some((self.stations.first()?.md, self.stations.last()?.md))
    }

    /// `(z_min, z_max)` over all stations.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        min_max(self.stations.iter().map(|s| s.z))
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        min_max(self.stations.iter().map(|s| s.x))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        min_max(self.stations.iter().map(|s| s.y))
    }

    /// `md_max - md_min`, zero for an empty trajectory.
    pub fn length(&self) -> f64 {
        self.md_range().map_or(0.0, |(lo, hi)| hi - lo)
    }

    /// Population standard deviation of station X and Y.
    pub fn xy_sigma(&self) -> (f64, f64) {
        if self.stations.is_empty() {
            return (0.0, 0.0);
        }
        (
            self.stations.iter().map(|s| s.x).population_std_dev(),
            self.stations.iter().map(|s| s.y).population_std_dev(),
        )
    }

    /// Degenerate (vertical) well: both X and Y spread below `sigma_threshold`.
    pub fn is_vertical(&self, sigma_threshold: f64) -> bool {
        let (sx, sy) = self.xy_sigma();
        sx < sigma_threshold && sy < sigma_threshold
    }

    /// Linear interpolation of the position at `md`.
    ///
    /// Queries outside `[md_min, md_max]` clamp to the nearest end station.
    /// Returns `None` only for an empty trajectory.
    pub fn interpolate(&self, md: f64) -> Option<Point3> {
        let first = self.stations.first()?;
        let last = self.stations.last()?;

        // first station strictly deeper than the query
        let upper = self.stations.partition_point(|s| s.md <= md);
        if upper == 0 {
            return Some(first.point());
        }
        if upper == self.stations.len() {
            return Some(last.point());
        }

        let a = &self.stations[upper - 1];
        let b = &self.stations[upper];
        // b.md > md >= a.md, so the span is never zero
        let t = (md - a.md) / (b.md - a.md);
        Some(Point3 {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            z: a.z + (b.z - a.z) * t,
        })
    }

    /// Resample at a fixed MD step over `[md_min, md_max)`.
    pub fn resample(&self, step: f64) -> Self {
        let Some((lo, hi)) = self.md_range() else {
            return self.clone();
        };
        if !self.is_usable() || !(step.is_finite() && step > 0.0) {
            return self.clone();
        }
        let Some(count) = step_count(hi - lo, step) else {
            return self.clone();
        };

        let stations = (0..count)
            .map(|i| lo + i as f64 * step)
            .take_while(|&md| md < hi)
            .filter_map(|md| {
                self.interpolate(md)
                    .map(|p| Station::new(p.x, p.y, p.z, md))
            })
            .collect();

        Self {
            stations,
            md_reordered: self.md_reordered,
        }
    }
}

/// `floor(range / step) + 1`, or `None` when that is not a finite count
/// within `MAX_SAMPLE_COUNT`.
pub fn step_count(range: f64, step: f64) -> Option<usize> {
    let steps = (range / step).floor();
    if !(steps.is_finite() && steps >= 0.0 && steps < MAX_SAMPLE_COUNT as f64) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = steps as usize;
    Some(steps + 1)
}

pub(crate) fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
