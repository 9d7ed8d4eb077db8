//! Cross-Section Profile Projection
//!
//! A profile is an ordered polyline through well locations, parameterized by
//! cumulative XY arc length. Classified points from any well are projected
//! onto the nearest leg (clamped point-to-segment projection) and kept when
//! their perpendicular distance is within the corridor, boundary inclusive.
//!
//! Ties in distance go to the first leg in polyline order. Output keeps the
//! input point order, so points from different wells landing on the same arc
//! length stay in the order the caller supplied them.

use crate::types::{ClassifiedPoint, WellLocation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("profile needs at least 2 wells, got {0}")]
    TooFewVertices(usize),

    #[error("profile vertex '{0}' has a non-finite coordinate")]
    NonFiniteVertex(String),

    #[error("corridor width must be positive and finite, got {0}")]
    InvalidCorridor(f64),
}

/// Closest point on a profile for a query location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileHit {
    /// Arc length of the projection, in `[0, total_length]`
    pub arc_length: f64,
    /// XY distance from the query to the projection
    pub distance: f64,
    /// Index of the leg the projection falls on
    pub leg: usize,
}

/// One classified sample placed on a cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub arc_length: f64,
    pub elevation: f64,
    /// 0 or 1
    pub value: u8,
    pub source_well: String,
}

/// Ordered polyline with cumulative arc length at every vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    vertices: Vec<WellLocation>,
    cumulative: Vec<f64>,
}

impl Profile {
    pub fn new(vertices: Vec<WellLocation>) -> Result<Self, ProfileError> {
        if vertices.len() < 2 {
            return Err(ProfileError::TooFewVertices(vertices.len()));
        }
        if let Some(bad) = vertices
            .iter()
            .find(|v| !(v.x.is_finite() && v.y.is_finite() && v.z_top.is_finite()))
        {
            return Err(ProfileError::NonFiniteVertex(bad.well_id.clone()));
        }

        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in vertices.windows(2) {
            total += (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y);
            cumulative.push(total);
        }

        Ok(Self {
            vertices,
            cumulative,
        })
    }

    pub fn vertices(&self) -> &[WellLocation] {
        &self.vertices
    }

    /// Arc length at each vertex, starting at 0.
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Nearest point on the polyline to `(x, y)`.
    ///
    /// Legs are scanned in order and only a strictly smaller distance
    /// replaces the current best. Zero-length legs (two wells at the same
    /// location) project to their start.
    pub fn project(&self, x: f64, y: f64) -> ProfileHit {
        let mut best = ProfileHit {
            arc_length: 0.0,
            distance: f64::INFINITY,
            leg: 0,
        };

        for (leg, pair) in self.vertices.windows(2).enumerate() {
            let (ax, ay) = (pair[0].x, pair[0].y);
            let (dx, dy) = (pair[1].x - ax, pair[1].y - ay);
            let len_sq = dx * dx + dy * dy;

            let t = if len_sq > 0.0 {
                (((x - ax) * dx + (y - ay) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (px, py) = (ax + t * dx, ay + t * dy);
            let distance = (x - px).hypot(y - py);

            if distance < best.distance {
                best = ProfileHit {
                    arc_length: self.cumulative[leg] + t * len_sq.sqrt(),
                    distance,
                    leg,
                };
            }
        }

        best
    }
}

/// A profile plus the corridor that filters points onto it.
#[derive(Debug, Clone)]
pub struct ProfileProjector {
    profile: Profile,
    corridor_width: f64,
}

impl ProfileProjector {
    pub fn new(profile: Profile, corridor_width: f64) -> Result<Self, ProfileError> {
        if !(corridor_width.is_finite() && corridor_width > 0.0) {
            return Err(ProfileError::InvalidCorridor(corridor_width));
        }
        Ok(Self {
            profile,
            corridor_width,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub const fn corridor_width(&self) -> f64 {
        self.corridor_width
    }

    /// Project one point; `None` when it lies outside the corridor.
    pub fn project_point(&self, point: &ClassifiedPoint) -> Option<ProjectedPoint> {
        let hit = self.profile.project(point.position.x, point.position.y);
        (hit.distance <= self.corridor_width).then(|| ProjectedPoint {
            arc_length: hit.arc_length,
            elevation: point.position.z,
            value: point.class.as_value(),
            source_well: point.well_id.clone(),
        })
    }

    /// Project every point, keeping input order.
    pub fn project<'a>(
        &self,
        points: impl IntoIterator<Item = &'a ClassifiedPoint>,
    ) -> Vec<ProjectedPoint> {
        points
            .into_iter()
            .filter_map(|p| self.project_point(p))
            .collect()
    }
}
