//! Per-well mapping and multi-well cross-sections.
//!
//! Each well is an independent pure computation. Problems with one well are
//! recorded on its report and never stop the others.

use super::extractor::SegmentExtractor;
use super::projector::{Profile, ProfileError, ProfileProjector, ProjectedPoint};
use super::resolver::ElevationResolver;
use crate::config::MappingConfig;
use crate::types::{MappingIssue, WellInput, WellLocation, WellReport};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Map one well: resolve elevations, run-length encode, expand to points.
pub fn map_well(input: &WellInput, config: &MappingConfig) -> WellReport {
    let mut report = WellReport::empty(&input.well_id);
    let trajectory = &input.trajectory;

    if trajectory.md_reordered() {
        warn!(well = %input.well_id, "Trajectory MD not monotonic, stations re-sorted");
        report.issues.push(MappingIssue::NonMonotonicMd);
    }

    if !trajectory.is_usable() {
        warn!(well = %input.well_id, stations = trajectory.len(), "Trajectory unusable, no segments");
        report.issues.push(MappingIssue::EmptyTrajectory {
            stations: trajectory.len(),
        });
        return report;
    }

    let samples = input.curve.valid_samples();
    if samples.is_empty() {
        warn!(well = %input.well_id, "Curve has no valid samples, no segments");
        report.issues.push(MappingIssue::EmptyCurve);
        return report;
    }

    let resolution =
        ElevationResolver::resolve(trajectory, &samples, input.anchor, &config.resolver);
    let extraction = SegmentExtractor::encode(&resolution.located);

    if resolution.skipped > 0 {
        warn!(
            well = %input.well_id,
            skipped = resolution.skipped,
            "Curve samples outside trajectory MD range were not located"
        );
    }
    if resolution.low_confidence {
        warn!(
            well = %input.well_id,
            strategy = ?resolution.strategy,
            z_spread = resolution.z_spread,
            "Low-confidence elevation mapping"
        );
    }

    report.issues.extend(resolution.issues);
    if extraction.malformed > 0 {
        debug!(well = %input.well_id, count = extraction.malformed, "Skipped non-binary samples");
        report.issues.push(MappingIssue::MalformedSample {
            count: extraction.malformed,
        });
    }

    report.points = SegmentExtractor::classify(&input.well_id, &resolution.located);
    report.segments = extraction.segments;
    report.strategy = Some(resolution.strategy);
    report.low_confidence = resolution.low_confidence;

    debug!(
        well = %input.well_id,
        segments = report.segments.len(),
        points = report.points.len(),
        "Well mapped"
    );
    report
}

/// Map all wells in parallel. Reports come back in input order.
pub fn map_wells(inputs: &[WellInput], config: &MappingConfig) -> Vec<WellReport> {
    let reports: Vec<WellReport> = inputs.par_iter().map(|w| map_well(w, config)).collect();
    let flagged = reports.iter().filter(|r| !r.issues.is_empty()).count();
    info!(wells = reports.len(), flagged = flagged, "Batch mapping complete");
    reports
}

/// Points one well contributed to a cross-section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellContribution {
    pub well_id: String,
    pub points: usize,
    pub low_confidence: bool,
    /// Well produced nothing to project (empty trajectory/curve etc.)
    pub unmapped: bool,
}

/// Projected points of every well onto one profile.
#[derive(Debug, Clone, Serialize)]
pub struct CrossSection {
    pub profile: Profile,
    pub corridor_width: f64,
    pub points: Vec<ProjectedPoint>,
    pub contributions: Vec<WellContribution>,
}

impl CrossSection {
    /// Build a profile through `locations` (caller order) and project the
    /// points of all `reports` onto it, not only the profile wells.
    pub fn build(
        locations: Vec<WellLocation>,
        reports: &[WellReport],
        corridor_width: f64,
    ) -> Result<Self, ProfileError> {
        let projector = ProfileProjector::new(Profile::new(locations)?, corridor_width)?;

        let mut points = Vec::new();
        let mut contributions = Vec::with_capacity(reports.len());
        for report in reports {
            let projected = projector.project(&report.points);
            contributions.push(WellContribution {
                well_id: report.well_id.clone(),
                points: projected.len(),
                low_confidence: report.low_confidence,
                unmapped: report.points.is_empty(),
            });
            points.extend(projected);
        }

        info!(
            length = projector.profile().total_length(),
            corridor = corridor_width,
            points = points.len(),
            "Cross-section built"
        );

        Ok(Self {
            profile: projector.profile().clone(),
            corridor_width,
            points,
            contributions,
        })
    }

    /// Wells that put at least one point on the section.
    pub fn contributing_wells(&self) -> impl Iterator<Item = &str> {
        self.contributions
            .iter()
            .filter(|c| c.points > 0)
            .map(|c| c.well_id.as_str())
    }
}
