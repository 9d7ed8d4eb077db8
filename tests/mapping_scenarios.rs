//! Mapping Scenario Tests
//!
//! End-to-end checks of the depth-to-space pipeline through the public API:
//! segment extraction on real-shaped inputs, the elevation fallback path,
//! profile projection and corridor filtering, and the structural properties
//! (partition, containment, determinism) every well must satisfy.

use well_section::config::MappingConfig;
use well_section::mapping::{
    map_well, map_wells, CrossSection, Profile, ProfileProjector, SegmentExtractor,
};
use well_section::types::{
    ClassifiedPoint, CollectorClass, ElevationAnchor, ElevationStrategy, LogCurve, MappingIssue,
    Point3, Trajectory, WellInput, WellLocation,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn straight_down() -> Trajectory {
    Trajectory::from_rows(&[[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, -100.0, 100.0]]).unwrap()
}

fn input(trajectory: Trajectory, depth: Vec<f64>, value: Vec<f64>) -> WellInput {
    WellInput {
        well_id: "W".to_string(),
        trajectory,
        curve: LogCurve::with_default_sentinel(depth, value).unwrap(),
        anchor: None,
    }
}

fn loc(id: &str, x: f64, y: f64) -> WellLocation {
    WellLocation {
        well_id: id.to_string(),
        x,
        y,
        z_top: 0.0,
    }
}

fn point_at(x: f64, y: f64) -> ClassifiedPoint {
    ClassifiedPoint {
        well_id: "P".to_string(),
        position: Point3::new(x, y, -10.0),
        class: CollectorClass::Collector,
    }
}

/// Deviated three-station trajectory used by the property tests.
fn deviated() -> Trajectory {
    Trajectory::from_rows(&[
        [0.0, 0.0, 0.0, 0.0],
        [30.0, 40.0, -50.0, 80.0],
        [90.0, 120.0, -90.0, 200.0],
    ])
    .unwrap()
}

// ============================================================================
// Worked scenarios
// ============================================================================

#[test]
fn scenario_two_runs_on_straight_well() {
    let report = map_well(
        &input(straight_down(), vec![0.0, 50.0, 51.0, 100.0], vec![1.0, 1.0, 0.0, 0.0]),
        &MappingConfig::default(),
    );

    assert_eq!(report.segments.len(), 2);
    let first = &report.segments[0];
    assert_eq!(first.class, CollectorClass::Collector);
    assert_eq!((first.md_start, first.md_end), (0.0, 50.0));
    assert!(close(first.start.z, 0.0));
    assert!(close(first.end.z, -50.0));

    let second = &report.segments[1];
    assert_eq!(second.class, CollectorClass::NonCollector);
    assert_eq!((second.md_start, second.md_end), (51.0, 100.0));
    // segment ends are the interpolated positions of its first and last sample
    assert!(close(second.start.z, -51.0));
    assert!(close(second.end.z, -100.0));
    assert!(report.issues.is_empty());
}

#[test]
fn scenario_sentinel_excluded_from_runs() {
    let report = map_well(
        &input(
            straight_down(),
            vec![0.0, 10.0, 20.0, 30.0, 40.0],
            vec![1.0, 1.0, -999.25, 0.0, 0.0],
        ),
        &MappingConfig::default(),
    );
    assert_eq!(report.segments.len(), 2);
    assert_eq!(report.segments[0].sample_count, 2);
    assert_eq!(report.segments[1].sample_count, 2);
    assert_eq!(report.segments[0].md_end, 10.0);
    assert_eq!(report.segments[1].md_start, 30.0);
    assert_eq!(report.points.len(), 4);
}

#[test]
fn scenario_disjoint_ranges_fall_back_to_anchor() {
    let mut well = input(
        straight_down(),
        vec![150.0, 160.0, 170.0, 200.0],
        vec![1.0, 1.0, 0.0, 0.0],
    );
    well.anchor = Some(ElevationAnchor {
        z_top: -1500.0,
        thickness: 10.0,
    });

    let report = map_well(&well, &MappingConfig::default());
    assert_eq!(report.strategy, Some(ElevationStrategy::Fallback));
    assert!(report.low_confidence);
    assert!(report.has_issue(|i| matches!(i, MappingIssue::LowConfidenceMapping { .. })));
    assert!(report.has_issue(|i| matches!(i, MappingIssue::RangeMismatch { .. })));
    assert!(close(report.segments[0].start.z, -1500.0));
    assert!(close(report.segments[1].end.z, -1510.0));
}

#[test]
fn scenario_profile_projection_and_corridor() {
    let profile = Profile::new(vec![
        loc("A", 0.0, 0.0),
        loc("B", 1000.0, 0.0),
        loc("C", 1000.0, 1000.0),
    ])
    .unwrap();

    let hit = profile.project(500.0, 50.0);
    assert_eq!(hit.leg, 0);
    assert!(close(hit.arc_length, 500.0));
    assert!(close(hit.distance, 50.0));

    let pts = [point_at(500.0, 50.0)];
    let wide = ProfileProjector::new(profile.clone(), 50.0).unwrap();
    assert_eq!(wide.project(&pts).len(), 1);
    let narrow = ProfileProjector::new(profile, 49.0).unwrap();
    assert!(narrow.project(&pts).is_empty());
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn segments_partition_valid_samples() {
    let depth: Vec<f64> = (0..40).map(|i| f64::from(i) * 5.0).collect();
    let value: Vec<f64> = (0..40)
        .map(|i| match i % 7 {
            0 | 1 | 2 => 1.0,
            3 => -999.25,
            _ => 0.0,
        })
        .collect();
    let curve = LogCurve::with_default_sentinel(depth, value).unwrap();
    let valid = curve.valid_samples();
    let extraction = SegmentExtractor::extract(&deviated(), &valid);

    let total: usize = extraction.segments.iter().map(|s| s.sample_count).sum();
    assert_eq!(total, valid.len());

    // every valid sample depth lies in exactly one segment
    for s in &valid {
        let owners = extraction
            .segments
            .iter()
            .filter(|seg| s.depth >= seg.md_start && s.depth <= seg.md_end)
            .count();
        assert_eq!(owners, 1, "depth {} owned by {owners} segments", s.depth);
    }

    // segments are disjoint and ordered along MD
    for pair in extraction.segments.windows(2) {
        assert!(pair[0].md_end < pair[1].md_start);
    }
}

#[test]
fn interpolation_stays_between_bracketing_stations() {
    let traj = deviated();
    let stations = traj.stations();
    for pair in stations.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        for k in 0..=10 {
            let md = a.md + (b.md - a.md) * f64::from(k) / 10.0;
            let p = traj.interpolate(md).unwrap();
            for (v, lo, hi) in [(p.x, a.x, b.x), (p.y, a.y, b.y), (p.z, a.z, b.z)] {
                let (lo, hi) = (lo.min(hi), lo.max(hi));
                assert!(v >= lo - EPS && v <= hi + EPS, "md {md}: {v} outside [{lo}, {hi}]");
            }
        }
    }
}

#[test]
fn extraction_is_deterministic() {
    let curve = LogCurve::with_default_sentinel(
        vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0],
        vec![0.0, 1.0, 1.0, 0.5, 0.0, 1.0],
    )
    .unwrap();
    let a = SegmentExtractor::extract(&deviated(), &curve.valid_samples());
    let b = SegmentExtractor::extract(&deviated(), &curve.valid_samples());
    assert_eq!(a, b);
    assert_eq!(a.malformed, 1);
}

#[test]
fn corridor_boundary_is_inclusive() {
    let profile = Profile::new(vec![loc("A", 0.0, 0.0), loc("B", 100.0, 0.0)]).unwrap();
    let projector = ProfileProjector::new(profile, 25.0).unwrap();
    assert!(projector.project_point(&point_at(40.0, 25.0)).is_some());
    assert!(projector.project_point(&point_at(40.0, 25.0 + 1e-6)).is_none());
}

#[test]
fn projected_arc_length_within_profile() {
    let profile = Profile::new(vec![
        loc("A", 0.0, 0.0),
        loc("B", 300.0, 400.0),
        loc("C", 600.0, 0.0),
    ])
    .unwrap();
    let total = profile.total_length();
    assert!(close(total, 1000.0));
    let projector = ProfileProjector::new(profile, 10_000.0).unwrap();
    let pts: Vec<ClassifiedPoint> = [(-500.0, -500.0), (300.0, 900.0), (2000.0, 0.0), (450.0, 200.0)]
        .iter()
        .map(|&(x, y)| point_at(x, y))
        .collect();
    for p in projector.project(&pts) {
        assert!(p.arc_length >= 0.0 && p.arc_length <= total + EPS);
    }
}

// ============================================================================
// Batch behavior
// ============================================================================

#[test]
fn unordered_trajectory_is_flagged_not_rejected() {
    let traj = Trajectory::from_rows(&[
        [0.0, 0.0, -100.0, 100.0],
        [0.0, 0.0, 0.0, 0.0],
    ])
    .unwrap();
    let report = map_well(
        &input(traj, vec![25.0, 75.0], vec![1.0, 0.0]),
        &MappingConfig::default(),
    );
    assert!(report.has_issue(|i| *i == MappingIssue::NonMonotonicMd));
    assert_eq!(report.segments.len(), 2);
    assert!(close(report.segments[0].start.z, -25.0));
}

#[test]
fn cross_section_uses_all_wells() {
    let mut near = input(
        Trajectory::vertical(500.0, 20.0, 0.0, -50.0, 10.0).unwrap(),
        vec![0.0, 25.0, 50.0],
        vec![1.0, 0.0, 1.0],
    );
    near.well_id = "OFF_PROFILE".to_string();
    let on = input(
        Trajectory::vertical(0.0, 0.0, 0.0, -50.0, 10.0).unwrap(),
        vec![0.0, 50.0],
        vec![0.0, 0.0],
    );
    let broken = WellInput {
        well_id: "BROKEN".to_string(),
        trajectory: Trajectory::default(),
        curve: LogCurve::with_default_sentinel(vec![0.0], vec![1.0]).unwrap(),
        anchor: None,
    };

    let reports = map_wells(&[on, near, broken], &MappingConfig::default());
    let section = CrossSection::build(
        vec![loc("W", 0.0, 0.0), loc("E", 1000.0, 0.0)],
        &reports,
        250.0,
    )
    .unwrap();

    assert_eq!(section.points.len(), 5);
    assert_eq!(section.contributions.len(), 3);
    assert!(section.contributions[2].unmapped);
    let off: Vec<_> = section
        .points
        .iter()
        .filter(|p| p.source_well == "OFF_PROFILE")
        .collect();
    assert_eq!(off.len(), 3);
    assert!(off.iter().all(|p| close(p.arc_length, 500.0)));
}
