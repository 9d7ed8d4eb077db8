//! Depth-to-Elevation Resolution
//!
//! Decides per well how curve depths become elevations:
//!
//! 1. Curve depth range inside the trajectory MD range (within tolerance):
//!    direct trajectory interpolation.
//! 2. Otherwise the start offset `d_min - m_min` is compared with the well
//!    thickness. An implausible offset falls back to the linear top/thickness
//!    approximation; a plausible one shifts the curve onto the trajectory.
//!    Without thickness attributes only the overlapping samples are located.
//! 3. A collapsed elevation spread on a deviated trajectory is re-derived
//!    linearly over the curve's MD extent. If that collapses too the result
//!    is degenerate.
//!
//! An anchor whose thickness is not a positive finite number is ignored.
//! When no sample can be located at all the result is degenerate.
//!
//! Anything other than the direct path is low confidence. The resolver never
//! fails; it reports what it did through `ElevationStrategy` and
//! `MappingIssue`.

use crate::config::ResolverConfig;
use crate::types::{
    ElevationAnchor, ElevationStrategy, LocatedSample, MappingIssue, Point3, Sample, Trajectory,
};
use statrs::statistics::Statistics;
use tracing::debug;

/// Outcome of resolving one well.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub strategy: ElevationStrategy,
    /// Samples with a position, in input order
    pub located: Vec<LocatedSample>,
    /// Samples left without a position (outside the trajectory)
    pub skipped: usize,
    /// Population standard deviation of the located elevations
    pub z_spread: f64,
    pub low_confidence: bool,
    pub issues: Vec<MappingIssue>,
}

impl Resolution {
    fn unlocated(skipped: usize) -> Self {
        Self {
            strategy: ElevationStrategy::Degenerate,
            located: Vec::new(),
            skipped,
            z_spread: 0.0,
            low_confidence: skipped > 0,
            issues: Vec::new(),
        }
    }
}

/// Stateless depth-to-elevation policy.
pub struct ElevationResolver;

impl ElevationResolver {
    /// Resolve every sample of one well.
    ///
    /// `anchor` carries the well's top elevation and thickness when known;
    /// it enables the offset plausibility test and the linear fallback.
    pub fn resolve(
        trajectory: &Trajectory,
        samples: &[Sample],
        anchor: Option<ElevationAnchor>,
        config: &ResolverConfig,
    ) -> Resolution {
        let Some((d_min, d_max)) = depth_extent(samples) else {
            return Resolution::unlocated(0);
        };
        let Some((m_min, m_max)) = trajectory.md_range() else {
            return Resolution::unlocated(samples.len());
        };
        let anchor = match anchor {
            Some(a) if !a.is_usable() => {
                debug!(
                    z_top = a.z_top,
                    thickness = a.thickness,
                    "Ignoring anchor without a usable thickness"
                );
                None
            }
            other => other,
        };

        let tol = config.range_tolerance;
        let window = (m_min - tol, m_max + tol);
        let mut issues = Vec::new();

        let (mut strategy, mut located) = if d_min >= window.0 && d_max <= window.1 {
            (
                ElevationStrategy::Direct { md_offset: 0.0 },
                Self::direct(trajectory, samples, 0.0, None),
            )
        } else {
            let offset = d_min - m_min;
            let resolved = match anchor {
                Some(a) if offset.abs() > config.implausible_offset_factor * a.thickness => {
                    debug!(
                        offset = offset,
                        thickness = a.thickness,
                        "Curve offset implausible for thickness, using linear approximation"
                    );
                    Self::linear(trajectory, samples, a.z_top, a.thickness, (d_min, d_max))
                }
                Some(_) => (
                    ElevationStrategy::Direct { md_offset: offset },
                    Self::direct(trajectory, samples, offset, Some(window)),
                ),
                None => (
                    ElevationStrategy::Direct { md_offset: 0.0 },
                    Self::direct(trajectory, samples, 0.0, Some(window)),
                ),
            };
            issues.push(MappingIssue::RangeMismatch {
                curve_min: d_min,
                curve_max: d_max,
                md_min: m_min,
                md_max: m_max,
                skipped: samples.len() - resolved.1.len(),
            });
            resolved
        };

        let mut z_spread = spread(&located);
        if Self::is_collapsed(&located, z_spread, config) {
            if strategy.is_direct() && !trajectory.is_vertical(config.vertical_xy_sigma) {
                // Stations clustered near one elevation; rebuild from the curve extent.
                let z_top = match anchor {
                    Some(a) => a.z_top,
                    None => shallowest_z(&located),
                };
                let thickness = anchor.map_or(d_max - d_min, |a| a.thickness);
                let kept: Vec<Sample> = located
                    .iter()
                    .map(|s| Sample {
                        depth: s.md,
                        value: s.value,
                    })
                    .collect();
                let (rederived, relocated) =
                    Self::linear(trajectory, &kept, z_top, thickness, (d_min, d_max));
                strategy = rederived;
                located = relocated;
                z_spread = spread(&located);
                if Self::is_collapsed(&located, z_spread, config) {
                    strategy = ElevationStrategy::Degenerate;
                }
            } else {
                strategy = ElevationStrategy::Degenerate;
            }
        }
        if located.is_empty() {
            strategy = ElevationStrategy::Degenerate;
        }

        let low_confidence = !strategy.is_direct();
        if low_confidence {
            issues.push(MappingIssue::LowConfidenceMapping { z_spread });
        }

        Resolution {
            strategy,
            skipped: samples.len() - located.len(),
            located,
            z_spread,
            low_confidence,
            issues,
        }
    }

    /// Trajectory interpolation at `depth - offset`. With a window, shifted
    /// depths outside it are skipped instead of clamped.
    fn direct(
        trajectory: &Trajectory,
        samples: &[Sample],
        offset: f64,
        window: Option<(f64, f64)>,
    ) -> Vec<LocatedSample> {
        samples
            .iter()
            .filter_map(|s| {
                let md = s.depth - offset;
                if let Some((lo, hi)) = window {
                    if md < lo || md > hi {
                        return None;
                    }
                }
                trajectory.interpolate(md).map(|position| LocatedSample {
                    md: s.depth,
                    value: s.value,
                    position,
                })
            })
            .collect()
    }

    /// `z = z_top - (depth - d_min) * thickness / (d_max - d_min)`.
    ///
    /// X/Y still come from the (clamped) trajectory. A zero-length depth
    /// extent puts every sample at `z_top` and is degenerate.
    fn linear(
        trajectory: &Trajectory,
        samples: &[Sample],
        z_top: f64,
        thickness: f64,
        (d_min, d_max): (f64, f64),
    ) -> (ElevationStrategy, Vec<LocatedSample>) {
        let span = d_max - d_min;
        let strategy = if span > 0.0 {
            ElevationStrategy::Fallback
        } else {
            ElevationStrategy::Degenerate
        };

        let located = samples
            .iter()
            .filter_map(|s| {
                let z = if span > 0.0 {
                    z_top - (s.depth - d_min) * (thickness / span)
                } else {
                    z_top
                };
                trajectory.interpolate(s.depth).map(|p| LocatedSample {
                    md: s.depth,
                    value: s.value,
                    position: Point3::new(p.x, p.y, z),
                })
            })
            .collect();

        (strategy, located)
    }

    /// Two or more samples over a non-zero MD extent but (near) constant Z.
    fn is_collapsed(located: &[LocatedSample], z_spread: f64, config: &ResolverConfig) -> bool {
        if located.len() < 2 {
            return false;
        }
        match depth_extent_located(located) {
            Some((lo, hi)) if hi > lo => z_spread < config.min_z_spread,
            _ => false,
        }
    }
}

fn depth_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    samples.iter().fold(None, |acc, s| match acc {
        None => Some((s.depth, s.depth)),
        Some((lo, hi)) => Some((f64::min(lo, s.depth), f64::max(hi, s.depth))),
    })
}

fn depth_extent_located(located: &[LocatedSample]) -> Option<(f64, f64)> {
    located.iter().fold(None, |acc, s| match acc {
        None => Some((s.md, s.md)),
        Some((lo, hi)) => Some((f64::min(lo, s.md), f64::max(hi, s.md))),
    })
}

/// Elevation of the shallowest located sample.
fn shallowest_z(located: &[LocatedSample]) -> f64 {
    located
        .iter()
        .min_by(|a, b| a.md.total_cmp(&b.md))
        .map_or(0.0, |s| s.position.z)
}

fn spread(located: &[LocatedSample]) -> f64 {
    if located.len() < 2 {
        return 0.0;
    }
    located.iter().map(|s| s.position.z).population_std_dev()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_100() -> Trajectory {
        Trajectory::from_rows(&[[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, -100.0, 100.0]]).unwrap()
    }

    fn samples(depths: &[f64]) -> Vec<Sample> {
        depths
            .iter()
            .map(|&depth| Sample { depth, value: 1.0 })
            .collect()
    }

    #[test]
    fn test_contained_is_direct() {
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[0.0, 50.0, 100.0]),
            None,
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Direct { md_offset: 0.0 });
        assert!(!r.low_confidence);
        assert!(r.issues.is_empty());
        assert_eq!(r.located[1].position.z, -50.0);
    }

    #[test]
    fn test_within_tolerance_is_contained() {
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[-0.5, 100.8]),
            None,
            &ResolverConfig::default(),
        );
        assert!(r.issues.is_empty());
        // clamped, not extrapolated
        assert_eq!(r.located[0].position.z, 0.0);
        assert_eq!(r.located[1].position.z, -100.0);
    }

    #[test]
    fn test_implausible_offset_falls_back() {
        let anchor = ElevationAnchor {
            z_top: -1500.0,
            thickness: 20.0,
        };
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[150.0, 175.0, 200.0]),
            Some(anchor),
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Fallback);
        assert!(r.low_confidence);
        assert_eq!(r.located[0].position.z, -1500.0);
        assert!((r.located[1].position.z + 1510.0).abs() < 1e-9);
        assert_eq!(r.located[2].position.z, -1520.0);
        assert!(r.issues.iter().any(|i| matches!(i, MappingIssue::RangeMismatch { .. })));
        assert!(r
            .issues
            .iter()
            .any(|i| matches!(i, MappingIssue::LowConfidenceMapping { .. })));
    }

    #[test]
    fn test_plausible_offset_shifts() {
        let anchor = ElevationAnchor {
            z_top: 0.0,
            thickness: 100.0,
        };
        // starts 5 below the trajectory head and runs 5 past the end
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[5.0, 55.0, 105.0]),
            Some(anchor),
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Direct { md_offset: 5.0 });
        assert_eq!(r.skipped, 0);
        assert_eq!(r.located[0].position.z, 0.0);
        assert_eq!(r.located[2].position.z, -100.0);
        // reported depths are the curve's own
        assert_eq!(r.located[2].md, 105.0);
    }

    #[test]
    fn test_no_anchor_skips_outside_samples() {
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[50.0, 90.0, 130.0, 160.0]),
            None,
            &ResolverConfig::default(),
        );
        assert_eq!(r.located.len(), 2);
        assert_eq!(r.skipped, 2);
        assert!(r.issues.contains(&MappingIssue::RangeMismatch {
            curve_min: 50.0,
            curve_max: 160.0,
            md_min: 0.0,
            md_max: 100.0,
            skipped: 2,
        }));
    }

    #[test]
    fn test_single_depth_fallback_is_degenerate() {
        let anchor = ElevationAnchor {
            z_top: -10.0,
            thickness: 1.0,
        };
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[500.0, 500.0]),
            Some(anchor),
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Degenerate);
        assert!(r.low_confidence);
        assert!(r.located.iter().all(|s| s.position.z == -10.0));
    }

    #[test]
    fn test_flat_deviated_trajectory_rederived() {
        // horizontal drain at constant elevation
        let traj = Trajectory::from_rows(&[
            [0.0, 0.0, -1000.0, 0.0],
            [50.0, 0.0, -1000.0, 50.0],
            [100.0, 0.0, -1000.0, 100.0],
        ])
        .unwrap();
        let r = ElevationResolver::resolve(
            &traj,
            &samples(&[0.0, 50.0, 100.0]),
            None,
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Fallback);
        assert!(r.low_confidence);
        assert_eq!(r.located[0].position.z, -1000.0);
        assert_eq!(r.located[2].position.z, -1100.0);
        assert_eq!(r.located[1].position.x, 50.0);
    }

    #[test]
    fn test_collapsed_vertical_is_degenerate() {
        let traj = Trajectory::from_rows(&[[0.0, 0.0, -5.0, 0.0], [0.0, 0.0, -5.0, 10.0]]).unwrap();
        let r = ElevationResolver::resolve(
            &traj,
            &samples(&[0.0, 10.0]),
            None,
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Degenerate);
        assert!(r.low_confidence);
    }

    #[test]
    fn test_unusable_anchor_thickness_is_ignored() {
        for thickness in [-20.0, 0.0, f64::INFINITY, f64::NAN] {
            let anchor = ElevationAnchor {
                z_top: -10.0,
                thickness,
            };
            let r = ElevationResolver::resolve(
                &vertical_100(),
                &samples(&[150.0, 175.0, 200.0]),
                Some(anchor),
                &ResolverConfig::default(),
            );
            assert_ne!(r.strategy, ElevationStrategy::Fallback, "thickness {thickness}");
            assert!(r.located.is_empty());
            assert!(r.low_confidence);
        }
    }

    #[test]
    fn test_negative_thickness_never_maps_upward() {
        let anchor = ElevationAnchor {
            z_top: 0.0,
            thickness: -20.0,
        };
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[10.0, 50.0, 120.0]),
            Some(anchor),
            &ResolverConfig::default(),
        );
        for pair in r.located.windows(2) {
            assert!(pair[1].position.z <= pair[0].position.z);
        }
    }

    #[test]
    fn test_disjoint_without_anchor_is_degenerate() {
        let r = ElevationResolver::resolve(
            &vertical_100(),
            &samples(&[150.0, 175.0, 200.0]),
            None,
            &ResolverConfig::default(),
        );
        assert_eq!(r.strategy, ElevationStrategy::Degenerate);
        assert_eq!(r.skipped, 3);
        assert!(r.low_confidence);
        assert!(r
            .issues
            .iter()
            .any(|i| matches!(i, MappingIssue::LowConfidenceMapping { .. })));
        assert!(r
            .issues
            .iter()
            .any(|i| matches!(i, MappingIssue::RangeMismatch { skipped: 3, .. })));
    }

    #[test]
    fn test_empty_samples() {
        let r = ElevationResolver::resolve(&vertical_100(), &[], None, &ResolverConfig::default());
        assert!(r.located.is_empty());
        assert!(!r.low_confidence);
    }
}
