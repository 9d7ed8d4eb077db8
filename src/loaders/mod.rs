//! Raw text loaders for trajectories, curves and well attributes.
//!
//! - `welltrack`: `welltrack '<NAME>'` blocks of `X Y Z MD` rows
//! - `las`: minimal LAS 2.0 reader (one depth + one value curve)
//! - `attributes`: H / EFF_H tables joined into `WellAttributes`
//!
//! `assemble_inputs` pairs the three by well name into mapping inputs.

pub mod attributes;
pub mod las;
pub mod welltrack;

pub use attributes::{join_attributes, load_attributes, parse_attribute_table, AttributeRow};
pub use las::{load_las, load_las_dir, parse_las, LasError, LasWell};
pub use welltrack::{load_welltrack, parse_welltrack, WellTrack};

use crate::types::{Trajectory, WellAttributes, WellInput};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Invalid header pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid LAS file {}: {}", .path.display(), .source)]
    Las {
        path: PathBuf,
        #[source]
        source: LasError,
    },
}

/// Pair curves with trajectories and attributes by well name.
///
/// Every LAS well yields an input, in LAS order. A well without a (valid)
/// trajectory gets an empty one so the mapper reports it instead of the
/// well silently disappearing. Trajectories without a curve are not mapped.
pub fn assemble_inputs(
    tracks: &[WellTrack],
    curves: Vec<LasWell>,
    attributes: &[WellAttributes],
) -> Vec<WellInput> {
    for t in tracks {
        if !curves.iter().any(|c| c.well_name == t.name) {
            debug!(well = %t.name, "Trajectory has no curve, not mapped");
        }
    }

    curves
        .into_iter()
        .map(|las| {
            let trajectory = match tracks.iter().find(|t| t.name == las.well_name) {
                Some(track) => track.trajectory().unwrap_or_else(|e| {
                    warn!(well = %las.well_name, error = %e, "Invalid trajectory");
                    Trajectory::default()
                }),
                None => {
                    warn!(well = %las.well_name, "No trajectory for curve");
                    Trajectory::default()
                }
            };
            let anchor = attributes
                .iter()
                .find(|a| a.well_id == las.well_name)
                .map(WellAttributes::anchor);
            WellInput {
                well_id: las.well_name,
                trajectory,
                curve: las.curve,
                anchor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogCurve;

    fn las(name: &str) -> LasWell {
        LasWell {
            well_name: name.to_string(),
            depth_mnemonic: "DEPT".to_string(),
            curve_mnemonic: "COLL".to_string(),
            curve: LogCurve::with_default_sentinel(vec![0.0, 1.0], vec![1.0, 0.0]).unwrap(),
        }
    }

    #[test]
    fn test_assemble_pairs_by_name() {
        let tracks = vec![WellTrack {
            name: "A".to_string(),
            rows: vec![[0.0, 0.0, 0.0, 0.0], [0.0, 0.0, -1.0, 1.0]],
        }];
        let attrs = vec![WellAttributes {
            well_id: "A".to_string(),
            x: 0.0,
            y: 0.0,
            z_top: -5.0,
            thickness: 2.0,
            effective_thickness: 1.0,
        }];
        let inputs = assemble_inputs(&tracks, vec![las("A"), las("B")], &attrs);
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].trajectory.len(), 2);
        assert_eq!(inputs[0].anchor.map(|a| a.z_top), Some(-5.0));
        assert!(inputs[1].trajectory.is_empty());
        assert!(inputs[1].anchor.is_none());
    }
}
