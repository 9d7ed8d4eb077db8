//! Shared data structures for depth-to-space mapping
//!
//! - Trajectory: wellbore polyline keyed by MD
//! - LogCurve: depth-indexed values with a null sentinel
//! - Segment / ClassifiedPoint: run-length encoded classification in space
//! - WellAttributes / WellLocation: per-well reservoir attributes and profile vertices
//! - WellReport / MappingIssue: per-well outcome and non-fatal diagnostics

mod trajectory;
mod curve;
mod segment;
mod well;
mod report;

pub use trajectory::*;
pub use curve::*;
pub use segment::*;
pub use well::*;
pub use report::*;
