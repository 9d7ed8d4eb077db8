//! Depth-to-Space Mapping Engine
//!
//! Turns a well's MD-indexed binary curve and its trajectory into spatially
//! located collector/non-collector segments, and projects classified points
//! from many wells onto a cross-section profile.
//!
//! ## Architecture
//! - `resolver`: chooses direct interpolation, linear fallback or degenerate
//!   mapping per well (`ElevationStrategy`)
//! - `extractor`: run-length encoding into `Segment`s, malformed-value counting
//! - `projector`: polyline arc-length projection with an inclusive corridor
//! - `batch`: per-well reports, parallel multi-well mapping, `CrossSection`
//! - `diagnostics`: MD range / thickness consistency checks per well
//!
//! Every entry point is a pure function of its inputs; thresholds come in
//! through `MappingConfig` rather than the global config.

pub mod batch;
pub mod diagnostics;
pub mod extractor;
pub mod projector;
pub mod resolver;

pub use batch::{map_well, map_wells, CrossSection, WellContribution};
pub use diagnostics::{Containment, MdMappingCheck, ThicknessCheck, ThicknessVerdict};
pub use extractor::{Extraction, SegmentExtractor};
pub use projector::{Profile, ProfileError, ProfileHit, ProfileProjector, ProjectedPoint};
pub use resolver::{ElevationResolver, Resolution};
