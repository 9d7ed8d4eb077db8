//! well-section: Well Log to Cross-Section Mapping
//!
//! Maps MD-indexed collector curves onto wellbore trajectories and builds
//! multi-well cross-sections from the located samples.
//!
//! ## Architecture
//!
//! - **Types**: trajectories, log curves, segments, well attributes, reports
//! - **Mapping**: elevation resolver, segment extractor, profile projector,
//!   parallel batch mapping and MD diagnostics
//! - **Prediction**: injectable collector predictor (mock implementation)
//! - **Loaders**: welltrack, LAS and H/EFF_H text formats
//! - **Config**: TOML thresholds with validation

pub mod config;
pub mod loaders;
pub mod mapping;
pub mod prediction;
pub mod types;

// Re-export configuration
pub use config::MappingConfig;

// Re-export commonly used types
pub use types::{
    ClassifiedPoint, CollectorClass, ElevationAnchor, ElevationStrategy, LogCurve,
    MappingIssue, Point3, Sample, Segment, Station, Trajectory, WellAttributes, WellInput,
    WellLocation, WellReport,
};

// Re-export the mapping engine
pub use mapping::{
    map_well, map_wells, CrossSection, ElevationResolver, MdMappingCheck, Profile,
    ProfileError, ProfileProjector, ProjectedPoint, SegmentExtractor,
};

// Re-export prediction
pub use prediction::{CollectorPredictor, MockPredictor, PredictionRequest, PredictionStats};
