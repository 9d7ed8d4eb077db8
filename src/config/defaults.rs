//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. The `MappingConfig` default
//! functions read from here.

// ============================================================================
// Curves
// ============================================================================

/// Canonical LAS null value marking a missing measurement.
pub const NULL_SENTINEL: f64 = -999.25;

/// Continuous predictions at or above this become collector (1).
pub const BINARIZE_THRESHOLD: f64 = 0.5;

// ============================================================================
// Elevation Resolver
// ============================================================================

/// Slack allowed when checking that curve depths sit inside the trajectory
/// MD range (distance units).
pub const RANGE_TOLERANCE: f64 = 1.0;

/// A curve/trajectory start offset larger than this multiple of the well
/// thickness is judged implausible.
pub const IMPLAUSIBLE_OFFSET_FACTOR: f64 = 2.0;

/// Elevation spread below which a mapping is considered collapsed.
pub const MIN_Z_SPREAD: f64 = 0.1;

/// Station X/Y standard deviation below which a well is treated as vertical.
pub const VERTICAL_XY_SIGMA: f64 = 1.0;

// ============================================================================
// Cross-Section Profiles
// ============================================================================

/// Default corridor half-width around a profile polyline (distance units).
pub const CORRIDOR_WIDTH: f64 = 250.0;

// ============================================================================
// Prediction
// ============================================================================

/// MD spacing between predicted samples.
pub const PREDICTION_DEPTH_STEP: f64 = 5.0;

/// Minimum number of predicted samples per well.
pub const PREDICTION_MIN_POINTS: usize = 10;

/// Mock predictor zone length bounds (samples, half-open).
pub const PREDICTION_ZONE_MIN_LEN: usize = 5;
pub const PREDICTION_ZONE_MAX_LEN: usize = 15;

// ============================================================================
// Diagnostics
// ============================================================================

/// Relative thickness mismatch worth a warning.
pub const THICKNESS_WARNING_RATIO: f64 = 0.2;

/// Relative thickness mismatch treated as severe.
pub const THICKNESS_SEVERE_RATIO: f64 = 0.5;

// ============================================================================
// Synthetic Wells
// ============================================================================

/// Upper bound on generated stations or predicted samples for one well.
pub const MAX_SAMPLE_COUNT: usize = 1_000_000;

/// Station spacing for generated vertical wells.
pub const VERTICAL_STATION_SPACING: f64 = 10.0;
