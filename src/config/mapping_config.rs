//! Mapping Configuration - every empirical threshold as an operator-tunable TOML value
//!
//! Each struct implements `Default` with values from `config::defaults`, so a
//! missing file or a missing key always behaves exactly like the built-ins.

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "WELL_SECTION_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "section_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `MappingConfig::load()` which searches:
/// 1. `$WELL_SECTION_CONFIG`
/// 2. `./section_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Curve validity and binarization
    #[serde(default)]
    pub curve: CurveConfig,

    /// Depth-to-elevation policy thresholds
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Cross-section projection
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Prediction sampling
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// MD mapping diagnostics
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,

    /// Synthetic well generation
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

impl MappingConfig {
    /// Load configuration using the standard search order. Never fails: a
    /// broken file is logged and the next source is tried.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded mapping config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./section_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded mapping config from ./{}", LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text.
    ///
    /// Two-pass: unknown keys are reported as warnings first, then the
    /// document is deserialized and validated.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Mapping config saved");
        Ok(())
    }

    /// Validate all thresholds for internal consistency.
    ///
    /// Rules:
    /// - every float must be finite
    /// - tolerances must be >= 0, spreads/sigmas/widths/steps > 0
    /// - binarize threshold in (0, 1)
    /// - zone length bounds ordered, warning ratio below severe ratio
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let finite = [
            ("curve.null_sentinel", self.curve.null_sentinel),
            ("curve.binarize_threshold", self.curve.binarize_threshold),
            ("resolver.range_tolerance", self.resolver.range_tolerance),
            ("resolver.implausible_offset_factor", self.resolver.implausible_offset_factor),
            ("resolver.min_z_spread", self.resolver.min_z_spread),
            ("resolver.vertical_xy_sigma", self.resolver.vertical_xy_sigma),
            ("profile.corridor_width", self.profile.corridor_width),
            ("prediction.depth_step", self.prediction.depth_step),
            ("diagnostics.thickness_warning_ratio", self.diagnostics.thickness_warning_ratio),
            ("diagnostics.thickness_severe_ratio", self.diagnostics.thickness_severe_ratio),
            ("synthetic.vertical_station_spacing", self.synthetic.vertical_station_spacing),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number (got {value})"));
            }
        }

        let r = &self.resolver;
        Self::check_non_negative(r.range_tolerance, "resolver.range_tolerance", &mut errors);
        Self::check_positive(r.implausible_offset_factor, "resolver.implausible_offset_factor", &mut errors);
        Self::check_positive(r.min_z_spread, "resolver.min_z_spread", &mut errors);
        Self::check_positive(r.vertical_xy_sigma, "resolver.vertical_xy_sigma", &mut errors);
        Self::check_positive(self.profile.corridor_width, "profile.corridor_width", &mut errors);
        Self::check_positive(self.prediction.depth_step, "prediction.depth_step", &mut errors);
        Self::check_positive(
            self.synthetic.vertical_station_spacing,
            "synthetic.vertical_station_spacing",
            &mut errors,
        );

        let t = self.curve.binarize_threshold;
        if !(t > 0.0 && t < 1.0) {
            errors.push(format!("curve.binarize_threshold ({t}) must be within (0, 1)"));
        }

        let p = &self.prediction;
        if p.min_points < 2 {
            errors.push("prediction.min_points must be >= 2".to_string());
        }
        if p.zone_min_len == 0 {
            errors.push("prediction.zone_min_len must be > 0".to_string());
        }
        if p.zone_min_len >= p.zone_max_len {
            errors.push(format!(
                "prediction.zone_min_len ({}) must be less than zone_max_len ({})",
                p.zone_min_len, p.zone_max_len
            ));
        }

        let d = &self.diagnostics;
        if d.thickness_warning_ratio >= d.thickness_severe_ratio {
            errors.push(format!(
                "diagnostics.thickness_warning_ratio ({:.2}) must be less than thickness_severe_ratio ({:.2})",
                d.thickness_warning_ratio, d.thickness_severe_ratio
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_value_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN compares false, already reported as non-finite
        if value.is_finite() && value <= 0.0 {
            errors.push(format!("{name} must be > 0 (got {value})"));
        }
    }

    fn check_non_negative(value: f64, name: &str, errors: &mut Vec<String>) {
        if value.is_finite() && value < 0.0 {
            errors.push(format!("{name} must be >= 0 (got {value})"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Curve
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Value marking a missing measurement.
    #[serde(default = "default_null_sentinel")]
    pub null_sentinel: f64,

    /// Continuous predictions at or above this become collector.
    #[serde(default = "default_binarize_threshold")]
    pub binarize_threshold: f64,
}

fn default_null_sentinel() -> f64 { defaults::NULL_SENTINEL }
fn default_binarize_threshold() -> f64 { defaults::BINARIZE_THRESHOLD }

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            null_sentinel: default_null_sentinel(),
            binarize_threshold: default_binarize_threshold(),
        }
    }
}

// ============================================================================
// Elevation Resolver
// ============================================================================

/// Thresholds behind the depth-to-elevation decision.
///
/// All of these are empirical. They are kept deterministic so mappings are
/// reproducible, but a field with unusual survey practice may need to tune them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Slack on the curve-inside-trajectory containment test.
    #[serde(default = "default_range_tolerance")]
    pub range_tolerance: f64,

    /// Offsets beyond this multiple of thickness are implausible.
    #[serde(default = "default_implausible_offset_factor")]
    pub implausible_offset_factor: f64,

    /// Elevation standard deviation treated as collapsed.
    #[serde(default = "default_min_z_spread")]
    pub min_z_spread: f64,

    /// Station X/Y standard deviation treated as vertical.
    #[serde(default = "default_vertical_xy_sigma")]
    pub vertical_xy_sigma: f64,
}

fn default_range_tolerance() -> f64 { defaults::RANGE_TOLERANCE }
fn default_implausible_offset_factor() -> f64 { defaults::IMPLAUSIBLE_OFFSET_FACTOR }
fn default_min_z_spread() -> f64 { defaults::MIN_Z_SPREAD }
fn default_vertical_xy_sigma() -> f64 { defaults::VERTICAL_XY_SIGMA }

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            range_tolerance: default_range_tolerance(),
            implausible_offset_factor: default_implausible_offset_factor(),
            min_z_spread: default_min_z_spread(),
            vertical_xy_sigma: default_vertical_xy_sigma(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Maximum distance from the profile for a point to be kept (inclusive).
    #[serde(default = "default_corridor_width")]
    pub corridor_width: f64,
}

fn default_corridor_width() -> f64 { defaults::CORRIDOR_WIDTH }

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            corridor_width: default_corridor_width(),
        }
    }
}

// ============================================================================
// Prediction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// MD spacing between predicted samples.
    #[serde(default = "default_depth_step")]
    pub depth_step: f64,

    /// Lower bound on predicted samples per well.
    #[serde(default = "default_min_points")]
    pub min_points: usize,

    /// Mock predictor zone length, lower bound (inclusive).
    #[serde(default = "default_zone_min_len")]
    pub zone_min_len: usize,

    /// Mock predictor zone length, upper bound (exclusive).
    #[serde(default = "default_zone_max_len")]
    pub zone_max_len: usize,
}

fn default_depth_step() -> f64 { defaults::PREDICTION_DEPTH_STEP }
fn default_min_points() -> usize { defaults::PREDICTION_MIN_POINTS }
fn default_zone_min_len() -> usize { defaults::PREDICTION_ZONE_MIN_LEN }
fn default_zone_max_len() -> usize { defaults::PREDICTION_ZONE_MAX_LEN }

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            depth_step: default_depth_step(),
            min_points: default_min_points(),
            zone_min_len: default_zone_min_len(),
            zone_max_len: default_zone_max_len(),
        }
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// |span - H| above this fraction of H is notable.
    #[serde(default = "default_thickness_warning_ratio")]
    pub thickness_warning_ratio: f64,

    /// |span - H| above this fraction of H is severe.
    #[serde(default = "default_thickness_severe_ratio")]
    pub thickness_severe_ratio: f64,
}

fn default_thickness_warning_ratio() -> f64 { defaults::THICKNESS_WARNING_RATIO }
fn default_thickness_severe_ratio() -> f64 { defaults::THICKNESS_SEVERE_RATIO }

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            thickness_warning_ratio: default_thickness_warning_ratio(),
            thickness_severe_ratio: default_thickness_severe_ratio(),
        }
    }
}

// ============================================================================
// Synthetic Wells
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Station spacing for generated vertical trajectories.
    #[serde(default = "default_vertical_station_spacing")]
    pub vertical_station_spacing: f64,
}

fn default_vertical_station_spacing() -> f64 { defaults::VERTICAL_STATION_SPACING }

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            vertical_station_spacing: default_vertical_station_spacing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(MappingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = MappingConfig::from_toml_str(
            r#"
[profile]
corridor_width = 400.0
"#,
        )
        .unwrap();
        assert_eq!(config.profile.corridor_width, 400.0);
        assert_eq!(config.curve.null_sentinel, -999.25);
        assert_eq!(config.resolver.range_tolerance, 1.0);
    }

    #[test]
    fn test_negative_corridor_rejected() {
        let mut config = MappingConfig::default();
        config.profile.corridor_width = -5.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("profile.corridor_width"));
    }

    #[test]
    fn test_nan_rejected() {
        let mut config = MappingConfig::default();
        config.resolver.min_z_spread = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("resolver.min_z_spread"));
    }

    #[test]
    fn test_zone_bounds_ordered() {
        let mut config = MappingConfig::default();
        config.prediction.zone_min_len = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = MappingConfig::default();
        config.resolver.vertical_xy_sigma = 2.5;
        let text = config.to_toml().unwrap();
        let back = MappingConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("section_config.toml");
        let mut config = MappingConfig::default();
        config.profile.corridor_width = 125.0;
        config.save_to_file(&path).unwrap();
        let loaded = MappingConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.profile.corridor_width, 125.0);
    }

    #[test]
    fn test_parse_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[profile\ncorridor_width = ").unwrap();
        let err = MappingConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref p, _) if p == &path));
    }
}
