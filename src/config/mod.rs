//! Mapping Configuration Module
//!
//! Tunable thresholds for curve handling, elevation resolution, profile
//! projection and the prediction stand-in, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `WELL_SECTION_CONFIG` environment variable (path to TOML file)
//! 2. `section_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! ```ignore
//! // In main():
//! config::init(MappingConfig::load());
//!
//! // Anywhere in the codebase:
//! let corridor = config::get().profile.corridor_width;
//! ```

mod mapping_config;
pub mod defaults;
pub mod validation;

pub use mapping_config::*;

use std::sync::OnceLock;

/// Global mapping configuration, initialized once at startup.
static MAPPING_CONFIG: OnceLock<MappingConfig> = OnceLock::new();

/// Initialize the global mapping configuration.
///
/// A second call is ignored with a warning.
pub fn init(config: MappingConfig) {
    if MAPPING_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global mapping configuration.
///
/// Falls back to built-in defaults when `init()` was never called, so
/// library callers and tests work without setup.
pub fn get() -> &'static MappingConfig {
    MAPPING_CONFIG.get_or_init(MappingConfig::default)
}
