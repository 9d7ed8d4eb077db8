//! Config validation: unknown-key detection with Levenshtein suggestions
//! and value range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for MappingConfig.
///
/// Maintained by hand to match the struct hierarchy in mapping_config.rs.
/// Any new field added to MappingConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [curve]
        "curve",
        "curve.null_sentinel",
        "curve.binarize_threshold",
        // [resolver]
        "resolver",
        "resolver.range_tolerance",
        "resolver.implausible_offset_factor",
        "resolver.min_z_spread",
        "resolver.vertical_xy_sigma",
        // [profile]
        "profile",
        "profile.corridor_width",
        // [prediction]
        "prediction",
        "prediction.depth_step",
        "prediction.min_points",
        "prediction.zone_min_len",
        "prediction.zone_max_len",
        // [diagnostics]
        "diagnostics",
        "diagnostics.thickness_warning_ratio",
        "diagnostics.thickness_severe_ratio",
        // [synthetic]
        "synthetic",
        "synthetic.vertical_station_spacing",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance over chars, single-row dynamic programming.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// alphabetically first key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|&(dist, _)| dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Value Range Validation
// ============================================================================

/// Range checks on a parsed MappingConfig.
///
/// Returns (errors, warnings): errors are values the mapping cannot work
/// with, warnings are legal but unlikely for field data.
pub fn validate_value_ranges(
    config: &super::MappingConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // The sentinel must never be a legal classification value
    let sentinel = config.curve.null_sentinel;
    if sentinel == 0.0 || sentinel == 1.0 {
        errors.push(format!(
            "curve.null_sentinel = {sentinel} collides with a classification value"
        ));
    }

    let r = &config.resolver;
    if r.range_tolerance > 100.0 {
        warnings.push(ValidationWarning {
            field: "resolver.range_tolerance".to_string(),
            message: format!(
                "range_tolerance = {:.1} is unusually loose (typical 0-10)",
                r.range_tolerance
            ),
            suggestion: None,
        });
    }
    if r.vertical_xy_sigma > 50.0 {
        warnings.push(ValidationWarning {
            field: "resolver.vertical_xy_sigma".to_string(),
            message: format!(
                "vertical_xy_sigma = {:.1} would treat deviated wells as vertical",
                r.vertical_xy_sigma
            ),
            suggestion: None,
        });
    }

    let corridor = config.profile.corridor_width;
    if corridor > 10_000.0 {
        warnings.push(ValidationWarning {
            field: "profile.corridor_width".to_string(),
            message: format!(
                "corridor_width = {corridor:.0} is wider than a typical field (1-10000)"
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
