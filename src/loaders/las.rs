//! Minimal LAS 2.0 reader.
//!
//! Only what the mapping needs is understood:
//! - `~W` section: `WELL.` (well name) and `NULL.` (missing-value marker)
//! - `~C` section: curve mnemonics, in column order
//! - `~A` section: unwrapped whitespace-separated data rows
//!
//! The depth column is `DEPT` (or `DEPTH`) when present, otherwise the first
//! curve. The value column is the first curve that is not the depth column.

use super::LoadError;
use crate::types::{CurveError, LogCurve};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LasError {
    #[error("need at least 2 curves in ~C, found {0}")]
    TooFewCurves(usize),

    #[error("data row at line {line} precedes the ~C section")]
    DataBeforeCurves { line: usize },

    #[error(transparent)]
    Curve(#[from] CurveError),
}

/// One well's curve as read from a LAS file.
#[derive(Debug, Clone, PartialEq)]
pub struct LasWell {
    pub well_name: String,
    pub depth_mnemonic: String,
    pub curve_mnemonic: String,
    pub curve: LogCurve,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Well,
    Curve,
    Ascii,
    Other,
}

/// Parse LAS text. `fallback_name` is used when `~W` has no `WELL.` value,
/// `default_null` when it has no `NULL.` value.
pub fn parse_las(text: &str, fallback_name: &str, default_null: f64) -> Result<LasWell, LasError> {
    let mut section = Section::Other;
    let mut well_name: Option<String> = None;
    let mut null_value: Option<f64> = None;
    let mut mnemonics: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(tag) = line.strip_prefix('~') {
            section = match tag.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('W') => Section::Well,
                Some('C') => Section::Curve,
                Some('A') => Section::Ascii,
                _ => Section::Other,
            };
            continue;
        }

        match section {
            Section::Well => {
                if let Some((mnemonic, value)) = header_entry(line) {
                    match mnemonic.to_ascii_uppercase().as_str() {
                        "WELL" if !value.is_empty() => well_name = Some(value),
                        "NULL" => null_value = value.parse().ok(),
                        _ => {}
                    }
                }
            }
            Section::Curve => {
                if let Some((mnemonic, _)) = header_entry(line) {
                    mnemonics.push(mnemonic);
                }
            }
            Section::Ascii => {
                if mnemonics.is_empty() {
                    return Err(LasError::DataBeforeCurves { line: idx + 1 });
                }
                let parsed: Result<Vec<f64>, _> =
                    line.split_whitespace().map(str::parse::<f64>).collect();
                match parsed {
                    Ok(row) if row.len() >= mnemonics.len() && !row.is_empty() => rows.push(row),
                    _ => debug!(line = idx + 1, "Skipping malformed LAS data row"),
                }
            }
            Section::Other => {}
        }
    }

    if mnemonics.len() < 2 {
        return Err(LasError::TooFewCurves(mnemonics.len()));
    }

    let depth_idx = mnemonics
        .iter()
        .position(|m| m.eq_ignore_ascii_case("DEPT") || m.eq_ignore_ascii_case("DEPTH"))
        .unwrap_or(0);
    let value_idx = usize::from(depth_idx == 0);

    // rows read before a later ~C entry may be narrower than the final header
    let (depth, value): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .filter_map(|r| Some((*r.get(depth_idx)?, *r.get(value_idx)?)))
        .unzip();
    let curve = LogCurve::new(depth, value, null_value.unwrap_or(default_null))?;

    Ok(LasWell {
        well_name: well_name.unwrap_or_else(|| fallback_name.to_string()),
        depth_mnemonic: mnemonics[depth_idx].clone(),
        curve_mnemonic: mnemonics[value_idx].clone(),
        curve,
    })
}

/// `MNEM.UNIT  VALUE : DESCRIPTION` → `(MNEM, VALUE)`.
fn header_entry(line: &str) -> Option<(String, String)> {
    let (mnemonic, rest) = line.split_once('.')?;
    let mnemonic = mnemonic.trim();
    if mnemonic.is_empty() {
        return None;
    }
    let body = rest.rsplit_once(':').map_or(rest, |(before, _)| before);
    // unit runs up to the first whitespace after the dot
    let value = body
        .find(char::is_whitespace)
        .map_or("", |i| &body[i..])
        .trim();
    Some((mnemonic.to_string(), value.to_string()))
}

/// Read one LAS file; the file stem is the fallback well name.
pub fn load_las(path: &Path, default_null: f64) -> Result<LasWell, LoadError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    parse_las(&text, stem, default_null).map_err(|source| LoadError::Las {
        path: path.to_path_buf(),
        source,
    })
}

/// Load every `.las` / `.txt` file in a directory, in file name order.
///
/// Files that fail to load are skipped with a warning. A later file with the
/// same well name replaces the earlier one.
pub fn load_las_dir(dir: &Path, default_null: f64) -> Result<Vec<LasWell>, LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::Io(dir.to_path_buf(), e))?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("las") || e.eq_ignore_ascii_case("txt"))
        })
        .collect();
    paths.sort();

    let mut wells: Vec<LasWell> = Vec::new();
    for path in &paths {
        match load_las(path, default_null) {
            Ok(well) => {
                debug!(well = %well.well_name, samples = well.curve.len(), "Loaded LAS");
                if let Some(existing) = wells.iter_mut().find(|w| w.well_name == well.well_name) {
                    *existing = well;
                } else {
                    wells.push(well);
                }
            }
            Err(e) => warn!(file = %path.display(), error = %e, "Failed to load LAS file"),
        }
    }

    info!(dir = %dir.display(), wells = wells.len(), "Loaded LAS directory");
    Ok(wells)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAS: &str = "\
~Version Information
 VERS.   2.0 : CWLS LOG ASCII STANDARD
 WRAP.   NO  : One line per depth step
~Well Information
 STRT.M  1500.0 : START DEPTH
 NULL.   -999.25 : NULL VALUE
 WELL.   WELL_007 : WELL NAME
~Curve Information
 DEPT.M          : Measured depth
 COLL.           : Collector flag
~A
1500.0 1
1500.5 -999.25
1501.0 0
broken row
";

    #[test]
    fn test_parse_las() {
        let well = parse_las(LAS, "fallback", -9999.0).unwrap();
        assert_eq!(well.well_name, "WELL_007");
        assert_eq!(well.depth_mnemonic, "DEPT");
        assert_eq!(well.curve_mnemonic, "COLL");
        assert_eq!(well.curve.len(), 3);
        assert_eq!(well.curve.null_sentinel(), -999.25);
        assert_eq!(well.curve.valid_samples().len(), 2);
    }

    #[test]
    fn test_depth_not_first_column() {
        let text = "~C\nGR.API : gamma\nDEPT.M : depth\n~A\n0.3 10\n0.7 11\n";
        let well = parse_las(text, "F", -999.25).unwrap();
        assert_eq!(well.well_name, "F");
        assert_eq!(well.curve.depth(), &[10.0, 11.0]);
        assert_eq!(well.curve.value(), &[0.3, 0.7]);
    }

    #[test]
    fn test_first_curve_is_index_without_dept() {
        let text = "~C\nMD.M : depth\nFLAG. : flag\nGR. : gamma\n~A\n5 1 80\n";
        let well = parse_las(text, "F", -999.25).unwrap();
        assert_eq!(well.depth_mnemonic, "MD");
        assert_eq!(well.curve_mnemonic, "FLAG");
    }

    #[test]
    fn test_single_curve_rejected() {
        assert_eq!(
            parse_las("~C\nDEPT.M : depth\n~A\n1\n", "F", -999.25),
            Err(LasError::TooFewCurves(1))
        );
    }

    #[test]
    fn test_data_before_curve_section_rejected() {
        let text = "~A\n1\n~C\nDEPT.M : d\nCOLL. : c\n";
        assert_eq!(
            parse_las(text, "F", -999.25),
            Err(LasError::DataBeforeCurves { line: 2 })
        );
    }

    #[test]
    fn test_rows_narrower_than_late_curve_entries_dropped() {
        // DEPT arrives in a second ~C block, after a two-column row was read
        let text = "~C\nCOLL. : c\nGR. : g\n~A\n0 1\n~C\nDEPT.M : d\n~A\n1 0 5\n";
        let well = parse_las(text, "F", -999.25).unwrap();
        assert_eq!(well.depth_mnemonic, "DEPT");
        assert_eq!(well.curve.depth(), &[5.0]);
        assert_eq!(well.curve.value(), &[1.0]);
    }

    #[test]
    fn test_header_entry_without_unit() {
        assert_eq!(
            header_entry("WELL.   A-1 : name"),
            Some(("WELL".to_string(), "A-1".to_string()))
        );
        assert_eq!(
            header_entry("NULL.  -999.25 :"),
            Some(("NULL".to_string(), "-999.25".to_string()))
        );
    }
}
