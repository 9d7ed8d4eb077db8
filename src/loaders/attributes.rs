//! Well attribute tables (gross thickness H, effective thickness EFF_H).
//!
//! Both files are whitespace separated `X Y Z Well VALUE` rows with `#`
//! comments. They are joined on `(Well, X, Y, Z)` into `WellAttributes`.

use super::LoadError;
use crate::types::WellAttributes;
use std::path::Path;
use tracing::{debug, info};

/// One parsed row of an attribute table.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRow {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub well: String,
    pub value: f64,
}

impl AttributeRow {
    fn same_key(&self, other: &Self) -> bool {
        self.well == other.well && self.x == other.x && self.y == other.y && self.z == other.z
    }
}

/// Parse an attribute table. Rows with fewer than five fields or a
/// non-numeric (or NaN) coordinate/value are dropped.
pub fn parse_attribute_table(text: &str) -> Vec<AttributeRow> {
    let mut rows = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => debug!(line = idx + 1, "Dropping malformed attribute row"),
        }
    }
    rows
}

fn parse_row(line: &str) -> Option<AttributeRow> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        return None;
    }
    let num = |s: &str| s.parse::<f64>().ok().filter(|v| !v.is_nan());
    Some(AttributeRow {
        x: num(fields[0])?,
        y: num(fields[1])?,
        z: num(fields[2])?,
        well: fields[3].to_string(),
        value: num(fields[4])?,
    })
}

/// Inner join of H and EFF_H rows, sorted by well name (stable).
pub fn join_attributes(h: &[AttributeRow], eff_h: &[AttributeRow]) -> Vec<WellAttributes> {
    let mut joined: Vec<WellAttributes> = h
        .iter()
        .flat_map(|hr| {
            eff_h
                .iter()
                .filter(move |er| hr.same_key(er))
                .map(move |er| WellAttributes {
                    well_id: hr.well.clone(),
                    x: hr.x,
                    y: hr.y,
                    z_top: hr.z,
                    thickness: hr.value,
                    effective_thickness: er.value,
                })
        })
        .collect();
    joined.sort_by(|a, b| a.well_id.cmp(&b.well_id));
    joined
}

/// Load and join the H and EFF_H files.
pub fn load_attributes(h_path: &Path, eff_h_path: &Path) -> Result<Vec<WellAttributes>, LoadError> {
    let read = |p: &Path| std::fs::read_to_string(p).map_err(|e| LoadError::Io(p.to_path_buf(), e));
    let h = parse_attribute_table(&read(h_path)?);
    let eff_h = parse_attribute_table(&read(eff_h_path)?);
    let joined = join_attributes(&h, &eff_h);
    info!(
        h_rows = h.len(),
        eff_h_rows = eff_h.len(),
        wells = joined.len(),
        "Loaded well attributes"
    );
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: &str = "\
# X Y Z Well H
100 200 -1500 W2 20.0
50 60 -1490 W1 10.0   # trailing comment
70 80 -1495 W3 abc
";

    const EFF_H: &str = "\
100 200 -1500 W2 5.0
50 60 -1490 W1 4.0
70 80 -1495 W3 1.0
1 1 1 W4 1.0
";

    #[test]
    fn test_parse_drops_bad_rows() {
        let rows = parse_attribute_table(H);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].well, "W1");
        assert_eq!(rows[1].value, 10.0);
    }

    #[test]
    fn test_join_sorted_with_ratio() {
        let joined = join_attributes(&parse_attribute_table(H), &parse_attribute_table(EFF_H));
        let ids: Vec<&str> = joined.iter().map(|a| a.well_id.as_str()).collect();
        assert_eq!(ids, ["W1", "W2"]);
        assert!((joined[0].collector_ratio() - 0.4).abs() < 1e-12);
        assert_eq!(joined[1].z_top, -1500.0);
    }

    #[test]
    fn test_join_requires_matching_coordinates() {
        let h = parse_attribute_table("1 1 1 W 10\n");
        let eff = parse_attribute_table("1 1 2 W 5\n");
        assert!(join_attributes(&h, &eff).is_empty());
    }
}
