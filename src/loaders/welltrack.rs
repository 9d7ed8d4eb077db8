//! Welltrack trajectory files.
//!
//! ```text
//! welltrack 'WELL_001'
//! ; X Y Z MD
//! 512340.0 6720110.0 -1450.0 0.0
//! 512341.5 6720112.0 -1460.0 10.1
//! ```
//!
//! A line containing `welltrack '<NAME>'` starts a block. Blank lines and
//! lines containing `;` are skipped, as are lines whose first four fields
//! are not numbers. Extra fields after MD are ignored.

use super::LoadError;
use crate::types::{Trajectory, TrajectoryError};
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

/// Raw `[x, y, z, md]` rows for one well, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct WellTrack {
    pub name: String,
    pub rows: Vec<[f64; 4]>,
}

impl WellTrack {
    pub fn trajectory(&self) -> Result<Trajectory, TrajectoryError> {
        Trajectory::from_rows(&self.rows)
    }
}

/// Parse welltrack text. Wells without data rows are dropped; a repeated
/// name replaces the earlier block in place.
pub fn parse_welltrack(text: &str) -> Result<Vec<WellTrack>, LoadError> {
    let header = Regex::new(r"(?i)welltrack[^']*'([^']*)'")?;

    let mut tracks: Vec<WellTrack> = Vec::new();
    let mut current: Option<WellTrack> = None;

    for line in text.lines().map(str::trim) {
        if let Some(caps) = header.captures(line) {
            if let Some(done) = current.take() {
                push_track(&mut tracks, done);
            }
            current = Some(WellTrack {
                name: caps[1].to_string(),
                rows: Vec::new(),
            });
            continue;
        }
        if line.is_empty() || line.contains(';') {
            continue;
        }
        let Some(track) = current.as_mut() else {
            continue;
        };
        if let Some(row) = parse_row(line) {
            track.rows.push(row);
        } else {
            debug!(well = %track.name, line = line, "Skipping unparseable welltrack line");
        }
    }
    if let Some(done) = current {
        push_track(&mut tracks, done);
    }

    Ok(tracks)
}

/// Read and parse a welltrack file.
pub fn load_welltrack(path: &Path) -> Result<Vec<WellTrack>, LoadError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let tracks = parse_welltrack(&text)?;
    info!(path = %path.display(), wells = tracks.len(), "Loaded welltrack file");
    Ok(tracks)
}

fn parse_row(line: &str) -> Option<[f64; 4]> {
    let mut fields = line.split_whitespace();
    let mut row = [0.0; 4];
    for slot in &mut row {
        *slot = fields.next()?.parse().ok()?;
    }
    Some(row)
}

fn push_track(tracks: &mut Vec<WellTrack>, track: WellTrack) {
    if track.rows.is_empty() {
        return;
    }
    if let Some(existing) = tracks.iter_mut().find(|t| t.name == track.name) {
        *existing = track;
    } else {
        tracks.push(track);
    }
}
