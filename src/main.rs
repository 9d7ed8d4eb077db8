//! well-section - well log to cross-section mapping
//!
//! Loads trajectories, LAS curves and well attributes, maps collector
//! curves into space and prints the result as JSON on stdout. Logs go to
//! stderr.
//!
//! # Usage
//!
//! ```bash
//! # Segments for every well with a LAS curve
//! well-section segments --trajectories wells.trk --las las/ --h H.txt --eff-h EFF_H.txt
//!
//! # Cross-section through three wells
//! well-section section --trajectories wells.trk --las las/ --h H.txt --eff-h EFF_H.txt \
//!     --wells W1,W2,W3 --corridor 300
//!
//! # MD mapping diagnostics
//! well-section check --trajectories wells.trk --las las/
//!
//! # Synthetic vertical well with a mock prediction
//! well-section predict --well NEW_1 --x 1000 --y 2000 --z-top -1500 --z-bottom -1700
//! ```
//!
//! # Environment Variables
//!
//! - `WELL_SECTION_CONFIG`: path to a TOML config file
//! - `RUST_LOG`: logging level (default: info)

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use well_section::config::{self, MappingConfig};
use well_section::loaders::{self, LasWell, WellTrack};
use well_section::mapping::{map_well, map_wells, CrossSection, MdMappingCheck};
use well_section::prediction::{
    CollectorPredictor, MockPredictor, PredictionRequest, PredictionStats,
};
use well_section::types::{
    ElevationAnchor, Trajectory, WellAttributes, WellInput, WellLocation, WellReport,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "well-section")]
#[command(about = "Map well log collector curves onto trajectories and cross-sections")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides WELL_SECTION_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: SubCommand,
}

/// Input files shared by the data-driven subcommands.
#[derive(clap::Args, Debug)]
struct DataArgs {
    /// Welltrack trajectory file
    #[arg(long, value_name = "FILE")]
    trajectories: PathBuf,

    /// Directory of .las / .txt curve files
    #[arg(long, value_name = "DIR")]
    las: PathBuf,

    /// Gross thickness table (X Y Z Well H)
    #[arg(long, value_name = "FILE", requires = "eff_h")]
    h: Option<PathBuf>,

    /// Effective thickness table (X Y Z Well EFF_H)
    #[arg(long, value_name = "FILE", requires = "h")]
    eff_h: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Collector segments per well
    Segments {
        #[command(flatten)]
        data: DataArgs,
        /// Only map this well
        #[arg(long)]
        well: Option<String>,
    },

    /// Cross-section through an ordered list of wells
    Section {
        #[command(flatten)]
        data: DataArgs,
        /// Profile wells in order, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        wells: Vec<String>,
        /// Corridor half-width (default from config)
        #[arg(long)]
        corridor: Option<f64>,
    },

    /// MD mapping diagnostics per well
    Check {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Synthetic vertical well with a mock collector prediction
    Predict {
        #[arg(long)]
        well: String,
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z_top: f64,
        #[arg(long, allow_hyphen_values = true)]
        z_bottom: f64,
    },
}

// ============================================================================
// Data Loading
// ============================================================================

struct Dataset {
    tracks: Vec<WellTrack>,
    curves: Vec<LasWell>,
    attributes: Vec<WellAttributes>,
}

impl Dataset {
    fn load(args: &DataArgs, cfg: &MappingConfig) -> Result<Self> {
        let tracks = loaders::load_welltrack(&args.trajectories)
            .with_context(|| format!("Loading trajectories {}", args.trajectories.display()))?;
        let curves = loaders::load_las_dir(&args.las, cfg.curve.null_sentinel)
            .with_context(|| format!("Loading LAS directory {}", args.las.display()))?;
        let attributes = match (&args.h, &args.eff_h) {
            (Some(h), Some(eff_h)) => {
                loaders::load_attributes(h, eff_h).context("Loading well attributes")?
            }
            _ => Vec::new(),
        };
        info!(
            trajectories = tracks.len(),
            curves = curves.len(),
            attributes = attributes.len(),
            "Dataset loaded"
        );
        Ok(Self {
            tracks,
            curves,
            attributes,
        })
    }

    fn inputs(self, only: Option<&str>) -> Vec<WellInput> {
        let curves = self
            .curves
            .into_iter()
            .filter(|c| only.map_or(true, |w| c.well_name == w))
            .collect();
        loaders::assemble_inputs(&self.tracks, curves, &self.attributes)
    }
}

// ============================================================================
// Output
// ============================================================================

#[derive(Serialize)]
struct Envelope<T: Serialize> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: T,
}

fn emit<T: Serialize>(body: T) -> Result<()> {
    let envelope = Envelope {
        generated_at: Utc::now(),
        body,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &envelope).context("Writing JSON output")?;
    std::io::Write::write_all(&mut out, b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct SegmentsOutput {
    wells: Vec<WellReport>,
}

#[derive(Serialize)]
struct ChecksOutput {
    checks: Vec<MdMappingCheck>,
}

#[derive(Serialize)]
struct PredictOutput {
    request: PredictionRequest,
    trajectory: Trajectory,
    stats: Option<PredictionStats>,
    report: WellReport,
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_segments(data: &DataArgs, well: Option<&str>, cfg: &MappingConfig) -> Result<()> {
    let inputs = Dataset::load(data, cfg)?.inputs(well);
    if let Some(name) = well {
        if inputs.is_empty() {
            bail!("No LAS curve found for well '{name}'");
        }
    }
    let wells = map_wells(&inputs, cfg);
    emit(SegmentsOutput { wells })
}

fn run_section(
    data: &DataArgs,
    wells: &[String],
    corridor: Option<f64>,
    cfg: &MappingConfig,
) -> Result<()> {
    let dataset = Dataset::load(data, cfg)?;

    let mut locations: Vec<WellLocation> = Vec::with_capacity(wells.len());
    for name in wells {
        let location = dataset
            .attributes
            .iter()
            .find(|a| &a.well_id == name)
            .map(WellAttributes::location)
            .or_else(|| track_head(&dataset.tracks, name));
        match location {
            Some(l) => locations.push(l),
            None => warn!(well = %name, "No location for profile well, skipped"),
        }
    }

    let reports = map_wells(&dataset.inputs(None), cfg);
    let corridor = corridor.unwrap_or(cfg.profile.corridor_width);
    let section = CrossSection::build(locations, &reports, corridor)
        .context("Building cross-section profile")?;
    emit(section)
}

/// Profile vertex from the first trajectory station.
fn track_head(tracks: &[WellTrack], name: &str) -> Option<WellLocation> {
    let track = tracks.iter().find(|t| t.name == name)?;
    let trajectory = track.trajectory().ok()?;
    let head = trajectory.head()?;
    Some(WellLocation {
        well_id: name.to_string(),
        x: head.x,
        y: head.y,
        z_top: head.z,
    })
}

fn run_check(data: &DataArgs, cfg: &MappingConfig) -> Result<()> {
    let dataset = Dataset::load(data, cfg)?;
    let attributes = dataset.attributes.clone();
    let checks: Vec<MdMappingCheck> = dataset
        .inputs(None)
        .iter()
        .map(|input| {
            let attrs = attributes.iter().find(|a| a.well_id == input.well_id);
            let check =
                MdMappingCheck::run(&input.well_id, &input.trajectory, &input.curve, attrs, cfg);
            check.log();
            check
        })
        .collect();
    emit(ChecksOutput { checks })
}

fn run_predict(
    well: &str,
    (x, y): (f64, f64),
    (z_top, z_bottom): (f64, f64),
    cfg: &MappingConfig,
) -> Result<()> {
    let trajectory = Trajectory::vertical(
        x,
        y,
        z_top,
        z_bottom,
        cfg.synthetic.vertical_station_spacing,
    )
    .context("Building synthetic vertical trajectory")?;
    let md_range = trajectory.md_range().unwrap_or((0.0, 0.0));

    let request = PredictionRequest::for_depth_range(
        well,
        x,
        y,
        md_range,
        cfg.prediction.depth_step,
        cfg.prediction.min_points,
    );
    let predictor = MockPredictor::from_config(&cfg.prediction);
    let prediction = predictor.predict(&request);
    info!(
        well = %well,
        predictor = predictor.name(),
        points = prediction.value.len(),
        ratio = prediction.collector_ratio(),
        "Prediction generated"
    );

    let curve = prediction
        .to_curve(cfg.curve.binarize_threshold)
        .context("Building predicted curve")?;
    let input = WellInput {
        well_id: well.to_string(),
        trajectory: trajectory.clone(),
        curve,
        anchor: Some(ElevationAnchor {
            z_top,
            thickness: z_top - z_bottom,
        }),
    };
    let report = map_well(&input, cfg);

    emit(PredictOutput {
        request,
        trajectory,
        stats: PredictionStats::compute(std::slice::from_ref(&prediction)),
        report,
    })
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<MappingConfig> {
    match path {
        Some(p) => MappingConfig::load_from_file(p)
            .with_context(|| format!("Loading config {}", p.display())),
        None => Ok(MappingConfig::load()),
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    config::init(load_config(args.config.as_deref())?);
    let cfg = config::get();
    info!(
        corridor = cfg.profile.corridor_width,
        tolerance = cfg.resolver.range_tolerance,
        "Configuration ready"
    );

    match &args.command {
        SubCommand::Segments { data, well } => run_segments(data, well.as_deref(), cfg),
        SubCommand::Section {
            data,
            wells,
            corridor,
        } => run_section(data, wells, *corridor, cfg),
        SubCommand::Check { data } => run_check(data, cfg),
        SubCommand::Predict {
            well,
            x,
            y,
            z_top,
            z_bottom,
        } => run_predict(well, (*x, *y), (*z_top, *z_bottom), cfg),
    }
}
