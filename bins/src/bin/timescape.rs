// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Timescape project*
//!
//! Run the Timescape engine over a JSON file of events and print what it
//! works out (as JSON)
//!

use clap::{Parser, Subcommand, ValueEnum, builder::PossibleValue};
use log::{debug, info};
use serde::Serialize;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};
use timescape_core::Event;
use timescape_engine::{AutoFit, AxisTick, Engine, EngineConfig, LayoutItem, Point};

/// timescape entry point
///
/// One of:
/// - Lay events out on a track or in swimlanes
/// - Generate the path time flows along
/// - Work out the starting zoom
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    setup_logging(args.verbose)?;

    let common = args.command.common();
    let config = match &common.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::new(config);
    engine.set_events(load_events(&common.events)?);
    let fit = engine.auto_fit(common.viewport_width);
    if let Some(pixels_per_year) = common.pixels_per_year {
        engine.set_pixels_per_year(pixels_per_year);
    }

    let json = match &args.command {
        Command::Layout { mode, .. } => serde_json::to_string_pretty(&layout_output(&mut engine, *mode))?,
        Command::Path { flavour, .. } => serde_json::to_string_pretty(&path_output(&engine, *flavour))?,
        Command::Fit { .. } => serde_json::to_string_pretty(&FitOutput {
            fit,
            zoom_ceiling: engine.zoom_ceiling(),
            viewport_offset: engine.viewport().viewport_offset,
        })?,
    };
    println!("{json}");
    Ok(())
}

/// Log to the terminal at a level set by the number of `-v` flags
fn setup_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config_log = ConfigBuilder::new().add_filter_allow_str("timescape").build();
    CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])
}

fn load_events(path: &Path) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    info!("Loading events from {}", path.display());
    let json = fs::read_to_string(path)?;
    let events: Vec<Event> = serde_json::from_str(&json)?;
    debug!("Loaded {} events", events.len());
    Ok(events)
}

#[derive(Serialize)]
struct LayoutOutput<'a> {
    pixels_per_year: f64,
    total_width: f64,
    items: &'a [LayoutItem],

    /// Swimlanes only
    #[serde(skip_serializing_if = "Option::is_none")]
    lane_count: Option<usize>,

    ticks: &'a [AxisTick],
}

fn layout_output(engine: &mut Engine, mode: Mode) -> LayoutOutput<'_> {
    let layout = engine.layout();
    let (items, lane_count) = match mode {
        Mode::Track => (layout.track.items.as_slice(), None),
        Mode::Swimlanes => (layout.swimlanes.items.as_slice(), Some(layout.swimlanes.lane_count)),
    };
    LayoutOutput {
        pixels_per_year: layout.scale.pixels_per_year(),
        total_width: layout.scale.total_width(),
        items,
        lane_count,
        ticks: &layout.ticks,
    }
}

#[derive(Serialize)]
struct PathOutput {
    width: f64,
    total_length: f64,
    svg_path_data: String,
    points: Vec<Point>,
}

fn path_output(engine: &Engine, flavour: Flavour) -> Option<PathOutput> {
    let width = engine.scale().total_width();
    match flavour {
        Flavour::Sampled => engine.path().map(|path| PathOutput {
            width,
            total_length: path.total_length(),
            svg_path_data: path.svg_path_data(),
            points: path.points().iter().map(|point| point.point()).collect(),
        }),
        Flavour::River => engine.river_path().map(|path| PathOutput {
            width,
            total_length: path.total_length(),
            svg_path_data: path.svg_path_data(),
            points: path.segments().iter().map(|segment| segment.end).collect(),
        }),
    }
}

#[derive(Serialize)]
struct FitOutput {
    fit: AutoFit,
    zoom_ceiling: f64,
    viewport_offset: f64,
}

/// timescape CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Lay out timeline events with the timescape engine",
    after_help = "Events are read from a JSON array of {id, date_start, date_end?, milestone?}"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More logging (repeat for more still)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Arguments every command takes
#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Path to the events JSON
    #[arg(long)]
    pub events: PathBuf,

    /// Path to an engine config JSON
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Width of the viewport (px)
    #[arg(long, default_value_t = 1200.0)]
    pub viewport_width: f64,

    /// Zoom to use instead of the auto-fit zoom
    #[arg(long)]
    pub pixels_per_year: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay events out
    Layout {
        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, value_enum, default_value_t = Mode::Track)]
        mode: Mode,
    },

    /// Generate the path time flows along
    Path {
        #[command(flatten)]
        common: CommonArgs,

        #[arg(long, value_enum, default_value_t = Flavour::Sampled)]
        flavour: Flavour,
    },

    /// Work out the starting zoom
    Fit {
        #[command(flatten)]
        common: CommonArgs,
    },
}

impl Command {
    fn common(&self) -> &CommonArgs {
        match self {
            Command::Layout { common, .. } | Command::Path { common, .. } | Command::Fit { common } => common,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Mode {
    Track,
    Swimlanes,
}

impl ValueEnum for Mode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Track, Self::Swimlanes]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Mode::Track => Some(PossibleValue::new("track").help("Above and below a central axis")),
            Mode::Swimlanes => Some(PossibleValue::new("swimlanes").help("Numbered lanes")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Flavour {
    Sampled,
    River,
}

impl ValueEnum for Flavour {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Sampled, Self::River]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Flavour::Sampled => Some(PossibleValue::new("sampled").help("Seeded sine waves")),
            Flavour::River => Some(PossibleValue::new("river").help("Bézier curves through waypoints")),
        }
    }
}
