use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dclock_core::{ClockError, LocalClock, TimeSource, normalize_time_of_day, parse_clock_time};
use dclock_overlay::OutputFormat;

/// Decimal clock: time of day as 110 concentric neon rings.
#[derive(Parser)]
#[command(name = "dclock", version, about = "Decimal ring clock")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Print which rings are lit for an instant.
    State(StateArgs),
    /// Render a single frame to a PNG or SVG file.
    Render(RenderArgs),
    /// Follow the wall clock and rewrite a frame whenever the rings change.
    Watch(WatchArgs),
    /// Show the effective configuration.
    Config(ConfigArgs),
}

/// Which instant to show. Defaults to the local wall clock.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TimeArgs {
    /// Seconds since midnight. Values outside 0..86400 wrap into the day.
    #[arg(long, allow_negative_numbers = true, conflicts_with = "at")]
    pub time: Option<f64>,

    /// Wall-clock time as HH:MM[:SS[.fff]].
    #[arg(long, value_name = "HH:MM:SS")]
    pub at: Option<String>,
}

impl TimeArgs {
    pub fn time_of_day(&self) -> Result<f64, ClockError> {
        match (self.time, self.at.as_deref()) {
            (Some(seconds), _) => normalize_time_of_day(seconds),
            (None, Some(at)) => parse_clock_time(at),
            (None, None) => Ok(LocalClock.seconds_since_midnight()),
        }
    }
}

/// Arguments for the `state` subcommand.
#[derive(clap::Args)]
pub struct StateArgs {
    #[command(flatten)]
    pub time: TimeArgs,

    /// Emit the indicator state and ring layout as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` subcommand.
#[derive(clap::Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub time: TimeArgs,

    /// Output file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (png or svg). Inferred from the extension if omitted.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Override the image edge length in pixels.
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,
}

/// Arguments for the `watch` subcommand.
#[derive(clap::Args)]
pub struct WatchArgs {
    /// Output file. Falls back to `output_path` from the config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (png or svg). Inferred from the extension if omitted.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Override the image edge length in pixels.
    #[arg(long, value_name = "PX")]
    pub size: Option<u32>,

    /// Override the sampling interval from the config.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many distinct frames.
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Shift the wall clock by this many seconds.
    #[arg(long, allow_negative_numbers = true, value_name = "SECS")]
    pub offset: Option<f64>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// Print the config file location instead of its contents.
    #[arg(long, conflicts_with = "write")]
    pub path: bool,

    /// Write the effective configuration to this file.
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}
