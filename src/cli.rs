use std::path::PathBuf;

use clap::{Parser, Subcommand};
use homog_calendar::CalendarKind;
use homog_timecheck::{CheckKind, Frequency};

/// homog time-axis consistency checker.
#[derive(Parser)]
#[command(
    name = "homog",
    version,
    about = "Time-axis consistency checks for gridded climate time series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file (default: ./homog.toml if present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Report duplicated, redundant and missing timestamps.
    Timecheck(TimecheckArgs),
    /// Find the largest season-aligned range of a time axis.
    Limit(LimitArgs),
    /// Check whether a time axis covers a range.
    Within(WithinArgs),
    /// Select the positions of a time axis inside a range.
    Select(SelectArgs),
    /// Print the range covered by every input.
    Intersect(IntersectArgs),
}

/// How to read an input time coordinate.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Text axis file or NetCDF file.
    pub input: PathBuf,

    /// Override the time variable name from config.
    #[arg(long)]
    pub time_var: Option<String>,

    /// Override the calendar declared by the file.
    #[arg(long)]
    pub calendar: Option<CalendarKind>,

    /// Template of the timestamps in a text axis file.
    #[arg(long)]
    pub input_format: Option<String>,
}

/// Arguments for the `timecheck` subcommand.
#[derive(clap::Args)]
pub struct TimecheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// CF frequency token (e.g. `day`, `mon`, `3hr`).
    #[arg(short, long)]
    pub frequency: Option<Frequency>,

    /// Checks to run (default: all).
    #[arg(long, value_delimiter = ',')]
    pub checks: Vec<CheckKind>,

    /// Separator between rendered timestamps.
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Template timestamps are rendered with.
    #[arg(long)]
    pub format: Option<String>,

    /// Write the report as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the axis without duplicates as a text axis file.
    #[arg(long)]
    pub corrected: Option<PathBuf>,
}

/// Arguments for the `limit` subcommand.
#[derive(clap::Args)]
pub struct LimitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// CF frequency token.
    #[arg(short, long)]
    pub frequency: Option<Frequency>,

    /// Months a valid range may start in.
    #[arg(long, value_delimiter = ',')]
    pub start_months: Option<Vec<u8>>,

    /// Months a valid range may end in.
    #[arg(long, value_delimiter = ',')]
    pub end_months: Option<Vec<u8>>,

    /// Require the range to start on the first timestep of a month.
    #[arg(long)]
    pub month_start: Option<bool>,

    /// Require the range to end on the last timestep of a month.
    #[arg(long)]
    pub month_end: Option<bool>,

    /// Write the limited axis as a text axis file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `within` subcommand.
#[derive(clap::Args)]
pub struct WithinArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// CF frequency token.
    #[arg(short, long)]
    pub frequency: Option<Frequency>,

    /// Range start, possibly partial (e.g. `2005` or `2005-03`).
    #[arg(long)]
    pub start: String,

    /// Range end, possibly partial.
    #[arg(long)]
    pub end: String,
}

/// Arguments for the `select` subcommand.
#[derive(clap::Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Range start, possibly partial.
    #[arg(long)]
    pub start: String,

    /// Range end, possibly partial.
    #[arg(long)]
    pub end: String,

    /// Write the selected axis as a text axis file instead of printing
    /// positions.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `intersect` subcommand.
#[derive(clap::Args)]
pub struct IntersectArgs {
    /// Text axis or NetCDF files.
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Override the time variable name from config.
    #[arg(long)]
    pub time_var: Option<String>,

    /// Override the calendar declared by the files.
    #[arg(long)]
    pub calendar: Option<CalendarKind>,

    /// Template of the timestamps in text axis files.
    #[arg(long)]
    pub input_format: Option<String>,

    /// Write the common range as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
