//! CLI argument definitions for the metrics workbench.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use metric_model::ChartType;

use crate::session::DEFAULT_SESSION_FILE;

#[derive(Parser)]
#[command(
    name = "metrics",
    version,
    about = "Log longevity metrics and chart them",
    long_about = "Log longevity metrics (sleep, steps, protein, ...) to a CSV store and\n\
                  chart them together with a JSON document of weighted factors."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub stores: StoreArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow metric names and values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

/// Locations of the stores and the session file.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Tabular store of logged observations.
    #[arg(long = "csv", value_name = "PATH", default_value = "data.csv", global = true)]
    pub csv: PathBuf,

    /// Structured document with a chart title and labelled points.
    #[arg(long = "json", value_name = "PATH", default_value = "data.json", global = true)]
    pub json: PathBuf,

    /// Session file holding chart selections and weights.
    #[arg(
        long = "session",
        value_name = "PATH",
        default_value = DEFAULT_SESSION_FILE,
        global = true
    )]
    pub session: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the preset metric names.
    Presets,

    /// Log one metric value.
    Survey(SurveyArgs),

    /// Show the current contents of the CSV store.
    Data,

    /// Show the status counts and the three charts.
    Visuals(VisualsArgs),

    /// Write one shaped chart frame as CSV.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct SurveyArgs {
    /// Preset metric name, or "Other" together with --custom.
    #[arg(value_name = "METRIC", required_unless_present = "custom")]
    pub metric: Option<String>,

    /// Custom metric name (used instead of a preset).
    #[arg(long = "custom", value_name = "NAME")]
    pub custom: Option<String>,

    /// Value to record (zero or more).
    #[arg(long = "value", value_name = "VALUE", value_parser = parse_value)]
    pub value: f64,
}

#[derive(Args, Default)]
pub struct VisualsArgs {
    #[command(flatten)]
    pub controls: ControlArgs,

    /// Print the trend chart's wide table.
    #[arg(long = "show-data")]
    pub show_data: bool,
}

/// Chart controls; each flag updates the stored session.
#[derive(Args, Default)]
pub struct ControlArgs {
    /// Restore default controls before applying other flags.
    #[arg(long = "reset")]
    pub reset: bool,

    /// Category to show on the trend chart (repeatable; replaces the selection).
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Show every category on the trend chart.
    #[arg(long = "all-categories", conflicts_with = "categories")]
    pub all_categories: bool,

    /// Trend chart type.
    #[arg(long = "chart", value_enum)]
    pub chart: Option<ChartTypeArg>,

    /// Keep only the last N entries per category (0 = all).
    #[arg(
        long = "last-n",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(0..=1000)
    )]
    pub last_n: Option<u16>,

    /// Show running sums on the trend chart.
    #[arg(long = "cumulative", overrides_with = "no_cumulative")]
    pub cumulative: bool,

    /// Show raw values on the trend chart.
    #[arg(long = "no-cumulative")]
    pub no_cumulative: bool,

    /// Weight for a document label, as LABEL=WEIGHT (0.0 to 3.0, repeatable).
    #[arg(long = "weight", value_name = "LABEL=WEIGHT", value_parser = parse_weight)]
    pub weights: Vec<(String, f64)>,

    /// Show weighted values as percentage shares.
    #[arg(long = "normalize", overrides_with = "no_normalize")]
    pub normalize: bool,

    /// Show raw weighted values.
    #[arg(long = "no-normalize")]
    pub no_normalize: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Which chart to export.
    #[arg(value_enum)]
    pub chart: ChartArg,

    /// Output file (stdout when omitted).
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartArg {
    /// Static chart of the JSON document.
    Static,
    /// Windowed pivot of the CSV store.
    Trend,
    /// Weighted chart of the JSON document.
    Weighted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartTypeArg {
    Line,
    Bar,
}

impl From<ChartTypeArg> for ChartType {
    fn from(arg: ChartTypeArg) -> Self {
        match arg {
            ChartTypeArg::Line => ChartType::Line,
            ChartTypeArg::Bar => ChartType::Bar,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_value(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be zero or more"));
    }
    Ok(value)
}

fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    let (label, weight) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("'{raw}' is not LABEL=WEIGHT"))?;
    let label = label.trim();
    if label.is_empty() {
        return Err(format!("'{raw}' has an empty label"));
    }
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| format!("'{weight}' is not a number"))?;
    if !(0.0..=3.0).contains(&weight) {
        return Err(format!("weight {weight} is outside 0.0 to 3.0"));
    }
    Ok((label.to_string(), weight))
}
