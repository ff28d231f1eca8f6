//! `metrics` command-line entry point.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use metric_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use metric_cli::commands::{run_data, run_export, run_presets, run_survey, run_visuals};
use metric_cli::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Presets => {
            run_presets();
            0
        }
        Command::Survey(args) => match run_survey(&cli.stores, args) {
            Ok(Some(_)) => 0,
            Ok(None) => 1,
            Err(error) => report(&error),
        },
        Command::Data => run_data(&cli.stores).map_or_else(|error| report(&error), |()| 0),
        Command::Visuals(args) => {
            run_visuals(&cli.stores, args).map_or_else(|error| report(&error), |()| 0)
        }
        Command::Export(args) => {
            run_export(&cli.stores, args).map_or_else(|error| report(&error), |()| 0)
        }
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    tracing::error!(error = %error, "command failed");
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
