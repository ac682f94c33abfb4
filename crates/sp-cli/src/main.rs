//! Small populations publisher CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use sp_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use sp_cli::logging::{LogConfig, LogFormat, init_logging};
use sp_cli::pipeline::{RunConfig, run};
use sp_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = run_config_from_cli(cli);
    let exit_code = match run(&config) {
        Ok(result) => {
            print_summary(&result);
            if result.has_failures() { 1 } else { 0 }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_config_from_cli(cli: Cli) -> RunConfig {
    let extracts_dir = cli
        .extracts_dir
        .unwrap_or_else(|| cli.catalog_dir.join("extracts"));
    let commission_spec = cli
        .commission_spec
        .unwrap_or_else(|| cli.catalog_dir.join("commission_spec.csv"));
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| cli.catalog_dir.join("output"));
    RunConfig {
        catalog_dir: cli.catalog_dir,
        extracts_dir,
        commissioned_dir: cli.commissioned_dir,
        commission_spec,
        output_dir,
        release_date: cli.release_date,
        dry_run: cli.dry_run,
    }
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
