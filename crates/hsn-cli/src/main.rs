//! HSN code lookup CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use hsn_cli::config::AppConfig;
use hsn_cli::logging::{LogConfig, LogFormat, init_logging};
use hsn_cli::summary::{
    lookup_table, stats_table, suggestion_table, validation_footer, validation_table,
};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{load_code_book, run_lookup, run_stats, run_suggest, run_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = AppConfig::discover(cli.config.as_deref())?;
    let book = load_code_book(cli, &config)?;
    let json = cli.format == OutputFormatArg::Json;

    match &cli.command {
        Command::Validate(args) => {
            let report = run_validate(&book, args, &config);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", validation_table(&report));
                println!("{}", validation_footer(&report));
            }
            Ok(i32::from(report.summary.has_invalid()))
        }
        Command::Suggest(args) => {
            let report = run_suggest(&book, args, &config);
            if json {
                print_json(&report)?;
            } else if report.matches.is_empty() {
                println!("No suggestions for {:?}", report.query);
            } else {
                println!("{}", suggestion_table(&report));
            }
            Ok(0)
        }
        Command::Lookup(args) => {
            let report = run_lookup(&book, args);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", lookup_table(&report));
            }
            Ok(i32::from(!report.found))
        }
        Command::Stats => {
            let report = run_stats(&book);
            if json {
                print_json(&report)?;
            } else {
                println!("{}", stats_table(&report));
            }
            Ok(0)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

/// Build logging configuration from CLI flags.
///
/// `--log-level` beats `-v/-q`, which beat `RUST_LOG`, which beats the
/// default of `warn`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()));
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Off => LevelFilter::OFF,
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
