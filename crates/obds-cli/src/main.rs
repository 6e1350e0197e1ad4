//! oBDS v2 to v3 converter CLI.

use clap::{ColorChoice, Parser};
use obds_cli::logging::{LogConfig, LogFormat, init_logging};
use obds_cli::pipeline::run_conversion;
use obds_validate::StructuralValidator;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let options = cli.mapper_options();
    let result = run_conversion(
        &cli.input,
        cli.output.as_deref(),
        &options,
        &StructuralValidator::new(),
    );
    let exit_code = match result {
        Ok(_) => 0,
        Err(error) => {
            report_failure(&error, cli.verbosity.tracing_level_filter());
            1
        }
    };
    std::process::exit(exit_code);
}

/// Failure output grows with verbosity: the top-level message by default,
/// the root cause with `-v` and the full chain with `-vv`.
fn report_failure(error: &anyhow::Error, level: LevelFilter) {
    eprintln!("error: conversion failed: {error}");
    if level >= LevelFilter::DEBUG {
        for cause in error.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    } else if level >= LevelFilter::INFO && error.chain().len() > 1 {
        eprintln!("  caused by: {}", error.root_cause());
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
