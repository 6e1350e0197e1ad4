//! CLI argument definitions for the oBDS converter.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use obds_transform::MapperOptions;

#[derive(Parser)]
#[command(
    name = "obds2to3",
    version,
    about = "Convert ADT_GEKID (oBDS v2) documents to oBDS v3",
    long_about = "Convert cancer registry documents from ADT_GEKID 2.x (oBDS v2) to oBDS 3.0.4.\n\n\
                  Messages carrying several clinical records are split into one message per\n\
                  record. Input and output are validated unless validation is disabled."
)]
pub struct Cli {
    /// ADT_GEKID input document.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Output file for the oBDS v3 document (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Drop messages that cannot be represented in oBDS v3 instead of failing.
    #[arg(long = "ignore-unmappable-messages")]
    pub ignore_unmappable_messages: bool,

    /// Drop patients that cannot be represented in oBDS v3 instead of failing.
    ///
    /// Implies --ignore-unmappable-messages.
    #[arg(long = "ignore-unmappable-patients")]
    pub ignore_unmappable_patients: bool,

    /// Derive a tumor ID from diagnosis date, ICD code and message ID when
    /// the source has none.
    #[arg(long = "fix-missing-id")]
    pub fix_missing_id: bool,

    /// Skip schema validation of input and output.
    #[arg(long = "disable-schema-validation")]
    pub disable_schema_validation: bool,

    /// Adjust verbosity (-v prints error causes, -vv the full error chain, -q errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn mapper_options(&self) -> MapperOptions {
        MapperOptions::new()
            .with_ignore_unmappable_messages(self.ignore_unmappable_messages)
            .with_ignore_unmappable_patients(self.ignore_unmappable_patients)
            .with_fix_missing_id(self.fix_missing_id)
            .with_disable_schema_validation(self.disable_schema_validation)
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
