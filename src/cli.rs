//! Command-line interface
//!
//! With no subcommand the full analysis runs, same as `investor-state run`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::export::ExportFormat;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Top-level CLI parser for the `investor-state` binary.
#[derive(Debug, Parser)]
#[command(
    name = "investor-state",
    version,
    about = "Investor State Framework - LROMA and FMIP analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Parameter file layered over the built-in defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the complete analysis (default)
    Run,

    /// LROMA breakdown for one or all vehicles
    Lroma {
        /// Vehicle name; all configured vehicles when omitted
        #[arg(long)]
        vehicle: Option<String>,
    },

    /// Lever values at which LROMA reaches a target
    Breakeven {
        /// Vehicle name; the configured sensitivity vehicle when omitted
        #[arg(long)]
        vehicle: Option<String>,

        /// Target LROMA in JPY/km; configured target when omitted
        #[arg(long, allow_hyphen_values = true)]
        target: Option<f64>,
    },

    /// FMIP for a single fiscal scenario
    Fmip {
        #[arg(long, default_value = "base_case")]
        scenario: String,
    },

    /// Compare FMIP across fiscal scenarios
    Compare {
        /// Comma-separated scenario names
        #[arg(long, value_delimiter = ',')]
        scenarios: Option<Vec<String>>,
    },

    /// Parameter sweeps
    Sensitivity {
        #[arg(value_enum)]
        model: SensitivityModel,
    },

    /// FCEV vs BEV LROMA crossover grid
    Crossover,

    /// Write figure datasets as JSON
    Figures {
        /// Output directory; configured directory when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export analysis results to files
    Export {
        /// File format: csv or json
        #[arg(long = "as", value_enum, ignore_case = true, default_value = "csv")]
        export_format: ExportFormat,

        /// Output directory; configured directory when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SensitivityModel {
    Lroma,
    Fmip,
}
