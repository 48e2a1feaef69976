//! Investor State - analysis backend
//!
//! This library computes the quantitative results of the Investor State
//! framework. It handles:
//! - LROMA (Levelized Return on Mobility Asset) for vehicle investors
//! - FMIP (Fiscal Multiplier of Industrial Policy) for the public investor
//! - Sensitivity sweeps, breakeven levers and scenario comparison
//! - Figure datasets (crossover map, FMIP composition, FET nexus)
//! - CSV and JSON export

pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod figures;
pub mod metrics;
pub mod models;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Error type for analysis commands
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Vehicle '{vehicle}' not found. Available: {available:?}")]
    VehicleNotFound {
        vehicle: String,
        available: Vec<String>,
    },

    #[error("Scenario '{scenario}' not found in parameters. Available: {available:?}")]
    ScenarioNotFound {
        scenario: String,
        available: Vec<String>,
    },

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ============================================================================
// Application Setup
// ============================================================================

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "INVESTOR_STATE_LOG";

/// Parse arguments, run the requested command and map the outcome to an
/// exit code.
pub fn run() -> i32 {
    let cli = cli::Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("investor-state error: {}", e);
        return 1;
    }

    tracing::info!("Running Investor State Framework Analysis");

    match commands::dispatch(&cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("investor-state error: {}", e);
            1
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<(), AnalysisError> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AnalysisError::Internal(format!("Failed to initialize logging: {}", e)))
}
