//! Analysis commands
//!
//! Each CLI subcommand maps to a handler here. Handlers build calculators
//! from the loaded configuration, compute, and hand the result to the
//! output layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::{Cli, Commands, OutputFormat, SensitivityModel};
use crate::config::AnalysisConfig;
use crate::export::{self, ExportFormat};
use crate::figures::{self, CrossoverMap, SummaryDashboard};
use crate::metrics::{FmipCalculator, LromaCalculator};
use crate::models::{
    BreakevenPoints, FmipSensitivityPoint, LromaBreakdown, LromaSensitivityPoint,
    ScenarioComparisonRow,
};
use crate::output;
use crate::AnalysisError;

// ============================================================================
// Response Types
// ============================================================================

/// Everything the full analysis run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub lroma: Vec<LromaBreakdown>,
    pub breakeven: Vec<BreakevenPoints>,
    pub fmip_comparison: Vec<ScenarioComparisonRow>,
    pub lroma_sensitivity: Vec<LromaSensitivityPoint>,
    pub fmip_sensitivity: Vec<FmipSensitivityPoint>,
    pub crossover: Option<CrossoverMap>,
}

/// Zone tally of the crossover grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverSummary {
    pub grid_points: usize,
    pub fcev_superior: usize,
    pub bev_superior: usize,
    pub parity: usize,
    pub zero_contour_points: usize,
}

impl From<&CrossoverMap> for CrossoverSummary {
    fn from(map: &CrossoverMap) -> Self {
        let (fcev_superior, bev_superior, parity) = map.zone_counts();
        Self {
            grid_points: map.grid.len(),
            fcev_superior,
            bev_superior,
            parity,
            zero_contour_points: map.zero_contour.len(),
        }
    }
}

/// File written by the figures or export commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenFile {
    pub kind: String,
    pub path: String,
    pub rows: usize,
}

impl WrittenFile {
    fn new(kind: &str, path: &Path, rows: usize) -> Self {
        Self {
            kind: kind.to_string(),
            path: path.display().to_string(),
            rows,
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Load configuration and run the requested command
pub fn dispatch(cli: &Cli) -> Result<(), AnalysisError> {
    let config = AnalysisConfig::load(cli.config.as_deref())?;
    let format = cli.format;

    match &cli.command {
        None | Some(Commands::Run) => {
            let report = run_analysis(&config)?;
            print_report(&report, format)
        }
        Some(Commands::Lroma { vehicle }) => {
            output::output(&lroma_breakdowns(&config, vehicle.as_deref())?, format)
        }
        Some(Commands::Breakeven { vehicle, target }) => {
            let target = target.unwrap_or(config.analysis.breakeven_target);
            output::output(&breakeven(&config, vehicle.as_deref(), target)?, format)
        }
        Some(Commands::Fmip { scenario }) => {
            output::output(&fmip_calculator(&config).calculate_fmip(scenario)?, format)
        }
        Some(Commands::Compare { scenarios }) => {
            let names = scenarios
                .as_deref()
                .or(config.analysis.comparison_scenarios.as_deref());
            output::output(&fmip_calculator(&config).scenario_comparison(names), format)
        }
        Some(Commands::Sensitivity { model }) => match model {
            SensitivityModel::Lroma => output::output(&lroma_sensitivity(&config)?, format),
            SensitivityModel::Fmip => output::output(&fmip_sensitivity(&config)?, format),
        },
        Some(Commands::Crossover) => {
            let map = figures::build_crossover_map(&lroma_calculator(&config), &config.crossover)?;
            match format {
                OutputFormat::Json => output::output(&map, format),
                OutputFormat::Table => output::output(&map.grid, format),
            }
        }
        Some(Commands::Figures { output: dir }) => {
            let dir = dir.clone().unwrap_or_else(|| config.output.directory.clone());
            output::output(&write_figures(&config, &dir)?, format)
        }
        Some(Commands::Export {
            export_format,
            output: dir,
        }) => {
            let dir = dir.clone().unwrap_or_else(|| config.output.directory.clone());
            let report = run_analysis(&config)?;
            output::output(&export_report(&report, *export_format, &dir)?, format)
        }
    }
}

fn lroma_calculator(config: &AnalysisConfig) -> LromaCalculator {
    LromaCalculator::new(config.vehicles.clone())
}

fn fmip_calculator(config: &AnalysisConfig) -> FmipCalculator {
    FmipCalculator::new(config.fmip.clone())
}

// ============================================================================
// Handlers
// ============================================================================

/// LROMA breakdown for one vehicle, or every configured vehicle
pub fn lroma_breakdowns(
    config: &AnalysisConfig,
    vehicle: Option<&str>,
) -> Result<Vec<LromaBreakdown>, AnalysisError> {
    let calculator = lroma_calculator(config);
    let names = match vehicle {
        Some(name) => vec![name.to_string()],
        None => calculator.vehicle_names(),
    };

    names
        .iter()
        .map(|name| calculator.calculate_breakdown(name))
        .collect()
}

/// Breakeven levers for a vehicle, the sensitivity vehicle when `None`
pub fn breakeven(
    config: &AnalysisConfig,
    vehicle: Option<&str>,
    target: f64,
) -> Result<BreakevenPoints, AnalysisError> {
    let vehicle = vehicle.unwrap_or(&config.sensitivity.vehicle);
    let calculator = lroma_calculator(config);
    let params = calculator.vehicle(vehicle)?;
    let mut points = calculator.calculate_breakeven(params, target)?;
    points.vehicle = vehicle.to_string();
    Ok(points)
}

pub fn lroma_sensitivity(
    config: &AnalysisConfig,
) -> Result<Vec<LromaSensitivityPoint>, AnalysisError> {
    let calculator = lroma_calculator(config);
    let base = calculator.vehicle(&config.sensitivity.vehicle)?;
    Ok(calculator.sensitivity_analysis(base, &config.sensitivity.lroma))
}

pub fn fmip_sensitivity(
    config: &AnalysisConfig,
) -> Result<Vec<FmipSensitivityPoint>, AnalysisError> {
    fmip_calculator(config).sensitivity_analysis(&config.sensitivity.scenario, &config.sensitivity.fmip)
}

/// Run every analysis the configuration supports.
///
/// Optional pieces (sensitivity sweeps, crossover map) are skipped with a
/// warning when the vehicles or scenarios they need are not configured.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let lroma_calc = lroma_calculator(config);
    let fmip_calc = fmip_calculator(config);

    let lroma = lroma_breakdowns(config, None)?;
    for breakdown in &lroma {
        info!(
            "LROMA calculation successful for {}: JPY {:.2}/km",
            breakdown.vehicle, breakdown.lroma
        );
    }

    let breakeven = lroma_calc
        .vehicle_names()
        .iter()
        .map(|name| self::breakeven(config, Some(name), config.analysis.breakeven_target))
        .collect::<Result<Vec<_>, _>>()?;

    let fmip_comparison =
        fmip_calc.scenario_comparison(config.analysis.comparison_scenarios.as_deref());
    info!("Compared FMIP across {} scenarios", fmip_comparison.len());

    let lroma_sensitivity = match lroma_sensitivity(config) {
        Ok(points) => points,
        Err(e) => {
            warn!("Skipping LROMA sensitivity analysis: {}", e);
            Vec::new()
        }
    };

    let fmip_sensitivity = match fmip_sensitivity(config) {
        Ok(points) => points,
        Err(e) => {
            warn!("Skipping FMIP sensitivity analysis: {}", e);
            Vec::new()
        }
    };

    let crossover = if config.vehicles.contains_key(&config.crossover.fcev)
        && config.vehicles.contains_key(&config.crossover.bev)
    {
        Some(figures::build_crossover_map(&lroma_calc, &config.crossover)?)
    } else {
        warn!(
            "Skipping crossover map: vehicles '{}' and '{}' must both be configured",
            config.crossover.fcev, config.crossover.bev
        );
        None
    };

    info!("Analysis complete");

    Ok(AnalysisReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        lroma,
        breakeven,
        fmip_comparison,
        lroma_sensitivity,
        fmip_sensitivity,
        crossover,
    })
}

fn print_report(report: &AnalysisReport, format: OutputFormat) -> Result<(), AnalysisError> {
    if format == OutputFormat::Json {
        return output::output(report, format);
    }

    let mut sections = vec![
        ("LROMA [JPY/km]", output::to_value(&report.lroma)?),
        ("Breakeven levers", output::to_value(&report.breakeven)?),
        ("FMIP scenario comparison", output::to_value(&report.fmip_comparison)?),
        ("LROMA sensitivity", output::to_value(&report.lroma_sensitivity)?),
        ("FMIP sensitivity", output::to_value(&report.fmip_sensitivity)?),
    ];
    if let Some(map) = &report.crossover {
        sections.push(("Crossover map", output::to_value(&CrossoverSummary::from(map))?));
    }

    println!("{}", output::render_sections(&sections));
    Ok(())
}

/// Write every figure dataset as JSON
pub fn write_figures(config: &AnalysisConfig, dir: &Path) -> Result<Vec<WrittenFile>, AnalysisError> {
    let dir = export::prepare_export_directory(dir)?;
    let mut written = Vec::new();

    let crossover = match figures::build_crossover_map(&lroma_calculator(config), &config.crossover) {
        Ok(map) => {
            let path = dir.join(export::generate_export_filename("lroma_crossover", "json"));
            export::write_json("lroma_crossover", &map, &path)?;
            written.push(WrittenFile::new("lroma_crossover", &path, map.grid.len()));
            Some(map)
        }
        Err(e) => {
            warn!("Could not build crossover map: {}", e);
            None
        }
    };

    let scenario_name = &config.analysis.composition_scenario;
    let composition = match fmip_calculator(config)
        .scenario(scenario_name)
        .and_then(|scenario| figures::build_fmip_composition(scenario_name, scenario))
    {
        Ok(chart) => {
            let path = dir.join(export::generate_export_filename("fmip_composition", "json"));
            export::write_json("fmip_composition", &chart, &path)?;
            let bars = chart.tax_revenues.bars.len() + chart.fiscal_avoidance.bars.len();
            written.push(WrittenFile::new("fmip_composition", &path, bars));
            Some(chart)
        }
        Err(e) => {
            warn!("Could not build FMIP composition: {}", e);
            None
        }
    };

    let nexus = figures::build_fet_nexus();
    let path = dir.join(export::generate_export_filename("fet_nexus", "json"));
    export::write_json("fet_nexus", &nexus, &path)?;
    written.push(WrittenFile::new("fet_nexus", &path, nexus.links.len()));

    let dashboard = SummaryDashboard::new(crossover, composition);
    let path = dir.join(export::generate_export_filename("dashboard", "json"));
    export::write_json("dashboard", &dashboard, &path)?;
    written.push(WrittenFile::new("dashboard", &path, 1));

    info!("Wrote {} figure datasets to {}", written.len(), dir.display());
    Ok(written)
}

/// Export a report as one JSON document or one CSV per table
pub fn export_report(
    report: &AnalysisReport,
    format: ExportFormat,
    dir: &Path,
) -> Result<Vec<WrittenFile>, AnalysisError> {
    let dir = export::prepare_export_directory(dir)?;
    let path_for = |prefix: &str| -> PathBuf {
        dir.join(export::generate_export_filename(prefix, format.extension()))
    };

    let mut written = Vec::new();
    match format {
        ExportFormat::Json => {
            let path = path_for("analysis_report");
            export::write_json("analysis_report", report, &path)?;
            written.push(WrittenFile::new("analysis_report", &path, 1));
        }
        ExportFormat::Csv => {
            let path = path_for("lroma");
            export::write_lroma_csv(&report.lroma, &path)?;
            written.push(WrittenFile::new("lroma", &path, report.lroma.len()));

            let path = path_for("breakeven");
            export::write_breakeven_csv(&report.breakeven, &path)?;
            written.push(WrittenFile::new("breakeven", &path, report.breakeven.len()));

            let path = path_for("fmip_comparison");
            export::write_fmip_comparison_csv(&report.fmip_comparison, &path)?;
            written.push(WrittenFile::new("fmip_comparison", &path, report.fmip_comparison.len()));

            let path = path_for("lroma_sensitivity");
            export::write_lroma_sensitivity_csv(&report.lroma_sensitivity, &path)?;
            written.push(WrittenFile::new("lroma_sensitivity", &path, report.lroma_sensitivity.len()));

            let path = path_for("fmip_sensitivity");
            export::write_fmip_sensitivity_csv(&report.fmip_sensitivity, &path)?;
            written.push(WrittenFile::new("fmip_sensitivity", &path, report.fmip_sensitivity.len()));

            if let Some(map) = &report.crossover {
                let path = path_for("lroma_crossover");
                export::write_crossover_csv(&map.grid, &path)?;
                written.push(WrittenFile::new("lroma_crossover", &path, map.grid.len()));
            }
        }
    }

    info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
