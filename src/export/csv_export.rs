//! CSV export functionality
//!
//! One file per result table; headers come from the serde field names.

use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::figures::crossover::CrossoverPoint;
use crate::models::{
    BreakevenPoints, FmipSensitivityPoint, LromaBreakdown, LromaSensitivityPoint,
    ScenarioComparisonRow,
};
use crate::AnalysisError;

const LROMA_HEADERS: &[&str] = &[
    "vehicle",
    "annual_profit",
    "npv",
    "pv_distance",
    "lroma",
    "discounted_payback_year",
];
const BREAKEVEN_HEADERS: &[&str] = &[
    "vehicle",
    "target_lroma",
    "base_lroma",
    "freight_rate",
    "tco_per_km",
    "capex",
    "annual_distance",
];
const LROMA_SENSITIVITY_HEADERS: &[&str] = &["parameter", "value", "lroma"];
const FMIP_COMPARISON_HEADERS: &[&str] = &[
    "scenario",
    "fmip",
    "public_investment",
    "tax_revenues",
    "fiscal_avoidance",
    "total_fiscal_return",
];
const FMIP_SENSITIVITY_HEADERS: &[&str] = &["parameter", "value", "fmip", "scenario"];
const CROSSOVER_HEADERS: &[&str] = &[
    "bev_capex_reduction",
    "charging_time_reduction",
    "fcev_lroma",
    "bev_lroma",
    "lroma_differential",
    "zone",
];

/// Serialize records with a header row.
///
/// The csv writer derives headers from the first record, so an empty table
/// gets `headers` written explicitly.
fn write_records_csv<T: Serialize>(
    records: &[T],
    headers: &[&str],
    path: &Path,
) -> Result<(), AnalysisError> {
    let mut writer = Writer::from_path(path)?;

    if records.is_empty() {
        writer.write_record(headers)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write LROMA breakdowns to CSV format
pub fn write_lroma_csv(rows: &[LromaBreakdown], path: &Path) -> Result<(), AnalysisError> {
    write_records_csv(rows, LROMA_HEADERS, path)
}

/// Write breakeven levers to CSV format
pub fn write_breakeven_csv(rows: &[BreakevenPoints], path: &Path) -> Result<(), AnalysisError> {
    write_records_csv(rows, BREAKEVEN_HEADERS, path)
}

/// Write LROMA sensitivity sweep to CSV format
pub fn write_lroma_sensitivity_csv(
    points: &[LromaSensitivityPoint],
    path: &Path,
) -> Result<(), AnalysisError> {
    write_records_csv(points, LROMA_SENSITIVITY_HEADERS, path)
}

/// Write FMIP scenario comparison to CSV format
pub fn write_fmip_comparison_csv(
    rows: &[ScenarioComparisonRow],
    path: &Path,
) -> Result<(), AnalysisError> {
    write_records_csv(rows, FMIP_COMPARISON_HEADERS, path)
}

/// Write FMIP sensitivity sweep to CSV format
pub fn write_fmip_sensitivity_csv(
    points: &[FmipSensitivityPoint],
    path: &Path,
) -> Result<(), AnalysisError> {
    write_records_csv(points, FMIP_SENSITIVITY_HEADERS, path)
}

/// Write the crossover grid to CSV format
pub fn write_crossover_csv(points: &[CrossoverPoint], path: &Path) -> Result<(), AnalysisError> {
    write_records_csv(points, CROSSOVER_HEADERS, path)
}
