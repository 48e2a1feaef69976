//! Result types
//!
//! Rows produced by the LROMA and FMIP calculators. Every type here is
//! flat so it serializes cleanly to both CSV and JSON.

use serde::{Deserialize, Serialize};

/// Full LROMA computation for one vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LromaBreakdown {
    pub vehicle: String,
    pub annual_profit: f64,
    pub npv: f64,
    pub pv_distance: f64,
    /// Levelized return in JPY/km
    pub lroma: f64,
    /// First year in which cumulative discounted cash flow turns non-negative
    pub discounted_payback_year: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LromaSensitivityPoint {
    pub parameter: String,
    pub value: f64,
    pub lroma: f64,
}

/// Lever values at which LROMA reaches the target
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakevenPoints {
    pub vehicle: String,
    pub target_lroma: f64,
    pub base_lroma: f64,
    pub freight_rate: Option<f64>,
    pub tco_per_km: Option<f64>,
    pub capex: Option<f64>,
    pub annual_distance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmipResult {
    pub scenario: String,
    /// Fiscal multiplier; infinite when there is a return on zero investment
    pub fmip: f64,
    pub pv_public_investment: f64,
    pub pv_tax_revenues: f64,
    pub pv_fiscal_avoidance: f64,
    pub total_fiscal_return: f64,
}

/// One row of a cross-scenario FMIP comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparisonRow {
    pub scenario: String,
    pub fmip: f64,
    pub public_investment: f64,
    pub tax_revenues: f64,
    pub fiscal_avoidance: f64,
    pub total_fiscal_return: f64,
}

impl From<&FmipResult> for ScenarioComparisonRow {
    fn from(result: &FmipResult) -> Self {
        Self {
            scenario: result.scenario.clone(),
            fmip: result.fmip,
            public_investment: result.pv_public_investment,
            tax_revenues: result.pv_tax_revenues,
            fiscal_avoidance: result.pv_fiscal_avoidance,
            total_fiscal_return: result.total_fiscal_return,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmipSensitivityPoint {
    pub parameter: String,
    pub value: f64,
    pub fmip: f64,
    pub scenario: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_row_from_result() {
        let result = FmipResult {
            scenario: "base_case".to_string(),
            fmip: 1.8,
            pv_public_investment: 100.0,
            pv_tax_revenues: 120.0,
            pv_fiscal_avoidance: 60.0,
            total_fiscal_return: 180.0,
        };

        let row: ScenarioComparisonRow = (&result).into();

        assert_eq!(row.scenario, "base_case");
        assert_eq!(row.public_investment, 100.0);
        assert_eq!(row.total_fiscal_return, 180.0);
    }

    #[test]
    fn test_breakeven_serializes_missing_levers_as_null() {
        let points = BreakevenPoints {
            target_lroma: 0.0,
            base_lroma: 1.0,
            freight_rate: Some(24.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&points).unwrap();
        assert!(json.contains("\"capex\":null"));
        assert!(json.contains("\"freight_rate\":24.0"));
    }
}
