//! Fiscal Multiplier of Industrial Policy (FMIP)
//!
//! FMIP measures how many yen of fiscal return the state recovers per yen
//! of public investment, counting both new tax revenue and avoided public
//! outlays:
//!
//! ```text
//! FMIP = (PV(tax revenues) + PV(fiscal avoidance)) / PV(public investment)
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::discount::{present_value, validate_rate};
use crate::models::{
    FiscalParameter, FiscalScenario, FmipResult, FmipSensitivityPoint, ScenarioComparisonRow,
    Variation,
};
use crate::AnalysisError;

/// Scenarios compared when no explicit list is given
pub const DEFAULT_SCENARIOS: [&str; 4] = ["base_case", "pessimistic", "optimistic", "ssb_disruption"];

/// Calculator over a named set of fiscal scenarios
#[derive(Debug, Clone, Default)]
pub struct FmipCalculator {
    scenarios: BTreeMap<String, FiscalScenario>,
}

impl FmipCalculator {
    pub fn new(scenarios: BTreeMap<String, FiscalScenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenario_names(&self) -> Vec<String> {
        self.scenarios.keys().cloned().collect()
    }

    /// Look up a configured scenario
    pub fn scenario(&self, name: &str) -> Result<&FiscalScenario, AnalysisError> {
        self.scenarios
            .get(name)
            .ok_or_else(|| AnalysisError::ScenarioNotFound {
                scenario: name.to_string(),
                available: self.scenario_names(),
            })
    }

    /// Calculate FMIP for a configured scenario
    pub fn calculate_fmip(&self, name: &str) -> Result<FmipResult, AnalysisError> {
        let scenario = self.scenario(name)?;
        evaluate(name, scenario)
    }

    /// Compare FMIP across scenarios.
    ///
    /// Defaults to [`DEFAULT_SCENARIOS`]. Scenarios that fail are logged
    /// and left out of the comparison.
    pub fn scenario_comparison(&self, names: Option<&[String]>) -> Vec<ScenarioComparisonRow> {
        let names: Vec<String> = match names {
            Some(names) => names.to_vec(),
            None => DEFAULT_SCENARIOS.iter().map(|s| s.to_string()).collect(),
        };

        names
            .iter()
            .filter_map(|name| match self.calculate_fmip(name) {
                Ok(result) => Some(ScenarioComparisonRow::from(&result)),
                Err(e) => {
                    warn!("Could not calculate FMIP for scenario '{}': {}", name, e);
                    None
                }
            })
            .collect()
    }

    /// Vary fiscal parameters around a base scenario.
    ///
    /// Cash flow parameters take multipliers, the discount rate takes
    /// absolute values. Points that fail are logged and skipped.
    pub fn sensitivity_analysis(
        &self,
        base_scenario: &str,
        variations: &[Variation],
    ) -> Result<Vec<FmipSensitivityPoint>, AnalysisError> {
        let base = self.scenario(base_scenario)?;
        let mut results = Vec::new();

        for variation in variations {
            let parameter = match variation.parameter.parse::<FiscalParameter>() {
                Ok(p) => p,
                Err(e) => {
                    warn!("Skipping FMIP sensitivity for {}: {}", variation.parameter, e);
                    continue;
                }
            };

            for &value in &variation.values {
                let label = format!("{}_{}_{}", base_scenario, parameter, value);
                let fmip = base
                    .with(parameter, value)
                    .and_then(|modified| evaluate(&label, &modified));

                match fmip {
                    Ok(result) => results.push(FmipSensitivityPoint {
                        parameter: parameter.to_string(),
                        value,
                        fmip: result.fmip,
                        scenario: base_scenario.to_string(),
                    }),
                    Err(e) => warn!(
                        "Sensitivity analysis failed for {}={}: {}",
                        parameter, value, e
                    ),
                }
            }
        }

        Ok(results)
    }
}

fn evaluate(name: &str, scenario: &FiscalScenario) -> Result<FmipResult, AnalysisError> {
    let rate = scenario.social_discount_rate;
    validate_rate(FiscalParameter::SocialDiscountRate.as_str(), rate)?;

    let pv_public_investment = present_value(&scenario.public_investment_cashflows, rate);
    let pv_tax_revenues = present_value(&scenario.tax_revenue_cashflows, rate);
    let pv_fiscal_avoidance = present_value(&scenario.fiscal_avoidance_cashflows, rate);
    let total_fiscal_return = pv_tax_revenues + pv_fiscal_avoidance;

    let fmip = if pv_public_investment == 0.0 {
        if total_fiscal_return > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        total_fiscal_return / pv_public_investment
    };

    debug!(scenario = name, fmip, "Calculated FMIP");

    Ok(FmipResult {
        scenario: name.to_string(),
        fmip,
        pv_public_investment,
        pv_tax_revenues,
        pv_fiscal_avoidance,
        total_fiscal_return,
    })
}
