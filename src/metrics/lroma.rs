//! Levelized Return on Mobility Asset (LROMA)
//!
//! LROMA spreads the net present value of owning a vehicle over the
//! discounted kilometres it drives:
//!
//! ```text
//! LROMA = NPV([-capex, profit, profit, ...]) / PV(annual_distance, years 1..N)
//! ```
//!
//! which reduces to `margin_per_km - capex / pv_distance`. A positive LROMA
//! means the asset earns more than the investor's discount rate.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::discount::{annuity_factor, discount_factor, validate_rate};
use crate::models::{
    BreakevenPoints, LromaBreakdown, LromaSensitivityPoint, Variation, VehicleParameter,
    VehicleParams,
};
use crate::AnalysisError;

/// Calculator over a named set of vehicles
#[derive(Debug, Clone, Default)]
pub struct LromaCalculator {
    vehicles: BTreeMap<String, VehicleParams>,
}

impl LromaCalculator {
    pub fn new(vehicles: BTreeMap<String, VehicleParams>) -> Self {
        Self { vehicles }
    }

    /// Vehicle names in sorted order
    pub fn vehicle_names(&self) -> Vec<String> {
        self.vehicles.keys().cloned().collect()
    }

    /// Look up a configured vehicle
    pub fn vehicle(&self, name: &str) -> Result<&VehicleParams, AnalysisError> {
        self.vehicles.get(name).ok_or_else(|| AnalysisError::VehicleNotFound {
            vehicle: name.to_string(),
            available: self.vehicle_names(),
        })
    }

    /// Compute LROMA in JPY/km for a parameter set
    pub fn calculate_lroma(&self, params: &VehicleParams) -> Result<f64, AnalysisError> {
        Ok(self.evaluate(params)?.lroma)
    }

    /// Compute LROMA with its intermediate values for a configured vehicle
    pub fn calculate_breakdown(&self, name: &str) -> Result<LromaBreakdown, AnalysisError> {
        let params = self.vehicle(name)?;
        let mut breakdown = self.evaluate(params)?;
        breakdown.vehicle = name.to_string();
        Ok(breakdown)
    }

    fn evaluate(&self, params: &VehicleParams) -> Result<LromaBreakdown, AnalysisError> {
        validate_rate(VehicleParameter::DiscountRate.as_str(), params.discount_rate)?;
        params.validate_life()?;

        let annual_profit = params.annual_profit();
        let annuity = annuity_factor(params.discount_rate, params.vehicle_life);

        // -capex in year 0, annual_profit in years 1..N
        let npv = -params.capex + annual_profit * annuity;
        let pv_distance = params.annual_distance * annuity;

        let lroma = if pv_distance != 0.0 { npv / pv_distance } else { 0.0 };

        debug!(npv, pv_distance, lroma, "Calculated LROMA");

        Ok(LromaBreakdown {
            vehicle: String::new(),
            annual_profit,
            npv,
            pv_distance,
            lroma,
            discounted_payback_year: discounted_payback_year(params),
        })
    }

    /// Sweep individual parameters over the given values.
    ///
    /// Values that cannot be applied are logged and skipped.
    pub fn sensitivity_analysis(
        &self,
        base: &VehicleParams,
        variations: &[Variation],
    ) -> Vec<LromaSensitivityPoint> {
        let mut results = Vec::new();

        for variation in variations {
            let parameter = match variation.parameter.parse::<VehicleParameter>() {
                Ok(p) => p,
                Err(e) => {
                    warn!("Skipping LROMA sensitivity for {}: {}", variation.parameter, e);
                    continue;
                }
            };

            for &value in &variation.values {
                let lroma = base
                    .with(parameter, value)
                    .and_then(|modified| self.calculate_lroma(&modified));

                match lroma {
                    Ok(lroma) => results.push(LromaSensitivityPoint {
                        parameter: parameter.to_string(),
                        value,
                        lroma,
                    }),
                    Err(e) => {
                        warn!("Could not calculate LROMA for {}={}: {}", parameter, value, e)
                    }
                }
            }
        }

        results
    }

    /// Solve for the value of each lever that brings LROMA to `target`
    pub fn calculate_breakeven(
        &self,
        params: &VehicleParams,
        target: f64,
    ) -> Result<BreakevenPoints, AnalysisError> {
        let breakdown = self.evaluate(params)?;
        let base = breakdown.lroma;
        let pv_distance = breakdown.pv_distance;

        let mut points = BreakevenPoints {
            target_lroma: target,
            base_lroma: base,
            ..Default::default()
        };

        // LROMA is pinned to zero when no distance is discounted
        if pv_distance == 0.0 {
            return Ok(points);
        }

        let gap = target - base;
        points.freight_rate = non_negative(params.freight_rate + gap);
        points.tco_per_km = non_negative(params.tco_per_km - gap);
        points.capex = non_negative(params.capex - gap * pv_distance);

        let margin_over_target = params.margin_per_km() - target;
        if margin_over_target > 0.0 && params.annual_distance > 0.0 {
            let annuity = pv_distance / params.annual_distance;
            points.annual_distance = non_negative(params.capex / (margin_over_target * annuity));
        }

        Ok(points)
    }
}

fn non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// First year whose cumulative discounted cash flow is non-negative
fn discounted_payback_year(params: &VehicleParams) -> Option<u32> {
    let profit = params.annual_profit();
    let mut cumulative = -params.capex;
    if cumulative >= 0.0 {
        return Some(0);
    }
    (1..=params.vehicle_life).find(|&year| {
        cumulative += profit * discount_factor(params.discount_rate, year);
        cumulative >= 0.0
    })
}
