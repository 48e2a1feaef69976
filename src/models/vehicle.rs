//! Vehicle parameter types
//!
//! A vehicle is the mobility asset whose return is levelized per kilometre.

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Longest service life accepted, in years
pub const MAX_VEHICLE_LIFE: u32 = 100;

/// Economic parameters of a single vehicle type (FCEV, BEV, diesel...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Upfront purchase cost in JPY
    pub capex: f64,
    /// Kilometres driven per year
    pub annual_distance: f64,
    /// Total cost of ownership per km, excluding capex (JPY/km)
    pub tco_per_km: f64,
    /// Revenue per km (JPY/km)
    pub freight_rate: f64,
    /// Investor discount rate (0.08 = 8%)
    pub discount_rate: f64,
    /// Service life in whole years
    pub vehicle_life: u32,
}

impl VehicleParams {
    /// Operating margin per km before capital recovery
    pub fn margin_per_km(&self) -> f64 {
        self.freight_rate - self.tco_per_km
    }

    /// Yearly operating profit
    pub fn annual_profit(&self) -> f64 {
        self.annual_distance * self.margin_per_km()
    }

    /// Check that the service life is within [`MAX_VEHICLE_LIFE`]
    pub fn validate_life(&self) -> Result<(), AnalysisError> {
        if self.vehicle_life > MAX_VEHICLE_LIFE {
            return Err(life_error(self.vehicle_life as f64));
        }
        Ok(())
    }

    /// Return a copy with one parameter replaced.
    ///
    /// `vehicle_life` only accepts non-negative whole numbers.
    pub fn with(&self, parameter: VehicleParameter, value: f64) -> Result<Self, AnalysisError> {
        if !value.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: parameter.as_str().to_string(),
                reason: format!("value {} is not finite", value),
            });
        }

        let mut modified = self.clone();
        match parameter {
            VehicleParameter::Capex => modified.capex = value,
            VehicleParameter::AnnualDistance => modified.annual_distance = value,
            VehicleParameter::TcoPerKm => modified.tco_per_km = value,
            VehicleParameter::FreightRate => modified.freight_rate = value,
            VehicleParameter::DiscountRate => modified.discount_rate = value,
            VehicleParameter::VehicleLife => {
                if value < 0.0 || value.fract() != 0.0 || value > MAX_VEHICLE_LIFE as f64 {
                    return Err(life_error(value));
                }
                modified.vehicle_life = value as u32;
            }
        }
        Ok(modified)
    }
}

fn life_error(value: f64) -> AnalysisError {
    AnalysisError::InvalidParameter {
        name: VehicleParameter::VehicleLife.as_str().to_string(),
        reason: format!(
            "{} is not a whole number of years between 0 and {}",
            value, MAX_VEHICLE_LIFE
        ),
    }
}

/// Names of the tunable vehicle parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleParameter {
    Capex,
    AnnualDistance,
    TcoPerKm,
    FreightRate,
    DiscountRate,
    VehicleLife,
}

impl VehicleParameter {
    pub const ALL: [VehicleParameter; 6] = [
        Self::Capex,
        Self::AnnualDistance,
        Self::TcoPerKm,
        Self::FreightRate,
        Self::DiscountRate,
        Self::VehicleLife,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capex => "capex",
            Self::AnnualDistance => "annual_distance",
            Self::TcoPerKm => "tco_per_km",
            Self::FreightRate => "freight_rate",
            Self::DiscountRate => "discount_rate",
            Self::VehicleLife => "vehicle_life",
        }
    }
}

impl std::fmt::Display for VehicleParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleParameter {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| AnalysisError::UnknownParameter(s.to_string()))
    }
}

#[cfg(test)]
pub(crate) fn fcev_base() -> VehicleParams {
    VehicleParams {
        capex: 4_800_000.0,
        annual_distance: 100_000.0,
        tco_per_km: 13.20,
        freight_rate: 25.00,
        discount_rate: 0.08,
        vehicle_life: 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_profit() {
        let params = fcev_base();
        assert!((params.margin_per_km() - 11.8).abs() < 1e-9);
        assert!((params.annual_profit() - 1_180_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_parameter_from_str() {
        assert_eq!("capex".parse::<VehicleParameter>().unwrap(), VehicleParameter::Capex);
        assert_eq!(
            "FREIGHT_RATE".parse::<VehicleParameter>().unwrap(),
            VehicleParameter::FreightRate
        );
        assert!("fuel_price".parse::<VehicleParameter>().is_err());
    }

    #[test]
    fn test_with_replaces_single_field() {
        let base = fcev_base();
        let modified = base.with(VehicleParameter::FreightRate, 30.0).unwrap();
        assert_eq!(modified.freight_rate, 30.0);
        assert_eq!(modified.capex, base.capex);
        assert_eq!(base.freight_rate, 25.0);
    }

    #[test]
    fn test_with_vehicle_life_requires_whole_years() {
        let base = fcev_base();
        assert_eq!(base.with(VehicleParameter::VehicleLife, 10.0).unwrap().vehicle_life, 10);
        assert!(base.with(VehicleParameter::VehicleLife, 7.5).is_err());
        assert!(base.with(VehicleParameter::VehicleLife, -1.0).is_err());
        assert!(base.with(VehicleParameter::VehicleLife, 100.0).is_ok());
        assert!(base.with(VehicleParameter::VehicleLife, 101.0).is_err());
    }

    #[test]
    fn test_validate_life() {
        assert!(fcev_base().validate_life().is_ok());
        let params = VehicleParams {
            vehicle_life: u32::MAX,
            ..fcev_base()
        };
        assert!(matches!(
            params.validate_life(),
            Err(AnalysisError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_with_rejects_non_finite() {
        assert!(fcev_base().with(VehicleParameter::Capex, f64::NAN).is_err());
    }

    #[test]
    fn test_deserialize_from_toml_shape() {
        let json = r#"{
            "capex": 4800000,
            "annual_distance": 100000,
            "tco_per_km": 13.2,
            "freight_rate": 25.0,
            "discount_rate": 0.08,
            "vehicle_life": 8
        }"#;
        let params: VehicleParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, fcev_base());
    }
}
