//! Fiscal scenario types
//!
//! A fiscal scenario describes the public investment program and the
//! fiscal returns (tax revenues and avoided public outlays) it generates.

use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Cash flows and discounting for one fiscal scenario.
///
/// Cash flows are yearly amounts starting in year 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalScenario {
    pub public_investment_cashflows: Vec<f64>,
    pub tax_revenue_cashflows: Vec<f64>,
    pub fiscal_avoidance_cashflows: Vec<f64>,
    pub social_discount_rate: f64,
    /// Optional category breakdown used by the composition chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<FiscalComposition>,
}

impl FiscalScenario {
    /// Return a copy with one parameter varied.
    ///
    /// Cash flow parameters treat `value` as a multiplier on every flow;
    /// the discount rate is replaced outright.
    pub fn with(&self, parameter: FiscalParameter, value: f64) -> Result<Self, AnalysisError> {
        if !value.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: parameter.as_str().to_string(),
                reason: format!("value {} is not finite", value),
            });
        }

        let mut modified = self.clone();
        match parameter {
            FiscalParameter::PublicInvestmentCashflows => {
                scale(&mut modified.public_investment_cashflows, value)
            }
            FiscalParameter::TaxRevenueCashflows => {
                scale(&mut modified.tax_revenue_cashflows, value)
            }
            FiscalParameter::FiscalAvoidanceCashflows => {
                scale(&mut modified.fiscal_avoidance_cashflows, value)
            }
            FiscalParameter::SocialDiscountRate => modified.social_discount_rate = value,
        }
        Ok(modified)
    }
}

fn scale(flows: &mut [f64], multiplier: f64) {
    for flow in flows.iter_mut() {
        *flow *= multiplier;
    }
}

/// Category breakdown of fiscal returns, in billion JPY
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiscalComposition {
    #[serde(default)]
    pub tax_revenues: Vec<CompositionItem>,
    #[serde(default)]
    pub fiscal_avoidance: Vec<CompositionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionItem {
    pub category: String,
    pub value: f64,
}

/// Names of the tunable fiscal parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiscalParameter {
    PublicInvestmentCashflows,
    TaxRevenueCashflows,
    FiscalAvoidanceCashflows,
    SocialDiscountRate,
}

impl FiscalParameter {
    pub const ALL: [FiscalParameter; 4] = [
        Self::PublicInvestmentCashflows,
        Self::TaxRevenueCashflows,
        Self::FiscalAvoidanceCashflows,
        Self::SocialDiscountRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicInvestmentCashflows => "public_investment_cashflows",
            Self::TaxRevenueCashflows => "tax_revenue_cashflows",
            Self::FiscalAvoidanceCashflows => "fiscal_avoidance_cashflows",
            Self::SocialDiscountRate => "social_discount_rate",
        }
    }
}

impl std::fmt::Display for FiscalParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FiscalParameter {
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
mod tests {
    use super::*;

    fn scenario() -> FiscalScenario {
        FiscalScenario {
            public_investment_cashflows: vec![100.0, 100.0],
            tax_revenue_cashflows: vec![50.0, 60.0],
            fiscal_avoidance_cashflows: vec![20.0, 30.0],
            social_discount_rate: 0.02,
            composition: None,
        }
    }

    #[test]
    fn test_cashflow_parameters_scale() {
        let modified = scenario()
            .with(FiscalParameter::TaxRevenueCashflows, 1.5)
            .unwrap();
        assert_eq!(modified.tax_revenue_cashflows, vec![75.0, 90.0]);
        assert_eq!(modified.public_investment_cashflows, vec![100.0, 100.0]);
    }

    #[test]
    fn test_discount_rate_replaced() {
        let modified = scenario()
            .with(FiscalParameter::SocialDiscountRate, 0.04)
            .unwrap();
        assert_eq!(modified.social_discount_rate, 0.04);
    }

    #[test]
    fn test_parameter_from_str() {
        assert_eq!(
            "social_discount_rate".parse::<FiscalParameter>().unwrap(),
            FiscalParameter::SocialDiscountRate
        );
        assert!("gdp_growth".parse::<FiscalParameter>().is_err());
    }

    #[test]
    fn test_composition_is_optional() {
        let json = r#"{
            "public_investment_cashflows": [1.0],
            "tax_revenue_cashflows": [1.0],
            "fiscal_avoidance_cashflows": [1.0],
            "social_discount_rate": 0.03
        }"#;
        let parsed: FiscalScenario = serde_json::from_str(json).unwrap();
        assert!(parsed.composition.is_none());
    }
}
