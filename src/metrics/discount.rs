//! Discounting utilities
//!
//! Year indexing matters here: `present_value` treats the first cash flow
//! as year 1, `net_present_value` treats it as year 0.

use crate::AnalysisError;

/// Check that a discount rate is usable
pub fn validate_rate(name: &str, rate: f64) -> Result<(), AnalysisError> {
    if !rate.is_finite() || rate <= -1.0 {
        return Err(AnalysisError::InvalidParameter {
            name: name.to_string(),
            reason: format!("discount rate {} must be finite and greater than -1", rate),
        });
    }
    Ok(())
}

/// 1 / (1 + rate)^year
pub fn discount_factor(rate: f64, year: u32) -> f64 {
    match i32::try_from(year) {
        Ok(year) => (1.0 + rate).powi(-year),
        Err(_) => (1.0 + rate).powf(-f64::from(year)),
    }
}

/// Present value of flows received at the end of years 1..=n
pub fn present_value(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .zip(1u32..)
        .map(|(cf, t)| cf * discount_factor(rate, t))
        .sum()
}

/// Net present value of flows at years 0..n (first flow undiscounted)
pub fn net_present_value(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .zip(0u32..)
        .map(|(cf, t)| cf * discount_factor(rate, t))
        .sum()
}

/// Present value of 1 per year for years 1..=years
pub fn annuity_factor(rate: f64, years: u32) -> f64 {
    if rate == 0.0 {
        return years as f64;
    }
    (1..=years).map(|t| discount_factor(rate, t)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_factor() {
        assert_eq!(discount_factor(0.08, 0), 1.0);
        assert!((discount_factor(0.10, 1) - 1.0 / 1.1).abs() < 1e-12);
        assert!((discount_factor(0.10, 2) - 1.0 / 1.21).abs() < 1e-12);
    }

    #[test]
    fn test_discount_factor_far_future() {
        // Past i32::MAX the exponent must not wrap to a positive power
        assert_eq!(discount_factor(0.0, u32::MAX), 1.0);
        assert_eq!(discount_factor(0.08, u32::MAX), 0.0);
        assert!(discount_factor(0.08, i32::MAX as u32 + 1) < 1e-300);
    }

    #[test]
    fn test_present_value_starts_at_year_one() {
        // 110 received in year 1 at 10% is worth 100 today
        assert!((present_value(&[110.0], 0.10) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_present_value_empty() {
        assert_eq!(present_value(&[], 0.05), 0.0);
    }

    #[test]
    fn test_net_present_value_starts_at_year_zero() {
        // -100 today, +110 next year at 10% nets to zero
        assert!(net_present_value(&[-100.0, 110.0], 0.10).abs() < 1e-9);
    }

    #[test]
    fn test_annuity_factor() {
        // 8 years at 8%
        assert!((annuity_factor(0.08, 8) - 5.746639).abs() < 1e-5);
        assert_eq!(annuity_factor(0.0, 8), 8.0);
        assert_eq!(annuity_factor(0.08, 0), 0.0);
    }

    #[test]
    fn test_annuity_matches_present_value_of_ones() {
        let ones = vec![1.0; 12];
        assert!((annuity_factor(0.035, 12) - present_value(&ones, 0.035)).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("r", 0.08).is_ok());
        assert!(validate_rate("r", 0.0).is_ok());
        assert!(validate_rate("r", -0.5).is_ok());
        assert!(validate_rate("r", -1.0).is_err());
        assert!(validate_rate("r", f64::INFINITY).is_err());
    }
}
