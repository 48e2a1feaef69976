//! Metrics calculation module
//!
//! This module holds the financial calculators of the framework:
//! - Discounting primitives (present value, NPV, annuity factors)
//! - LROMA (Levelized Return on Mobility Asset) for vehicle investors
//! - FMIP (Fiscal Multiplier of Industrial Policy) for the public investor

pub mod discount;
pub mod fmip;
pub mod lroma;

pub use discount::{annuity_factor, discount_factor, net_present_value, present_value};
pub use fmip::FmipCalculator;
pub use lroma::LromaCalculator;
