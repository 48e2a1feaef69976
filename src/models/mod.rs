//! Data models module
//!
//! Contains the parameter and result types used throughout the analysis:
//! - Vehicle (mobility asset) parameters
//! - Fiscal scenario parameters
//! - Sensitivity sweep definitions
//! - Result rows for LROMA and FMIP calculations

pub mod results;
pub mod scenario;
pub mod variation;
pub mod vehicle;

pub use results::{
    BreakevenPoints, FmipResult, FmipSensitivityPoint, LromaBreakdown, LromaSensitivityPoint,
    ScenarioComparisonRow,
};
pub use scenario::{CompositionItem, FiscalComposition, FiscalParameter, FiscalScenario};
pub use variation::Variation;
pub use vehicle::{VehicleParameter, VehicleParams};
