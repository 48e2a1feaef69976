//! Sensitivity sweep definitions

use serde::{Deserialize, Serialize};

/// One parameter and the values it is swept over.
///
/// Sweeps are kept in a list so results follow the configured order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub parameter: String,
    pub values: Vec<f64>,
}

impl Variation {
    pub fn new(parameter: &str, values: &[f64]) -> Self {
        Self {
            parameter: parameter.to_string(),
            values: values.to_vec(),
        }
    }
}
