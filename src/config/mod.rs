//! Layered configuration loading
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`INVESTOR_STATE_*` prefix, `__` as separator)
//! 2. File passed with `--config`
//! 3. User-level `~/.config/investor-state/config.toml`
//! 4. Built-in defaults (`config/default.toml`, compiled in)
//!
//! Figment maps `INVESTOR_STATE_VEHICLES__FCEV__FREIGHT_RATE` to
//! `vehicles.fcev.freight_rate`. Tables merge key by key, so a user file
//! only needs the values it changes; arrays are replaced whole.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::figures::CrossoverSettings;
use crate::models::{FiscalScenario, Variation, VehicleParams};
use crate::AnalysisError;

/// Built-in parameter set
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

const ENV_PREFIX: &str = "INVESTOR_STATE_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub vehicles: BTreeMap<String, VehicleParams>,
    #[serde(default)]
    pub fmip: BTreeMap<String, FiscalScenario>,
    #[serde(default)]
    pub crossover: CrossoverSettings,
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// LROMA level the breakeven solver aims for
    #[serde(default)]
    pub breakeven_target: f64,
    /// Scenario whose composition feeds the FMIP chart
    #[serde(default = "default_scenario")]
    pub composition_scenario: String,
    /// Scenarios compared by default; the standard four when unset
    #[serde(default)]
    pub comparison_scenarios: Option<Vec<String>>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            breakeven_target: 0.0,
            composition_scenario: default_scenario(),
            comparison_scenarios: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
        }
    }
}

/// Parameter sweeps, run in the order they are listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityConfig {
    #[serde(default = "default_vehicle")]
    pub vehicle: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default)]
    pub lroma: Vec<Variation>,
    #[serde(default)]
    pub fmip: Vec<Variation>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            vehicle: default_vehicle(),
            scenario: default_scenario(),
            lroma: Vec::new(),
            fmip: Vec::new(),
        }
    }
}

fn default_vehicle() -> String {
    "fcev".to_string()
}

fn default_scenario() -> String {
    "base_case".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl AnalysisConfig {
    /// Load from all sources.
    ///
    /// An explicit path must exist; the user-level file is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AnalysisError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(AnalysisError::ConfigNotFound(path.to_path_buf()));
            }
        }

        let config: Self = Self::figment(explicit).extract()?;
        tracing::debug!(
            vehicles = config.vehicles.len(),
            scenarios = config.fmip.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Only the compiled-in defaults
    pub fn builtin() -> Result<Self, AnalysisError> {
        Ok(Figment::from(Toml::string(DEFAULT_CONFIG)).extract()?)
    }

    /// Build the figment provider chain
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Toml::string(DEFAULT_CONFIG));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-level config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("investor-state").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Point the user config directory into the jail
    fn isolate_home(jail: &mut figment::Jail) {
        let home = jail.directory().to_path_buf();
        jail.set_env("HOME", home.display());
        jail.set_env("XDG_CONFIG_HOME", home.join(".config").display());
    }

    #[test]
    fn test_builtin_defaults_parse() {
        let config = AnalysisConfig::builtin().unwrap();

        let fcev = &config.vehicles["fcev"];
        assert_eq!(fcev.capex, 4_800_000.0);
        assert_eq!(fcev.vehicle_life, 8);
        assert!(config.vehicles.contains_key("bev"));

        for name in crate::metrics::fmip::DEFAULT_SCENARIOS {
            assert!(config.fmip.contains_key(name), "missing scenario {}", name);
        }
        assert!(config.fmip["base_case"].composition.is_some());
        assert_eq!(config.sensitivity.vehicle, "fcev");
        assert!(!config.sensitivity.lroma.is_empty());
        assert_eq!(config.crossover.steps, 11);
        assert_eq!(config.output.directory, PathBuf::from("output"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AnalysisConfig::load(Some(Path::new("/nonexistent/investor.toml"))).unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigNotFound(_)));
    }

    #[test]
    fn test_file_overrides_merge_with_defaults() {
        figment::Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.create_file(
                "custom.toml",
                r#"
                [vehicles.fcev]
                freight_rate = 28.0

                [vehicles.diesel]
                capex = 2000000.0
                annual_distance = 120000.0
                tco_per_km = 18.0
                freight_rate = 25.0
                discount_rate = 0.08
                vehicle_life = 10
                "#,
            )?;

            let config = AnalysisConfig::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;

            let fcev = &config.vehicles["fcev"];
            assert_eq!(fcev.freight_rate, 28.0);
            assert_eq!(fcev.capex, 4_800_000.0);
            assert_eq!(config.vehicles["diesel"].vehicle_life, 10);
            assert!(config.vehicles.contains_key("bev"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.create_file(
                "custom.toml",
                r#"
                [vehicles.fcev]
                freight_rate = 28.0
                "#,
            )?;
            jail.set_env("INVESTOR_STATE_VEHICLES__FCEV__FREIGHT_RATE", "31.5");
            jail.set_env("INVESTOR_STATE_ANALYSIS__BREAKEVEN_TARGET", "1.0");

            let config = AnalysisConfig::load(Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;

            assert_eq!(config.vehicles["fcev"].freight_rate, 31.5);
            assert_eq!(config.analysis.breakeven_target, 1.0);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_field_type_is_config_error() {
        figment::Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.create_file(
                "broken.toml",
                r#"
                [vehicles.fcev]
                vehicle_life = "eight"
                "#,
            )?;

            let err = AnalysisConfig::load(Some(Path::new("broken.toml"))).unwrap_err();
            assert!(matches!(err, AnalysisError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_user_config_layer() {
        figment::Jail::expect_with(|jail| {
            isolate_home(jail);
            let path = AnalysisConfig::global_config_path().ok_or_else(|| "no config dir".to_string())?;
            assert!(path.starts_with(jail.directory()));

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
            std::fs::write(
                &path,
                r#"
                [analysis]
                breakeven_target = 2.5

                [[sensitivity.lroma]]
                parameter = "vehicle_life"
                values = [6.0, 10.0]
                "#,
            )
            .map_err(|e| e.to_string())?;

            let config = AnalysisConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.analysis.breakeven_target, 2.5);
            // Arrays of tables replace the defaults whole
            assert_eq!(config.sensitivity.lroma.len(), 1);
            assert_eq!(config.sensitivity.lroma[0].parameter, "vehicle_life");
            assert_eq!(config.vehicles["fcev"].capex, 4_800_000.0);
            Ok(())
        });
    }

    #[test]
    fn test_sweeps_keep_listed_order() {
        let config = AnalysisConfig::builtin().unwrap();
        let names: Vec<_> = config
            .sensitivity
            .lroma
            .iter()
            .map(|v| v.parameter.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["capex", "freight_rate", "tco_per_km", "discount_rate", "vehicle_life"]
        );
        assert_eq!(config.sensitivity.fmip[0].parameter, "tax_revenue_cashflows");
    }
}
