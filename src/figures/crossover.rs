//! LROMA crossover map
//!
//! Sweeps BEV capex and charging-time reductions and records where the
//! FCEV keeps its LROMA advantage. Charging time enters through
//! utilization: a BEV that spends share `s` of its operating time charging
//! drives `(1 - s)` of the distance it otherwise could, so cutting charging
//! time by `h` lifts annual distance by `(1 - s(1 - h)) / (1 - s)`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::metrics::LromaCalculator;
use crate::models::VehicleParams;
use crate::AnalysisError;

/// Differentials closer to zero than this count as parity
const PARITY_TOLERANCE: f64 = 1e-9;

/// Grids smaller than this make the contour unreliable
const MIN_RELIABLE_POINTS: usize = 10;

/// Grid definition for the crossover sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossoverSettings {
    /// Vehicle name of the incumbent fuel-cell truck
    #[serde(default = "default_fcev")]
    pub fcev: String,
    /// Vehicle name of the battery-electric challenger
    #[serde(default = "default_bev")]
    pub bev: String,
    /// Largest BEV capex reduction swept, in percent
    #[serde(default = "default_max_reduction")]
    pub capex_reduction_max: f64,
    /// Largest BEV charging-time reduction swept, in percent
    #[serde(default = "default_max_reduction")]
    pub charging_time_reduction_max: f64,
    /// Grid points per axis
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Share of BEV operating time lost to charging at baseline
    #[serde(default = "default_downtime_share")]
    pub charging_downtime_share: f64,
}

fn default_fcev() -> String {
    "fcev".to_string()
}

fn default_bev() -> String {
    "bev".to_string()
}

fn default_max_reduction() -> f64 {
    50.0
}

fn default_steps() -> u32 {
    11
}

fn default_downtime_share() -> f64 {
    0.2
}

impl Default for CrossoverSettings {
    fn default() -> Self {
        Self {
            fcev: default_fcev(),
            bev: default_bev(),
            capex_reduction_max: default_max_reduction(),
            charging_time_reduction_max: default_max_reduction(),
            steps: default_steps(),
            charging_downtime_share: default_downtime_share(),
        }
    }
}

impl CrossoverSettings {
    fn validate(&self) -> Result<(), AnalysisError> {
        if self.steps < 2 {
            return Err(AnalysisError::InvalidParameter {
                name: "crossover.steps".to_string(),
                reason: format!("need at least 2 grid points per axis, got {}", self.steps),
            });
        }
        for (name, max) in [
            ("crossover.capex_reduction_max", self.capex_reduction_max),
            ("crossover.charging_time_reduction_max", self.charging_time_reduction_max),
        ] {
            if !(0.0..=100.0).contains(&max) {
                return Err(AnalysisError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("{} is outside 0-100 percent", max),
                });
            }
        }
        if !(0.0..1.0).contains(&self.charging_downtime_share) {
            return Err(AnalysisError::InvalidParameter {
                name: "crossover.charging_downtime_share".to_string(),
                reason: format!("{} must be in [0, 1)", self.charging_downtime_share),
            });
        }
        Ok(())
    }

    fn axis(max: f64, steps: u32) -> Vec<f64> {
        (0..steps)
            .map(|i| max * i as f64 / (steps - 1) as f64)
            .collect()
    }
}

/// Which technology comes out ahead at a grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverZone {
    FcevSuperior,
    BevSuperior,
    Parity,
}

impl CrossoverZone {
    pub fn from_differential(differential: f64) -> Self {
        if differential.abs() < PARITY_TOLERANCE {
            Self::Parity
        } else if differential > 0.0 {
            Self::FcevSuperior
        } else {
            Self::BevSuperior
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FcevSuperior => "FCEV Superior",
            Self::BevSuperior => "BEV Superior",
            Self::Parity => "Parity",
        }
    }

    /// Text placement in axes fractions and color, for zones that are labelled
    fn placement(&self) -> Option<(f64, f64, &'static str)> {
        match self {
            Self::FcevSuperior => Some((0.15, 0.3, "darkred")),
            Self::BevSuperior => Some((0.6, 0.8, "darkblue")),
            Self::Parity => None,
        }
    }
}

/// Zone label drawn on the map, positioned in axes fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnnotation {
    pub zone: CrossoverZone,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
}

fn zone_annotations() -> Vec<ZoneAnnotation> {
    [CrossoverZone::FcevSuperior, CrossoverZone::BevSuperior]
        .into_iter()
        .filter_map(|zone| {
            zone.placement().map(|(x, y, color)| ZoneAnnotation {
                zone,
                label: zone.label().to_string(),
                x,
                y,
                color: color.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverPoint {
    pub bev_capex_reduction: f64,
    pub charging_time_reduction: f64,
    pub fcev_lroma: f64,
    pub bev_lroma: f64,
    /// FCEV minus BEV, JPY/km
    pub lroma_differential: f64,
    pub zone: CrossoverZone,
}

/// Point on the zero-differential line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    pub bev_capex_reduction: f64,
    pub charging_time_reduction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverMap {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub z_label: String,
    pub zones: Vec<ZoneAnnotation>,
    pub grid: Vec<CrossoverPoint>,
    pub zero_contour: Vec<ContourPoint>,
    /// Reliability notes, empty for a well-sampled grid
    pub warnings: Vec<String>,
}

impl CrossoverMap {
    /// Number of grid points in each zone
    pub fn zone_counts(&self) -> (usize, usize, usize) {
        self.grid.iter().fold((0, 0, 0), |(f, b, p), point| match point.zone {
            CrossoverZone::FcevSuperior => (f + 1, b, p),
            CrossoverZone::BevSuperior => (f, b + 1, p),
            CrossoverZone::Parity => (f, b, p + 1),
        })
    }
}

/// BEV parameters after the given capex and charging-time reductions (percent)
pub fn improved_bev(
    bev: &VehicleParams,
    capex_reduction: f64,
    charging_time_reduction: f64,
    downtime_share: f64,
) -> VehicleParams {
    let remaining_downtime = downtime_share * (1.0 - charging_time_reduction / 100.0);
    VehicleParams {
        capex: bev.capex * (1.0 - capex_reduction / 100.0),
        annual_distance: bev.annual_distance * (1.0 - remaining_downtime) / (1.0 - downtime_share),
        ..bev.clone()
    }
}

/// Build the crossover grid and its zero contour
pub fn build_crossover_map(
    calculator: &LromaCalculator,
    settings: &CrossoverSettings,
) -> Result<CrossoverMap, AnalysisError> {
    settings.validate()?;

    let fcev = calculator.vehicle(&settings.fcev)?;
    let bev = calculator.vehicle(&settings.bev)?;
    let fcev_lroma = calculator.calculate_lroma(fcev)?;

    let capex_axis = CrossoverSettings::axis(settings.capex_reduction_max, settings.steps);
    let charging_axis =
        CrossoverSettings::axis(settings.charging_time_reduction_max, settings.steps);

    let mut grid = Vec::with_capacity(capex_axis.len() * charging_axis.len());
    let mut zero_contour = Vec::new();

    for &capex_reduction in &capex_axis {
        let mut row = Vec::with_capacity(charging_axis.len());
        for &charging_reduction in &charging_axis {
            let improved = improved_bev(
                bev,
                capex_reduction,
                charging_reduction,
                settings.charging_downtime_share,
            );
            let bev_lroma = calculator.calculate_lroma(&improved)?;
            let lroma_differential = fcev_lroma - bev_lroma;
            row.push(CrossoverPoint {
                bev_capex_reduction: capex_reduction,
                charging_time_reduction: charging_reduction,
                fcev_lroma,
                bev_lroma,
                lroma_differential,
                zone: CrossoverZone::from_differential(lroma_differential),
            });
        }
        zero_contour.extend(row_crossings(&row));
        grid.extend(row);
    }

    let mut warnings = Vec::new();
    if grid.len() < MIN_RELIABLE_POINTS {
        let message = format!(
            "Low data points ({}) for crossover map. Results may be unreliable.",
            grid.len()
        );
        warn!("{}", message);
        warnings.push(message);
    }

    info!(
        points = grid.len(),
        contour_points = zero_contour.len(),
        "Built LROMA crossover map"
    );

    Ok(CrossoverMap {
        title: "LROMA Crossover Map: Technology Economics Under Evolution".to_string(),
        x_label: "BEV CAPEX Reduction (%)".to_string(),
        y_label: "BEV Charging Time Reduction (%)".to_string(),
        z_label: "LROMA Differential (FCEV - BEV) [JPY/km]".to_string(),
        zones: zone_annotations(),
        grid,
        zero_contour,
        warnings,
    })
}

/// Zero crossings along one capex row, linearly interpolated
fn row_crossings(row: &[CrossoverPoint]) -> Vec<ContourPoint> {
    let mut crossings = Vec::new();

    for (i, point) in row.iter().enumerate() {
        if point.zone == CrossoverZone::Parity {
            crossings.push(ContourPoint {
                bev_capex_reduction: point.bev_capex_reduction,
                charging_time_reduction: point.charging_time_reduction,
            });
            continue;
        }

        let Some(next) = row.get(i + 1) else { break };
        if next.zone == CrossoverZone::Parity || next.zone == point.zone {
            continue;
        }

        let (d0, d1) = (point.lroma_differential, next.lroma_differential);
        let (h0, h1) = (point.charging_time_reduction, next.charging_time_reduction);
        crossings.push(ContourPoint {
            bev_capex_reduction: point.bev_capex_reduction,
            charging_time_reduction: h0 + (0.0 - d0) * (h1 - h0) / (d1 - d0),
        });
    }

    crossings
}
