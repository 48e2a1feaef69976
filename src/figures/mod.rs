//! Figure datasets
//!
//! Produces the data behind each figure of the paper so any plotting tool
//! can render it:
//! - Crossover map (FCEV vs BEV LROMA differential)
//! - FMIP composition bars
//! - FET nexus diagram
//! - Summary dashboard bundling all three

pub mod composition;
pub mod crossover;
pub mod nexus;

use serde::{Deserialize, Serialize};

pub use composition::{build_fmip_composition, FmipComposition};
pub use crossover::{
    build_crossover_map, CrossoverMap, CrossoverSettings, CrossoverZone, ZoneAnnotation,
};
pub use nexus::{build_fet_nexus, FetNexus};

/// All figure datasets in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDashboard {
    pub title: String,
    pub crossover: Option<CrossoverMap>,
    pub fmip_composition: Option<FmipComposition>,
    pub fet_nexus: FetNexus,
}

impl SummaryDashboard {
    pub fn new(crossover: Option<CrossoverMap>, fmip_composition: Option<FmipComposition>) -> Self {
        Self {
            title: "Investor State Framework: Comprehensive Analysis Dashboard".to_string(),
            crossover,
            fmip_composition,
            fet_nexus: build_fet_nexus(),
        }
    }
}
