//! FMIP composition chart data
//!
//! Splits a scenario's fiscal return into its tax and avoidance categories.

use serde::{Deserialize, Serialize};

use crate::models::{CompositionItem, FiscalScenario};
use crate::AnalysisError;

const TAX_COLORS: [&str; 3] = ["#2E86AB", "#A23B72", "#F18F01"];
const AVOIDANCE_COLORS: [&str; 4] = ["#C73E1D", "#F4B393", "#6B8F71", "#2E86AB"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionBar {
    pub category: String,
    pub value: f64,
    pub color: String,
    /// Display label, e.g. "JPY 1,200B"
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionPanel {
    pub title: String,
    pub bars: Vec<CompositionBar>,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FmipComposition {
    pub scenario: String,
    pub title: String,
    pub tax_revenues: CompositionPanel,
    pub fiscal_avoidance: CompositionPanel,
}

/// Build the two-panel composition chart for a scenario
pub fn build_fmip_composition(
    name: &str,
    scenario: &FiscalScenario,
) -> Result<FmipComposition, AnalysisError> {
    let composition = scenario
        .composition
        .as_ref()
        .ok_or_else(|| AnalysisError::InvalidParameter {
            name: format!("fmip.{}.composition", name),
            reason: "must contain 'tax_revenues' and 'fiscal_avoidance'".to_string(),
        })?;

    for (side, items) in [
        ("tax_revenues", &composition.tax_revenues),
        ("fiscal_avoidance", &composition.fiscal_avoidance),
    ] {
        if items.is_empty() {
            return Err(AnalysisError::InvalidParameter {
                name: format!("fmip.{}.composition.{}", name, side),
                reason: "no categories given".to_string(),
            });
        }
    }

    let tax_revenues = panel(
        "Tax Revenues Composition (Billion JPY)",
        &composition.tax_revenues,
        &TAX_COLORS,
    );
    let fiscal_avoidance = panel(
        "Fiscal Avoidance Composition (Billion JPY)",
        &composition.fiscal_avoidance,
        &AVOIDANCE_COLORS,
    );

    let title = format!(
        "FMIP Components: Total Tax = JPY {}B, Total Avoidance = JPY {}B",
        thousands(tax_revenues.total),
        thousands(fiscal_avoidance.total)
    );

    Ok(FmipComposition {
        scenario: name.to_string(),
        title,
        tax_revenues,
        fiscal_avoidance,
    })
}

fn panel(title: &str, items: &[CompositionItem], palette: &[&str]) -> CompositionPanel {
    let bars = items
        .iter()
        .enumerate()
        .map(|(i, item)| CompositionBar {
            category: item.category.clone(),
            value: item.value,
            color: palette[i % palette.len()].to_string(),
            label: format!("JPY {}B", thousands(item.value)),
        })
        .collect();

    CompositionPanel {
        title: title.to_string(),
        bars,
        total: items.iter().map(|item| item.value).sum(),
    }
}

/// Round to whole units and group digits with commas
fn thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
