use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in SEK. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Used inside formulas only.
pub type Rate = Decimal;

/// Rates expressed as percentages (5.0 = 5%). Used at the input/output boundary.
pub type Percent = Decimal;

/// Areas in square metres (BTA / BOA)
pub type SquareMetres = Decimal;

/// Calendar year
pub type Year = i32;

/// Convert a boundary percentage into a formula rate.
pub fn percent_to_rate(pct: Percent) -> Rate {
    pct / Decimal::ONE_HUNDRED
}

/// Calendar year of the local clock.
///
/// Only outer surfaces (CLI, bindings) call this; every calculation takes the
/// evaluation year as an explicit argument.
pub fn current_year() -> Year {
    chrono::Local::now().year()
}

/// Sensitivity variable specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityVariable {
    pub name: String,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    pub evaluation_year: Year,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    evaluation_year: Year,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            evaluation_year,
        },
    }
}
