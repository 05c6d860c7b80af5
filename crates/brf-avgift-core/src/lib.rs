pub mod error;
pub mod time_value;
pub mod types;

pub mod analysis;
pub mod financials;
pub mod land_lease;
pub mod maintenance;
pub mod price_index;
pub mod recommendation;

pub use analysis::{analyze_fee, run_full_calculation, AnalysisInput, CalculationResult};
pub use error::AvgiftError;
pub use price_index::PriceIndexTable;
pub use recommendation::{calculate_recommendation, Recommendation};
pub use types::*;

/// Standard result type for all BRF fee computations
pub type AvgiftResult<T> = Result<T, AvgiftError>;
