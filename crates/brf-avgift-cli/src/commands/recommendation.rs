use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use brf_avgift_core::recommendation::calculate_recommendation;

/// Arguments for classifying a surplus or deficit
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RecommendArgs {
    /// Long-term result per m² residential area, SEK (negative = deficit)
    #[arg(long)]
    pub surplus_per_area: Decimal,

    /// Total annual membership fees, SEK
    #[arg(long)]
    pub fees: Decimal,

    /// Total residential area, m²
    #[arg(long)]
    pub area: Decimal,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rec = calculate_recommendation(args.surplus_per_area, args.fees, args.area)?;
    Ok(json!({
        "result": rec,
        "methodology": "Six-tier classification of long-term deficit as a share of the current fee",
    }))
}
