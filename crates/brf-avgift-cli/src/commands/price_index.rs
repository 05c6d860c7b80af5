use clap::Args;
use serde_json::{json, Value};

use brf_avgift_core::price_index::scb::SCB_KPIF_URL;
use brf_avgift_core::PriceIndexTable;

use crate::input;

/// Arguments for printing the price index
#[derive(Args)]
pub struct KpifArgs {
    /// Saved SCB PxWeb KPIF response to parse instead of the bundled table
    #[arg(long)]
    pub scb: Option<String>,
}

pub fn run_kpif(args: KpifArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let (table, source) = match args.scb {
        Some(ref path) => (
            PriceIndexTable::from_scb_response(&input::file::read_text(path)?)?,
            format!("SCB response ({SCB_KPIF_URL})"),
        ),
        None => (
            PriceIndexTable::kpif_fallback(),
            "bundled KPIF table (December, 1987 = 100)".to_string(),
        ),
    };

    let rows: Vec<Value> = table
        .iter()
        .map(|(year, value)| json!({ "year": year, "value": value }))
        .collect();
    Ok(json!({
        "result": rows,
        "methodology": source,
    }))
}
