use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use brf_avgift_core::analysis::Parameters;
use brf_avgift_core::time_value::real_rate;

/// Arguments for the real interest rate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RealRateArgs {
    /// Expected nominal interest rate, percent (e.g. 5.0)
    #[arg(long)]
    pub nominal_rate: Option<Decimal>,

    /// Expected inflation, percent (e.g. 2.0)
    #[arg(long)]
    pub inflation: Option<Decimal>,
}

pub fn run_real_rate(args: RealRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let defaults = Parameters::default();
    let nominal = args.nominal_rate.unwrap_or(defaults.expected_nominal_rate);
    let inflation = args.inflation.unwrap_or(defaults.expected_inflation);

    let real = real_rate(nominal, inflation)?;
    Ok(json!({
        "result": {
            "nominal_rate": nominal,
            "inflation": inflation,
            "real_rate": real.round_dp(6),
        },
        "methodology": "Fisher relation: (1 + nominal) / (1 + inflation) - 1",
    }))
}
