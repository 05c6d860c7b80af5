use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use brf_avgift_core::analysis::Parameters;
use brf_avgift_core::maintenance::inflation::inflate_with_basis;
use brf_avgift_core::maintenance::{evaluate_schedule, MaintenancePlan};
use brf_avgift_core::time_value::real_rate;
use brf_avgift_core::types::Year;

use crate::input;

/// Arguments for inflating a single historical cost
#[derive(Args)]
pub struct InflateArgs {
    /// Cost at the time, SEK
    #[arg(long)]
    pub cost: Decimal,

    /// Year the cost was incurred
    #[arg(long)]
    pub year_performed: Year,

    /// Price index file (SCB response or {"year": value} map)
    #[arg(long)]
    pub index: Option<String>,
}

/// Arguments for annuitising a maintenance plan
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MaintenanceArgs {
    /// Path to a JSON/YAML maintenance plan ({"items": [...]})
    #[arg(long)]
    pub input: Option<String>,

    /// Real interest rate, percent; derived from the next two flags if absent
    #[arg(long)]
    pub real_rate: Option<Decimal>,

    /// Expected nominal interest rate, percent
    #[arg(long)]
    pub nominal_rate: Option<Decimal>,

    /// Expected inflation, percent
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Price index file (SCB response or {"year": value} map)
    #[arg(long)]
    pub index: Option<String>,
}

pub fn run_inflate(args: InflateArgs, year: Year) -> Result<Value, Box<dyn std::error::Error>> {
    let index = input::index::load_index(args.index.as_deref())?;
    let inflated = inflate_with_basis(args.cost, args.year_performed, &index, year)?;

    Ok(json!({
        "result": {
            "historical_cost": args.cost,
            "year_performed": args.year_performed,
            "present_day_cost": inflated.amount.round_dp(2),
            "basis": inflated.basis,
        },
        "metadata": { "evaluation_year": year },
    }))
}

pub fn run_maintenance(args: MaintenanceArgs, year: Year) -> Result<Value, Box<dyn std::error::Error>> {
    let plan: MaintenancePlan = input::read_input(args.input.as_deref(), "A maintenance plan")?;
    let index = input::index::load_index(args.index.as_deref())?;

    let real = match args.real_rate {
        Some(r) => r,
        None => {
            let defaults = Parameters::default();
            real_rate(
                args.nominal_rate.unwrap_or(defaults.expected_nominal_rate),
                args.inflation.unwrap_or(defaults.expected_inflation),
            )?
        }
    };

    let schedule = evaluate_schedule(&plan, real, &index, year)?;
    let warnings: Vec<String> = schedule
        .overdue()
        .map(|item| format!("'{}' is due or overdue ({} years)", item.description, item.years_until_next))
        .collect();

    Ok(json!({
        "result": {
            "real_rate": real,
            "items": schedule.items,
            "total_annuity": schedule.total_annuity,
            "total_interest_component": schedule.total_interest_component(),
        },
        "warnings": warnings,
        "metadata": { "evaluation_year": year },
    }))
}
