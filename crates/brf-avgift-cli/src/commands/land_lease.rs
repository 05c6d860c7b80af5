use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use brf_avgift_core::analysis::PropertyInfo;
use brf_avgift_core::land_lease::{project_land_lease, LandLeaseOutcome};
use brf_avgift_core::types::Year;

use crate::input;

/// Arguments for the ground rent projection
#[derive(Args)]
pub struct LandLeaseArgs {
    /// Gross floor area (BTA), m²
    #[arg(long)]
    pub gross_floor_area: Option<Decimal>,

    /// Tax-assessed land value per m² BTA, SEK
    #[arg(long)]
    pub assessed_value: Option<Decimal>,

    /// Year the current ground rent period ends
    #[arg(long)]
    pub expiry_year: Option<Year>,

    /// Ground rent paid today, SEK per year
    #[arg(long)]
    pub current_rent: Option<Decimal>,

    /// Path to a JSON/YAML property file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn property_from_flags(args: &LandLeaseArgs) -> Result<PropertyInfo, Box<dyn std::error::Error>> {
    let gross_floor_area = args
        .gross_floor_area
        .ok_or("--gross-floor-area is required (or provide --input)")?;
    Ok(PropertyInfo {
        municipality: String::new(),
        parcel_id: String::new(),
        gross_floor_area,
        residential_area: gross_floor_area,
        convertible_asset_value: Decimal::ZERO,
        is_land_lease: true,
        lease_expiry_year: args.expiry_year,
        current_ground_rent: args.current_rent,
        assessed_land_value_per_area: Some(
            args.assessed_value
                .ok_or("--assessed-value is required (or provide --input)")?,
        ),
    })
}

pub fn run_land_lease(args: LandLeaseArgs, year: Year) -> Result<Value, Box<dyn std::error::Error>> {
    let property: PropertyInfo = match args.input {
        Some(ref path) => input::file::read_json(path)?,
        None => match input::stdin::read_stdin()? {
            Some(data) => serde_json::from_value(data)?,
            None => property_from_flags(&args)?,
        },
    };

    let result = match project_land_lease(&property, year) {
        LandLeaseOutcome::Projected(projection) => serde_json::to_value(projection)?,
        LandLeaseOutcome::NotApplicable(reason) => json!({ "not_applicable": reason }),
    };
    Ok(json!({
        "result": result,
        "methodology": "SOU 2012:71: market value = assessed / 0.75, base = 40%, rent = 2.75% of base",
        "metadata": { "evaluation_year": year },
    }))
}
