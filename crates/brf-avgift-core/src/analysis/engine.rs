use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::input::AnalysisInput;
use super::validation::validate_input;
use crate::financials::{long_term_interest, long_term_result, net_assets, per_area};
use crate::land_lease::{project_land_lease, LandLeaseOutcome, LandLeaseProjection, NotApplicable};
use crate::maintenance::inflation::FALLBACK_ANNUAL_INFLATION;
use crate::maintenance::{evaluate_schedule, InflationBasis, MaintenanceItemResult};
use crate::price_index::PriceIndexTable;
use crate::recommendation::{calculate_recommendation, Recommendation};
use crate::time_value::real_rate;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Year};
use crate::AvgiftResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Per-item results, in plan order
    pub maintenance_items: Vec<MaintenanceItemResult>,
    pub total_maintenance_annuity: Money,
    pub net_assets: Money,
    /// Real interest rate, percent
    pub real_rate: Percent,
    pub long_term_interest: Money,
    /// Absent unless the land is leased and an assessed value is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_lease: Option<LandLeaseProjection>,
    /// Long-term surplus (+) or deficit (-), SEK per year
    pub long_term_result: Money,
    /// Long-term result per m² residential area
    pub surplus_per_area: Money,
    pub recommendation: Recommendation,
}

struct Calculation {
    result: CalculationResult,
    land_lease: LandLeaseOutcome,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run every step of the analysis for one cooperative.
///
/// Steps run in a fixed order: real rate, maintenance schedule, net assets,
/// long-term interest, land lease (only if applicable), long-term result,
/// recommendation. `evaluation_year` stands in for "today" throughout.
pub fn run_full_calculation(
    input: &AnalysisInput,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<CalculationResult> {
    calculate(input, index, evaluation_year).map(|c| c.result)
}

/// [`run_full_calculation`] wrapped in the standard output envelope with
/// assumptions and warnings.
pub fn analyze_fee(
    input: &AnalysisInput,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<ComputationOutput<CalculationResult>> {
    let start = Instant::now();

    let calculation = calculate(input, index, evaluation_year)?;
    let warnings = collect_warnings(&calculation, input);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "BRF long-term fee sustainability (annuity method, SOU 2012:71 ground rent)",
        &serde_json::json!({
            "parameters": input.parameters,
            "evaluation_year": evaluation_year,
            "price_index": {
                "observations": index.len(),
                "first_year": index.first_year(),
                "last_year": index.last_year(),
            },
            "fallback_annual_inflation": FALLBACK_ANNUAL_INFLATION,
        }),
        warnings,
        elapsed,
        evaluation_year,
        calculation.result,
    ))
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn calculate(
    input: &AnalysisInput,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<Calculation> {
    if let Err(e) = validate_input(input, evaluation_year) {
        tracing::warn!(error = %e, "analysis input rejected");
        return Err(e);
    }

    let params = &input.parameters;
    let real = real_rate(params.expected_nominal_rate, params.expected_inflation)?;
    tracing::debug!(real_rate = %real, "derived real interest rate");

    let schedule = evaluate_schedule(&input.maintenance_plan, real, index, evaluation_year)?;
    tracing::debug!(
        items = schedule.items.len(),
        total_annuity = %schedule.total_annuity,
        "evaluated maintenance schedule"
    );

    let net = net_assets(&input.balance_sheet, input.property.convertible_asset_value);
    let interest = long_term_interest(net, real, &schedule);
    tracing::debug!(net_assets = %net, long_term_interest = %interest, "estimated long-term interest");

    let land_lease = project_land_lease(&input.property, evaluation_year);
    let projected_rent = land_lease.annual_ground_rent();
    if let Some(rent) = projected_rent {
        tracing::debug!(annual_ground_rent = %rent, "projected ground rent");
    }

    let result = long_term_result(
        &input.income_statement,
        schedule.total_annuity,
        interest,
        projected_rent,
    );
    let surplus_per_area = per_area(result, input.property.residential_area)?;

    let recommendation = calculate_recommendation(
        surplus_per_area,
        input.income_statement.membership_fees,
        input.property.residential_area,
    )?;
    tracing::debug!(
        long_term_result = %result,
        surplus_per_area = %surplus_per_area,
        tier = recommendation.tier,
        adjustment = %recommendation.adjustment_percent,
        "classified fee level"
    );

    Ok(Calculation {
        result: CalculationResult {
            maintenance_items: schedule.items,
            total_maintenance_annuity: schedule.total_annuity,
            net_assets: net,
            real_rate: real,
            long_term_interest: interest,
            land_lease: land_lease.projection().cloned(),
            long_term_result: result,
            surplus_per_area,
            recommendation,
        },
        land_lease,
    })
}

fn collect_warnings(calculation: &Calculation, input: &AnalysisInput) -> Vec<String> {
    let result = &calculation.result;
    let mut warnings = Vec::new();

    for item in &result.maintenance_items {
        if item.inflation_basis == InflationBasis::CompoundGrowth {
            warnings.push(format!(
                "No price index for '{}'; historical cost compounded at 2% per year",
                item.description
            ));
        }
        match item.years_until_next {
            0 => warnings.push(format!("Maintenance item '{}' is due this year", item.description)),
            n if n < 0 => warnings.push(format!(
                "Maintenance item '{}' is overdue by {} year(s)",
                item.description, -n
            )),
            _ => {}
        }
    }

    if result.real_rate < Decimal::ZERO {
        warnings.push(format!(
            "Real interest rate is negative ({:.3}%); maintenance annuities fall below straight-line cost",
            result.real_rate
        ));
    }

    match &calculation.land_lease {
        LandLeaseOutcome::NotApplicable(NotApplicable::MissingAssessedValue) => {
            warnings.push(
                "Property is on leased land but no assessed land value was given; ground rent projection omitted"
                    .into(),
            );
        }
        LandLeaseOutcome::Projected(p) => {
            if let (Some(year), Some(left)) = (p.rent_reset_year, p.years_until_reset) {
                if left <= 0 {
                    warnings.push(format!(
                        "Ground rent period ended in {year}; the projected rent may already apply"
                    ));
                }
            }
        }
        LandLeaseOutcome::NotApplicable(NotApplicable::OwnedLand) => {
            if input.income_statement.land_lease_cost > Decimal::ZERO {
                warnings.push(
                    "Ground rent is booked but the property is not marked as leased land".into(),
                );
            }
        }
    }

    warnings
}
