use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::inflation::{inflate_with_basis, InflationBasis};
use crate::error::AvgiftError;
use crate::price_index::PriceIndexTable;
use crate::time_value::recurring_cost_annuity;
use crate::types::{percent_to_rate, Money, Percent, Year};
use crate::AvgiftResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A recurring component of the building (roof, facade, pipes, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItem {
    #[serde(alias = "beskrivning")]
    pub description: String,
    /// Year the work was last carried out
    #[serde(alias = "senastUtfort")]
    pub year_performed: Year,
    /// Cost at the time, in that year's money
    #[serde(alias = "kostnadDa")]
    pub historical_cost: Money,
    /// Years between repetitions
    #[serde(alias = "intervall")]
    pub interval_years: u32,
}

/// Ordered maintenance plan. Must contain at least one item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenancePlan {
    #[serde(alias = "poster")]
    pub items: Vec<MaintenanceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItemResult {
    pub description: String,
    /// Historical cost in today's money
    pub present_day_cost: Money,
    /// Level annual payment funding the item in perpetuity
    pub annuity: Money,
    /// year_performed + interval - evaluation_year; zero or negative means overdue
    pub years_until_next: i32,
    /// annuity - present_day_cost / interval
    pub interest_component: Money,
    pub inflation_basis: InflationBasis,
}

impl MaintenanceItemResult {
    pub fn is_overdue(&self) -> bool {
        self.years_until_next <= 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceSchedule {
    /// One result per plan item, in plan order
    pub items: Vec<MaintenanceItemResult>,
    pub total_annuity: Money,
}

impl MaintenanceSchedule {
    /// Sum of the interest components across all items.
    pub fn total_interest_component(&self) -> Money {
        self.items.iter().map(|i| i.interest_component).sum()
    }

    pub fn overdue(&self) -> impl Iterator<Item = &MaintenanceItemResult> {
        self.items.iter().filter(|i| i.is_overdue())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Inflate one item to today's money and annuitise it at `real_rate` (percent).
pub fn evaluate_item(
    item: &MaintenanceItem,
    real_rate: Percent,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<MaintenanceItemResult> {
    if item.interval_years == 0 {
        return Err(AvgiftError::InvalidInput {
            field: "interval_years".into(),
            reason: "Interval must be at least 1 year".into(),
        });
    }

    let inflated = inflate_with_basis(
        item.historical_cost,
        item.year_performed,
        index,
        evaluation_year,
    )?;
    if inflated.basis == InflationBasis::CompoundGrowth {
        tracing::warn!(
            item = %item.description,
            year = item.year_performed,
            "price index missing, compounding at 2% per year"
        );
    }

    let split = recurring_cost_annuity(
        inflated.amount,
        item.interval_years,
        percent_to_rate(real_rate),
    )?;

    let interval = i32::try_from(item.interval_years).unwrap_or(i32::MAX);
    let years_until_next = item
        .year_performed
        .saturating_add(interval)
        .saturating_sub(evaluation_year);

    Ok(MaintenanceItemResult {
        description: item.description.clone(),
        present_day_cost: inflated.amount,
        annuity: split.annuity,
        years_until_next,
        interest_component: split.interest_component,
        inflation_basis: inflated.basis,
    })
}

/// Evaluate every item of the plan, preserving order, and total the annuities.
pub fn evaluate_schedule(
    plan: &MaintenancePlan,
    real_rate: Percent,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<MaintenanceSchedule> {
    if plan.items.is_empty() {
        return Err(AvgiftError::InvalidInput {
            field: "maintenance_plan.items".into(),
            reason: "At least one maintenance item is required".into(),
        });
    }

    let items = plan
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            evaluate_item(item, real_rate, index, evaluation_year).map_err(|e| match e {
                AvgiftError::InvalidInput { field, reason } => AvgiftError::InvalidInput {
                    field: format!("maintenance_plan.items[{i}].{field}"),
                    reason,
                },
                other => other,
            })
        })
        .collect::<AvgiftResult<Vec<_>>>()?;

    let total_annuity = items.iter().map(|i| i.annuity).sum::<Decimal>();

    Ok(MaintenanceSchedule {
        items,
        total_annuity,
    })
}
