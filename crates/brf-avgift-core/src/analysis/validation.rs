use rust_decimal::Decimal;

use super::input::{AnalysisInput, Parameters};
use crate::error::AvgiftError;
use crate::types::{Money, Year};
use crate::AvgiftResult;

/// Earliest accepted "year last performed".
pub const EARLIEST_MAINTENANCE_YEAR: Year = 1900;

fn require_positive(field: &str, value: Money) -> AvgiftResult<()> {
    if value <= Decimal::ZERO {
        return Err(AvgiftError::invalid(field, "Must be positive"));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Money) -> AvgiftResult<()> {
    if value < Decimal::ZERO {
        return Err(AvgiftError::invalid(field, "Cannot be negative"));
    }
    Ok(())
}

/// Fail fast on inputs the calculation cannot give a meaningful answer for.
///
/// The data collection layer is expected to have rejected these already; this
/// keeps division by zero and nonsense years out of the engine if it has not.
pub fn validate_input(input: &AnalysisInput, evaluation_year: Year) -> AvgiftResult<()> {
    let property = &input.property;
    require_positive("property.gross_floor_area", property.gross_floor_area)?;
    require_positive("property.residential_area", property.residential_area)?;
    require_non_negative(
        "property.convertible_asset_value",
        property.convertible_asset_value,
    )?;
    if let Some(assessed) = property.assessed_land_value_per_area {
        require_non_negative("property.assessed_land_value_per_area", assessed)?;
    }
    if let Some(rent) = property.current_ground_rent {
        require_non_negative("property.current_ground_rent", rent)?;
    }

    let bs = &input.balance_sheet;
    for (field, value) in [
        ("balance_sheet.cash_and_bank", bs.cash_and_bank),
        ("balance_sheet.prepaid_expenses", bs.prepaid_expenses),
        ("balance_sheet.other_current_assets", bs.other_current_assets),
        ("balance_sheet.bank_loans", bs.bank_loans),
        ("balance_sheet.accrued_expenses", bs.accrued_expenses),
        (
            "balance_sheet.other_current_liabilities",
            bs.other_current_liabilities,
        ),
    ] {
        require_non_negative(field, value)?;
    }

    let is = &input.income_statement;
    require_positive("income_statement.membership_fees", is.membership_fees)?;
    require_non_negative("income_statement.depreciation", is.depreciation)?;
    require_non_negative(
        "income_statement.planned_maintenance",
        is.planned_maintenance,
    )?;
    require_non_negative("income_statement.land_lease_cost", is.land_lease_cost)?;

    validate_parameters(&input.parameters)?;

    if input.maintenance_plan.items.is_empty() {
        return Err(AvgiftError::invalid(
            "maintenance_plan.items",
            "At least one maintenance item is required",
        ));
    }
    for (i, item) in input.maintenance_plan.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            return Err(AvgiftError::invalid(
                format!("maintenance_plan.items[{i}].description"),
                "Description is required",
            ));
        }
        if !(EARLIEST_MAINTENANCE_YEAR..=evaluation_year).contains(&item.year_performed) {
            return Err(AvgiftError::invalid(
                format!("maintenance_plan.items[{i}].year_performed"),
                format!(
                    "Year must be between {EARLIEST_MAINTENANCE_YEAR} and {evaluation_year}, got {}",
                    item.year_performed
                ),
            ));
        }
        require_positive(
            &format!("maintenance_plan.items[{i}].historical_cost"),
            item.historical_cost,
        )?;
        if item.interval_years == 0 {
            return Err(AvgiftError::invalid(
                format!("maintenance_plan.items[{i}].interval_years"),
                "Interval must be at least 1 year",
            ));
        }
    }

    Ok(())
}

/// Both assumptions must lie in [0, 20] percent.
pub fn validate_parameters(parameters: &Parameters) -> AvgiftResult<()> {
    for (field, value) in [
        ("parameters.expected_inflation", parameters.expected_inflation),
        (
            "parameters.expected_nominal_rate",
            parameters.expected_nominal_rate,
        ),
    ] {
        if value < Parameters::MIN || value > Parameters::MAX {
            return Err(AvgiftError::invalid(
                field,
                format!(
                    "Must be between {} and {} percent, got {value}",
                    Parameters::MIN,
                    Parameters::MAX
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::sample_input;
    use rust_decimal_macros::dec;

    fn field_of(err: AvgiftError) -> String {
        match err {
            AvgiftError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(validate_input(&sample_input(), 2026).is_ok());
    }

    #[test]
    fn test_zero_residential_area_rejected() {
        let mut input = sample_input();
        input.property.residential_area = Decimal::ZERO;
        let err = validate_input(&input, 2026).unwrap_err();
        assert_eq!(field_of(err), "property.residential_area");
    }

    #[test]
    fn test_zero_fees_rejected() {
        let mut input = sample_input();
        input.income_statement.membership_fees = Decimal::ZERO;
        let err = validate_input(&input, 2026).unwrap_err();
        assert_eq!(field_of(err), "income_statement.membership_fees");
    }

    #[test]
    fn test_negative_balance_field_rejected() {
        let mut input = sample_input();
        input.balance_sheet.accrued_expenses = dec!(-1);
        let err = validate_input(&input, 2026).unwrap_err();
        assert_eq!(field_of(err), "balance_sheet.accrued_expenses");
    }

    #[test]
    fn test_future_maintenance_year_rejected() {
        let mut input = sample_input();
        input.maintenance_plan.items[1].year_performed = 2027;
        let err = validate_input(&input, 2026).unwrap_err();
        assert_eq!(field_of(err), "maintenance_plan.items[1].year_performed");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut input = sample_input();
        input.maintenance_plan.items[0].interval_years = 0;
        let err = validate_input(&input, 2026).unwrap_err();
        assert_eq!(field_of(err), "maintenance_plan.items[0].interval_years");
    }

    #[test]
    fn test_parameters_out_of_range() {
        let p = Parameters {
            expected_inflation: dec!(20.5),
            expected_nominal_rate: dec!(5),
        };
        assert!(validate_parameters(&p).is_err());
        assert!(validate_parameters(&Parameters::default()).is_ok());
    }

    #[test]
    fn test_signed_fields_unconstrained() {
        let mut input = sample_input();
        input.income_statement.annual_result = dec!(-5000000);
        input.income_statement.net_interest = dec!(-100000);
        assert!(validate_input(&input, 2026).is_ok());
    }
}
