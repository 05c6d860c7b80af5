pub mod engine;
pub mod input;
#[cfg(feature = "sensitivity")]
pub mod sensitivity;
pub mod validation;

pub use engine::{analyze_fee, run_full_calculation, CalculationResult};
pub use input::{AnalysisInput, Parameters, PropertyInfo};
pub use validation::{validate_input, validate_parameters};

#[cfg(test)]
pub(crate) mod test_support {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::input::{AnalysisInput, Parameters, PropertyInfo};
    use crate::financials::{BalanceSheet, IncomeStatement};
    use crate::maintenance::{MaintenanceItem, MaintenancePlan};
    use crate::price_index::PriceIndexTable;
    use crate::types::Year;

    fn item(description: &str, year: Year, cost: Decimal, interval: u32) -> MaintenanceItem {
        MaintenanceItem {
            description: description.into(),
            year_performed: year,
            historical_cost: cost,
            interval_years: interval,
        }
    }

    /// Index with the same value in both years, so the index ratio is 1.
    pub fn flat_index(year: Year, evaluation_year: Year) -> PriceIndexTable {
        [(year, dec!(100)), (evaluation_year, dec!(100))]
            .into_iter()
            .collect()
    }

    /// Mid-sized cooperative on owned land, valid for evaluation years 2015 onwards.
    pub fn sample_input() -> AnalysisInput {
        AnalysisInput {
            property: PropertyInfo {
                municipality: "Stockholm".into(),
                parcel_id: "Stockholm Södermalm 1:23".into(),
                gross_floor_area: dec!(5000),
                residential_area: dec!(4000),
                convertible_asset_value: Decimal::ZERO,
                is_land_lease: false,
                lease_expiry_year: None,
                current_ground_rent: None,
                assessed_land_value_per_area: None,
            },
            balance_sheet: BalanceSheet {
                cash_and_bank: dec!(1500000),
                prepaid_expenses: dec!(120000),
                other_current_assets: dec!(30000),
                bank_loans: dec!(25000000),
                accrued_expenses: dec!(250000),
                other_current_liabilities: dec!(80000),
            },
            income_statement: IncomeStatement {
                annual_result: dec!(-350000),
                membership_fees: dec!(3000000),
                depreciation: dec!(900000),
                planned_maintenance: dec!(150000),
                land_lease_cost: Decimal::ZERO,
                net_interest: dec!(600000),
            },
            maintenance_plan: MaintenancePlan {
                items: vec![
                    item("Tak", 2010, dec!(500000), 30),
                    item("Fasad", 2015, dec!(800000), 40),
                    item("Stambyte", 1990, dec!(3000000), 50),
                    item("Hiss", 2012, dec!(400000), 25),
                ],
            },
            parameters: Parameters::default(),
        }
    }
}
