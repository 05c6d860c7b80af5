use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AvgiftError;
use crate::maintenance::MaintenanceSchedule;
use crate::types::{percent_to_rate, Money, Percent, SquareMetres};
use crate::AvgiftResult;

/// Income statement figures from the annual report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Reported annual result (signed)
    #[serde(alias = "arsresultat")]
    pub annual_result: Money,
    /// Total annual membership fees
    #[serde(alias = "medlemsavgifter")]
    pub membership_fees: Money,
    #[serde(default, alias = "avskrivningar")]
    pub depreciation: Money,
    /// Planned maintenance booked as cost this year
    #[serde(default, alias = "planeradeUnderhallsutgifter")]
    pub planned_maintenance: Money,
    /// Ground rent booked this year
    #[serde(default, alias = "tomtrattskostnad")]
    pub land_lease_cost: Money,
    /// Interest expense minus interest income; positive = net expense
    #[serde(alias = "rantenetto")]
    pub net_interest: Money,
}

/// Long-term interest cost: return forgone (or earned) on net assets at the
/// real rate, plus the financing cost embedded in the maintenance annuities.
pub fn long_term_interest(
    net_assets: Money,
    real_rate: Percent,
    schedule: &MaintenanceSchedule,
) -> Money {
    net_assets * percent_to_rate(real_rate) + schedule.total_interest_component()
}

/// Annual result restated with long-term equivalents.
///
/// Booked depreciation, planned maintenance, ground rent and net interest are
/// backed out and replaced by the maintenance annuity, the long-term interest
/// cost and, when a land lease applies, the projected ground rent.
pub fn long_term_result(
    income: &IncomeStatement,
    total_maintenance_annuity: Money,
    long_term_interest: Money,
    projected_land_lease: Option<Money>,
) -> Money {
    let booked_add_backs = income.depreciation + income.planned_maintenance + income.land_lease_cost;
    let long_term_costs =
        total_maintenance_annuity + long_term_interest + projected_land_lease.unwrap_or_default();

    income.annual_result + booked_add_backs - income.net_interest - long_term_costs
}

/// Long-term result per square metre of residential area.
pub fn per_area(amount: Money, residential_area: SquareMetres) -> AvgiftResult<Money> {
    if residential_area <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: "property.residential_area".into(),
            reason: "Residential area must be positive".into(),
        });
    }
    Ok(amount / residential_area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::{InflationBasis, MaintenanceItemResult};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_income() -> IncomeStatement {
        IncomeStatement {
            annual_result: dec!(-250000),
            membership_fees: dec!(3000000),
            depreciation: dec!(900000),
            planned_maintenance: dec!(300000),
            land_lease_cost: dec!(0),
            net_interest: dec!(400000),
        }
    }

    fn schedule_with(annuity: Money, interest: Money) -> MaintenanceSchedule {
        MaintenanceSchedule {
            items: vec![MaintenanceItemResult {
                description: "Tak".into(),
                present_day_cost: dec!(1000000),
                annuity,
                years_until_next: 5,
                interest_component: interest,
                inflation_basis: InflationBasis::IndexRatio,
            }],
            total_annuity: annuity,
        }
    }

    #[test]
    fn test_long_term_interest_combines_both_parts() {
        let schedule = schedule_with(dec!(50000), dec!(12000));
        // -10M at 3% = -300 000, plus 12 000 embedded interest
        let out = long_term_interest(dec!(-10000000), dec!(3), &schedule);
        assert_eq!(out, dec!(-288000));
    }

    #[test]
    fn test_long_term_result_without_land_lease() {
        let income = sample_income();
        let out = long_term_result(&income, dec!(600000), dec!(-288000), None);
        // -250k + 900k + 300k + 0 - 400k - 600k + 288k
        assert_eq!(out, dec!(238000));
    }

    #[test]
    fn test_projected_land_lease_subtracted() {
        let income = sample_income();
        let without = long_term_result(&income, dec!(600000), dec!(0), None);
        let with = long_term_result(&income, dec!(600000), dec!(0), Some(dec!(150000)));
        assert_eq!(without - with, dec!(150000));
    }

    #[test]
    fn test_net_interest_income_flows_through() {
        let mut income = sample_income();
        income.net_interest = dec!(-50000);
        let out = long_term_result(&income, dec!(0), dec!(0), None);
        assert_eq!(out, dec!(-250000) + dec!(1200000) + dec!(50000));
    }

    #[test]
    fn test_per_area() {
        assert_eq!(per_area(dec!(238000), dec!(4000)).unwrap(), dec!(59.5));
    }

    #[test]
    fn test_per_area_rejects_non_positive_area_as_invalid_input() {
        for area in [dec!(0), dec!(-10)] {
            let err = per_area(dec!(1), area).unwrap_err();
            assert!(matches!(
                err,
                AvgiftError::InvalidInput { ref field, .. } if field == "property.residential_area"
            ));
        }
    }
}
