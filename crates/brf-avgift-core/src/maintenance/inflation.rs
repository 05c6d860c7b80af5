use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::price_index::PriceIndexTable;
use crate::time_value::growth_factor;
use crate::types::{Money, Rate, Year};
use crate::AvgiftResult;

/// Annual growth assumed when the index lacks either endpoint.
pub const FALLBACK_ANNUAL_INFLATION: Rate = dec!(0.02);

/// How a historical cost was brought to today's money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationBasis {
    /// index[now] / index[then]
    IndexRatio,
    /// 2% per year compounding
    CompoundGrowth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InflatedCost {
    pub amount: Money,
    pub basis: InflationBasis,
}

/// Historical cost in today's money.
///
/// "Today" is `index[evaluation_year]`, or `index[evaluation_year - 1]` when the
/// current year is not published yet. If either end is missing the cost is
/// compounded at [`FALLBACK_ANNUAL_INFLATION`] instead; a missing index is never
/// an error.
pub fn inflate_to_today(
    historical_cost: Money,
    year_performed: Year,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<Money> {
    inflate_with_basis(historical_cost, year_performed, index, evaluation_year)
        .map(|inflated| inflated.amount)
}

/// [`inflate_to_today`] that also reports which method was used.
pub fn inflate_with_basis(
    historical_cost: Money,
    year_performed: Year,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<InflatedCost> {
    match (index.get(year_performed), index.latest_for(evaluation_year)) {
        (Some(then), Some(now)) => Ok(InflatedCost {
            amount: historical_cost * (now / then),
            basis: InflationBasis::IndexRatio,
        }),
        _ => {
            let years = i64::from(evaluation_year) - i64::from(year_performed);
            let factor = growth_factor(FALLBACK_ANNUAL_INFLATION, years)?;
            Ok(InflatedCost {
                amount: historical_cost * factor,
                basis: InflationBasis::CompoundGrowth,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert_eq, proptest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_index_ratio() {
        let index = PriceIndexTable::kpif_fallback();
        let out = inflate_with_basis(dec!(500000), 2010, &index, 2024).unwrap();
        assert_eq!(out.basis, InflationBasis::IndexRatio);
        // 500000 * 221.5 / 165.2 ≈ 670 399.5
        assert!((out.amount - dec!(670399.52)).abs() < dec!(0.01));
    }

    #[test]
    fn test_previous_year_used_when_current_missing() {
        let index = PriceIndexTable::kpif_fallback();
        let current = inflate_to_today(dec!(1000), 2020, &index, 2026).unwrap();
        let previous = inflate_to_today(dec!(1000), 2020, &index, 2025).unwrap();
        assert_eq!(current, previous);
    }

    #[test]
    fn test_missing_start_year_compounds_two_percent() {
        let index = PriceIndexTable::kpif_fallback();
        // 1988 is not in the sparse table
        let out = inflate_with_basis(dec!(1000), 1988, &index, 1990).unwrap();
        assert_eq!(out.basis, InflationBasis::CompoundGrowth);
        assert_eq!(out.amount, dec!(1040.4000));
    }

    #[test]
    fn test_empty_index_compounds() {
        let index = PriceIndexTable::new();
        let out = inflate_with_basis(dec!(100), 2000, &index, 2000).unwrap();
        assert_eq!(out.basis, InflationBasis::CompoundGrowth);
        assert_eq!(out.amount, dec!(100));
    }

    #[test]
    fn test_future_year_discounts_without_error() {
        let index = PriceIndexTable::new();
        let out = inflate_to_today(dec!(102), 2027, &index, 2026).unwrap();
        assert!((out - dec!(100)).abs() < dec!(0.0000001));
    }

    proptest! {
        #[test]
        fn prop_flat_index_round_trip(cost in 1u64..100_000_000, year in 1900i32..2026, value in 1u32..100_000) {
            let v = Decimal::from(value) / dec!(100);
            let index: PriceIndexTable = [(year, v), (2026, v)].into_iter().collect();
            let c = Decimal::from(cost);
            prop_assert_eq!(inflate_to_today(c, year, &index, 2026).unwrap(), c);
        }
    }
}
