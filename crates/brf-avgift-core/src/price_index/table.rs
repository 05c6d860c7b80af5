use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AvgiftError;
use crate::types::Year;
use crate::AvgiftResult;

/// KPIF, December values, 1987 = 100. Used when SCB is unreachable.
const KPIF_FALLBACK: [(Year, Decimal); 21] = [
    (1987, dec!(100.0)),
    (1990, dec!(120.6)),
    (1995, dec!(133.5)),
    (2000, dec!(140.5)),
    (2005, dec!(150.3)),
    (2010, dec!(165.2)),
    (2011, dec!(167.0)),
    (2012, dec!(168.0)),
    (2013, dec!(168.5)),
    (2014, dec!(170.1)),
    (2015, dec!(172.6)),
    (2016, dec!(175.4)),
    (2017, dec!(178.9)),
    (2018, dec!(182.7)),
    (2019, dec!(186.0)),
    (2020, dec!(187.6)),
    (2021, dec!(194.3)),
    (2022, dec!(209.9)),
    (2023, dec!(217.3)),
    (2024, dec!(221.5)),
    (2025, dec!(225.0)),
];

/// Sparse year -> price index mapping. Years need not be contiguous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceIndexTable {
    values: BTreeMap<Year, Decimal>,
}

impl PriceIndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The static KPIF table shipped with the crate.
    pub fn kpif_fallback() -> Self {
        KPIF_FALLBACK.iter().copied().collect()
    }

    /// Build from `(year, value)` pairs, rejecting non-positive index values.
    pub fn from_pairs(pairs: &[(Year, Decimal)]) -> AvgiftResult<Self> {
        if let Some((year, value)) = pairs.iter().find(|(_, v)| *v <= Decimal::ZERO) {
            return Err(AvgiftError::InvalidInput {
                field: format!("index[{year}]"),
                reason: format!("Index value must be positive, got {value}"),
            });
        }
        Ok(pairs.iter().copied().collect())
    }

    pub fn insert(&mut self, year: Year, value: Decimal) {
        self.values.insert(year, value);
    }

    /// Exact-year lookup. Non-positive values count as missing.
    pub fn get(&self, year: Year) -> Option<Decimal> {
        self.values.get(&year).copied().filter(|v| *v > Decimal::ZERO)
    }

    /// Index for "now": the evaluation year, else the year before.
    pub fn latest_for(&self, evaluation_year: Year) -> Option<Decimal> {
        self.get(evaluation_year).or_else(|| {
            evaluation_year
                .checked_sub(1)
                .and_then(|previous| self.get(previous))
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_year(&self) -> Option<Year> {
        self.values.keys().next().copied()
    }

    pub fn last_year(&self) -> Option<Year> {
        self.values.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Year, Decimal)> + '_ {
        self.values.iter().map(|(y, v)| (*y, *v))
    }
}

impl FromIterator<(Year, Decimal)> for PriceIndexTable {
    fn from_iter<I: IntoIterator<Item = (Year, Decimal)>>(iter: I) -> Self {
        PriceIndexTable {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_table_shape() {
        let table = PriceIndexTable::kpif_fallback();
        assert_eq!(table.len(), 21);
        assert_eq!(table.first_year(), Some(1987));
        assert_eq!(table.last_year(), Some(2025));
        assert_eq!(table.get(1987), Some(dec!(100.0)));
        // Sparse before 2010
        assert_eq!(table.get(1988), None);
    }

    #[test]
    fn test_latest_falls_back_to_previous_year() {
        let table = PriceIndexTable::kpif_fallback();
        assert_eq!(table.latest_for(2026), Some(dec!(225.0)));
        assert_eq!(table.latest_for(2025), Some(dec!(225.0)));
        assert_eq!(table.latest_for(2024), Some(dec!(221.5)));
        assert_eq!(table.latest_for(2030), None);
    }

    #[test]
    fn test_latest_for_earliest_representable_year() {
        let table: PriceIndexTable = [(Year::MIN, dec!(100))].into_iter().collect();
        assert_eq!(table.latest_for(Year::MIN), Some(dec!(100)));
        assert_eq!(PriceIndexTable::new().latest_for(Year::MIN), None);
    }

    #[test]
    fn test_from_pairs_rejects_non_positive() {
        assert!(PriceIndexTable::from_pairs(&[(2020, dec!(100)), (2021, dec!(0))]).is_err());
    }

    #[test]
    fn test_deserialize_plain_year_map() {
        let table: PriceIndexTable =
            serde_json::from_str(r#"{"2010": 165.2, "2024": 221.5}"#).unwrap();
        assert_eq!(table.get(2010), Some(dec!(165.2)));
        assert_eq!(table.get(2024), Some(dec!(221.5)));
    }
}
