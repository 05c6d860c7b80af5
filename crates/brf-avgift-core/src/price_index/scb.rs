//! Parser for the SCB PxWeb KPIF response.
//!
//! The HTTP call itself belongs to the caller. This module only turns the JSON
//! body into a yearly [`PriceIndexTable`]. The first observation seen for a
//! year is kept and only a December observation replaces it.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::PriceIndexTable;
use crate::error::AvgiftError;
use crate::types::Year;
use crate::AvgiftResult;

pub const SCB_KPIF_URL: &str =
    "https://api.scb.se/OV0104/v1/doris/sv/ssd/START/PR/PR0101/PR0101G/KPIF";

#[derive(Debug, Deserialize)]
struct ScbResponse {
    data: Vec<ScbRow>,
}

#[derive(Debug, Deserialize)]
struct ScbRow {
    key: Vec<String>,
    values: Vec<String>,
}

/// Split a PxWeb period like `2024M12` into (year, month).
fn parse_period(period: &str) -> Option<(Year, u32)> {
    let (year, month) = period.split_once('M')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: Year = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

impl PriceIndexTable {
    /// Parse an SCB PxWeb JSON response body.
    pub fn from_scb_response(body: &str) -> AvgiftResult<Self> {
        let response: ScbResponse = serde_json::from_str(body)?;
        Self::from_scb_rows(response.data)
    }

    /// Same as [`from_scb_response`](Self::from_scb_response) for an already parsed value.
    pub fn from_scb_value(value: serde_json::Value) -> AvgiftResult<Self> {
        let response: ScbResponse = serde_json::from_value(value)?;
        Self::from_scb_rows(response.data)
    }

    fn from_scb_rows(rows: Vec<ScbRow>) -> AvgiftResult<Self> {
        let mut yearly: BTreeMap<Year, Decimal> = BTreeMap::new();

        for row in rows {
            let Some((year, month)) = row.key.first().and_then(|k| parse_period(k)) else {
                continue;
            };
            let Some(value) = row
                .values
                .first()
                .and_then(|v| Decimal::from_str(v.trim()).ok())
                .filter(|v| *v > Decimal::ZERO)
            else {
                continue;
            };

            if month == 12 || !yearly.contains_key(&year) {
                yearly.insert(year, value);
            }
        }

        if yearly.is_empty() {
            return Err(AvgiftError::InsufficientData(
                "SCB response contained no usable KPIF observations".into(),
            ));
        }

        Ok(yearly.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_body() -> String {
        serde_json::json!({
            "columns": [
                {"code": "Tid", "text": "månad", "type": "t"},
                {"code": "PR0101G1", "text": "KPIF", "type": "c"}
            ],
            "data": [
                {"key": ["2023M11"], "values": ["216.90"]},
                {"key": ["2023M12"], "values": ["217.30"]},
                {"key": ["2024M01"], "values": ["218.00"]},
                {"key": ["2024M12"], "values": ["221.50"]},
                {"key": ["2025M03"], "values": ["223.10"]},
                {"key": ["2025M04"], "values": ["223.80"]},
                {"key": ["2025M05"], "values": [".."]},
                {"key": ["garbage"], "values": ["1.0"]}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_december_preferred() {
        let table = PriceIndexTable::from_scb_response(&sample_body()).unwrap();
        assert_eq!(table.get(2023), Some(dec!(217.30)));
        assert_eq!(table.get(2024), Some(dec!(221.50)));
    }

    #[test]
    fn test_first_month_kept_when_no_december() {
        let table = PriceIndexTable::from_scb_response(&sample_body()).unwrap();
        // 2025M04 does not replace 2025M03; 2025M05 is not numeric
        assert_eq!(table.get(2025), Some(dec!(223.10)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_later_non_december_month_does_not_overwrite() {
        let body = serde_json::json!({
            "data": [
                {"key": ["2026M01"], "values": ["230.0"]},
                {"key": ["2026M09"], "values": ["235.0"]}
            ]
        })
        .to_string();
        let table = PriceIndexTable::from_scb_response(&body).unwrap();
        assert_eq!(table.get(2026), Some(dec!(230.0)));
    }

    #[test]
    fn test_december_not_overwritten_by_later_row_order() {
        let body = serde_json::json!({
            "data": [
                {"key": ["2022M12"], "values": ["209.9"]},
                {"key": ["2022M06"], "values": ["200.0"]}
            ]
        })
        .to_string();
        let table = PriceIndexTable::from_scb_response(&body).unwrap();
        assert_eq!(table.get(2022), Some(dec!(209.9)));
    }

    #[test]
    fn test_empty_response_is_insufficient() {
        let body = r#"{"columns": [], "data": []}"#;
        let err = PriceIndexTable::from_scb_response(body).unwrap_err();
        assert!(matches!(err, AvgiftError::InsufficientData(_)));
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period("2024M12"), Some((2024, 12)));
        assert_eq!(parse_period("2024M13"), None);
        assert_eq!(parse_period("2024K1"), None);
    }
}
