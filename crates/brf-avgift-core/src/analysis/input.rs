use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::financials::{BalanceSheet, IncomeStatement};
use crate::maintenance::MaintenancePlan;
use crate::types::{Money, Percent, SquareMetres, Year};

/// Property facts (fastighetsuppgifter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInfo {
    #[serde(alias = "kommun")]
    pub municipality: String,
    /// Official parcel designation, e.g. "Stockholm Södermalm 1:23"
    #[serde(alias = "fastighetsbeteckning")]
    pub parcel_id: String,
    /// Gross floor area (BTA), m²
    #[serde(alias = "bta")]
    pub gross_floor_area: SquareMetres,
    /// Residential area of cooperative-owned flats (BOA), m²
    #[serde(alias = "totalBostadsyta")]
    pub residential_area: SquareMetres,
    /// Market value of rental flats that could be converted, SEK
    #[serde(default, alias = "vardeHyreslagenheter")]
    pub convertible_asset_value: Money,
    /// Land held on a municipal leasehold (tomträtt)
    #[serde(default, alias = "arTomtratt")]
    pub is_land_lease: bool,
    /// Year the current ground rent period ends
    #[serde(default, alias = "tomtrattBundenTill", skip_serializing_if = "Option::is_none")]
    pub lease_expiry_year: Option<Year>,
    /// Ground rent paid today, SEK per year
    #[serde(default, alias = "tomtrattArligAvgald", skip_serializing_if = "Option::is_none")]
    pub current_ground_rent: Option<Money>,
    /// Tax-assessed land value per m² BTA
    #[serde(default, alias = "taxeringsvardeMark", skip_serializing_if = "Option::is_none")]
    pub assessed_land_value_per_area: Option<Money>,
}

/// Long-run macro assumptions, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(default = "default_inflation", alias = "forvantadInflation")]
    pub expected_inflation: Percent,
    #[serde(default = "default_nominal_rate", alias = "forvantadNominellRanta")]
    pub expected_nominal_rate: Percent,
}

fn default_inflation() -> Percent {
    dec!(2.0)
}

fn default_nominal_rate() -> Percent {
    dec!(5.0)
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            expected_inflation: default_inflation(),
            expected_nominal_rate: default_nominal_rate(),
        }
    }
}

impl Parameters {
    /// Inclusive range accepted for both assumptions.
    pub const MIN: Percent = Decimal::ZERO;
    pub const MAX: Percent = dec!(20);
}

/// Everything the engine needs for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(alias = "fastighet")]
    pub property: PropertyInfo,
    #[serde(alias = "balansrakning")]
    pub balance_sheet: BalanceSheet,
    #[serde(alias = "resultatrakning")]
    pub income_statement: IncomeStatement,
    #[serde(alias = "underhallsplan")]
    pub maintenance_plan: MaintenancePlan,
    #[serde(default, alias = "parametrar")]
    pub parameters: Parameters,
}

impl AnalysisInput {
    /// Same input with different macro assumptions.
    pub fn with_parameters(&self, parameters: Parameters) -> AnalysisInput {
        AnalysisInput {
            parameters,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parameters_default() {
        let p: Parameters = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Parameters::default());
        assert_eq!(p.expected_inflation, dec!(2.0));
        assert_eq!(p.expected_nominal_rate, dec!(5.0));
    }

    #[test]
    fn test_swedish_draft_keys_deserialize() {
        let json = serde_json::json!({
            "fastighet": {
                "kommun": "Uppsala",
                "fastighetsbeteckning": "Uppsala Luthagen 2:4",
                "bta": 3200,
                "totalBostadsyta": 2600,
                "arTomtratt": true,
                "tomtrattBundenTill": 2030,
                "taxeringsvardeMark": 4500
            },
            "balansrakning": {"kassaBank": 900000, "banklan": 8000000},
            "resultatrakning": {
                "arsresultat": -120000,
                "medlemsavgifter": 2100000,
                "avskrivningar": 600000,
                "rantenetto": 240000
            },
            "underhallsplan": {"poster": [
                {"beskrivning": "Tak", "senastUtfort": 2010, "kostnadDa": 500000, "intervall": 30}
            ]},
            "parametrar": {"forvantadInflation": 2.5, "forvantadNominellRanta": 4.0}
        });
        let input: AnalysisInput = serde_json::from_value(json).unwrap();

        assert_eq!(input.property.municipality, "Uppsala");
        assert!(input.property.is_land_lease);
        assert_eq!(input.property.lease_expiry_year, Some(2030));
        assert_eq!(input.property.convertible_asset_value, Decimal::ZERO);
        assert_eq!(input.balance_sheet.bank_loans, dec!(8000000));
        assert_eq!(input.income_statement.planned_maintenance, Decimal::ZERO);
        assert_eq!(input.maintenance_plan.items.len(), 1);
        assert_eq!(input.parameters.expected_inflation, dec!(2.5));
    }

    #[test]
    fn test_parameters_optional() {
        let json = serde_json::json!({
            "property": {
                "municipality": "Malmö",
                "parcel_id": "Malmö Möllevången 3:1",
                "gross_floor_area": 1000,
                "residential_area": 800
            },
            "balance_sheet": {"cash_and_bank": 100000},
            "income_statement": {"annual_result": 0, "membership_fees": 500000, "net_interest": 0},
            "maintenance_plan": {"items": [
                {"description": "Fönster", "year_performed": 2005, "historical_cost": 300000, "interval_years": 30}
            ]}
        });
        let input: AnalysisInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.parameters, Parameters::default());
        assert!(!input.property.is_land_lease);
    }
}
