//! Ground rent (tomträttsavgäld) projection following SOU 2012:71.
//!
//! The assessed land value is taken to be 75% of market value. The rent base is
//! 40% of market value, and the annual rent is 2.75% of that base. These are
//! statutory figures and deliberately not configurable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::PropertyInfo;
use crate::types::{Money, Rate, SquareMetres, Year};

const ASSESSMENT_TO_MARKET_RATIO: Rate = dec!(0.75);
const RENT_BASE_SHARE: Rate = dec!(0.40);
const GROUND_RENT_RATE: Rate = dec!(0.0275);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandLeaseProjection {
    /// Land market value grossed up from the tax assessment
    pub market_value: Money,
    /// 40% of market value
    pub assessment_base: Money,
    /// Projected annual ground rent after the next reset
    pub annual_ground_rent: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_reset_year: Option<Year>,
    /// Zero or negative when the current rent period has already ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_until_reset: Option<i32>,
    /// Projected minus current ground rent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_from_current: Option<Money>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotApplicable {
    /// The cooperative owns its land
    OwnedLand,
    /// Leasehold, but no (or a zero) assessed land value was supplied
    MissingAssessedValue,
}

/// Either a projection or the reason none was made.
#[derive(Debug, Clone)]
pub enum LandLeaseOutcome {
    Projected(LandLeaseProjection),
    NotApplicable(NotApplicable),
}

impl LandLeaseOutcome {
    pub fn projection(&self) -> Option<&LandLeaseProjection> {
        match self {
            LandLeaseOutcome::Projected(p) => Some(p),
            LandLeaseOutcome::NotApplicable(_) => None,
        }
    }

    /// Annual rent to charge against the long-term result.
    pub fn annual_ground_rent(&self) -> Option<Money> {
        self.projection().map(|p| p.annual_ground_rent)
    }
}

/// Statutory ground rent for `gross_floor_area` m² BTA at the given assessed
/// land value per m² BTA.
pub fn statutory_ground_rent(
    gross_floor_area: SquareMetres,
    assessed_value_per_area: Money,
) -> LandLeaseProjection {
    let market_value = gross_floor_area * assessed_value_per_area / ASSESSMENT_TO_MARKET_RATIO;
    let assessment_base = RENT_BASE_SHARE * market_value;
    let annual_ground_rent = GROUND_RENT_RATE * assessment_base;

    LandLeaseProjection {
        market_value,
        assessment_base,
        annual_ground_rent,
        rent_reset_year: None,
        years_until_reset: None,
        change_from_current: None,
    }
}

/// Project the ground rent for a property, if it sits on leased land.
pub fn project_land_lease(property: &PropertyInfo, evaluation_year: Year) -> LandLeaseOutcome {
    if !property.is_land_lease {
        return LandLeaseOutcome::NotApplicable(NotApplicable::OwnedLand);
    }
    let Some(assessed) = property
        .assessed_land_value_per_area
        .filter(|v| *v > Decimal::ZERO)
    else {
        return LandLeaseOutcome::NotApplicable(NotApplicable::MissingAssessedValue);
    };

    let mut projection = statutory_ground_rent(property.gross_floor_area, assessed);
    projection.rent_reset_year = property.lease_expiry_year;
    projection.years_until_reset = property
        .lease_expiry_year
        .map(|y| y.saturating_sub(evaluation_year));
    projection.change_from_current = property
        .current_ground_rent
        .map(|current| projection.annual_ground_rent - current);

    LandLeaseOutcome::Projected(projection)
}
