//! Six-tier fee recommendation.
//!
//! The long-term surplus or deficit per m² is expressed as a percentage of the
//! current fee per m² (`deficit_percent`, positive = fee too low) and matched
//! against an ordered rule table, first match wins:
//!
//! | Tier | deficit_percent | Adjustment |
//! |------|-----------------|------------|
//! | 1 | `< -10` | `-round_up_half(|x| - 10)` |
//! | 2 | `-10 ..= 0` | `0` |
//! | 3 | `(0, 1.5]` | `+1.5` |
//! | 4 | `(1.5, 5]` | `round_up_half(x)` |
//! | 5 | `(5, 8]` | `round_up_half(x)`, staged 5.0 + `round_up_half(x - 5)` |
//! | 6 | `> 8` | `round_up_half(x)`, staged `round_up_half(x - 3)` + 5.0 |
//!
//! The staged steps in tiers 5 and 6 are rounded independently, so they need
//! not add up to the headline adjustment. That is intended for communication
//! with members and must not be "corrected".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AvgiftError;
use crate::types::{Money, Percent, SquareMetres};
use crate::AvgiftResult;

const INDEX_STEP: &str = "Höj sedan i takt med inflationen (ca 2%/år)";
const CONTINUE_INDEX_STEP: &str = "Fortsätt höja i takt med inflationen (ca 2%/år)";
const FREEZE_STEP: &str = "Frys avgiften i 2–3 år";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// 1 (fee can be lowered) ..= 6 (urgent large increase)
    pub tier: u8,
    pub title: String,
    pub description: String,
    /// Signed headline fee change in percent
    pub adjustment_percent: Percent,
    /// Ordered action plan
    pub plan: Vec<String>,
    /// Long-term deficit as a share of the current fee, in percent
    pub deficit_percent: Percent,
    /// Current annual fee per m² of residential area
    pub fee_per_area: Money,
}

struct TierAdvice {
    title: &'static str,
    description: &'static str,
    adjustment: Percent,
    plan: Vec<String>,
}

struct TierRule {
    tier: u8,
    applies: fn(Percent) -> bool,
    advise: fn(Percent) -> TierAdvice,
}

const TIER_RULES: [TierRule; 6] = [
    TierRule {
        tier: 1,
        applies: |x| x < dec!(-10),
        advise: lower_fee,
    },
    TierRule {
        tier: 2,
        applies: |x| x <= Decimal::ZERO,
        advise: freeze_fee,
    },
    TierRule {
        tier: 3,
        applies: |x| x <= dec!(1.5),
        advise: minor_raise,
    },
    TierRule {
        tier: 4,
        applies: |x| x <= dec!(5),
        advise: single_raise,
    },
    TierRule {
        tier: 5,
        applies: |x| x <= dec!(8),
        advise: two_step_raise,
    },
    TierRule {
        tier: 6,
        // x > 8
        applies: |_| true,
        advise: urgent_raise,
    },
];

/// Round up to the nearest 0.5 percentage point.
pub fn round_up_half(pct: Percent) -> Percent {
    (pct * dec!(2)).ceil() / dec!(2)
}

/// One decimal with a decimal point: `9.0%`.
fn pct_label(pct: Percent) -> String {
    format!("{:.1}%", pct)
}

fn lower_fee(x: Percent) -> TierAdvice {
    let reduction = round_up_half(x.abs() - dec!(10));
    TierAdvice {
        title: "Avgiften kan sänkas",
        description: "Föreningen har ett tydligt överskott. Avgiften kan sänkas till en nivå som ligger 10% över det långsiktiga behovet, fryses några år och sedan höjas i takt med inflationen.",
        adjustment: -reduction,
        plan: vec![
            format!("Sänk avgiften med {} till +10% över behov", pct_label(reduction)),
            FREEZE_STEP.into(),
            INDEX_STEP.into(),
        ],
    }
}

fn freeze_fee(_: Percent) -> TierAdvice {
    TierAdvice {
        title: "Avgiften är lagom",
        description: "Föreningen har ett litet överskott. Avgiften behöver inte höjas just nu — frys den några år och börja sedan höja i takt med inflationen.",
        adjustment: Decimal::ZERO,
        plan: vec![FREEZE_STEP.into(), INDEX_STEP.into()],
    }
}

fn minor_raise(_: Percent) -> TierAdvice {
    let raise = dec!(1.5);
    TierAdvice {
        title: "Mindre höjning behövs",
        description: "Avgiften ligger nära rätt nivå men bör justeras upp något för att säkerställa långsiktig hållbarhet.",
        adjustment: raise,
        plan: vec![
            "Höj avgiften med 1,5% omedelbart".into(),
            CONTINUE_INDEX_STEP.into(),
        ],
    }
}

fn single_raise(x: Percent) -> TierAdvice {
    let raise = round_up_half(x);
    TierAdvice {
        title: "Höjning behövs",
        description: "Avgiften är för låg och behöver höjas till rätt nivå direkt för att undvika framtida problem.",
        adjustment: raise,
        plan: vec![
            format!("Höj avgiften med {} omedelbart", pct_label(raise)),
            CONTINUE_INDEX_STEP.into(),
        ],
    }
}

fn two_step_raise(x: Percent) -> TierAdvice {
    let remaining = round_up_half(x - dec!(5));
    TierAdvice {
        title: "Betydande höjning behövs",
        description: "Avgiften behöver höjas rejält. En uppdelning i två steg rekommenderas för att mildra effekten för medlemmarna.",
        adjustment: round_up_half(x),
        plan: vec![
            "Höj avgiften med 5,0% nu".into(),
            format!("Höj med ytterligare {} nästa år", pct_label(remaining)),
            CONTINUE_INDEX_STEP.into(),
        ],
    }
}

fn urgent_raise(x: Percent) -> TierAdvice {
    let first = round_up_half(x - dec!(3));
    TierAdvice {
        title: "Kraftig höjning krävs omedelbart",
        description: "Avgiften är väsentligt för låg. Åtgärder behöver vidtas omedelbart för att undvika en ekonomisk kris i föreningen.",
        adjustment: round_up_half(x),
        plan: vec![
            format!("Höj avgiften med {} omedelbart", pct_label(first)),
            "Höj med ytterligare 5,0% nästa år".into(),
            CONTINUE_INDEX_STEP.into(),
        ],
    }
}

/// Long-term deficit as a percentage of the current fee. Positive = deficit.
pub fn deficit_percent(
    surplus_per_area: Money,
    total_fees: Money,
    residential_area: SquareMetres,
) -> AvgiftResult<Percent> {
    let fee_per_area = fee_per_area(total_fees, residential_area)?;
    Ok(-surplus_per_area / fee_per_area * Decimal::ONE_HUNDRED)
}

fn fee_per_area(total_fees: Money, residential_area: SquareMetres) -> AvgiftResult<Money> {
    if residential_area <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: "residential_area".into(),
            reason: "Residential area must be positive".into(),
        });
    }
    if total_fees <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: "membership_fees".into(),
            reason: "Membership fees must be positive".into(),
        });
    }
    Ok(total_fees / residential_area)
}

/// Tier for a given deficit percentage.
pub fn tier_for(deficit_percent: Percent) -> u8 {
    TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(deficit_percent))
        .map(|rule| rule.tier)
        .unwrap_or(6)
}

/// Recommend a fee adjustment from the long-term surplus (+) or deficit (-) per m².
pub fn calculate_recommendation(
    surplus_per_area: Money,
    total_fees: Money,
    residential_area: SquareMetres,
) -> AvgiftResult<Recommendation> {
    let fee_per_area = fee_per_area(total_fees, residential_area)?;
    let deficit_percent = -surplus_per_area / fee_per_area * Decimal::ONE_HUNDRED;

    let rule = TIER_RULES
        .iter()
        .find(|rule| (rule.applies)(deficit_percent))
        .unwrap_or(&TIER_RULES[TIER_RULES.len() - 1]);
    let advice = (rule.advise)(deficit_percent);

    Ok(Recommendation {
        tier: rule.tier,
        title: advice.title.into(),
        description: advice.description.into(),
        adjustment_percent: advice.adjustment,
        plan: advice.plan,
        deficit_percent,
        fee_per_area,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    /// Fee 1000 SEK/m² so that surplus_per_area = -10 * deficit_percent.
    fn recommend_at(deficit_pct: Percent) -> Recommendation {
        calculate_recommendation(-deficit_pct * dec!(10), dec!(4000000), dec!(4000)).unwrap()
    }

    #[test]
    fn test_round_up_half() {
        assert_eq!(round_up_half(dec!(9)), dec!(9.0));
        assert_eq!(round_up_half(dec!(2.01)), dec!(2.5));
        assert_eq!(round_up_half(dec!(2.5)), dec!(2.5));
        assert_eq!(round_up_half(dec!(2.51)), dec!(3.0));
        assert_eq!(round_up_half(dec!(-4.7)), dec!(-4.5));
    }

    #[test]
    fn test_zero_deficit_is_tier_two() {
        let rec = recommend_at(dec!(0));
        assert_eq!(rec.tier, 2);
        assert_eq!(rec.adjustment_percent, Decimal::ZERO);
        assert_eq!(rec.plan.len(), 2);
        assert_eq!(
            rec.description,
            "Föreningen har ett litet överskott. Avgiften behöver inte höjas just nu — frys den några år och börja sedan höja i takt med inflationen."
        );
    }

    #[test]
    fn test_computed_steps_use_decimal_point_fixed_steps_keep_comma() {
        // Computed: 1.5 remaining after the fixed 5,0% step
        let rec = recommend_at(dec!(6.3));
        assert_eq!(rec.plan[0], "Höj avgiften med 5,0% nu");
        assert_eq!(rec.plan[1], "Höj med ytterligare 1.5% nästa år");
        assert_eq!(pct_label(dec!(9)), "9.0%");
        assert_eq!(pct_label(dec!(12.5)), "12.5%");
    }

    #[test]
    fn test_boundaries_belong_to_lower_tier() {
        assert_eq!(recommend_at(dec!(-10)).tier, 2);
        assert_eq!(recommend_at(dec!(-10.01)).tier, 1);
        assert_eq!(recommend_at(dec!(1.5)).tier, 3);
        assert_eq!(recommend_at(dec!(1.51)).tier, 4);
        assert_eq!(recommend_at(dec!(5)).tier, 4);
        assert_eq!(recommend_at(dec!(5.01)).tier, 5);
        assert_eq!(recommend_at(dec!(8)).tier, 5);
        assert_eq!(recommend_at(dec!(8.01)).tier, 6);
    }

    #[test]
    fn test_tier_one_reduction() {
        let rec = recommend_at(dec!(-14.2));
        assert_eq!(rec.tier, 1);
        // |−14.2| − 10 = 4.2 -> 4.5
        assert_eq!(rec.adjustment_percent, dec!(-4.5));
        assert_eq!(rec.plan[0], "Sänk avgiften med 4.5% till +10% över behov");
    }

    #[test]
    fn test_tier_three_fixed_raise() {
        let rec = recommend_at(dec!(0.2));
        assert_eq!(rec.tier, 3);
        assert_eq!(rec.adjustment_percent, dec!(1.5));
        assert_eq!(rec.plan[0], "Höj avgiften med 1,5% omedelbart");
    }

    #[test]
    fn test_tier_four_rounds_up() {
        let rec = recommend_at(dec!(3.2));
        assert_eq!(rec.tier, 4);
        assert_eq!(rec.adjustment_percent, dec!(3.5));
    }

    #[test]
    fn test_tier_five_two_steps() {
        let rec = recommend_at(dec!(6.3));
        assert_eq!(rec.tier, 5);
        assert_eq!(rec.adjustment_percent, dec!(6.5));
        assert_eq!(rec.plan[0], "Höj avgiften med 5,0% nu");
        assert_eq!(rec.plan[1], "Höj med ytterligare 1.5% nästa år");
    }

    #[test]
    fn test_tier_six_front_loaded_and_not_additive() {
        let rec = recommend_at(dec!(12));
        assert_eq!(rec.tier, 6);
        assert_eq!(rec.adjustment_percent, dec!(12.0));
        assert_eq!(rec.plan[0], "Höj avgiften med 9.0% omedelbart");
        assert_eq!(rec.plan[1], "Höj med ytterligare 5,0% nästa år");
        // 9.0 + 5.0 != 12.0 on purpose
        assert!(dec!(9.0) + dec!(5.0) != rec.adjustment_percent);
    }

    #[test]
    fn test_deficit_percent_sign() {
        // Deficit of 50 SEK/m² on a fee of 1000 SEK/m² = +5%
        assert_eq!(deficit_percent(dec!(-50), dec!(1000000), dec!(1000)).unwrap(), dec!(5));
        assert_eq!(deficit_percent(dec!(50), dec!(1000000), dec!(1000)).unwrap(), dec!(-5));
    }

    #[test]
    fn test_non_positive_fee_rejected() {
        assert!(calculate_recommendation(dec!(10), dec!(0), dec!(1000)).is_err());
        assert!(calculate_recommendation(dec!(10), dec!(1000), dec!(0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_round_up_half_idempotent(hundredths in -100_000i64..100_000) {
            let x = Decimal::new(hundredths, 2);
            let once = round_up_half(x);
            prop_assert_eq!(round_up_half(once), once);
            prop_assert!(once >= x);
        }

        #[test]
        fn prop_tier_non_increasing_in_surplus(a in -500i64..500, b in -500i64..500) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let fees = dec!(3000000);
            let area = dec!(4000);
            let low_rec = calculate_recommendation(Decimal::from(low), fees, area).unwrap();
            let high_rec = calculate_recommendation(Decimal::from(high), fees, area).unwrap();
            prop_assert!(high_rec.tier <= low_rec.tier);
        }

        #[test]
        fn prop_tier_for_matches_recommendation(hundredths in -3000i64..3000) {
            let x = Decimal::new(hundredths, 2);
            prop_assert_eq!(tier_for(x), recommend_at(x).tier);
        }
    }
}
