use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AvgiftError;
use crate::types::{percent_to_rate, Money, Percent, Rate};
use crate::AvgiftResult;

/// Real interest rate from a nominal rate and inflation (Fisher relation).
///
/// Both arguments and the result are percentages.
pub fn real_rate(nominal: Percent, inflation: Percent) -> AvgiftResult<Percent> {
    if inflation <= dec!(-100) {
        return Err(AvgiftError::InvalidInput {
            field: "inflation".into(),
            reason: "Inflation must be greater than -100%".into(),
        });
    }

    let nominal_factor = Decimal::ONE + percent_to_rate(nominal);
    let inflation_factor = Decimal::ONE + percent_to_rate(inflation);

    Ok((nominal_factor / inflation_factor - Decimal::ONE) * Decimal::ONE_HUNDRED)
}

/// Growth factor (1 + rate)^years. Negative `years` discount instead of compound.
pub fn growth_factor(rate: Rate, years: i64) -> AvgiftResult<Decimal> {
    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: "rate".into(),
            reason: "Growth rate must be greater than -100%".into(),
        });
    }

    let factor = base
        .checked_powu(years.unsigned_abs())
        .ok_or_else(|| AvgiftError::InvalidInput {
            field: "years".into(),
            reason: format!("Growth over {years} years overflows decimal range"),
        })?;

    if years >= 0 {
        return Ok(factor);
    }
    Decimal::ONE
        .checked_div(factor)
        .ok_or_else(|| AvgiftError::InvalidInput {
            field: "years".into(),
            reason: format!("Discounting over {} years underflows decimal range", -years),
        })
}

/// A level annual payment split into its straight-line and interest parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnuitySplit {
    /// Constant annual payment
    pub annuity: Money,
    /// cost / interval
    pub straight_line: Money,
    /// annuity - straight_line; negative when the real rate is negative
    pub interest_component: Money,
}

/// Annual payment that funds `cost` every `interval_years` years in perpetuity.
///
/// Capital recovery factor `r / (1 - (1+r)^-n)`; straight-line when `r == 0`.
///
/// For negative rates this is evaluated as `r * g / (g - 1)` with
/// `g = (1+r)^n`, so an underflowed `g` never ends up in a denominator. When
/// `g` overflows for a positive rate the discount term vanishes and the
/// annuity is `cost * r`.
pub fn recurring_cost_annuity(
    cost: Money,
    interval_years: u32,
    rate: Rate,
) -> AvgiftResult<AnnuitySplit> {
    if interval_years == 0 {
        return Err(AvgiftError::InvalidInput {
            field: "interval_years".into(),
            reason: "Interval must be at least 1 year".into(),
        });
    }

    let n = Decimal::from(interval_years);
    let straight_line = cost / n;

    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let annuity = if rate.is_zero() {
        straight_line
    } else {
        let growth = base.checked_powu(u64::from(interval_years));
        let payment = if rate > Decimal::ZERO {
            // growth >= 1, so its reciprocal is safe; past the decimal range it is zero
            let discount = growth
                .and_then(|g| Decimal::ONE.checked_div(g))
                .unwrap_or(Decimal::ZERO);
            (cost * rate).checked_div(Decimal::ONE - discount)
        } else {
            // growth < 1 and may underflow to zero, which sends the annuity to zero
            let g = growth.unwrap_or(Decimal::ZERO);
            (cost * rate)
                .checked_mul(g)
                .and_then(|numerator| numerator.checked_div(g - Decimal::ONE))
        };
        // Rates so small that (1+r)^n rounds to 1 behave as zero
        payment.unwrap_or(straight_line)
    };

    Ok(AnnuitySplit {
        annuity,
        straight_line,
        interest_component: annuity - straight_line,
    })
}
