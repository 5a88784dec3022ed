//! Money helpers: rounding, lenient parsing and display formatting
//!
//! Amounts are `Decimal` end to end. Rounding always resolves midpoints away
//! from zero so `2.5` becomes `3` and `-2.5` becomes `-3`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Largest amount a single record may carry (15 digits, 2 of them decimal)
pub const MAX_AMOUNT: Decimal = dec!(9999999999999.99);

/// Round to whole currency units
pub fn round_whole(value: Decimal) -> Decimal {
    round_dp(value, 0)
}

/// Round to `dp` decimal places
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether `value` fits the accepted amount range `0..=MAX_AMOUNT`
pub fn is_valid_amount(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_AMOUNT
}

/// Sum that stops at `Decimal::MAX` instead of overflowing
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| total.saturating_add(value))
}

/// `part` as a percentage of `whole`, saturating on overflow; 0 when `whole` is 0
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Parse an amount from loosely typed input (`"15200"`, `"15 200.50"`, `1.5e3`)
///
/// Returns `None` for anything that does not read as a number.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Format an amount for display: whole units, thousands grouped by a space,
/// followed by the currency label (`1 234 567 sum`)
pub fn format_amount(value: Decimal, label: &str) -> String {
    let rounded = round_whole(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    if label.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, grouped, label)
    }
}
