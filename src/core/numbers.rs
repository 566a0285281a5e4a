use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::error::FaturaError;

/// Parse UBL decimal content using the invariant `.` decimal point.
pub fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, FaturaError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed).map_err(|_| FaturaError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Parse a tax percent. Producers in the wild write both `18.00` and `18,00`.
pub fn parse_percent(field: &'static str, text: &str) -> Result<Decimal, FaturaError> {
    let normalized = text.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| FaturaError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// `amount * rate`, failing instead of overflowing.
pub fn checked_product(amount: Decimal, rate: Decimal) -> Result<Decimal, FaturaError> {
    amount
        .checked_mul(rate)
        .ok_or_else(|| FaturaError::Arithmetic(format!("{amount} at rate {rate} exceeds the decimal range")))
}

/// `total + amount`, failing instead of overflowing.
pub fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal, FaturaError> {
    total
        .checked_add(amount)
        .ok_or_else(|| FaturaError::Arithmetic(format!("sum of {total} and {amount} exceeds the decimal range")))
}

/// Render a quantity as the listing text, e.g. `7` with unit `ADET` → `"7.00 ADET"`.
///
/// Rounds half away from zero to two places.
pub fn format_quantity(quantity: Decimal, unit: &str) -> String {
    let rounded = quantity.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} {unit}")
}
