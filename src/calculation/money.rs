//! Money rounding, validation and lenient parsing.
//!
//! All derived figures are rounded half away from zero to two decimal
//! places and carried at a scale of exactly two.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Number of decimal places carried by every derived amount.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to two decimal places, ties away from zero.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::from_str("0.135").unwrap()).to_string(), "0.14");
/// assert_eq!(round_money(Decimal::from(1940)).to_string(), "1940.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Rejects negative inputs before they reach a calculation.
pub fn ensure_non_negative(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Adds two amounts, failing instead of overflowing.
pub fn checked_money_add(field: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| out_of_range(field))
}

/// Multiplies two amounts, failing instead of overflowing.
pub fn checked_money_mul(field: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(field))
}

fn out_of_range(field: &str) -> EngineError {
    EngineError::invalid_input(field, "amount out of range")
}

/// Parses a user-supplied numeric string strictly.
pub fn parse_money(field: &str, raw: &str) -> EngineResult<Decimal> {
    parse_decimal(raw.trim()).ok_or_else(|| {
        EngineError::invalid_input(field, format!("'{}' is not a number", raw))
    })
}

/// Coerces any stored cell value to an amount, defaulting to zero.
///
/// The external store may hold blank cells, text, or numbers written in
/// scientific notation. Numbers and numeric strings parse; everything else
/// becomes `0`.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::parse_money_or_zero;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(parse_money_or_zero(&json!(2000)), Decimal::from(2000));
/// assert_eq!(parse_money_or_zero(&json!("1940.5")), Decimal::new(19405, 1));
/// assert_eq!(parse_money_or_zero(&json!("")), Decimal::ZERO);
/// assert_eq!(parse_money_or_zero(&json!("n/a")), Decimal::ZERO);
/// assert_eq!(parse_money_or_zero(&json!(null)), Decimal::ZERO);
/// ```
pub fn parse_money_or_zero(raw: &Value) -> Decimal {
    let parsed = match raw {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text.trim()),
        _ => None,
    };
    parsed.unwrap_or(Decimal::ZERO)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
