//! Operator-entered numbers and token base units.
//!
//! The quote token uses 18 decimals. Operators type human amounts
//! ("100", "0.5"); the ledger wants base units. Parsing goes through
//! `rust_decimal` so that anything that is not a finite, non-negative
//! decimal is rejected before it can reach a contract call.

use std::str::FromStr;

use alloy::primitives::U256;
use alloy::primitives::utils::{format_units, parse_units};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ConsoleError;

/// Decimals of the quote token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Parse a free-text numeric field.
///
/// Accepts plain decimals and scientific notation. Rejects empty input,
/// `NaN`, infinities, garbage and negative values.
pub fn parse_number(field: &'static str, raw: &str) -> Result<Decimal, ConsoleError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::validation(field, "a number is required"));
    }

    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => {
                ConsoleError::validation(field, format!("{trimmed} is out of range"))
            }
            _ => ConsoleError::validation(field, format!("{trimmed:?} is not a number")),
        })?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConsoleError::validation(field, "must not be negative"));
    }

    Ok(value)
}

/// Scale a human token amount to base units.
pub fn to_base_units(field: &'static str, value: Decimal) -> Result<U256, ConsoleError> {
    let text = value.normalize().to_string();
    parse_units(&text, TOKEN_DECIMALS)
        .map(|units| units.get_absolute())
        .map_err(|e| ConsoleError::validation(field, format!("cannot scale {text}: {e}")))
}

/// Parse a free-text token amount straight into base units.
pub fn parse_token_amount(field: &'static str, raw: &str) -> Result<U256, ConsoleError> {
    let value = parse_number(field, raw)?;
    to_base_units(field, value)
}

/// Parse a duration that must be a whole number of days.
pub fn parse_whole_days(field: &'static str, raw: &str) -> Result<U256, ConsoleError> {
    let value = parse_number(field, raw)?;
    if !value.fract().is_zero() {
        return Err(ConsoleError::validation(field, "must be a whole number of days"));
    }
    value
        .trunc()
        .to_u64()
        .map(U256::from)
        .ok_or_else(|| ConsoleError::validation(field, "out of range"))
}

/// `n` whole tokens in base units.
pub fn whole_tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(TOKEN_DECIMALS))
}

/// Render base units as a human amount without trailing zeros.
pub fn format_tokens(amount: U256) -> String {
    let Ok(text) = format_units(amount, TOKEN_DECIMALS) else {
        return amount.to_string();
    };
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
