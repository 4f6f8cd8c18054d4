//! Conversions between human decimal amounts and smallest-unit integers.

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;
use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)(?:\.([0-9]+))?$").expect("valid amount regex"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must be a positive number")]
    NotANumber,
    #[error("amount must be greater than zero")]
    NotPositive,
    #[error("amount supports at most {max} decimal places")]
    TooManyDecimals { max: u8 },
    #[error("amount is out of range")]
    OutOfRange,
}

/// Parses a positive decimal string into smallest units.
pub fn parse_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = input.trim();
    let captures = AMOUNT_RE.captures(trimmed).ok_or(AmountError::NotANumber)?;
    if let Some(fraction) = captures.get(2) {
        if fraction.as_str().len() > decimals as usize {
            return Err(AmountError::TooManyDecimals { max: decimals });
        }
    }

    let value = match parse_units(trimmed, decimals).map_err(|_| AmountError::OutOfRange)? {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => return Err(AmountError::NotANumber),
    };
    if value.is_zero() {
        return Err(AmountError::NotPositive);
    }
    Ok(value)
}

/// Decimal string rounded half-up to `places` fractional digits.
pub fn to_fixed(value: U256, decimals: u8, places: u8) -> String {
    let scaled = if decimals <= places {
        value.saturating_mul(pow10(places - decimals))
    } else {
        let divisor = pow10(decimals - places);
        let half = divisor / U256::from(2u8);
        value.saturating_add(half) / divisor
    };

    if places == 0 {
        return scaled.to_string();
    }
    let unit = pow10(places);
    let whole = scaled / unit;
    let fraction = (scaled % unit).to_string();
    format!("{whole}.{fraction:0>width$}", width = places as usize)
}

fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}
