//! Conversion between "whole" decimal amounts and integer "raw" amounts.
//!
//! One whole unit is `10^decimals` raw. Raw values are unbounded integers;
//! nothing here goes through fixed-width or floating-point arithmetic.

use num_bigint::{BigInt, BigUint, Sign};

use crate::error::{CoreError, Result};

/// Decimal exponent of the ledger's whole unit.
pub const DEFAULT_DECIMALS: u32 = 29;

/// Parse a whole decimal string (`"12"`, `"0.5"`, `".5"`, `"-3.25"`) into raw.
///
/// Fails with [`CoreError::InvalidAmount`] if the fractional part has more
/// than `decimals` digits, and [`CoreError::MalformedInput`] for anything
/// that is not an optionally signed decimal number.
pub fn whole_to_raw(whole: &str, decimals: u32) -> Result<BigInt> {
    let (sign, unsigned) = match whole.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, whole),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CoreError::malformed(format!("{whole:?} is not a number")));
    }
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(CoreError::malformed(format!("{whole:?} is not a decimal number")));
    }
    if frac_part.len() > decimals as usize {
        return Err(CoreError::InvalidAmount(format!(
            "too many decimals in {whole:?}, cannot exceed {decimals}"
        )));
    }

    let scale = pow10(decimals);
    let frac_scale = pow10(decimals - frac_part.len() as u32);
    let magnitude = parse_digits(int_part)? * scale + parse_digits(frac_part)? * frac_scale;

    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Render a raw amount as a whole decimal string.
///
/// Trailing fractional zeros and a bare trailing point are dropped, so
/// `raw_to_whole(10^29, 29) == "1"` and `raw_to_whole(0, 29) == "0"`.
pub fn raw_to_whole(raw: &BigUint, decimals: u32) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{}{digits}", "0".repeat(decimals - digits.len())))
    };

    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        int_part
    } else {
        format!("{int_part}.{frac}")
    }
}

/// Parse a non-negative raw amount given as a decimal string.
pub fn parse_raw(text: &str) -> Result<BigUint> {
    if text.is_empty() || !is_digits(text) {
        return Err(CoreError::malformed(format!("{text:?} is not a raw amount")));
    }
    parse_digits(text)
}

/// Convert a parsed amount to a non-negative raw value.
pub fn non_negative(raw: &BigInt) -> Result<BigUint> {
    raw.to_biguint()
        .ok_or_else(|| CoreError::InvalidAmount(format!("amount {raw} is negative")))
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_digits(s: &str) -> Result<BigUint> {
    if s.is_empty() {
        return Ok(BigUint::default());
    }
    BigUint::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| CoreError::malformed(format!("{s:?} is not a decimal number")))
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

/// Serde adapter for raw amounts carried as decimal strings.
///
/// Use with `#[serde(with = "lattice_wallet_core::amount::raw_string")]`.
pub mod raw_string {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(raw: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(raw)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_raw(&text).map_err(serde::de::Error::custom)
    }
}
