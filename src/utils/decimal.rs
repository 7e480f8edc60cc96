//! Serde and rounding helpers for `BigDecimal` amounts.
//!
//! Amounts travel as plain JSON numbers on the wire but are held as exact decimals
//! internally, so that display rounding is applied to the decimal value rather than
//! to its nearest binary float.

use bigdecimal::BigDecimal;
use serde::{de, ser, Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Longest accepted textual form of an amount.
pub const AMOUNT_INPUT_MAX_LEN: usize = 64;
/// Largest accepted decimal exponent, either direction.
pub const AMOUNT_MAX_SCALE: i64 = 32;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

fn parse_amount<E: de::Error>(raw: RawAmount) -> Result<BigDecimal, E> {
    let text = match raw {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s.trim().to_string(),
    };

    if text.len() > AMOUNT_INPUT_MAX_LEN {
        return Err(E::custom(format!(
            "amount must be at most {} characters",
            AMOUNT_INPUT_MAX_LEN
        )));
    }

    let value = BigDecimal::from_str(&text)
        .map_err(|_| E::custom(format!("invalid decimal amount: {}", text)))?;

    let (_, scale) = value.as_bigint_and_exponent();
    if scale.abs() > AMOUNT_MAX_SCALE {
        return Err(E::custom(format!("amount out of range: {}", text)));
    }

    Ok(value)
}

pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
    // parsing the decimal text yields the nearest float to the exact value
    let number = value
        .to_string()
        .parse::<f64>()
        .map_err(|_| ser::Error::custom(format!("{} is not representable as a number", value)))?;
    serializer.serialize_f64(number)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
    parse_amount(RawAmount::deserialize(deserializer)?)
}

pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BigDecimal>, D::Error> {
    Option::<RawAmount>::deserialize(deserializer)?
        .map(parse_amount)
        .transpose()
}

/// Rounds half away from zero to `places` decimal digits.
pub fn round_half_up(value: &BigDecimal, places: i64) -> BigDecimal {
    value.round(places)
}
