//! Tolerant numeric deserialization for hand-typed and historical records.
//!
//! Amounts arrive as JSON numbers, numeric strings, empty strings or garbage
//! depending on which version of the form produced them. Anything that does
//! not parse as a decimal is treated as absent instead of failing the record.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Parses a decimal from free text, accepting plain and scientific notation.
#[must_use]
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_decimal(&number.to_string()),
        Value::String(text) => parse_decimal(text),
        _ => None,
    }
}

/// Optional amount: absent, `null` and unparsable values all become `None`.
pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Required amount: unparsable values become zero.
pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    optional_decimal(deserializer).map(Option::unwrap_or_default)
}

/// Patch flavour of [`decimal`]: a present key always yields `Some`.
pub fn patched_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    decimal(deserializer).map(Some)
}

/// Patch flavour of [`optional_decimal`]: `Some(None)` clears the field.
pub fn patched_optional_decimal<'de, D>(
    deserializer: D,
) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_decimal(deserializer).map(Some)
}

/// Distinguishes a key sent as `null` from a missing key.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
