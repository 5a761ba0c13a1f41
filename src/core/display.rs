//! Display formatting for amounts and dates on a printed bill.
//!
//! Amounts are rounded half-up to two places only here. Rupee amounts use the
//! Indian grouping of the integer part: last three digits, then pairs.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rupee sign printed before every amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Rounds to paise, halves away from zero.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats `amount` as `₹12,34,567.89`, with a leading `-` when negative.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = round_currency(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let text = rounded.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if negative { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{}.{fraction}", group_indian(whole))
}

/// Formats an optional amount, printing absent as zero.
#[must_use]
pub fn format_optional_currency(amount: Option<Decimal>) -> String {
    format_currency(amount.unwrap_or_default())
}

/// Formats a bill date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::new();
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        pairs.push(pair);
        head = rest;
    }
    pairs.push(head);
    pairs.reverse();

    format!("{},{tail}", pairs.join(","))
}
