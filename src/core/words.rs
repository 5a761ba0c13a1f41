//! Amount-in-words rendering using Indian digit grouping.
//!
//! The rupee part is split as `crore(2) | lakh(2) | thousand(2) | hundred(1) | tens(2)`,
//! so anything from one hundred crore upwards does not fit and yields the
//! overflow sentinel. Paise are rounded half-up from the fractional part and
//! carry into the rupees, never past the nine-digit ceiling.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Largest rupee value the five groups can hold.
const MAX_RUPEES: u64 = 999_999_999;

/// Words printed when the amount does not fit.
pub const OVERFLOW: &str = "overflow";

/// Outcome of rendering an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInWords {
    /// Nothing to print: zero, negative, or under half a paisa
    Empty,
    /// The upper-cased phrase, ending in `ONLY`
    Phrase(String),
    /// Rupee part needs more than nine digits
    Overflow,
}

impl AmountInWords {
    /// Renders `amount`.
    #[must_use]
    pub fn of(amount: Decimal) -> Self {
        if amount <= Decimal::ZERO {
            return Self::Empty;
        }

        let Some(rupees) = amount.trunc().to_u64().filter(|rupees| *rupees <= MAX_RUPEES) else {
            return Self::Overflow;
        };
        let paise = amount
            .fract()
            .saturating_mul(Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or_default();
        // A fraction rounding up to a whole rupee carries, except at the ceiling.
        let (rupees, paise) = match (paise, rupees) {
            (100, MAX_RUPEES) => (MAX_RUPEES, 99),
            (100, rupees) => (rupees + 1, 0),
            (paise, rupees) => (rupees, paise),
        };

        let rupee_words = rupees_in_words(rupees);
        let phrase = match (rupee_words.is_empty(), paise) {
            (true, 0) => return Self::Empty,
            (false, 0) => rupee_words,
            (true, fraction) => format!("{} paisa", two_digits(fraction)),
            (false, fraction) => format!("{rupee_words} and {} paisa", two_digits(fraction)),
        };

        Self::Phrase(format!("{} ONLY", phrase.to_uppercase()))
    }

    /// True when there is nothing to print.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for AmountInWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Phrase(phrase) => f.write_str(phrase),
            Self::Overflow => f.write_str(OVERFLOW),
        }
    }
}

/// Renders `amount` as text; see [`AmountInWords::of`].
#[must_use]
pub fn to_words(amount: Decimal) -> String {
    AmountInWords::of(amount).to_string()
}

fn rupees_in_words(rupees: u64) -> String {
    let groups = [
        (rupees / 10_000_000, "crore"),
        (rupees / 100_000 % 100, "lakh"),
        (rupees / 1_000 % 100, "thousand"),
        (rupees / 100 % 10, "hundred"),
    ];

    let mut parts: Vec<String> = groups
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, unit)| format!("{} {unit}", two_digits(value)))
        .collect();

    let rest = rupees % 100;
    if rest != 0 {
        if !parts.is_empty() {
            parts.push("and".to_string());
        }
        parts.push(two_digits(rest));
    }

    parts.join(" ")
}

fn two_digits(value: u64) -> String {
    // Callers pass 0..=99.
    let index = usize::try_from(value % 100).unwrap_or_default();
    if index < ONES.len() {
        return ONES[index].to_string();
    }

    let tens = TENS[index / 10];
    match ONES[index % 10] {
        "" => tens.to_string(),
        ones => format!("{tens} {ones}"),
    }
}
