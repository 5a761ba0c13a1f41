//! Invoice aggregate - the record a user edits, saves and reopens.
//!
//! Fields that older versions of the tool did not write (`invoiceNumber`, item
//! `description`, the payment amounts) are `Option`s. They stay absent through a
//! save/load cycle and every calculation reads them as zero or empty.

use super::id::{InvoiceId, ItemId};
use super::lenient;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billed line. Its amount is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Stable identifier used by the form to track rows
    pub id: ItemId,
    /// Free-text description, missing in some saved versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity billed; absent while the user is still typing
    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    /// Price per unit
    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub rate: Option<Decimal>,
}

impl InvoiceItem {
    /// A new empty row: no description, quantity 1, rate 0.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            id: ItemId::generate(),
            description: Some(String::new()),
            quantity: Some(Decimal::ONE),
            rate: Some(Decimal::ZERO),
        }
    }

    /// `quantity × rate`, reading absent values as zero.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        // Saturating so absurd typed values cap instead of aborting recomputation.
        self.quantity
            .unwrap_or_default()
            .saturating_mul(self.rate.unwrap_or_default())
    }

    /// Whether the row carries anything worth printing.
    #[must_use]
    pub fn is_billable(&self) -> bool {
        self.quantity.unwrap_or_default() > Decimal::ZERO
            || self.rate.unwrap_or_default() > Decimal::ZERO
    }
}

/// Tax rates applied to a freshly started bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDefaults {
    /// Central GST percentage
    pub cgst: Decimal,
    /// State GST percentage
    pub sgst: Decimal,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            cgst: Decimal::from(9),
            sgst: Decimal::from(9),
        }
    }
}

/// A bill for a single customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Primary key; never changes once created
    pub id: InvoiceId,
    /// Short display code printed on the bill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Calendar date of the bill
    pub invoice_date: NaiveDate,
    /// Name printed under "Bill To"
    #[serde(default)]
    pub customer_name: String,
    /// Lines in display order
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Central GST percentage, not clamped
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub cgst: Decimal,
    /// State GST percentage, not clamped
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub sgst: Decimal,
    /// Amount received by bank transfer
    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_by_account: Option<Decimal>,
    /// Amount received in cash
    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_in_cash: Option<Decimal>,
    /// Outstanding balance as of the last recomputation
    #[serde(
        default,
        deserialize_with = "lenient::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_amount: Option<Decimal>,
}

impl Invoice {
    /// Starts a new bill dated `today` with one blank line.
    #[must_use]
    pub fn new(defaults: &InvoiceDefaults, today: NaiveDate) -> Self {
        Self {
            id: InvoiceId::generate(),
            invoice_number: None,
            invoice_date: today,
            customer_name: String::new(),
            items: vec![InvoiceItem::blank()],
            cgst: defaults.cgst,
            sgst: defaults.sgst,
            paid_by_account: None,
            paid_in_cash: None,
            due_amount: None,
        }
    }

    /// Starts a new bill dated with the local calendar date.
    #[must_use]
    pub fn fresh(defaults: &InvoiceDefaults) -> Self {
        Self::new(defaults, Local::now().date_naive())
    }

    /// True when at least one line has a positive quantity or rate.
    #[must_use]
    pub fn has_billable_items(&self) -> bool {
        self.items.iter().any(InvoiceItem::is_billable)
    }

    /// True when either payment field has been recorded.
    #[must_use]
    pub const fn payments_recorded(&self) -> bool {
        self.paid_by_account.is_some() || self.paid_in_cash.is_some()
    }

    /// A bill is complete once it names a customer and lists at least one line.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.customer_name.trim().is_empty() && !self.items.is_empty()
    }
}
