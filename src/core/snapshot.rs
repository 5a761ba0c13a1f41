//! Read-only view of a computed invoice, handed to the document export layer.

use super::calculation::{Totals, compute};
use super::words::AmountInWords;
use crate::entities::{Invoice, ItemId};
use rust_decimal::Decimal;
use serde::Serialize;

/// One printed row of the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSnapshot {
    /// 1-based serial number printed in the first column
    pub serial: usize,
    /// Row the line came from
    pub item_id: ItemId,
    /// Quantity as entered
    pub quantity: Option<Decimal>,
    /// Rate as entered
    pub rate: Option<Decimal>,
    /// `quantity × rate`
    pub amount: Decimal,
}

/// Everything needed to print a bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    /// The invoice as last edited
    pub invoice: Invoice,
    /// Totals computed from it
    pub totals: Totals,
    /// Numbered rows with their amounts
    pub lines: Vec<LineSnapshot>,
    /// Grand total in words; `None` when the grand total is not positive
    pub amount_in_words: Option<String>,
    /// Whether a payment field was filled in
    pub payments_recorded: bool,
    /// Whether any row has a positive quantity or rate
    pub has_billable_items: bool,
}

impl InvoiceSnapshot {
    /// Computes the totals of `invoice` and captures them with it.
    #[must_use]
    pub fn capture(invoice: &Invoice) -> Self {
        Self::with_totals(invoice, compute(invoice))
    }

    /// Captures `invoice` with totals the caller already computed.
    #[must_use]
    pub fn with_totals(invoice: &Invoice, totals: Totals) -> Self {
        let lines = invoice
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| LineSnapshot {
                serial: index + 1,
                item_id: item.id.clone(),
                quantity: item.quantity,
                rate: item.rate,
                amount: item.amount(),
            })
            .collect();

        let amount_in_words = match AmountInWords::of(totals.grand_total) {
            AmountInWords::Empty => None,
            words => Some(words.to_string()),
        };

        Self {
            invoice: invoice.clone(),
            totals,
            lines,
            amount_in_words,
            payments_recorded: invoice.payments_recorded(),
            has_billable_items: invoice.has_billable_items(),
        }
    }
}
