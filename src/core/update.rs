//! Edit transitions applied to the invoice being worked on.
//!
//! The form layer hands over either a complete invoice or a patch carrying the
//! fields that changed. Applying one is a pure function from the current state
//! to the next; recomputing totals is left to the caller.

use crate::entities::{Invoice, InvoiceItem, lenient};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

/// Top-level fields to overwrite. Missing keys leave the field untouched.
///
/// For optional fields an explicit `null` clears the value, hence the nested
/// `Option`s. `items` replaces the whole list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    /// New display code, or `Some(None)` to remove it
    #[serde(default, deserialize_with = "lenient::present")]
    pub invoice_number: Option<Option<String>>,
    /// New bill date
    pub invoice_date: Option<NaiveDate>,
    /// New customer name
    pub customer_name: Option<String>,
    /// Replacement line list
    pub items: Option<Vec<InvoiceItem>>,
    /// New central GST percentage
    #[serde(default, deserialize_with = "lenient::patched_decimal")]
    pub cgst: Option<Decimal>,
    /// New state GST percentage
    #[serde(default, deserialize_with = "lenient::patched_decimal")]
    pub sgst: Option<Decimal>,
    /// New account payment, or `Some(None)` to remove it
    #[serde(default, deserialize_with = "lenient::patched_optional_decimal")]
    pub paid_by_account: Option<Option<Decimal>>,
    /// New cash payment, or `Some(None)` to remove it
    #[serde(default, deserialize_with = "lenient::patched_optional_decimal")]
    pub paid_in_cash: Option<Option<Decimal>>,
}

impl InvoicePatch {
    /// Writes every field the patch carries onto `invoice`.
    pub fn merge_into(self, invoice: &mut Invoice) {
        if let Some(invoice_number) = self.invoice_number {
            invoice.invoice_number = invoice_number;
        }
        if let Some(invoice_date) = self.invoice_date {
            invoice.invoice_date = invoice_date;
        }
        if let Some(customer_name) = self.customer_name {
            invoice.customer_name = customer_name;
        }
        if let Some(items) = self.items {
            invoice.items = items;
        }
        if let Some(cgst) = self.cgst {
            invoice.cgst = cgst;
        }
        if let Some(sgst) = self.sgst {
            invoice.sgst = sgst;
        }
        if let Some(paid_by_account) = self.paid_by_account {
            invoice.paid_by_account = paid_by_account;
        }
        if let Some(paid_in_cash) = self.paid_in_cash {
            invoice.paid_in_cash = paid_in_cash;
        }
    }
}

/// An edit coming from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// The form's full view of the invoice
    Replace(Invoice),
    /// Only the fields that changed
    Patch(InvoicePatch),
}

impl From<Invoice> for Update {
    fn from(invoice: Invoice) -> Self {
        Self::Replace(invoice)
    }
}

impl From<InvoicePatch> for Update {
    fn from(patch: InvoicePatch) -> Self {
        Self::Patch(patch)
    }
}

/// Produces the invoice that results from applying `update` to `current`.
///
/// The identity of `current` always survives.
#[must_use]
pub fn apply(current: &Invoice, update: Update) -> Invoice {
    match update {
        Update::Replace(mut next) => {
            if next.id != current.id {
                warn!(
                    current = %current.id,
                    incoming = %next.id,
                    "Ignoring id change in replacement invoice"
                );
                next.id = current.id.clone();
            }
            next
        }
        Update::Patch(patch) => {
            let mut next = current.clone();
            patch.merge_into(&mut next);
            next
        }
    }
}
