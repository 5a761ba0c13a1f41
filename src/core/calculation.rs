//! Calculation engine - derives every total printed on a bill.
//!
//! `compute` is pure and cheap enough to run after every keystroke. It keeps
//! full decimal precision; rounding to paise happens only when amounts are
//! formatted for display.

use crate::entities::{Invoice, InvoiceItem};
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals derived from an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of quantity × rate over all lines
    pub subtotal: Decimal,
    /// Central GST on the subtotal
    pub cgst_amount: Decimal,
    /// State GST on the subtotal
    pub sgst_amount: Decimal,
    /// Subtotal plus both taxes
    pub grand_total: Decimal,
    /// Account and cash payments combined
    pub total_paid: Decimal,
    /// Grand total less payments, never below zero
    pub due_amount: Decimal,
}

/// Computes the totals of `invoice`.
///
/// Absent quantities, rates, tax percentages and payments count as zero. Tax
/// percentages are applied as given, out-of-range values included.
///
/// The session calls this after every edit, and [`InvoiceSnapshot::capture`]
/// calls it for bills loaded straight from the store. Results are unrounded;
/// pass them through [`format_currency`] before showing them.
///
/// [`InvoiceSnapshot::capture`]: super::snapshot::InvoiceSnapshot::capture
/// [`format_currency`]: super::display::format_currency
#[must_use]
pub fn compute(invoice: &Invoice) -> Totals {
    let subtotal = invoice
        .items
        .iter()
        .map(InvoiceItem::amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    let cgst_amount = tax_on(subtotal, invoice.cgst);
    let sgst_amount = tax_on(subtotal, invoice.sgst);
    let grand_total = subtotal
        .saturating_add(cgst_amount)
        .saturating_add(sgst_amount);

    let total_paid = invoice
        .paid_by_account
        .unwrap_or_default()
        .saturating_add(invoice.paid_in_cash.unwrap_or_default());
    let due_amount = grand_total.saturating_sub(total_paid).max(Decimal::ZERO);

    Totals {
        subtotal,
        cgst_amount,
        sgst_amount,
        grand_total,
        total_paid,
        due_amount,
    }
}

fn tax_on(subtotal: Decimal, percent: Decimal) -> Decimal {
    // Divide first: subtotal / 100 cannot overflow, the product then saturates.
    (subtotal / Decimal::ONE_HUNDRED).saturating_mul(percent)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{invoice_with_lines, sample_invoice};
    use rust_decimal_macros::dec;

    #[test]
    fn test_two_units_at_hundred_with_nine_percent_each() {
        let invoice = sample_invoice();
        let totals = compute(&invoice);

        assert_eq!(totals.subtotal, dec!(200));
        assert_eq!(totals.cgst_amount, dec!(18));
        assert_eq!(totals.sgst_amount, dec!(18));
        assert_eq!(totals.grand_total, dec!(236));
    }

    #[test]
    fn test_partial_payment_leaves_balance_due() {
        let mut invoice = sample_invoice();
        invoice.paid_by_account = Some(dec!(200));
        invoice.paid_in_cash = Some(dec!(0));

        let totals = compute(&invoice);
        assert_eq!(totals.total_paid, dec!(200));
        assert_eq!(totals.due_amount, dec!(36));
    }

    #[test]
    fn test_overpayment_floors_due_at_zero() {
        let mut invoice = sample_invoice();
        invoice.paid_by_account = Some(dec!(300));

        let totals = compute(&invoice);
        assert_eq!(totals.due_amount, Decimal::ZERO);
    }

    #[test]
    fn test_split_payment() {
        let mut invoice = sample_invoice();
        invoice.paid_by_account = Some(dec!(100));
        invoice.paid_in_cash = Some(dec!(36));
        assert_eq!(compute(&invoice).due_amount, Decimal::ZERO);

        invoice.paid_in_cash = Some(dec!(30.50));
        assert_eq!(compute(&invoice).due_amount, dec!(5.50));
    }

    #[test]
    fn test_no_payment_fields_means_whole_total_due() {
        let invoice = sample_invoice();
        let totals = compute(&invoice);
        assert_eq!(totals.total_paid, Decimal::ZERO);
        assert_eq!(totals.due_amount, totals.grand_total);
    }

    #[test]
    fn test_zero_or_missing_lines_contribute_nothing() {
        let invoice = invoice_with_lines(&[
            (Some(dec!(0)), Some(dec!(500))),
            (Some(dec!(3)), Some(dec!(0))),
            (None, Some(dec!(75))),
            (Some(dec!(4)), None),
            (None, None),
            (Some(dec!(1)), Some(dec!(10))),
        ]);

        assert_eq!(compute(&invoice).subtotal, dec!(10));
    }

    #[test]
    fn test_empty_item_list_is_all_zero() {
        let invoice = invoice_with_lines(&[]);
        assert_eq!(compute(&invoice), Totals::default());
    }

    #[test]
    fn test_full_precision_is_kept() {
        let mut invoice = invoice_with_lines(&[(Some(dec!(3)), Some(dec!(33.33)))]);
        invoice.cgst = dec!(2.5);
        invoice.sgst = dec!(2.5);

        let totals = compute(&invoice);
        assert_eq!(totals.subtotal, dec!(99.99));
        assert_eq!(totals.cgst_amount, dec!(2.49975));
        assert_eq!(totals.grand_total, dec!(104.9895));
    }

    #[test]
    fn test_grand_total_is_sum_of_parts_across_rates() {
        let mut invoice = invoice_with_lines(&[
            (Some(dec!(7)), Some(dec!(19.99))),
            (Some(dec!(0.5)), Some(dec!(1234.5))),
        ]);

        for cgst in [0, 2, 6, 9, 14, 28, 100] {
            for sgst in [0, 5, 9, 100] {
                invoice.cgst = Decimal::from(cgst);
                invoice.sgst = Decimal::from(sgst);
                let totals = compute(&invoice);
                assert_eq!(
                    totals.grand_total,
                    totals.subtotal + totals.cgst_amount + totals.sgst_amount
                );
            }
        }
    }

    #[test]
    fn test_out_of_range_tax_is_not_clamped() {
        let mut invoice = sample_invoice();
        invoice.cgst = dec!(150);
        invoice.sgst = dec!(-10);

        let totals = compute(&invoice);
        assert_eq!(totals.cgst_amount, dec!(300));
        assert_eq!(totals.sgst_amount, dec!(-20));
        assert_eq!(totals.grand_total, dec!(480));
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut invoice = sample_invoice();
        invoice.paid_in_cash = Some(dec!(12.34));

        let first = compute(&invoice);
        let second = compute(&invoice);
        assert_eq!(first, second);
    }
}
