//! Core business logic - framework-agnostic invoice calculation, editing and export.

/// Subtotal, tax, grand total and due amount
pub mod calculation;
/// Currency and date formatting for printed bills
pub mod display;
/// The bill being edited and its saved collection
pub mod session;
/// Read-only view handed to the export layer
pub mod snapshot;
/// Patch and replacement edits from the form
pub mod update;
/// Amount in words with crore/lakh grouping
pub mod words;

pub use calculation::{Totals, compute};
pub use session::Session;
pub use snapshot::InvoiceSnapshot;
pub use update::{InvoicePatch, Update, apply};
pub use words::{AmountInWords, to_words};
