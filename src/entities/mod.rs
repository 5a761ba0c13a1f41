//! Invoice entities - the records the calculation engine reads and the store persists.

pub mod id;
pub mod invoice;
pub mod lenient;

pub use id::{InvoiceId, ItemId};
pub use invoice::{Invoice, InvoiceDefaults, InvoiceItem};
