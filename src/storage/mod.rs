//! Persistence for saved invoices.
//!
//! The store keeps the authoritative in-memory list and rewrites the whole
//! collection under a single key of a [`StorageMedium`] on every mutation.

/// One JSON file per key in a data directory
pub mod file;
/// Versioned document layout of the saved collection
pub mod format;
/// In-process medium for tests and embedding
pub mod memory;
/// Keyed invoice collection with upsert/delete semantics
pub mod store;

pub use file::FileMedium;
pub use memory::MemoryMedium;
pub use store::{InvoiceStore, LoadReport};

use crate::errors::Result;

/// A place that can hold byte blobs addressed by key.
///
/// Writes must be all-or-nothing: after a failed `write` the previous contents
/// of the key are still readable. Contents are opaque to the medium; decoding
/// them is up to the caller.
pub trait StorageMedium {
    /// Returns the contents stored under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the contents stored under `key`.
    fn write(&mut self, key: &str, contents: &[u8]) -> Result<()>;
}
