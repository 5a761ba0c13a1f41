//! Invoice store - the saved collection, addressed by invoice id.
//!
//! The store is constructed once, holds the authoritative list in memory and
//! flushes the whole list to its medium on every save or delete. A mutation
//! only becomes visible in memory after the medium accepted the write, so a
//! failed flush leaves the store exactly as it was.
//!
//! Saved contents that cannot be used are copied to a backup key first. When
//! that is impossible the store stays read-only, so the original contents
//! are never overwritten.

use super::{StorageMedium, format};
use crate::entities::{Invoice, InvoiceId};
use crate::errors::{Error, Result};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// What happened when the store read its medium at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Nothing had been saved yet
    Fresh,
    /// The saved collection was read
    Loaded {
        /// Number of invoices read
        count: usize,
    },
    /// The saved collection was unreadable; the store started empty
    Recovered {
        /// Why the collection could not be used
        reason: String,
        /// Key the unreadable contents were copied to, if the copy succeeded
        backup_key: Option<String>,
    },
}

/// Saved invoices in insertion order.
#[derive(Debug)]
pub struct InvoiceStore<M> {
    medium: M,
    key: String,
    invoices: Vec<Invoice>,
    load_report: LoadReport,
    // Set when the saved contents are neither usable nor backed up.
    writes_blocked: bool,
}

impl<M: StorageMedium> InvoiceStore<M> {
    /// Reads the collection stored under `key`.
    ///
    /// Never fails: unreadable or corrupt contents are logged, recorded in
    /// [`Self::load_report`], and the store starts out empty.
    pub fn open(mut medium: M, key: impl Into<String>) -> Self {
        let key = key.into();
        let (invoices, load_report) = match medium.read(&key) {
            Ok(None) => {
                info!("No saved invoices under `{key}`; starting empty");
                (Vec::new(), LoadReport::Fresh)
            }
            Ok(Some(raw)) => match decode(&raw) {
                Ok(invoices) => {
                    let invoices = dedupe(invoices);
                    info!("Loaded {} saved invoices from `{key}`", invoices.len());
                    let count = invoices.len();
                    (invoices, LoadReport::Loaded { count })
                }
                Err(reason) => {
                    error!("Saved invoices under `{key}` are corrupt, starting empty: {reason}");
                    let backup_key = back_up(&mut medium, &key, &raw);
                    (Vec::new(), LoadReport::Recovered { reason, backup_key })
                }
            },
            Err(e) => {
                error!("Failed to read saved invoices under `{key}`, starting empty: {e}");
                let report = LoadReport::Recovered {
                    reason: e.to_string(),
                    backup_key: None,
                };
                (Vec::new(), report)
            }
        };

        let writes_blocked = matches!(
            load_report,
            LoadReport::Recovered {
                backup_key: None,
                ..
            }
        );
        if writes_blocked {
            warn!("Saved invoices under `{key}` were not backed up; the store is read-only");
        }

        Self {
            medium,
            key,
            invoices,
            load_report,
            writes_blocked,
        }
    }

    /// All saved invoices, in the order they were first saved.
    #[must_use]
    pub fn list(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Looks up a saved invoice.
    #[must_use]
    pub fn load(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| &invoice.id == id)
    }

    /// Inserts `invoice`, or replaces the saved invoice with the same id in place.
    ///
    /// The whole collection is written to the medium before the in-memory list
    /// changes. On error nothing is committed and the caller still holds the
    /// only copy of `invoice`, which is what the session relies on to keep
    /// unsaved edits across a failed save.
    pub fn save(&mut self, invoice: Invoice) -> Result<()> {
        let mut next = self.invoices.clone();
        let id = invoice.id.clone();
        let replaced = match next.iter_mut().find(|saved| saved.id == invoice.id) {
            Some(slot) => {
                *slot = invoice;
                true
            }
            None => {
                next.push(invoice);
                false
            }
        };

        self.commit(next)?;
        if replaced {
            info!("Updated invoice {id}");
        } else {
            info!("Saved new invoice {id}");
        }
        Ok(())
    }

    /// Removes the invoice with `id`. Returns whether anything was removed;
    /// an unknown id is not an error and does not touch the medium.
    pub fn delete(&mut self, id: &InvoiceId) -> Result<bool> {
        if self.load(id).is_none() {
            debug!("Delete of unknown invoice {id} ignored");
            return Ok(false);
        }

        let next: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|invoice| &invoice.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        info!("Deleted invoice {id}");
        Ok(true)
    }

    /// Number of saved invoices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    /// True when nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Outcome of reading the medium at startup.
    #[must_use]
    pub const fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying medium.
    #[must_use]
    pub const fn medium(&self) -> &M {
        &self.medium
    }

    /// False when the saved contents could not be read or backed up and every
    /// write is refused.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        !self.writes_blocked
    }

    fn commit(&mut self, next: Vec<Invoice>) -> Result<()> {
        if self.writes_blocked {
            error!("Refusing to overwrite unreadable invoices under `{}`", self.key);
            return Err(Error::Storage {
                key: self.key.clone(),
                message: "saved invoices could not be read or backed up; refusing to overwrite them"
                    .to_string(),
            });
        }

        let contents = format::encode(&next)?;
        self.medium
            .write(&self.key, contents.as_bytes())
            .inspect_err(|e| error!("Failed to write invoices to `{}`: {e}", self.key))?;
        self.invoices = next;
        Ok(())
    }
}

/// Decodes raw medium contents; the error is the reason reported to the user.
fn decode(raw: &[u8]) -> std::result::Result<Vec<Invoice>, String> {
    let contents =
        std::str::from_utf8(raw).map_err(|e| format!("contents are not UTF-8 text: {e}"))?;
    format::decode(contents).map_err(|e| e.to_string())
}

/// Keeps the first record for every id.
fn dedupe(invoices: Vec<Invoice>) -> Vec<Invoice> {
    let mut seen = HashSet::new();
    invoices
        .into_iter()
        .filter(|invoice| {
            let first = seen.insert(invoice.id.clone());
            if !first {
                warn!("Dropping duplicate saved invoice {}", invoice.id);
            }
            first
        })
        .collect()
}

/// Copies unreadable contents aside so the next save cannot destroy them.
fn back_up<M: StorageMedium>(medium: &mut M, key: &str, contents: &[u8]) -> Option<String> {
    let backup_key = format!("{key}.corrupt-{}", Utc::now().format("%Y%m%dT%H%M%S"));
    match medium.write(&backup_key, contents) {
        Ok(()) => {
            warn!("Copied corrupt invoices to `{backup_key}`");
            Some(backup_key)
        }
        Err(e) => {
            error!("Could not back up corrupt invoices: {e}");
            None
        }
    }
}
