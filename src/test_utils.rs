//! Shared test utilities for `BillEase`.
//!
//! Fixtures for invoices with sensible defaults plus storage media that fail
//! on demand.

use crate::entities::{Invoice, InvoiceDefaults, InvoiceItem, ItemId};
use crate::errors::{Error, Result};
use crate::storage::{InvoiceStore, MemoryMedium, StorageMedium};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Date every fixture invoice carries.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

/// An invoice for "Ravi Traders": 2 × 100 with CGST 9 and SGST 9, no payments.
#[must_use]
pub fn sample_invoice() -> Invoice {
    let mut invoice = invoice_with_lines(&[(Some(Decimal::from(2)), Some(Decimal::ONE_HUNDRED))]);
    invoice.customer_name = "Ravi Traders".to_string();
    invoice
}

/// An invoice with one line per `(quantity, rate)` pair and default tax rates.
#[must_use]
pub fn invoice_with_lines(lines: &[(Option<Decimal>, Option<Decimal>)]) -> Invoice {
    let mut invoice = Invoice::new(&InvoiceDefaults::default(), fixture_date());
    invoice.items = lines
        .iter()
        .map(|&(quantity, rate)| InvoiceItem {
            id: ItemId::generate(),
            description: None,
            quantity,
            rate,
        })
        .collect();
    invoice
}

/// A store over an empty in-memory medium.
#[must_use]
pub fn memory_store() -> InvoiceStore<MemoryMedium> {
    InvoiceStore::open(MemoryMedium::new(), "invoices")
}

/// A medium that refuses reads, writes, or both.
#[derive(Debug, Default)]
pub struct FailingMedium {
    entries: HashMap<String, Vec<u8>>,
    fail_reads: bool,
    writable_keys: Vec<String>,
}

impl FailingMedium {
    /// Every read fails.
    #[must_use]
    pub fn unreadable() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Reads see nothing; every write fails.
    #[must_use]
    pub fn read_only() -> Self {
        Self::default()
    }

    /// Reads see `contents` under `key`; every write fails.
    #[must_use]
    pub fn read_only_with(key: &str, contents: impl AsRef<[u8]>) -> Self {
        let mut medium = Self::default();
        medium
            .entries
            .insert(key.to_string(), contents.as_ref().to_vec());
        medium
    }

    /// Lets writes to `key` through even when the medium otherwise fails.
    #[must_use]
    pub fn allowing_writes_to(mut self, key: &str) -> Self {
        self.writable_keys.push(key.to_string());
        self
    }

    /// Contents under `key`, including any write that was let through.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl StorageMedium for FailingMedium {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "medium is unreadable",
            )));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &[u8]) -> Result<()> {
        if self.writable_keys.iter().any(|writable| writable == key) {
            self.entries.insert(key.to_string(), contents.to_vec());
            return Ok(());
        }
        Err(Error::Storage {
            key: key.to_string(),
            message: "quota exceeded".to_string(),
        })
    }
}
