//! Application session - the bill being edited plus the saved collection.
//!
//! Every edit goes through [`Session::on_update`], which applies the change and
//! recomputes totals before returning, so a later save always sees the totals
//! of the latest edit.

use super::calculation::{Totals, compute};
use super::snapshot::InvoiceSnapshot;
use super::update::{Update, apply};
use crate::entities::{Invoice, InvoiceDefaults, InvoiceId};
use crate::errors::Result;
use crate::storage::{InvoiceStore, StorageMedium};
use tracing::{debug, info};

/// The working state of the billing tool.
#[derive(Debug)]
pub struct Session<M> {
    store: InvoiceStore<M>,
    defaults: InvoiceDefaults,
    current: Invoice,
    totals: Totals,
}

impl<M: StorageMedium> Session<M> {
    /// Starts a session with a fresh bill using today's date.
    #[must_use]
    pub fn new(store: InvoiceStore<M>, defaults: InvoiceDefaults) -> Self {
        let current = Invoice::fresh(&defaults);
        Self::with_current(store, defaults, current)
    }

    /// Starts a session editing `current`.
    #[must_use]
    pub fn with_current(
        store: InvoiceStore<M>,
        defaults: InvoiceDefaults,
        current: Invoice,
    ) -> Self {
        let mut session = Self {
            store,
            defaults,
            current,
            totals: Totals::default(),
        };
        session.recompute();
        session
    }

    /// The bill being edited.
    #[must_use]
    pub const fn current(&self) -> &Invoice {
        &self.current
    }

    /// Totals of the bill being edited.
    #[must_use]
    pub const fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Read-only view of the bill for printing or export.
    #[must_use]
    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot::with_totals(&self.current, self.totals)
    }

    /// All saved bills.
    #[must_use]
    pub fn saved(&self) -> &[Invoice] {
        self.store.list()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &InvoiceStore<M> {
        &self.store
    }

    /// Discards the bill being edited and starts a blank one.
    pub fn new_bill(&mut self) {
        self.current = Invoice::fresh(&self.defaults);
        self.recompute();
        info!("Started new bill {}", self.current.id);
    }

    /// Applies an edit from the form and recomputes totals.
    ///
    /// Accepts a partial [`InvoicePatch`](super::update::InvoicePatch) or a whole
    /// replacement invoice. The returned totals already reflect the edit, so a
    /// following [`Self::save`] or [`Self::snapshot`] never sees stale figures.
    pub fn on_update(&mut self, update: impl Into<Update>) -> &Totals {
        self.current = apply(&self.current, update.into());
        self.recompute();
        &self.totals
    }

    /// Saves the bill being edited, replacing an earlier save of the same bill.
    pub fn save(&mut self) -> Result<()> {
        self.store.save(self.current.clone())
    }

    /// Switches to a saved bill. Returns `false`, leaving the current bill in
    /// place, when no bill has that id.
    pub fn open(&mut self, id: &InvoiceId) -> bool {
        let Some(invoice) = self.store.load(id).cloned() else {
            debug!("No saved bill {id} to open");
            return false;
        };
        self.current = invoice;
        self.recompute();
        true
    }

    /// Deletes a saved bill. Deleting the bill being edited starts a new one.
    pub fn delete(&mut self, id: &InvoiceId) -> Result<bool> {
        let removed = self.store.delete(id)?;
        if &self.current.id == id {
            self.new_bill();
        }
        Ok(removed)
    }

    // Records without payment fields never grow a `dueAmount`.
    fn recompute(&mut self) {
        self.totals = compute(&self.current);
        if self.current.payments_recorded() || self.current.due_amount.is_some() {
            self.current.due_amount = Some(self.totals.due_amount);
        }
    }
}
