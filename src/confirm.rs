//! Destructive actions are requested first and carried out only once the user confirms.

use crate::model::{Transaction, TransactionId};
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::Result;
use serde::Serialize;
use tracing::debug;

/// The delete that is waiting for the user's answer, if any.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub enum PendingDelete {
    #[default]
    Idle,
    Single(TransactionId),
    All,
}

/// What a confirmed delete did to the store.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Deleted {
    /// Confirmed while nothing was pending.
    Nothing,
    /// The transaction that was removed.
    One { transaction: Transaction },
    /// The pending id no longer matched a stored transaction.
    Missing { id: TransactionId },
    /// Everything was removed.
    All { count: usize },
}

/// Holds at most one pending delete. A new request replaces whatever was pending before.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct DeleteConfirmation {
    pending: PendingDelete,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &PendingDelete {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending == PendingDelete::Idle
    }

    pub fn request_remove(&mut self, id: TransactionId) {
        debug!("Delete of {id} awaiting confirmation");
        self.pending = PendingDelete::Single(id);
    }

    pub fn request_remove_all(&mut self) {
        debug!("Delete of all transactions awaiting confirmation");
        self.pending = PendingDelete::All;
    }

    /// Carries out the pending delete against `store` and returns to idle.
    pub fn confirm<S: KeyValueStore>(&mut self, store: &mut TransactionStore<S>) -> Result<Deleted> {
        match std::mem::take(&mut self.pending) {
            PendingDelete::Idle => Ok(Deleted::Nothing),
            PendingDelete::Single(id) => Ok(match store.remove(&id)? {
                Some(transaction) => Deleted::One { transaction },
                None => Deleted::Missing { id },
            }),
            PendingDelete::All => Ok(Deleted::All {
                count: store.remove_all()?,
            }),
        }
    }

    /// Drops the pending delete without touching the store.
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            debug!("Pending delete cancelled");
        }
        self.pending = PendingDelete::Idle;
    }
}
