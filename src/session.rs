//! The add/edit form: a draft of a transaction's fields, and which stored transaction (if any) the
//! draft will replace when submitted.

use crate::model::{
    Amount, AmountError, Category, NewTransaction, Transaction, TransactionId, TransactionKind,
};
use crate::storage::KeyValueStore;
use crate::store::TransactionStore;
use crate::Result;
use chrono::NaiveDate;
use std::str::FromStr;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// In-progress field values, as typed by the user.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Draft {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: String,
}

impl Draft {
    /// A draft holding the current values of `txn`.
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            description: txn.description().to_string(),
            amount: txn.amount().value().to_string(),
            kind: txn.kind(),
            category: txn.category(),
            date: txn.date().format(DATE_FORMAT).to_string(),
        }
    }

    /// Checks that every required field is present and parses, yielding the transaction fields.
    pub fn validate(&self) -> std::result::Result<NewTransaction, DraftError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DraftError::MissingDescription);
        }

        let amount = match Amount::from_str(&self.amount) {
            Ok(a) if a.is_zero() => return Err(DraftError::MissingAmount),
            Ok(a) => a,
            Err(AmountError::Empty) => return Err(DraftError::MissingAmount),
            Err(e) => return Err(DraftError::InvalidAmount(e)),
        };

        let date = self.date.trim();
        if date.is_empty() {
            return Err(DraftError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| DraftError::InvalidDate(date.to_string()))?;

        Ok(NewTransaction {
            description: description.to_string(),
            amount,
            kind: self.kind,
            category: self.category,
            date,
        })
    }
}

/// Why a draft was not accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("a description is required")]
    MissingDescription,
    #[error("an amount greater than zero is required")]
    MissingAmount,
    #[error(transparent)]
    InvalidAmount(AmountError),
    #[error("a date is required")]
    MissingDate,
    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// The result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    /// The draft was incomplete. Nothing changed and the form is still open.
    Rejected(DraftError),
    /// A new transaction was stored.
    Created(Transaction),
    /// The selected transaction was replaced.
    Updated(Transaction),
    /// The selected transaction was removed while the form was open. Nothing changed.
    Missing(TransactionId),
}

/// The state of the add/edit form.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct EditSession {
    open: bool,
    selected: Option<TransactionId>,
    draft: Draft,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The transaction being edited, or `None` when the form creates a new one.
    pub fn selected(&self) -> Option<&TransactionId> {
        self.selected.as_ref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Opens an empty form for a new transaction.
    pub fn open(&mut self) {
        self.selected = None;
        self.draft = Draft::default();
        self.open = true;
    }

    /// Opens the form preloaded with `txn`, so that submitting replaces it.
    pub fn begin_edit(&mut self, txn: &Transaction) {
        debug!("Editing transaction {}", txn.id());
        self.selected = Some(txn.id().clone());
        self.draft = Draft::from_transaction(txn);
        self.open = true;
    }

    /// Discards the draft and closes the form.
    pub fn close(&mut self) {
        self.selected = None;
        self.draft = Draft::default();
        self.open = false;
    }

    /// Validates the draft and either creates a transaction or updates the selected one. On
    /// success the form is cleared and closed; a rejected draft leaves everything as it was.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut TransactionStore<S>) -> Result<Submitted> {
        let fields = match self.draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                debug!("Draft rejected: {e}");
                return Ok(Submitted::Rejected(e));
            }
        };

        let submitted = match self.selected.as_ref() {
            None => Submitted::Created(store.add(fields)?.clone()),
            Some(id) => match store.update(id, &fields.into())? {
                Some(txn) => Submitted::Updated(txn),
                None => Submitted::Missing(id.clone()),
            },
        };
        self.close();
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn filled_draft() -> Draft {
        Draft {
            description: "groceries".to_string(),
            amount: "50".to_string(),
            kind: TransactionKind::Expense,
            category: Category::Food,
            date: "2026-01-09".to_string(),
        }
    }

    fn store() -> TransactionStore<MemoryStore> {
        TransactionStore::load(MemoryStore::new())
    }

    #[test]
    fn test_defaults_match_first_options() {
        let draft = Draft::default();
        assert_eq!(draft.kind, TransactionKind::Income);
        assert_eq!(draft.category, Category::Food);
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut draft = filled_draft();
        draft.description = "   ".to_string();
        assert_eq!(draft.validate().unwrap_err(), DraftError::MissingDescription);

        let mut draft = filled_draft();
        draft.amount = String::new();
        assert_eq!(draft.validate().unwrap_err(), DraftError::MissingAmount);

        let mut draft = filled_draft();
        draft.amount = "0".to_string();
        assert_eq!(draft.validate().unwrap_err(), DraftError::MissingAmount);

        let mut draft = filled_draft();
        draft.amount = "-4".to_string();
        assert!(matches!(
            draft.validate().unwrap_err(),
            DraftError::InvalidAmount(AmountError::Negative(_))
        ));

        let mut draft = filled_draft();
        draft.amount = "50000000000000000000000000000".to_string();
        assert!(matches!(
            draft.validate().unwrap_err(),
            DraftError::InvalidAmount(AmountError::TooPrecise(_))
        ));

        let mut draft = filled_draft();
        draft.date = String::new();
        assert_eq!(draft.validate().unwrap_err(), DraftError::MissingDate);

        let mut draft = filled_draft();
        draft.date = "09/01/2026".to_string();
        assert!(matches!(
            draft.validate().unwrap_err(),
            DraftError::InvalidDate(_)
        ));
    }

    #[test]
    fn test_rejected_submit_keeps_form_open() {
        let mut store = store();
        let mut session = EditSession::new();
        session.open();
        session.draft_mut().description = "groceries".to_string();

        let out = session.submit(&mut store).unwrap();
        assert!(matches!(out, Submitted::Rejected(DraftError::MissingAmount)));
        assert!(session.is_open());
        assert_eq!(session.draft().description, "groceries");
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_creates_and_closes() {
        let mut store = store();
        let mut session = EditSession::new();
        session.open();
        *session.draft_mut() = filled_draft();

        let out = session.submit(&mut store).unwrap();
        let Submitted::Created(txn) = out else {
            panic!("expected a created transaction, got {out:?}");
        };
        assert_eq!(txn.description(), "groceries");
        assert_eq!(store.len(), 1);
        assert!(!session.is_open());
        assert_eq!(session.draft(), &Draft::default());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_edit_preloads_and_updates() {
        let mut store = store();
        let mut session = EditSession::new();
        session.open();
        *session.draft_mut() = filled_draft();
        session.submit(&mut store).unwrap();
        let stored = store.transactions()[0].clone();

        session.begin_edit(&stored);
        assert!(session.is_open());
        assert_eq!(session.selected(), Some(stored.id()));
        assert_eq!(session.draft(), &filled_draft());

        session.draft_mut().amount = "75".to_string();
        let out = session.submit(&mut store).unwrap();
        let Submitted::Updated(txn) = out else {
            panic!("expected an updated transaction, got {out:?}");
        };
        assert_eq!(txn.id(), stored.id());
        assert_eq!(store.len(), 1);
        assert_eq!(store.totals().expense, Amount::from_str("75").unwrap());
        assert!(!session.is_open());
    }

    #[test]
    fn test_edit_of_removed_transaction() {
        let mut store = store();
        let mut session = EditSession::new();
        session.open();
        *session.draft_mut() = filled_draft();
        session.submit(&mut store).unwrap();
        let stored = store.transactions()[0].clone();

        session.begin_edit(&stored);
        store.remove(stored.id()).unwrap();
        let out = session.submit(&mut store).unwrap();
        assert_eq!(out, Submitted::Missing(stored.id().clone()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_close_discards_draft() {
        let mut session = EditSession::new();
        session.open();
        session.draft_mut().description = "half typed".to_string();
        session.close();
        assert!(!session.is_open());
        assert_eq!(session.draft(), &Draft::default());
    }
}
