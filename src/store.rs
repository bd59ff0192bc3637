//! The transaction store: the list of transactions and its persistence round-trip.

use crate::model::{
    CategoryFilter, NewTransaction, Totals, Transaction, TransactionId, TransactionUpdates,
};
use crate::storage::KeyValueStore;
use crate::Result;
use anyhow::Context;
use tracing::{debug, warn};

/// The key the transaction list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Owns the list of transactions, newest first, and rewrites it to storage after every mutation.
///
/// Persistence failures are returned to the caller. The in-memory list keeps the mutation either
/// way, so the next successful write catches storage up.
#[derive(Debug)]
pub struct TransactionStore<S: KeyValueStore> {
    storage: S,
    key: String,
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Loads the list stored under `DEFAULT_STORAGE_KEY`.
    pub fn load(storage: S) -> Self {
        Self::load_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Loads the list stored under `key`. This never fails: a missing key gives an empty list, as
    /// does unreadable or malformed data, which is logged and otherwise ignored.
    pub fn load_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let transactions = match storage.get(&key) {
            Ok(Some(json)) => match parse_list(&json) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Ignoring malformed data stored under '{key}': {e:#}");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("Nothing stored under '{key}', starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!("Unable to read '{key}' from storage, starting empty: {e:#}");
                Vec::new()
            }
        };
        debug!("Loaded {} transactions", transactions.len());
        Self {
            storage,
            key,
            transactions,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stores a new transaction at the front of the list under a freshly generated id.
    pub fn add(&mut self, fields: NewTransaction) -> Result<&Transaction> {
        let mut txn = Transaction::create(fields);
        // Ids are random, but the uniqueness invariant must hold regardless.
        while self.get(txn.id()).is_some() {
            txn = Transaction::with_id(TransactionId::generate(), strip_id(&txn));
        }
        debug!("Adding transaction {}", txn.id());
        self.transactions.insert(0, txn);
        self.save()?;
        Ok(&self.transactions[0])
    }

    /// Replaces the transaction with `id` by the result of merging `updates` into it. Returns the
    /// new value, or `None` if no transaction has that id, in which case nothing is written.
    pub fn update(
        &mut self,
        id: &TransactionId,
        updates: &TransactionUpdates,
    ) -> Result<Option<Transaction>> {
        let Some(ix) = self.position(id) else {
            debug!("Update ignored, no transaction with id {id}");
            return Ok(None);
        };
        let updated = self.transactions[ix].merge(updates);
        self.transactions[ix] = updated.clone();
        self.save()?;
        Ok(Some(updated))
    }

    /// Removes the transaction with `id` and returns it, or `None` if there is no such
    /// transaction, in which case nothing is written.
    pub fn remove(&mut self, id: &TransactionId) -> Result<Option<Transaction>> {
        let Some(ix) = self.position(id) else {
            debug!("Remove ignored, no transaction with id {id}");
            return Ok(None);
        };
        let removed = self.transactions.remove(ix);
        self.save()?;
        Ok(Some(removed))
    }

    /// Clears the list and deletes the stored entry rather than writing an empty list. Returns how
    /// many transactions were removed.
    pub fn remove_all(&mut self) -> Result<usize> {
        let count = self.transactions.len();
        self.transactions.clear();
        self.storage
            .remove(&self.key)
            .with_context(|| format!("Unable to remove '{}' from storage", self.key))?;
        Ok(count)
    }

    /// The transactions matching `filter`, in stored order.
    pub fn filtered_by(&self, filter: CategoryFilter) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(move |t| filter.matches(t.category()))
    }

    /// Income, expense and balance over every stored transaction.
    pub fn totals(&self) -> Totals {
        Totals::from_transactions(&self.transactions)
    }

    fn position(&self, id: &TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id() == id)
    }

    fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.transactions)
            .context("Unable to serialize transactions")?;
        self.storage
            .set(&self.key, &json)
            .with_context(|| format!("Unable to write '{}' to storage", self.key))
    }
}

fn parse_list(json: &str) -> Result<Vec<Transaction>> {
    let list: Vec<Transaction> = serde_json::from_str(json).context("Invalid transaction list")?;
    let mut seen = std::collections::HashSet::new();
    for txn in &list {
        anyhow::ensure!(seen.insert(txn.id()), "Duplicate transaction id {}", txn.id());
    }
    Ok(list)
}

fn strip_id(txn: &Transaction) -> NewTransaction {
    NewTransaction {
        description: txn.description().to_string(),
        amount: txn.amount(),
        kind: txn.kind(),
        category: txn.category(),
        date: txn.date(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category, TransactionKind};
    use crate::storage::MemoryStore;
    use crate::test::new_transaction;
    use std::str::FromStr;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn empty_store() -> TransactionStore<MemoryStore> {
        TransactionStore::load(MemoryStore::new())
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = empty_store();
        assert!(store.is_empty());
        assert_eq!(store.totals(), Totals::default());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let mut storage = MemoryStore::new();
        storage.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let store = TransactionStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let mut storage = MemoryStore::new();
        storage
            .set(DEFAULT_STORAGE_KEY, r#"[{"id":1,"amount":"lots"}]"#)
            .unwrap();
        assert!(TransactionStore::load(storage).is_empty());
    }

    #[test]
    fn test_load_duplicate_ids_is_empty() {
        let mut storage = MemoryStore::new();
        let json = r#"[
            {"id":1,"description":"a","amount":1,"type":"income","category":"salary","date":"2026-01-10"},
            {"id":1,"description":"b","amount":2,"type":"expense","category":"food","date":"2026-01-11"}
        ]"#;
        storage.set(DEFAULT_STORAGE_KEY, json).unwrap();
        assert!(TransactionStore::load(storage).is_empty());
    }

    #[test]
    fn test_load_integer_ids() {
        let mut storage = MemoryStore::new();
        let json = r#"[
            {"id":1,"description":"groceries","amount":50,"type":"expense","category":"food","date":"2026-01-09"},
            {"id":2,"description":"money","amount":2000,"type":"income","category":"salary","date":"2026-01-10"}
        ]"#;
        storage.set(DEFAULT_STORAGE_KEY, json).unwrap();
        let store = TransactionStore::load(storage);
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].description(), "groceries");
        assert_eq!(store.totals().balance, amount("1950"));
    }

    #[test]
    fn test_add_groceries_totals() {
        let mut store = empty_store();
        store
            .add(new_transaction(
                "groceries",
                "50",
                TransactionKind::Expense,
                Category::Food,
                "2026-01-09",
            ))
            .unwrap();
        let totals = store.totals();
        assert_eq!(totals.income, Amount::ZERO);
        assert_eq!(totals.expense, amount("50"));
        assert_eq!(totals.balance, amount("50"));
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let mut store = empty_store();
        let first = store
            .add(new_transaction(
                "money",
                "2000",
                TransactionKind::Income,
                Category::Salary,
                "2026-01-10",
            ))
            .unwrap()
            .id()
            .clone();
        let second = store
            .add(new_transaction(
                "groceries",
                "50",
                TransactionKind::Expense,
                Category::Food,
                "2026-01-09",
            ))
            .unwrap()
            .id()
            .clone();
        assert_ne!(first, second);
        assert_eq!(store.transactions()[0].id(), &second);
        assert_eq!(store.transactions()[1].id(), &first);

        let json = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let persisted: Vec<Transaction> = serde_json::from_str(&json).unwrap();
        assert_eq!(persisted, store.transactions());
    }

    #[test]
    fn test_persisted_list_reloads_identically() {
        let mut store = empty_store();
        for (desc, amt) in [("a", "1.10"), ("b", "2000"), ("c", "0.01")] {
            store
                .add(new_transaction(
                    desc,
                    amt,
                    TransactionKind::Expense,
                    Category::Transport,
                    "2026-02-01",
                ))
                .unwrap();
        }
        let before = store.transactions().to_vec();
        let reloaded = TransactionStore::load(store.storage().clone());
        assert_eq!(reloaded.transactions(), before.as_slice());
    }

    #[test]
    fn test_precise_and_large_amounts_reload_identically() {
        let mut store = empty_store();
        for (desc, amt, kind) in [
            ("rent", "900", TransactionKind::Expense),
            ("bonus", "999999999999999", TransactionKind::Income),
            ("fees", "1234567890.12345", TransactionKind::Expense),
            ("interest", "0.000000000000001", TransactionKind::Income),
        ] {
            store
                .add(new_transaction(desc, amt, kind, Category::Rent, "2026-02-01"))
                .unwrap();
        }
        let before = store.transactions().to_vec();
        let reloaded = TransactionStore::load(store.storage().clone());
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.transactions(), before.as_slice());
        assert_eq!(reloaded.totals(), store.totals());
    }

    #[test]
    fn test_totals_over_largest_amounts() {
        let mut store = empty_store();
        for desc in ["a", "b", "c"] {
            store
                .add(new_transaction(
                    desc,
                    "999999999999999",
                    TransactionKind::Income,
                    Category::Salary,
                    "2026-02-01",
                ))
                .unwrap();
        }
        let totals = store.totals();
        let expected = rust_decimal::Decimal::from(2_999_999_999_999_997_i64);
        assert_eq!(totals.income.value(), expected);
        assert_eq!(totals.balance.value(), expected);
        assert!(totals.expense.is_zero());
    }

    #[test]
    fn test_update_amount() {
        let mut store = empty_store();
        let id = store
            .add(new_transaction(
                "groceries",
                "50",
                TransactionKind::Expense,
                Category::Food,
                "2026-01-09",
            ))
            .unwrap()
            .id()
            .clone();
        let updates = TransactionUpdates {
            amount: Some(amount("75")),
            ..Default::default()
        };
        let updated = store.update(&id, &updates).unwrap().unwrap();
        assert_eq!(updated.amount(), amount("75"));
        assert_eq!(store.totals().expense, amount("75"));
        assert_eq!(store.totals().balance, amount("75"));
        assert_eq!(store.len(), 1);

        let reloaded = TransactionStore::load(store.storage().clone());
        assert_eq!(reloaded.get(&id).unwrap().amount(), amount("75"));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = empty_store();
        let updates = TransactionUpdates {
            description: Some("x".to_string()),
            ..Default::default()
        };
        let result = store.update(&TransactionId::from("nope"), &updates).unwrap();
        assert!(result.is_none());
        assert!(store.is_empty());
        // Nothing was written either.
        assert!(!store.storage().contains_key(DEFAULT_STORAGE_KEY));
    }

    #[test]
    fn test_remove() {
        let mut store = empty_store();
        let income = store
            .add(new_transaction(
                "money",
                "2000",
                TransactionKind::Income,
                Category::Salary,
                "2026-01-10",
            ))
            .unwrap()
            .id()
            .clone();
        store
            .add(new_transaction(
                "groceries",
                "50",
                TransactionKind::Expense,
                Category::Food,
                "2026-01-09",
            ))
            .unwrap();
        assert_eq!(store.totals().balance, amount("1950"));

        let removed = store.remove(&income).unwrap().unwrap();
        assert_eq!(removed.id(), &income);
        assert_eq!(store.totals().income, Amount::ZERO);
        assert_eq!(store.totals().balance, amount("50"));
        assert!(store.remove(&income).unwrap().is_none());
    }

    #[test]
    fn test_remove_all_twice() {
        let mut store = empty_store();
        store
            .add(new_transaction(
                "groceries",
                "50",
                TransactionKind::Expense,
                Category::Food,
                "2026-01-09",
            ))
            .unwrap();
        assert!(store.storage().contains_key(DEFAULT_STORAGE_KEY));

        assert_eq!(store.remove_all().unwrap(), 1);
        assert!(store.is_empty());
        assert!(!store.storage().contains_key(DEFAULT_STORAGE_KEY));

        assert_eq!(store.remove_all().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_filtered_by() {
        let mut store = empty_store();
        let rows = [
            ("groceries", Category::Food),
            ("bus", Category::Transport),
            ("lunch", Category::Food),
            ("cinema", Category::Entertainment),
        ];
        for (desc, category) in rows {
            store
                .add(new_transaction(
                    desc,
                    "10",
                    TransactionKind::Expense,
                    category,
                    "2026-03-01",
                ))
                .unwrap();
        }

        let food: Vec<&str> = store
            .filtered_by(CategoryFilter::Only(Category::Food))
            .map(|t| t.description())
            .collect();
        assert_eq!(food, vec!["lunch", "groceries"]);

        assert_eq!(store.filtered_by(Category::Rent.into()).count(), 0);

        let all: Vec<&Transaction> = store.filtered_by(CategoryFilter::All).collect();
        let expected: Vec<&Transaction> = store.transactions().iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_custom_key() {
        let mut store = TransactionStore::load_key(MemoryStore::new(), "budget");
        store
            .add(new_transaction(
                "rent",
                "900",
                TransactionKind::Expense,
                Category::Rent,
                "2026-01-01",
            ))
            .unwrap();
        assert!(store.storage().contains_key("budget"));
        assert!(!store.storage().contains_key(DEFAULT_STORAGE_KEY));
    }
}
