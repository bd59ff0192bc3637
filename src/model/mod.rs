//! Types that represent the core data model, such as `Transaction` and `Category`.
mod amount;
mod category;
mod totals;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{Category, CategoryFilter, CategoryFilterError};
pub use totals::Totals;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionKind, TransactionUpdates,
};
