//! Edit command handler.

use crate::args::EditArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::session::{EditSession, Submitted};
use crate::{Config, Result};
use anyhow::bail;

/// Changes an existing transaction.
///
/// The form is preloaded from the stored transaction, the given fields overwrite their draft
/// values, and the draft is submitted. The transaction keeps its ID and its place in the list.
///
/// # Returns
///
/// On success, returns an `Out` containing the updated transaction. If no transaction has the
/// given ID, the `Out` carries only a message and nothing is changed.
///
/// # Errors
///
/// - Returns an error if a given field does not parse.
/// - Returns an error if the transaction list cannot be written.
pub fn edit(config: &Config, args: EditArgs) -> Result<Out<Transaction>> {
    let mut store = config.open_store()?;
    let Some(current) = store.get(&args.id) else {
        return Ok(format!("No transaction with ID: {}", args.id).into());
    };

    let mut session = EditSession::new();
    session.begin_edit(current);

    let draft = session.draft_mut();
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(amount) = args.amount {
        draft.amount = amount;
    }
    if let Some(kind) = args.kind {
        draft.kind = kind;
    }
    if let Some(category) = args.category {
        draft.category = category;
    }
    if let Some(date) = args.date {
        draft.date = date;
    }

    match session.submit(&mut store)? {
        Submitted::Updated(txn) => {
            let message = format!("Updated transaction with ID: {}", txn.id());
            Ok(Out::new(message, txn))
        }
        Submitted::Missing(id) => Ok(format!("No transaction with ID: {id}").into()),
        Submitted::Rejected(e) => bail!("Transaction not updated: {e}"),
        Submitted::Created(txn) => {
            bail!("Unexpected result, a new transaction was created: {}", txn.id())
        }
    }
}
