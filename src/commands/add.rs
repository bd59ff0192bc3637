//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::session::{EditSession, Submitted};
use crate::{Config, Result};
use anyhow::bail;
use chrono::Local;

/// Records a new transaction at the top of the list.
///
/// The arguments are entered into a fresh form exactly as typed and submitted; the form decides
/// whether they are complete. When `date` is not given, today's date is used.
///
/// # Returns
///
/// On success, returns an `Out` containing the stored transaction, including its generated ID.
///
/// # Errors
///
/// - Returns an error if a required field is missing or does not parse.
/// - Returns an error if the transaction list cannot be written.
pub fn add(config: &Config, args: AddArgs) -> Result<Out<Transaction>> {
    let mut store = config.open_store()?;
    let mut session = EditSession::new();
    session.open();

    let draft = session.draft_mut();
    draft.description = args.description;
    draft.amount = args.amount;
    draft.kind = args.kind;
    draft.category = args.category;
    draft.date = args
        .date
        .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());

    match session.submit(&mut store)? {
        Submitted::Created(txn) => {
            let message = format!(
                "Added {} {} '{}' with ID: {}",
                txn.kind(),
                txn.amount().display_with(config.currency_symbol()),
                txn.description(),
                txn.id()
            );
            Ok(Out::new(message, txn))
        }
        Submitted::Rejected(e) => bail!("Transaction not added: {e}"),
        other => bail!("Unexpected result when adding a transaction: {other:?}"),
    }
}
