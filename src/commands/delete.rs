//! Delete command handlers.

use crate::args::{DeleteAllArgs, DeleteArgs};
use crate::commands::{plural, Out};
use crate::confirm::{DeleteConfirmation, Deleted};
use crate::{Config, Result};

/// Deletes one transaction by ID once the user confirms.
///
/// `confirm` is asked the question and returns whether the user agreed; it is skipped when
/// `args.yes` is set. An unknown ID is reported without asking anything.
///
/// # Returns
///
/// On success, returns an `Out` describing what was deleted. A cancelled delete carries only a
/// message.
///
/// # Errors
///
/// - Returns an error if asking for confirmation fails.
/// - Returns an error if the transaction list cannot be written.
pub fn delete(
    config: &Config,
    args: DeleteArgs,
    confirm: impl FnOnce(&str) -> Result<bool>,
) -> Result<Out<Deleted>> {
    let mut store = config.open_store()?;
    let Some(txn) = store.get(&args.id) else {
        return Ok(format!("No transaction with ID: {}", args.id).into());
    };
    let question = format!(
        "Delete {} {} '{}' from {}?",
        txn.kind(),
        txn.amount().display_with(config.currency_symbol()),
        txn.description(),
        txn.date()
    );

    let mut confirmation = DeleteConfirmation::new();
    confirmation.request_remove(args.id);
    if !args.yes && !confirm(&question)? {
        confirmation.cancel();
        return Ok("Cancelled, nothing was deleted".into());
    }

    let deleted = confirmation.confirm(&mut store)?;
    let message = match &deleted {
        Deleted::One { transaction } => {
            format!("Deleted transaction with ID: {}", transaction.id())
        }
        Deleted::Missing { id } => format!("No transaction with ID: {id}"),
        Deleted::Nothing | Deleted::All { .. } => "Nothing was deleted".to_string(),
    };
    Ok(Out::new(message, deleted))
}

/// Deletes every transaction once the user confirms. The stored list is removed entirely.
///
/// `confirm` is skipped when `args.yes` is set, or when there is nothing to delete.
pub fn delete_all(
    config: &Config,
    args: DeleteAllArgs,
    confirm: impl FnOnce(&str) -> Result<bool>,
) -> Result<Out<Deleted>> {
    let mut store = config.open_store()?;
    let question = format!(
        "Delete all {}?",
        plural(store.len(), "transaction", "transactions")
    );

    let mut confirmation = DeleteConfirmation::new();
    confirmation.request_remove_all();
    if !args.yes && !store.is_empty() && !confirm(&question)? {
        confirmation.cancel();
        return Ok("Cancelled, nothing was deleted".into());
    }

    let deleted = confirmation.confirm(&mut store)?;
    let message = match &deleted {
        Deleted::All { count } => format!(
            "Deleted {}",
            plural(*count, "transaction", "transactions")
        ),
        _ => "Nothing was deleted".to_string(),
    };
    Ok(Out::new(message, deleted))
}
