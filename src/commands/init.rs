use crate::commands::{plural, Out};
use crate::model::{Amount, Category, NewTransaction, TransactionKind};
use crate::{Config, Result};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Creates the data directory, its store directory and an initial `config.json`.
///
/// With `with_samples`, an empty store is seeded with a handful of example transactions. A store
/// that already holds transactions is never touched.
///
/// # Returns
///
/// On success, returns an `Out` whose structure is the number of sample transactions added.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub fn init(home: &Path, with_samples: bool) -> Result<Out<usize>> {
    let config = Config::create(home).context("Unable to create the data directory and config")?;
    let mut message = format!(
        "Expenses home is ready at {}",
        config.root().to_string_lossy()
    );

    let mut seeded = 0;
    if with_samples {
        let mut store = config.open_store()?;
        if store.is_empty() {
            // Adding prepends, so go in reverse to list the samples in the order written here.
            for sample in samples()?.into_iter().rev() {
                let txn = store.add(sample)?;
                debug!("Seeded sample transaction {}", txn.id());
                seeded += 1;
            }
            message.push_str(&format!(
                ", added {}",
                plural(seeded, "sample transaction", "sample transactions")
            ));
        } else {
            message.push_str(", the store already has transactions so no samples were added");
        }
    }

    Ok(Out::new(message, seeded))
}

fn samples() -> Result<Vec<NewTransaction>> {
    let rows = [
        (
            "groceries",
            "50",
            TransactionKind::Expense,
            Category::Food,
            "2026-01-09",
        ),
        (
            "money",
            "2000",
            TransactionKind::Income,
            Category::Salary,
            "2026-01-10",
        ),
        (
            "play football",
            "50",
            TransactionKind::Expense,
            Category::Entertainment,
            "2026-01-12",
        ),
    ];
    rows.into_iter()
        .map(|(description, amount, kind, category, date)| -> Result<NewTransaction> {
            Ok(NewTransaction {
                description: description.to_string(),
                amount: Amount::from_str(amount)?,
                kind,
                category,
                date: NaiveDate::from_str(date)?,
            })
        })
        .collect()
}
