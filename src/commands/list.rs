//! List and summary command handlers.

use crate::args::ListArgs;
use crate::commands::{plural, Out};
use crate::model::{Amount, Totals, Transaction};
use crate::{Config, Result};
use serde::Serialize;

const HEADERS: [&str; 6] = ["Description", "Amount", "Type", "Category", "Date", "ID"];

/// The transactions a listing showed, along with the totals over the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
}

/// Shows the stored transactions, newest first, as a table followed by the summary. With a
/// category filter only matching transactions are shown; the summary always covers everything.
pub fn list(config: &Config, args: ListArgs) -> Result<Out<Listing>> {
    let store = config.open_store()?;
    let symbol = config.currency_symbol();
    let transactions: Vec<Transaction> = store.filtered_by(args.category).cloned().collect();
    let totals = store.totals();

    let mut message = if transactions.is_empty() {
        format!("No transactions to show (category: {})", args.category)
    } else {
        format!(
            "{} (category: {})\n\n{}",
            plural(transactions.len(), "transaction", "transactions"),
            args.category,
            table(&transactions, symbol)
        )
    };
    message.push_str("\n\n");
    message.push_str(&render_totals(&totals, symbol));

    Ok(Out::new(
        message,
        Listing {
            transactions,
            totals,
        },
    ))
}

/// Shows total balance, total income and total expense.
pub fn summary(config: &Config) -> Result<Out<Totals>> {
    let store = config.open_store()?;
    let totals = store.totals();
    Ok(Out::new(
        render_totals(&totals, config.currency_symbol()),
        totals,
    ))
}

fn render_totals(totals: &Totals, symbol: &str) -> String {
    let money = |a: Amount| a.display_with(symbol);
    let balance = if totals.is_overspent() {
        format!("{} (overspent)", money(totals.balance))
    } else {
        money(totals.balance)
    };
    format!(
        "Total balance: {balance}\nTotal income: {}\nTotal expense: {}",
        money(totals.income),
        money(totals.expense)
    )
}

/// Renders `transactions` as a Markdown table.
fn table(transactions: &[Transaction], symbol: &str) -> String {
    let rows: Vec<[String; 6]> = transactions
        .iter()
        .map(|t| {
            [
                t.description().to_string(),
                t.amount().display_with(symbol),
                t.kind().to_string(),
                t.category().to_string(),
                t.date().to_string(),
                t.id().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{cell:<w$}", w = *width))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = vec![line(&header), line(&separator)];
    lines.extend(rows.iter().map(|row| line(row)));
    lines.join("\n")
}
