use crate::model::{Amount, Transaction, TransactionKind};
use serde::Serialize;

/// Aggregate figures over a set of transactions.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Totals {
    /// Sum of all income amounts.
    pub income: Amount,
    /// Sum of all expense amounts.
    pub expense: Amount,
    /// The absolute difference between `income` and `expense`.
    pub balance: Amount,
}

impl Totals {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (mut income, mut expense) = (Amount::ZERO, Amount::ZERO);
        for txn in transactions {
            match txn.kind() {
                TransactionKind::Income => income = income + txn.amount(),
                TransactionKind::Expense => expense = expense + txn.amount(),
            }
        }
        Self {
            income,
            expense,
            balance: income.abs_diff(expense),
        }
    }

    /// True when expenses exceed income, which `balance` alone does not reveal.
    pub fn is_overspent(&self) -> bool {
        self.expense > self.income
    }
}
