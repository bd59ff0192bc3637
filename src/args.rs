//! These structs provide the CLI interface for the expenses CLI.

use crate::model::{Category, CategoryFilter, TransactionId, TransactionKind};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for tracking income and expenses.
///
/// Record transactions, edit and delete them, list them by category and see how your income and
/// expenses balance out. Everything is stored locally in the expenses home directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and its configuration file.
    ///
    /// This is the first command you should run. The directory is $HOME/expenses unless you pass
    /// --expenses-home or set EXPENSES_HOME.
    Init(InitArgs),
    /// Record a new transaction.
    Add(AddArgs),
    /// Change some or all fields of an existing transaction.
    Edit(EditArgs),
    /// Delete one transaction, after confirmation.
    Delete(DeleteArgs),
    /// Delete every transaction, after confirmation.
    DeleteAll(DeleteAllArgs),
    /// Show the transactions, optionally only those in one category, followed by the totals.
    List(ListArgs),
    /// Show total balance, total income and total expense.
    Summary,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where expenses data and configuration is held. Defaults to ~/expenses
    #[arg(long, env = "EXPENSES_HOME", default_value_t = default_expenses_home())]
    expenses_home: DisplayPath,
}

impl Common {
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn expenses_home(&self) -> &DisplayPath {
        &self.expenses_home
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct InitArgs {
    /// Seed an empty store with a few example transactions.
    #[arg(long)]
    pub with_samples: bool,
}

/// Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// What the transaction was for.
    #[arg(long)]
    pub description: String,

    /// How much, e.g. 50 or 1,250.00. Must be greater than zero, with at most 15 significant digits.
    #[arg(long)]
    pub amount: String,

    /// Whether this is income or an expense.
    #[arg(long = "type", value_enum, default_value_t = TransactionKind::Income)]
    pub kind: TransactionKind,

    #[arg(long, value_enum, default_value_t = Category::Food)]
    pub category: Category,

    /// The date in YYYY-MM-DD format. Defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

/// Args for the `expenses edit` command. Fields that are not given keep their current values.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The ID of the transaction to edit, as shown by `expenses list`.
    pub id: TransactionId,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub amount: Option<String>,

    #[arg(long = "type", value_enum)]
    pub kind: Option<TransactionKind>,

    #[arg(long, value_enum)]
    pub category: Option<Category>,

    /// The date in YYYY-MM-DD format.
    #[arg(long)]
    pub date: Option<String>,
}

/// Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the transaction to delete.
    pub id: TransactionId,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    pub yes: bool,
}

/// Args for the `expenses delete-all` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct DeleteAllArgs {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    pub yes: bool,
}

/// Args for the `expenses list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only show one category: all, food, rent, transport, entertainment or salary.
    #[arg(long, default_value_t = CategoryFilter::All)]
    pub category: CategoryFilter,
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --expenses-home or EXPENSES_HOME instead of relying on the \
                default expenses home directory.",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
