use crate::model::{Amount, Category};
use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// The unique identifier of a stored transaction.
///
/// New ids are UUID v4 strings. Lists written by older versions of the app used small integers,
/// so deserialization also accepts a JSON integer and keeps it as its decimal string.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh, never-before-used id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TransactionIdVisitor)
    }
}

struct TransactionIdVisitor;

impl Visitor<'_> for TransactionIdVisitor {
    type Value = TransactionId;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer transaction id")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(TransactionId(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.is_empty() {
            return Err(E::custom("transaction id cannot be empty"));
        }
        Ok(TransactionId(v.to_string()))
    }
}

/// Whether a transaction brings money in or sends it out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

/// A single income or expense record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    description: String,
    amount: Amount,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: Category,
    date: NaiveDate,
}

impl Transaction {
    /// Assigns a fresh id to `fields`, producing a transaction ready to be stored.
    pub fn create(fields: NewTransaction) -> Self {
        Self::with_id(TransactionId::generate(), fields)
    }

    pub fn with_id(id: TransactionId, fields: NewTransaction) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
            kind: fields.kind,
            category: fields.category,
            date: fields.date,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Applies `updates` and returns the resulting transaction. The id never changes and fields
    /// left as `None` keep their current values.
    pub fn merge(&self, updates: &TransactionUpdates) -> Transaction {
        Transaction {
            id: self.id.clone(),
            description: updates
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            amount: updates.amount.unwrap_or(self.amount),
            kind: updates.kind.unwrap_or(self.kind),
            category: updates.category.unwrap_or(self.category),
            date: updates.date.unwrap_or(self.date),
        }
    }
}

/// The fields of a transaction that has not been stored yet, and therefore has no id.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Amount,
    pub kind: TransactionKind,
    pub category: Category,
    pub date: NaiveDate,
}

/// The fields an edit may change. `None` means "leave as is".
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TransactionUpdates {
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl TransactionUpdates {
    pub fn is_empty(&self) -> bool {
        self == &TransactionUpdates::default()
    }
}

impl From<NewTransaction> for TransactionUpdates {
    fn from(fields: NewTransaction) -> Self {
        Self {
            description: Some(fields.description),
            amount: Some(fields.amount),
            kind: Some(fields.kind),
            category: Some(fields.category),
            date: Some(fields.date),
        }
    }
}
