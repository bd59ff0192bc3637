use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The closed set of categories a transaction can be filed under.
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
pub enum Category {
    #[default]
    Food,
    Rent,
    Transport,
    Entertainment,
    Salary,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    /// Every category, in the order they are offered to the user.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Rent,
        Category::Transport,
        Category::Entertainment,
        Category::Salary,
    ];
}

/// Selects which transactions a listing shows: everything, or one category.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        CategoryFilter::Only(value)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown category filter '{0}', expected 'all' or one of: food, rent, transport, entertainment, salary")]
pub struct CategoryFilterError(String);

impl FromStr for CategoryFilter {
    type Err = CategoryFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Category::from_str(&s.to_ascii_lowercase())
            .map(CategoryFilter::Only)
            .map_err(|_| CategoryFilterError(s.to_string()))
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => Display::fmt(category, f),
        }
    }
}
