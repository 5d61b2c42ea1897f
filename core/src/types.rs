//! Domain DTOs for the expenses API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Amounts travel as JSON numbers and are held as `Decimal` so sums never pick
//! up binary floating-point noise. Categories outside the fixed set survive a
//! round trip as `Category::Other`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-assigned identifier of an expense. Opaque to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ExpenseId)
    }
}

/// Spending category. The four named variants are the ones the front-end
/// offers; anything else the server hands back is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Food,
    Rent,
    Shopping,
    Bills,
    Other(String),
}

impl Category {
    pub const KNOWN: [Category; 4] = [
        Category::Food,
        Category::Rent,
        Category::Shopping,
        Category::Bills,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other(name) => name,
        }
    }

    /// Whether the category has a dedicated style, as opposed to the
    /// fallback used for unrecognized names.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Food" => Category::Food,
            "Rent" => Category::Rent,
            "Shopping" => Category::Shopping,
            "Bills" => Category::Bills,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive for the four named categories; anything else becomes
/// `Other` with the trimmed input.
impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(Category::KNOWN
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Category::Other(trimmed.to_string())))
    }
}

/// A single expense returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}

impl ExpenseRecord {
    /// Whether the record's fields equal the draft that produced it.
    pub fn matches(&self, draft: &ExpenseDraft) -> bool {
        self.title == draft.title && self.amount == draft.amount && self.category == draft.category
    }
}

/// Request payload for both create and full-replace update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
}

impl From<&ExpenseRecord> for ExpenseDraft {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: record.amount,
            category: record.category.clone(),
        }
    }
}
