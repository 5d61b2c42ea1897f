//! Values derived from a snapshot: the grand total, per-category totals, and
//! the search-filtered view. Nothing here is stored; callers recompute on
//! every render.

use rust_decimal::Decimal;

use crate::types::{Category, ExpenseRecord};

/// Sum of every amount. Zero for an empty slice.
pub fn total(records: &[ExpenseRecord]) -> Decimal {
    records.iter().map(|r| r.amount).sum()
}

/// Amounts grouped by category, in the order each category first appears.
pub fn category_totals(records: &[ExpenseRecord]) -> Vec<(Category, Decimal)> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();
    for record in records {
        match totals.iter_mut().find(|(category, _)| *category == record.category) {
            Some((_, sum)) => *sum += record.amount,
            None => totals.push((record.category.clone(), record.amount)),
        }
    }
    totals
}

/// Case-insensitive substring match on the title. An empty query matches.
pub fn title_matches(record: &ExpenseRecord, query: &str) -> bool {
    record.title.to_lowercase().contains(&query.to_lowercase())
}

/// Result of applying the search box to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredView<'a> {
    Matches(Vec<&'a ExpenseRecord>),
    /// Nothing matched; the front-end shows an explicit "no matches" line
    /// instead of an empty table.
    NoMatches { query: String },
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a ExpenseRecord] {
        match self {
            FilteredView::Matches(records) => records,
            FilteredView::NoMatches { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilteredView::NoMatches { .. })
    }
}

pub fn filtered_view<'a>(records: &'a [ExpenseRecord], query: &str) -> FilteredView<'a> {
    let matches: Vec<&ExpenseRecord> = records.iter().filter(|r| title_matches(r, query)).collect();
    if matches.is_empty() {
        FilteredView::NoMatches {
            query: query.to_string(),
        }
    } else {
        FilteredView::Matches(matches)
    }
}
