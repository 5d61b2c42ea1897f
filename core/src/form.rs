//! The editable add/edit form and its conversion into a request draft.
//!
//! The amount is kept as the raw text the user typed; it only becomes a
//! `Decimal` when the form is submitted. Non-numeric, blank, and negative
//! amounts are rejected rather than coerced.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::types::{Category, ExpenseDraft, ExpenseRecord};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("title is required")]
    EmptyTitle,

    #[error("amount is required")]
    MissingAmount,

    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),

    #[error("amount must not be negative")]
    NegativeAmount,
}

/// Unsaved field values for a create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub title: String,
    pub amount: String,
    pub category: Category,
}

impl FormDraft {
    /// Blank form: empty title and amount, `Food` selected.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing record, for editing.
    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: format!("{:.2}", record.amount.round_dp(2)),
            category: record.category.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    /// Validate the form and produce the request body.
    ///
    /// The title is sent as typed; only its presence is checked. The amount
    /// is rounded half away from zero to two decimal places.
    pub fn to_draft(&self) -> Result<ExpenseDraft, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let amount = parse_amount(&self.amount)?;
        Ok(ExpenseDraft {
            title: self.title.clone(),
            amount,
            category: self.category.clone(),
        })
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingAmount);
    }
    // Plain decimal text only: no digit separators, exponents, or `+`.
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(FormError::InvalidAmount(trimmed.to_string()));
    }
    let amount = Decimal::from_str(trimmed).map_err(|_| FormError::InvalidAmount(trimmed.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FormError::NegativeAmount);
    }
    Ok(amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize())
}
