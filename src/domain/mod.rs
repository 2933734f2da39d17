//! Domain module
//!
//! Core domain types and validation rules.

pub mod budget;
pub mod profile;
pub mod transaction;

pub use budget::{Budget, BudgetChanges, BudgetDraft, BudgetPatch, BudgetPeriod, NewBudget};
pub use profile::{DeleteAccountRequest, ProfileUpdate, UserProfile};
pub use transaction::{
    NewTransaction, Transaction, TransactionChanges, TransactionDraft, TransactionKind,
    TransactionPatch,
};

use chrono::NaiveDate;
use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Parse a `YYYY-MM-DD` date field, reporting a violation on failure.
pub(crate) fn parse_date_field(field: &'static str, raw: &str) -> Result<NaiveDate, Violation> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| Violation::new(field, format!("{field} must be a date in YYYY-MM-DD format")))
}
