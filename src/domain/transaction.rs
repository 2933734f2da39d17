//! Transaction types
//!
//! A transaction records a single dated income or expense entry. Creation and
//! update inputs are validated here before anything touches the store; the
//! validators are pure and report every field failure at once.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{parse_date_field, Violation};

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored transaction belonging to a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Apply a validated set of changes, bumping `updated_at`.
    pub fn apply(&mut self, changes: TransactionChanges) {
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(merchant) = changes.merchant {
            self.merchant = Some(merchant);
        }
        if let Some(payment_method) = changes.payment_method {
            self.payment_method = Some(payment_method);
        }
        self.updated_at = Utc::now();
    }
}

/// Raw creation input, as received from the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionDraft {
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// A creation request that passed validation.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub payment_method: Option<String>,
}

impl TransactionDraft {
    /// Validate the draft, producing typed input or every field violation.
    ///
    /// A missing date defaults to today (UTC).
    pub fn validate(self) -> Result<NewTransaction, Vec<Violation>> {
        let mut violations = Vec::new();

        if self.amount <= Decimal::ZERO {
            violations.push(Violation::new("amount", "Amount must be positive"));
        }
        if self.category.trim().is_empty() {
            violations.push(Violation::new("category", "Category is required"));
        }

        let kind = TransactionKind::parse(&self.kind);
        if kind.is_none() {
            violations.push(Violation::new("type", "Type must be 'income' or 'expense'"));
        }

        let date = match self.date.as_deref().filter(|raw| !raw.is_empty()) {
            Some(raw) => match parse_date_field("date", raw) {
                Ok(date) => Some(date),
                Err(violation) => {
                    violations.push(violation);
                    None
                }
            },
            None => Some(Utc::now().date_naive()),
        };

        match (kind, date) {
            (Some(kind), Some(date)) if violations.is_empty() => Ok(NewTransaction {
                amount: self.amount,
                category: self.category,
                kind,
                date,
                description: self.description,
                merchant: self.merchant,
                payment_method: self.payment_method,
            }),
            _ => Err(violations),
        }
    }
}

/// Raw partial-update input for PUT requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// A partial update that passed validation.
#[derive(Debug, Clone, Default)]
pub struct TransactionChanges {
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub payment_method: Option<String>,
}

impl TransactionPatch {
    /// Validate whichever fields are present.
    pub fn validate(self) -> Result<TransactionChanges, Vec<Violation>> {
        let mut violations = Vec::new();

        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                violations.push(Violation::new("amount", "Amount must be positive"));
            }
        }
        if let Some(ref category) = self.category {
            if category.trim().is_empty() {
                violations.push(Violation::new("category", "Category is required"));
            }
        }

        let kind = match self.kind.as_deref() {
            Some(raw) => {
                let parsed = TransactionKind::parse(raw);
                if parsed.is_none() {
                    violations.push(Violation::new("type", "Type must be 'income' or 'expense'"));
                }
                parsed
            }
            None => None,
        };

        let date = match self.date.as_deref() {
            Some(raw) => match parse_date_field("date", raw) {
                Ok(date) => Some(date),
                Err(violation) => {
                    violations.push(violation);
                    None
                }
            },
            None => None,
        };

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(TransactionChanges {
            amount: self.amount,
            category: self.category,
            kind,
            date,
            description: self.description,
            merchant: self.merchant,
            payment_method: self.payment_method,
        })
    }
}
