//! Budget types
//!
//! A budget sets a spending ceiling for one category over a recurring period,
//! with an alert threshold expressed as a percentage of the ceiling.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{parse_date_field, Violation};

/// The recurrence window a budget ceiling applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored budget belonging to a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    /// Percentage of the ceiling at which the client should alert (0-100).
    pub alert_threshold: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Apply a validated set of changes, bumping `updated_at`.
    pub fn apply(&mut self, changes: BudgetChanges) {
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(period) = changes.period {
            self.period = period;
        }
        if let Some(alert_threshold) = changes.alert_threshold {
            self.alert_threshold = alert_threshold;
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = changes.end_date {
            self.end_date = Some(end_date);
        }
        self.updated_at = Utc::now();
    }
}

fn default_alert_threshold() -> i64 {
    80
}

/// Raw creation input, as received from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetDraft {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub period: String,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: i64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl Default for BudgetDraft {
    fn default() -> Self {
        Self {
            category: String::new(),
            amount: Decimal::ZERO,
            period: String::new(),
            alert_threshold: default_alert_threshold(),
            start_date: None,
            end_date: None,
        }
    }
}

/// A creation request that passed validation.
#[derive(Debug, Clone)]
pub struct NewBudget {
    pub category: String,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub alert_threshold: u8,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetDraft {
    /// Validate the draft, producing typed input or every field violation.
    pub fn validate(self) -> Result<NewBudget, Vec<Violation>> {
        let mut violations = Vec::new();

        if self.category.trim().is_empty() {
            violations.push(Violation::new("category", "Category is required"));
        }
        if self.amount <= Decimal::ZERO {
            violations.push(Violation::new("amount", "Amount must be positive"));
        }

        let period = BudgetPeriod::parse(&self.period);
        if period.is_none() {
            violations.push(Violation::new(
                "period",
                "Period must be 'weekly', 'monthly', or 'yearly'",
            ));
        }

        if !(0..=100).contains(&self.alert_threshold) {
            violations.push(Violation::new(
                "alert_threshold",
                "Alert threshold must be between 0 and 100",
            ));
        }

        let start_date = parse_optional_date("start_date", self.start_date.as_deref(), &mut violations);
        let end_date = parse_optional_date("end_date", self.end_date.as_deref(), &mut violations);

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                violations.push(Violation::new("end_date", "End date must not precede start date"));
            }
        }

        match period {
            Some(period) if violations.is_empty() => Ok(NewBudget {
                category: self.category,
                amount: self.amount,
                period,
                alert_threshold: self.alert_threshold as u8,
                start_date,
                end_date,
            }),
            _ => Err(violations),
        }
    }
}

/// Raw partial-update input for PUT requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetPatch {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub alert_threshold: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// A partial update that passed validation.
#[derive(Debug, Clone, Default)]
pub struct BudgetChanges {
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
    pub alert_threshold: Option<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl BudgetPatch {
    /// Validate whichever fields are present.
    pub fn validate(self) -> Result<BudgetChanges, Vec<Violation>> {
        let mut violations = Vec::new();

        if let Some(ref category) = self.category {
            if category.trim().is_empty() {
                violations.push(Violation::new("category", "Category is required"));
            }
        }
        if let Some(amount) = self.amount {
            if amount <= Decimal::ZERO {
                violations.push(Violation::new("amount", "Amount must be positive"));
            }
        }

        let period = match self.period.as_deref() {
            Some(raw) => {
                let parsed = BudgetPeriod::parse(raw);
                if parsed.is_none() {
                    violations.push(Violation::new(
                        "period",
                        "Period must be 'weekly', 'monthly', or 'yearly'",
                    ));
                }
                parsed
            }
            None => None,
        };

        let alert_threshold = match self.alert_threshold {
            Some(value) if (0..=100).contains(&value) => Some(value as u8),
            Some(_) => {
                violations.push(Violation::new(
                    "alert_threshold",
                    "Alert threshold must be between 0 and 100",
                ));
                None
            }
            None => None,
        };

        let start_date = parse_optional_date("start_date", self.start_date.as_deref(), &mut violations);
        let end_date = parse_optional_date("end_date", self.end_date.as_deref(), &mut violations);

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(BudgetChanges {
            category: self.category,
            amount: self.amount,
            period,
            alert_threshold,
            start_date,
            end_date,
        })
    }
}

fn parse_optional_date(
    field: &'static str,
    raw: Option<&str>,
    violations: &mut Vec<Violation>,
) -> Option<NaiveDate> {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => match parse_date_field(field, raw) {
            Ok(date) => Some(date),
            Err(violation) => {
                violations.push(violation);
                None
            }
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft(category: &str, amount: Decimal, period: &str) -> BudgetDraft {
        BudgetDraft {
            category: category.to_string(),
            amount,
            period: period.to_string(),
            ..BudgetDraft::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        let new = draft("Groceries", dec!(500), "monthly").validate().unwrap();
        assert_eq!(new.category, "Groceries");
        assert_eq!(new.period, BudgetPeriod::Monthly);
        assert_eq!(new.alert_threshold, 80);
    }

    #[test]
    fn test_empty_category_rejected() {
        let violations = draft("", dec!(100), "monthly").validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Category is required");
    }

    #[test]
    fn test_invalid_period_rejected() {
        let violations = draft("Rent", dec!(100), "daily").validate().unwrap_err();
        assert_eq!(violations[0].field, "period");
        assert!(violations[0].message.contains("'weekly', 'monthly', or 'yearly'"));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut input = draft("Rent", dec!(100), "weekly");
        input.alert_threshold = 120;
        let violations = input.validate().unwrap_err();
        assert_eq!(violations[0].field, "alert_threshold");
    }

    #[test]
    fn test_inverted_window_rejected() {
        let mut input = draft("Rent", dec!(100), "yearly");
        input.start_date = Some("2024-06-01".to_string());
        input.end_date = Some("2024-01-01".to_string());
        let violations = input.validate().unwrap_err();
        assert_eq!(violations[0].field, "end_date");
    }

    #[test]
    fn test_patch_period_change() {
        let patch = BudgetPatch {
            period: Some("yearly".to_string()),
            ..BudgetPatch::default()
        };
        let changes = patch.validate().unwrap();
        assert_eq!(changes.period, Some(BudgetPeriod::Yearly));
    }

    #[test]
    fn test_patch_rejects_bad_threshold() {
        let patch = BudgetPatch {
            alert_threshold: Some(-1),
            ..BudgetPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(BudgetPeriod::parse("weekly"), Some(BudgetPeriod::Weekly));
        assert_eq!(BudgetPeriod::parse("monthly"), Some(BudgetPeriod::Monthly));
        assert_eq!(BudgetPeriod::parse("yearly"), Some(BudgetPeriod::Yearly));
        assert_eq!(BudgetPeriod::parse("quarterly"), None);
    }
}
