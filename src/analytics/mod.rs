//! Analytics aggregation engine
//!
//! Pure functions over a user's transaction set. Every report is recomputed
//! from the live set on each request; nothing here is cached or stored.
//! Filters are conjunctive and applied before aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Transaction, TransactionKind};

/// Valid values for the `type` query parameter, as reported to clients.
pub const ANALYTICS_TYPES: &[&str] = &["summary", "category", "trend"];

/// The report shape requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    Summary,
    Category,
    Trend,
}

impl AnalyticsKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "summary" => Some(Self::Summary),
            "category" => Some(Self::Category),
            "trend" => Some(Self::Trend),
            _ => None,
        }
    }
}

/// Conjunctive transaction filter, applied before aggregation.
///
/// Date bounds are inclusive on the occurrence date.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if transaction.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if transaction.date > end {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if transaction.kind != kind {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if transaction.category != *category {
                return false;
            }
        }
        true
    }
}

/// Income/expense totals over a transaction set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_savings: Decimal,
    pub savings_rate: Decimal,
    pub transaction_count: usize,
}

/// Compute the overall summary for a transaction set.
///
/// `savings_rate` is `net_savings / total_income * 100`, rounded to two
/// decimal places (banker's rounding) and normalized; it is zero when there
/// is no income.
pub fn summarize<'a, I>(transactions: I) -> AnalyticsSummary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut transaction_count = 0;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => total_expenses += transaction.amount,
        }
        transaction_count += 1;
    }

    let net_savings = total_income - total_expenses;
    let savings_rate = if total_income.is_zero() {
        Decimal::ZERO
    } else {
        (net_savings / total_income * Decimal::ONE_HUNDRED)
            .round_dp(2)
            .normalize()
    };

    AnalyticsSummary {
        total_income,
        total_expenses,
        net_savings,
        savings_rate,
        transaction_count,
    }
}

/// Per-category totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAnalytics {
    pub category: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub transactions: usize,
}

/// Group by exact category label; output is sorted ascending by label.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryAnalytics>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: BTreeMap<&'a str, (Decimal, Decimal, usize)> = BTreeMap::new();

    for transaction in transactions {
        let entry = groups.entry(transaction.category.as_str()).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount,
            TransactionKind::Expense => entry.1 += transaction.amount,
        }
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(category, (income, expenses, transactions))| CategoryAnalytics {
            category: category.to_string(),
            income,
            expenses,
            transactions,
        })
        .collect()
}

/// Per-month totals, keyed `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendData {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Group by calendar month of the occurrence date, chronologically ascending.
/// Months with no transactions are omitted.
pub fn monthly_trend<'a, I>(transactions: I) -> Vec<TrendData>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for transaction in transactions {
        let key = transaction.date.format("%Y-%m").to_string();
        let entry = months.entry(key).or_default();
        match transaction.kind {
            TransactionKind::Income => entry.0 += transaction.amount,
            TransactionKind::Expense => entry.1 += transaction.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| TrendData {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}
