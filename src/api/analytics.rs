//! Analytics endpoints
//!
//! GET only. The `type` parameter picks the report (summary by default);
//! `start_date`, `end_date`, and `category` narrow the transaction set before
//! aggregation.

use axum::extract::{Extension, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use crate::analytics::{
    category_breakdown, monthly_trend, summarize, AnalyticsKind, TransactionFilter,
};
use crate::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{envelope, parse_date_param};

pub const ALLOWED_METHODS: &[&str] = &["GET"];

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Single entry point for `/analytics`; the method guard has already vetted
/// the verb.
pub async fn dispatch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<AnalyticsQuery>,
    method: Method,
) -> AppResult<Response> {
    match method {
        Method::GET => report(&state, &user, &query),
        _ => Err(AppError::MethodNotAllowed {
            allowed: ALLOWED_METHODS,
        }),
    }
}

fn report(state: &AppState, user: &AuthenticatedUser, query: &AnalyticsQuery) -> AppResult<Response> {
    let kind = match query.kind.as_deref().filter(|raw| !raw.is_empty()) {
        Some(raw) => AnalyticsKind::parse(raw)
            .ok_or_else(|| AppError::InvalidAnalyticsType(raw.to_string()))?,
        None => AnalyticsKind::Summary,
    };

    let filter = TransactionFilter {
        start_date: parse_date_param(query.start_date.as_deref(), "start_date")?,
        end_date: parse_date_param(query.end_date.as_deref(), "end_date")?,
        kind: None,
        category: query.category.clone().filter(|c| !c.is_empty()),
    };

    let transactions = state.store.transactions(user.id);
    let filtered: Vec<_> = transactions.iter().filter(|tx| filter.matches(tx)).collect();

    let data = match kind {
        AnalyticsKind::Summary => json!({ "summary": summarize(filtered.iter().copied()) }),
        AnalyticsKind::Category => {
            json!({ "categories": category_breakdown(filtered.iter().copied()) })
        }
        AnalyticsKind::Trend => json!({ "trend": monthly_trend(filtered.iter().copied()) }),
    };

    Ok(envelope::success(data, StatusCode::OK))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query: AnalyticsQuery = serde_json::from_str("{}").unwrap();
        assert!(query.kind.is_none());
        assert!(query.start_date.is_none());
        assert!(query.category.is_none());
    }
}
