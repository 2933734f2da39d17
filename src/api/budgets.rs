//! Budget endpoints
//!
//! GET lists (optionally filtered by period), POST creates, PUT updates and
//! DELETE removes by the `id` query parameter.

use axum::body::Bytes;
use axum::extract::{Extension, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::{BudgetDraft, BudgetPatch, BudgetPeriod, Violation};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{envelope, parse_json, require_id};

pub const ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

#[derive(Debug, Default, Deserialize)]
pub struct BudgetQuery {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Single entry point for `/budgets`; the method guard has already vetted
/// the verb.
pub async fn dispatch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<BudgetQuery>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    match method {
        Method::GET => list(&state, &user, &query),
        Method::POST => create(&state, &user, &body),
        Method::PUT => update(&state, &user, &query, &body),
        Method::DELETE => remove(&state, &user, &query),
        _ => Err(AppError::MethodNotAllowed {
            allowed: ALLOWED_METHODS,
        }),
    }
}

fn list(state: &AppState, user: &AuthenticatedUser, query: &BudgetQuery) -> AppResult<Response> {
    let period = parse_period_param(query.period.as_deref())?;

    let mut budgets = state.store.budgets(user.id);
    if let Some(period) = period {
        budgets.retain(|budget| budget.period == period);
    }

    Ok(envelope::success(json!({ "budgets": budgets }), StatusCode::OK))
}

fn create(state: &AppState, user: &AuthenticatedUser, body: &[u8]) -> AppResult<Response> {
    let draft: BudgetDraft = parse_json(body)?;
    let new = draft.validate().map_err(AppError::InvalidInput)?;

    let budget = state.store.insert_budget(user.id, new);
    tracing::info!(user_id = %user.id, budget_id = %budget.id, "budget created");

    Ok(envelope::success(json!({ "budget": budget }), StatusCode::CREATED))
}

fn update(
    state: &AppState,
    user: &AuthenticatedUser,
    query: &BudgetQuery,
    body: &[u8],
) -> AppResult<Response> {
    let id = require_id(query.id.as_deref(), "Budget")?;
    let patch: BudgetPatch = parse_json(body)?;
    let changes = patch.validate().map_err(AppError::InvalidInput)?;

    let budget = state.store.update_budget(user.id, id, changes)?;

    Ok(envelope::success(json!({ "budget": budget }), StatusCode::OK))
}

fn remove(state: &AppState, user: &AuthenticatedUser, query: &BudgetQuery) -> AppResult<Response> {
    let id = require_id(query.id.as_deref(), "Budget")?;
    state.store.delete_budget(user.id, id)?;
    tracing::info!(user_id = %user.id, budget_id = %id, "budget deleted");

    Ok(envelope::success(
        json!({ "message": "Budget deleted successfully", "id": id }),
        StatusCode::OK,
    ))
}

fn parse_period_param(raw: Option<&str>) -> AppResult<Option<BudgetPeriod>> {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => BudgetPeriod::parse(raw).map(Some).ok_or_else(|| {
            AppError::InvalidInput(vec![Violation::new(
                "period",
                "Period must be 'weekly', 'monthly', or 'yearly'",
            )])
        }),
        None => Ok(None),
    }
}
