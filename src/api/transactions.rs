//! Transaction endpoints
//!
//! GET lists and filters, POST creates, PUT updates and DELETE removes by the
//! `id` query parameter. The list response carries a summary of the filtered
//! set plus pagination metadata.

use axum::body::Bytes;
use axum::extract::{Extension, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;

use crate::analytics::{summarize, TransactionFilter};
use crate::auth::AuthenticatedUser;
use crate::domain::{TransactionDraft, TransactionKind, TransactionPatch, Violation};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{envelope, parse_json, parse_usize_param, require_id};

pub const ALLOWED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Single entry point for `/transactions`; the method guard has already
/// vetted the verb.
pub async fn dispatch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TransactionQuery>,
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

fn list(state: &AppState, user: &AuthenticatedUser, query: &TransactionQuery) -> AppResult<Response> {
    let limit = parse_usize_param(query.limit.as_deref(), "limit", DEFAULT_LIMIT)?.min(MAX_LIMIT);
    let offset = parse_usize_param(query.offset.as_deref(), "offset", 0)?;

    let filter = TransactionFilter {
        kind: parse_kind_param(query.kind.as_deref())?,
        category: query.category.clone().filter(|c| !c.is_empty()),
        ..TransactionFilter::default()
    };

    let mut transactions = state.store.transactions(user.id);
    transactions.retain(|tx| filter.matches(tx));
    // Newest first, ties broken by creation time
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));

    let summary = summarize(&transactions);
    let total = transactions.len();
    let page: Vec<_> = transactions.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + limit < total;

    Ok(envelope::success(
        json!({
            "transactions": page,
            "summary": summary,
            "pagination": {
                "total": total,
                "limit": limit,
                "offset": offset,
                "has_more": has_more,
            },
        }),
        StatusCode::OK,
    ))
}

fn create(state: &AppState, user: &AuthenticatedUser, body: &[u8]) -> AppResult<Response> {
    let draft: TransactionDraft = parse_json(body)?;
    let new = draft.validate().map_err(AppError::InvalidInput)?;

    let transaction = state.store.insert_transaction(user.id, new);
    tracing::info!(user_id = %user.id, transaction_id = %transaction.id, "transaction created");

    Ok(envelope::success(
        json!({ "transaction": transaction }),
        StatusCode::CREATED,
    ))
}

fn update(
    state: &AppState,
    user: &AuthenticatedUser,
    query: &TransactionQuery,
    body: &[u8],
) -> AppResult<Response> {
    let id = require_id(query.id.as_deref(), "Transaction")?;
    let patch: TransactionPatch = parse_json(body)?;
    let changes = patch.validate().map_err(AppError::InvalidInput)?;

    let transaction = state.store.update_transaction(user.id, id, changes)?;

    Ok(envelope::success(
        json!({ "transaction": transaction }),
        StatusCode::OK,
    ))
}

fn remove(state: &AppState, user: &AuthenticatedUser, query: &TransactionQuery) -> AppResult<Response> {
    let id = require_id(query.id.as_deref(), "Transaction")?;
    state.store.delete_transaction(user.id, id)?;
    tracing::info!(user_id = %user.id, transaction_id = %id, "transaction deleted");

    Ok(envelope::success(
        json!({ "message": "Transaction deleted successfully", "id": id }),
        StatusCode::OK,
    ))
}

fn parse_kind_param(raw: Option<&str>) -> AppResult<Option<TransactionKind>> {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => TransactionKind::parse(raw).map(Some).ok_or_else(|| {
            AppError::InvalidInput(vec![Violation::new(
                "type",
                "Type must be 'income' or 'expense'",
            )])
        }),
        None => Ok(None),
    }
}
