//! User profile endpoints
//!
//! GET reads the profile (synthesizing defaults for first-time users), PUT
//! applies a partial update, DELETE removes the account and all of its data
//! after an explicit confirmation.

use axum::body::Bytes;
use axum::extract::{Extension, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;
use serde_json::json;

use crate::auth::AuthenticatedUser;
use crate::domain::{DeleteAccountRequest, ProfileUpdate};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::{envelope, parse_json};

pub const ALLOWED_METHODS: &[&str] = &["GET", "PUT", "DELETE"];

/// Single entry point for `/users`; the method guard has already vetted the
/// verb.
pub async fn dispatch(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    method: Method,
    body: Bytes,
) -> AppResult<Response> {
    match method {
        Method::GET => profile(&state, &user),
        Method::PUT => update(&state, &user, &body),
        Method::DELETE => delete_account(&state, &user, &body),
        _ => Err(AppError::MethodNotAllowed {
            allowed: ALLOWED_METHODS,
        }),
    }
}

fn profile(state: &AppState, user: &AuthenticatedUser) -> AppResult<Response> {
    let profile = state.store.profile(user);
    Ok(envelope::success(json!({ "profile": profile }), StatusCode::OK))
}

fn update(state: &AppState, user: &AuthenticatedUser, body: &[u8]) -> AppResult<Response> {
    let update: ProfileUpdate = parse_json(body)?;
    update.validate().map_err(AppError::InvalidInput)?;

    let profile = state.store.update_profile(user, update);

    Ok(envelope::success(
        json!({ "profile": profile, "message": "Profile updated successfully" }),
        StatusCode::OK,
    ))
}

fn delete_account(state: &AppState, user: &AuthenticatedUser, body: &[u8]) -> AppResult<Response> {
    let request: DeleteAccountRequest = parse_json(body)?;
    if !request.confirm {
        return Err(AppError::ConfirmationRequired);
    }

    state.store.delete_account(user.id);
    tracing::info!(user_id = %user.id, "account deleted");

    Ok(envelope::success(
        json!({ "message": "Account deleted successfully" }),
        StatusCode::OK,
    ))
}
