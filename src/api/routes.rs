//! API Routes
//!
//! Router assembly and the unauthenticated probe endpoints. Per-resource
//! routes are wired so the pipeline runs CORS, then the method guard, then
//! authentication, then the handler.

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::any;
use axum::{extract::State, middleware, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::middleware::{auth_middleware, cors_middleware, logging_middleware, method_guard};
use super::{analytics, budgets, envelope, transactions, users};

const GET_ONLY: &[&str] = &["GET"];

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", any(index))
        .route("/index", any(index))
        .route("/health", any(health))
        .route_layer(middleware::from_fn_with_state(GET_ONLY, method_guard));

    let transaction_routes = Router::new()
        .route("/transactions", any(transactions::dispatch))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            transactions::ALLOWED_METHODS,
            method_guard,
        ));

    let budget_routes = Router::new()
        .route("/budgets", any(budgets::dispatch))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            budgets::ALLOWED_METHODS,
            method_guard,
        ));

    let analytics_routes = Router::new()
        .route("/analytics", any(analytics::dispatch))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            analytics::ALLOWED_METHODS,
            method_guard,
        ));

    let user_routes = Router::new()
        .route("/users", any(users::dispatch))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .route_layer(middleware::from_fn_with_state(
            users::ALLOWED_METHODS,
            method_guard,
        ));

    // Layers execute in reverse order of addition: trace, then logging, then
    // CORS, then the per-route guard/auth stack.
    Router::new()
        .merge(public)
        .merge(transaction_routes)
        .merge(budget_routes)
        .merge(analytics_routes)
        .merge(user_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), cors_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe
async fn health(State(state): State<AppState>) -> Response {
    envelope::success(
        json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "runtime": "rust",
            "environment": state.config.environment.as_str(),
        }),
        StatusCode::OK,
    )
}

/// Endpoint directory
async fn index() -> Response {
    envelope::success(
        json!({
            "message": "Budget Buddy API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health",
                "transactions": "/transactions",
                "budgets": "/budgets",
                "analytics": "/analytics",
                "users": "/users",
            },
        }),
        StatusCode::OK,
    )
}

async fn not_found() -> Response {
    envelope::error("Not found", StatusCode::NOT_FOUND, None)
}
