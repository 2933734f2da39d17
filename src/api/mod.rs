//! API module
//!
//! HTTP endpoints, the middleware pipeline, and the response envelope.

pub mod analytics;
pub mod budgets;
pub mod envelope;
pub mod middleware;
pub mod routes;
pub mod transactions;
pub mod users;

pub use routes::create_router;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::Violation;
use crate::error::{AppError, AppResult};

/// Parse a JSON request body, mapping failures to the enveloped 400 shape.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|err| AppError::InvalidBody(err.to_string()))
}

/// Require the `id` query parameter on PUT/DELETE requests.
pub(crate) fn require_id(raw: Option<&str>, entity: &'static str) -> AppResult<Uuid> {
    let raw = raw
        .filter(|raw| !raw.is_empty())
        .ok_or(AppError::MissingIdentifier(entity))?;
    raw.parse()
        .map_err(|_| AppError::InvalidInput(vec![Violation::new("id", "ID must be a valid UUID")]))
}

/// Parse an optional non-negative integer query parameter.
pub(crate) fn parse_usize_param(
    raw: Option<&str>,
    field: &'static str,
    default: usize,
) -> AppResult<usize> {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| {
            AppError::InvalidInput(vec![Violation::new(
                field,
                format!("{field} must be a non-negative integer"),
            )])
        }),
        None => Ok(default),
    }
}

/// Parse an optional `YYYY-MM-DD` query parameter.
pub(crate) fn parse_date_param(
    raw: Option<&str>,
    field: &'static str,
) -> AppResult<Option<NaiveDate>> {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                AppError::InvalidInput(vec![Violation::new(
                    field,
                    format!("{field} must be a date in YYYY-MM-DD format"),
                )])
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        let id = Uuid::new_v4();
        assert_eq!(require_id(Some(&id.to_string()), "Budget").unwrap(), id);
        assert!(matches!(
            require_id(None, "Budget"),
            Err(AppError::MissingIdentifier("Budget"))
        ));
        assert!(matches!(
            require_id(Some(""), "Budget"),
            Err(AppError::MissingIdentifier("Budget"))
        ));
        assert!(matches!(
            require_id(Some("not-a-uuid"), "Budget"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_usize_param() {
        assert_eq!(parse_usize_param(None, "limit", 50).unwrap(), 50);
        assert_eq!(parse_usize_param(Some(""), "limit", 50).unwrap(), 50);
        assert_eq!(parse_usize_param(Some("25"), "limit", 50).unwrap(), 25);
        assert!(parse_usize_param(Some("-1"), "limit", 50).is_err());
        assert!(parse_usize_param(Some("lots"), "limit", 50).is_err());
    }

    #[test]
    fn test_parse_date_param() {
        assert_eq!(parse_date_param(None, "start_date").unwrap(), None);
        assert_eq!(
            parse_date_param(Some("2024-01-15"), "start_date").unwrap(),
            Some("2024-01-15".parse().unwrap())
        );
        assert!(parse_date_param(Some("01/15/2024"), "start_date").is_err());
    }

    #[test]
    fn test_parse_json_reports_invalid_body() {
        let result: AppResult<serde_json::Value> = parse_json(b"{not json");
        assert!(matches!(result, Err(AppError::InvalidBody(_))));
    }
}
