//! Authentication
//!
//! Bearer-credential parsing and the credential-resolver collaborator.
//! Token-to-identity resolution happens on every request; nothing is cached.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::TokenEntry;

/// Identity attached to the request after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
}

/// Authentication failures, all surfaced as 401.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingHeader,

    #[error("Invalid authorization header format")]
    MalformedHeader,

    #[error("Unknown or revoked token")]
    UnknownToken,
}

/// Extract the bearer token from the `Authorization` header.
///
/// The header must be exactly `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;
    let value = value.to_str().map_err(|_| AuthError::MalformedHeader)?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Maps a bearer token to a user identity.
///
/// Implementations are the external credential-validation collaborator; the
/// middleware calls `resolve` once per request.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Resolver backed by a fixed set of registered tokens.
///
/// Tokens are held as SHA-256 hex digests, never plaintext.
#[derive(Debug, Default)]
pub struct StaticCredentialResolver {
    tokens: HashMap<String, AuthenticatedUser>,
}

impl StaticCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver from parsed `API_TOKENS` entries.
    pub fn from_entries(entries: &[TokenEntry]) -> Self {
        let mut resolver = Self::new();
        for entry in entries {
            resolver.register(
                &entry.token,
                AuthenticatedUser {
                    id: entry.user_id,
                    email: entry.email.clone(),
                },
            );
        }
        resolver
    }

    pub fn register(&mut self, token: &str, user: AuthenticatedUser) {
        self.tokens.insert(digest(token), user);
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens
            .get(&digest(token))
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }
}

fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
