//! Shared application state
//!
//! The collaborators injected into every handler: configuration, the
//! persistence store, and the credential resolver.

use std::sync::Arc;

use crate::auth::CredentialResolver;
use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn Store>,
    pub credentials: Arc<dyn CredentialResolver>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            credentials,
        }
    }
}
