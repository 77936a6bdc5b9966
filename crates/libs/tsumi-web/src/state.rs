//! Shared application state handed to every handler.

use std::sync::Arc;

use tsumi_auth::secret::Secret;
use tsumi_models::store::UserStore;

use crate::config::ServerConfig;
use crate::ctx::resolver::AuthGate;

/// Immutable per-process state. Cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub secret: Arc<Secret>,
    pub gate: AuthGate,
    pub users: Arc<dyn UserStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(secret: Secret, users: Arc<dyn UserStore>, config: ServerConfig) -> Self {
        let secret = Arc::new(secret);
        Self {
            gate: AuthGate::new(secret.clone()),
            secret,
            users,
            config: Arc::new(config),
        }
    }
}
