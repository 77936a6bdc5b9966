//! Server configuration.
//!
//! Settings come from an optional TOML file (path in `TSUMI_CONFIG`), then
//! individual environment overrides. The signing secret and database URL are
//! never read from the file.
//!
//! ```toml
//! bind = "0.0.0.0:8787"
//! token_ttl_seconds = 86400
//! secure_cookie = true
//! ```

use std::{net::SocketAddr, path::Path};

use chrono::TimeDelta;
use serde::Deserialize;

use crate::prelude::*;

pub const CONFIG_PATH_ENV: &str = "TSUMI_CONFIG";
pub const BIND_ENV: &str = "TSUMI_BIND";
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECONDS";

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: SocketAddr,
    /// Session token lifetime, also used as the cookie `Max-Age`.
    pub token_ttl_seconds: i64,
    /// Adds the `Secure` attribute to the session cookie.
    /// Turn off only for plain-HTTP development.
    pub secure_cookie: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8787)),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            secure_cookie: true,
        }
    }
}

impl ServerConfig {
    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load the file named by `TSUMI_CONFIG` (defaults when unset), then apply
    /// `TSUMI_BIND` and `TOKEN_TTL_SECONDS`.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind = bind.parse().map_err(|_| Error::InvalidEnv(BIND_ENV))?;
        }
        if let Ok(ttl) = std::env::var(TOKEN_TTL_ENV) {
            config.token_ttl_seconds = ttl.parse().map_err(|_| Error::InvalidEnv(TOKEN_TTL_ENV))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.token_ttl_seconds <= 0 || TimeDelta::try_seconds(self.token_ttl_seconds).is_none() {
            return Err(Error::InvalidEnv(TOKEN_TTL_ENV));
        }
        Ok(())
    }

    pub fn token_lifetime(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.token_ttl_seconds)
            .unwrap_or(TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECONDS))
    }
}
