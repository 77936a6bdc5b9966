//! Login and registration.
//!
//! Passwords are required by the API but neither stored nor checked: any
//! password logs an existing user in.

use cookie::{Cookie, SameSite, time::Duration};
use serde::{Deserialize, Serialize};
use tracing::info;
use tsumi_auth::{SESSION_COOKIE, claims::SessionClaims, secret::Secret};
use tsumi_models::{
    store::UserStore,
    user::{NewUser, User},
};

use crate::config::ServerConfig;
use crate::prelude::*;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserApi {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Body returned by login and register.
///
/// # JSON Format
///
/// ```json
/// {
///   "user": { "id": 1, "email": "a@b.com", "name": "Alice" },
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
/// }
/// ```
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub user: UserApi,
    pub token: String,
}

impl From<&User> for UserApi {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Signs a fresh session token for a stored user.
pub fn issue_token(user: &User, secret: &Secret, config: &ServerConfig) -> Result<AuthResponse> {
    let claims = SessionClaims::new(
        user.id,
        user.email.clone(),
        user.name.clone(),
        config.token_lifetime(),
    )?;
    Ok(AuthResponse {
        user: UserApi::from(user),
        token: claims.sign(secret)?,
    })
}

/// Creates a user and issues their first token.
///
/// # Examples
///
/// ```rust
/// use tsumi_auth::secret::Secret;
/// use tsumi_models::memory::MemoryUserStore;
/// use tsumi_web::{auth::{RegisterRequest, register_user}, config::ServerConfig};
///
/// let users = MemoryUserStore::new();
/// let secret = Secret::new("MySuperSecret").unwrap();
/// let request = RegisterRequest {
///     email: "a@b.com".into(),
///     name: "Alice".into(),
///     password: "pw".into(),
/// };
///
/// let response = register_user(&request, &users, &secret, &ServerConfig::default()).unwrap();
/// assert_eq!(response.user.id, 1);
/// ```
pub fn register_user(
    payload: &RegisterRequest,
    users: &dyn UserStore,
    secret: &Secret,
    config: &ServerConfig,
) -> Result<AuthResponse> {
    if payload.email.is_empty() || payload.name.is_empty() || payload.password.is_empty() {
        return Err(Error::MissingFields);
    }
    if users.fetch_by_email(&payload.email)?.is_some() {
        return Err(tsumi_models::error::Error::DuplicateEmail.into());
    }
    let user = users.create(NewUser::new(payload.email.clone(), payload.name.clone()))?;
    info!("Registered user {}", user.id);
    issue_token(&user, secret, config)
}

/// Issues a token for an existing user.
pub fn login_user(
    payload: &LoginRequest,
    users: &dyn UserStore,
    secret: &Secret,
    config: &ServerConfig,
) -> Result<AuthResponse> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(Error::MissingCredentials);
    }
    let user = users
        .fetch_by_email(&payload.email)?
        .ok_or(Error::WrongCredentials)?;
    info!("User {} logged in", user.id);
    issue_token(&user, secret, config)
}

/// Cookie that lets browser clients present the token on later requests.
///
/// `tsumi_session=<token>; HttpOnly; SameSite=None; Secure; Path=/; Max-Age=<ttl>`
pub fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(config.token_ttl_seconds))
        .same_site(SameSite::None)
        .secure(config.secure_cookie)
        .build()
}
