//! Session token primitives for the tsumi recipe service.
//!
//! Tokens are compact JWTs (`header.payload.signature`) signed with HMAC-SHA256.
//! The crate is pure: no request types, no I/O beyond reading the secret from the
//! environment once at startup.
//!
//! # Usage
//!
//! ```rust
//! use chrono::TimeDelta;
//! use tsumi_auth::{claims::SessionClaims, jwt::verify, secret::Secret};
//!
//! let secret = Secret::new("MySuperSecret").unwrap();
//! let claims = SessionClaims::new(7, "a@b.com", "Alice", TimeDelta::hours(24)).unwrap();
//! let token = claims.sign(&secret).unwrap();
//!
//! let decoded: SessionClaims = verify(&token, &secret).unwrap();
//! assert_eq!(decoded.user_id, 7);
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret;

/// Literal prefix that marks a bearer credential, trailing space included.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
/// Name of the cookie holding the session token for browser clients.
pub const SESSION_COOKIE: &str = "tsumi_session";
/// Environment variable the signing secret is read from.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
