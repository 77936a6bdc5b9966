//! HTTP layer of the tsumi recipe service.
//!
//! Provides the auth gate that guards protected routes, the request identity
//! context, the login/register handlers and the router that ties them together.

pub mod api;
pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod state;
