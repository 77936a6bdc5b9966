//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::warn;

use crate::ctx::resolver::AuthGate;
use crate::prelude::*;

/// Middleware that requires a valid session token for a route.
///
/// Runs the [`AuthGate`] to completion before the handler. On success the
/// resulting [`crate::ctx::Ctx`] is stored in the request extensions and the
/// request proceeds. On failure the handler is never called and the response is
/// a bare 401; only the failure category is logged.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use axum::{Router, middleware, routing::get};
/// use tsumi_auth::secret::Secret;
/// use tsumi_web::{ctx::{Ctx, resolver::AuthGate}, mw_auth::mw_require_auth};
///
/// let gate = AuthGate::new(Arc::new(Secret::new("MySuperSecret").unwrap()));
/// let app: Router<()> = Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn_with_state(gate, mw_require_auth));
///
/// async fn protected_handler(ctx: Ctx) -> String {
///     format!("Hello user {}", ctx.user_id)
/// }
/// ```
pub async fn mw_require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response> {
    match gate.authenticate(req.headers(), Utc::now().timestamp()) {
        Ok(ctx) => {
            req.extensions_mut().insert(ctx);
            Ok(next.run(req).await)
        }
        Err(reason) => {
            warn!(
                category = reason.category(),
                method = %req.method(),
                path = %req.uri().path(),
                "Rejected unauthenticated request"
            );
            Err(Error::Unauthorized(reason))
        }
    }
}
