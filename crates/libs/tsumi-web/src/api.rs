//! HTTP routes.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_cookies::{CookieManagerLayer, Cookies};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tsumi_auth::claims::SessionClaims;

use crate::auth::{
    AuthResponse, LoginRequest, RegisterRequest, login_user, register_user, session_cookie,
};
use crate::ctx::Ctx;
use crate::mw_auth::mw_require_auth;
use crate::prelude::*;
use crate::state::AppState;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MeResponse {
    pub user: SessionClaims,
}

/// Builds the application router.
///
/// `/auth/me` sits behind the auth gate; everything else is public.
pub fn app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            mw_require_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let response = register_user(&payload, state.users.as_ref(), &state.secret, &state.config)?;
    cookies.add(session_cookie(response.token.clone(), &state.config));
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let response = login_user(&payload, state.users.as_ref(), &state.secret, &state.config)?;
    cookies.add(session_cookie(response.token.clone(), &state.config));
    Ok(Json(response))
}

async fn me(ctx: Ctx) -> Json<MeResponse> {
    Json(MeResponse { user: ctx.claims })
}
