//! Main Crate Error

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};
use tsumi_auth::error::VerifyError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Models(#[from] tsumi_models::error::Error),

    #[error(transparent)]
    Auth(#[from] tsumi_auth::error::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for env variable '{0}'")]
    InvalidEnv(&'static str),

    /* Api Errors */
    #[error("Unauthorized: {0}")]
    Unauthorized(VerifyError),

    #[error("Missing required fields")]
    MissingFields,

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Context Missing")]
    CtxMissing,
}

impl From<VerifyError> for Error {
    fn from(value: VerifyError) -> Self {
        Self::Unauthorized(value)
    }
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Every gate failure looks the same from the outside.
            Error::Unauthorized(_) | Error::CtxMissing => {
                debug!("Rejecting request: {self}");
                StatusCode::UNAUTHORIZED.into_response()
            }
            Error::MissingFields => json_error(StatusCode::BAD_REQUEST, "Missing required fields"),
            Error::MissingCredentials => {
                json_error(StatusCode::BAD_REQUEST, "Missing credentials")
            }
            Error::WrongCredentials => json_error(StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::Models(tsumi_models::error::Error::DuplicateEmail) => {
                json_error(StatusCode::CONFLICT, "User already exists")
            }
            Error::IO(_)
            | Error::Models(_)
            | Error::Auth(_)
            | Error::Toml(_)
            | Error::InvalidEnv(_) => {
                error!("Creating API error response for error: {:?}", self);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
