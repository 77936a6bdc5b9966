//! Authentication error types.

/// Reasons a presented credential is refused.
///
/// Every variant is reported to clients the same way (401, empty body); the
/// distinction only exists for logs and tests.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    #[error("No credentials")]
    NoCredentials,
    #[error("Malformed token")]
    MalformedToken,
    #[error("Invalid token signature")]
    SignatureInvalid,
    #[error("Malformed token payload")]
    PayloadMalformed,
    #[error("Token expired")]
    ExpiredToken,
}

impl VerifyError {
    /// Short machine-friendly label used in log records.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NoCredentials => "no_credentials",
            Self::MalformedToken => "malformed_token",
            Self::SignatureInvalid => "signature_invalid",
            Self::PayloadMalformed => "payload_malformed",
            Self::ExpiredToken => "expired_token",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Env Variable 'JWT_SECRET' missing")]
    MissingSecret,

    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("Token lifetime out of range")]
    InvalidLifetime,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
