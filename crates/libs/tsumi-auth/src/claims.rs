//! Session claims carried in every tsumi token.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::jwt::{TokenHeader, encode};
use crate::prelude::*;
use crate::secret::Secret;

/// Decoded token payload identifying the authenticated user.
///
/// # JSON Format
///
/// ```json
/// {
///   "userId": 7,
///   "email": "a@b.com",
///   "name": "Alice",
///   "iat": 1700000000,
///   "exp": 1700086400
/// }
/// ```
///
/// `userId` is required; everything else may be absent. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated user ID.
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at, Unix seconds.
    #[serde(rename = "iat", default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<i64>,
    /// Expiration time, Unix seconds.
    #[serde(rename = "exp", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl SessionClaims {
    /// Creates claims for a user, valid for `lifetime` starting now.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::TimeDelta;
    /// use tsumi_auth::claims::SessionClaims;
    ///
    /// let claims = SessionClaims::new(1, "a@b.com", "Alice", TimeDelta::hours(24)).unwrap();
    /// assert_eq!(claims.expires_at.unwrap() - claims.issued_at.unwrap(), 24 * 60 * 60);
    /// ```
    pub fn new(
        user_id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        lifetime: TimeDelta,
    ) -> Result<Self> {
        Self::new_at(user_id, email, name, lifetime, Utc::now())
    }

    /// Same as [`SessionClaims::new`] with an explicit issue instant.
    pub fn new_at(
        user_id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        lifetime: TimeDelta,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let expiration = now
            .checked_add_signed(lifetime)
            .ok_or(Error::InvalidLifetime)?;

        Ok(Self {
            user_id,
            email: Some(email.into()),
            name: Some(name.into()),
            issued_at: Some(now.timestamp()),
            expires_at: Some(expiration.timestamp()),
        })
    }

    /// Whether the claims have expired at `now` (Unix seconds).
    ///
    /// Claims without `exp` never expire.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }

    /// Fails with [`VerifyError::ExpiredToken`] once `exp` has passed.
    pub fn ensure_fresh(&self, now: i64) -> core::result::Result<(), VerifyError> {
        if self.is_expired_at(now) {
            Err(VerifyError::ExpiredToken)
        } else {
            Ok(())
        }
    }

    /// Signs the claims into a token with the default HS256 header.
    pub fn sign(&self, secret: &Secret) -> Result<String> {
        encode(&TokenHeader::default(), self, secret)
    }
}
