//! Process-wide signing secret.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::JWT_SECRET_ENV;
use crate::prelude::*;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// HMAC key shared by token issuance and verification.
///
/// The key is loaded once at startup and never changes afterwards. It cannot be
/// empty, and neither `Debug` nor `Display` reveal it.
#[derive(Clone)]
pub struct Secret {
    mac: HmacSha256,
}

impl Secret {
    /// Builds a secret from raw key material.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tsumi_auth::secret::Secret;
    ///
    /// assert!(Secret::new("MySuperSecret").is_ok());
    /// assert!(Secret::new("").is_err());
    /// ```
    pub fn new(value: impl AsRef<[u8]>) -> Result<Self> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(Error::EmptySecret);
        }
        let mac = HmacSha256::new_from_slice(value).map_err(|_| Error::EmptySecret)?;
        Ok(Self { mac })
    }

    /// Reads the secret from the `JWT_SECRET` environment variable.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(JWT_SECRET_ENV).map_err(|_| Error::MissingSecret)?;
        Self::new(value)
    }

    /// Fresh keyed MAC instance, ready to absorb a message.
    pub(crate) fn mac(&self) -> HmacSha256 {
        self.mac.clone()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(REDACTED)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REDACTED")
    }
}
