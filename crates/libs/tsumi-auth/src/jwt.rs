//! Compact HS256 token codec.
//!
//! A token is three base64url segments joined by `.`:
//! `base64url(JSON(header)).base64url(JSON(payload)).base64url(HMAC-SHA256(secret, H.P))`.
//! No padding is emitted. Decoding accepts padded and unpadded segments alike.
//!
//! - [`encode`]: sign any serializable header and payload
//! - [`verify`]: check structure and signature, then parse the payload
//!
//! # Examples
//!
//! ```rust
//! use serde_json::{Value, json};
//! use tsumi_auth::jwt::{TokenHeader, encode, verify};
//! use tsumi_auth::secret::Secret;
//!
//! let secret = Secret::new("MySuperSecret").unwrap();
//! let payload = json!({ "userId": 1, "name": "Alice" });
//!
//! let token = encode(&TokenHeader::default(), &payload, &secret).unwrap();
//! assert_eq!(token.split('.').count(), 3);
//!
//! let decoded: Value = verify(&token, &secret).unwrap();
//! assert_eq!(decoded, payload);
//! ```

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use hmac::Mac;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::prelude::*;
use crate::secret::Secret;

/// Signing algorithm tag written into every header.
pub const ALGORITHM: &str = "HS256";
/// Token type tag written into every header.
pub const TOKEN_TYPE: &str = "JWT";

/// RFC 4648 §5 alphabet, unpadded on output, padding-indifferent on input.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Token header. Field order is fixed so the serialized bytes are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: String::from(ALGORITHM),
            typ: String::from(TOKEN_TYPE),
        }
    }
}

/// Encodes bytes as unpadded base64url.
pub fn base64url_encode(bytes: impl AsRef<[u8]>) -> String {
    BASE64_URL.encode(bytes)
}

/// Decodes a base64url segment, with or without trailing `=` padding.
pub fn base64url_decode(segment: &str) -> core::result::Result<Vec<u8>, base64::DecodeError> {
    BASE64_URL.decode(segment)
}

/// Creates a signed token from a header and a payload.
///
/// Both values are serialized to JSON independently, so any `Serialize` type
/// producing a JSON object works, including `serde_json::Value`.
///
/// # Returns
///
/// * `Ok(String)` - `header.payload.signature`
/// * `Err(Error::Serialization)` - a value could not be serialized
pub fn encode<H, P>(header: &H, payload: &P, secret: &Secret) -> Result<String>
where
    H: Serialize,
    P: Serialize,
{
    let header = base64url_encode(serde_json::to_vec(header)?);
    let payload = base64url_encode(serde_json::to_vec(payload)?);
    let message = format!("{header}.{payload}");

    let mut mac = secret.mac();
    mac.update(message.as_bytes());
    let signature = base64url_encode(mac.finalize().into_bytes());

    Ok(format!("{message}.{signature}"))
}

/// Verifies a token signature and parses its payload.
///
/// Validation order:
/// - exactly three segments, otherwise [`VerifyError::MalformedToken`]
/// - signature recomputed over the first two segments and compared in constant
///   time, otherwise [`VerifyError::SignatureInvalid`]
/// - payload decoded and deserialized into `T`, otherwise
///   [`VerifyError::PayloadMalformed`]
///
/// Expiry is not checked here; see [`crate::claims::SessionClaims::ensure_fresh`].
pub fn verify<T>(token: &str, secret: &Secret) -> core::result::Result<T, VerifyError>
where
    T: DeserializeOwned,
{
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(VerifyError::MalformedToken);
    };

    let signature = base64url_decode(signature).map_err(|_| VerifyError::SignatureInvalid)?;

    let mut mac = secret.mac();
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| VerifyError::SignatureInvalid)?;

    let payload = base64url_decode(payload).map_err(|_| VerifyError::PayloadMalformed)?;
    serde_json::from_slice(&payload).map_err(|_| VerifyError::PayloadMalformed)
}
