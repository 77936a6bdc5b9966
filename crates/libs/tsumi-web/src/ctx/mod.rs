//! Request identity context.
//!
//! A [`Ctx`] exists only for requests that passed the auth gate. Handlers take it
//! as an extractor argument; see [`resolver`] for how it is produced.

use tsumi_auth::claims::SessionClaims;

pub mod resolver;

/// Authenticated caller of the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// ID of the authenticated user.
    pub user_id: i64,
    /// The verified token payload, exactly as decoded.
    pub claims: SessionClaims,
}

impl From<SessionClaims> for Ctx {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.user_id,
            claims,
        }
    }
}

impl Ctx {
    /// Email recorded in the token, if any.
    pub fn email(&self) -> Option<&str> {
        self.claims.email.as_deref()
    }

    /// Display name recorded in the token, if any.
    pub fn name(&self) -> Option<&str> {
        self.claims.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_comes_from_claims() {
        let claims: SessionClaims = serde_json::from_value(serde_json::json!({
            "userId": 3,
            "email": "a@b.com"
        }))
        .unwrap();
        let ctx = Ctx::from(claims);
        assert_eq!(ctx.user_id, 3);
        assert_eq!(ctx.email(), Some("a@b.com"));
        assert_eq!(ctx.name(), None);
    }
}
