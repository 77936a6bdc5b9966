//! Context resolver for extracting the caller identity from HTTP requests.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use cookie::Cookie;
use tsumi_auth::{
    AUTH_HEADER_PREFIX, SESSION_COOKIE, claims::SessionClaims, error::VerifyError, jwt::verify,
    secret::Secret,
};

use crate::ctx::Ctx;
use crate::prelude::*;

/// Decides whether a request carries a valid session.
///
/// Holds the signing secret injected at startup and nothing else, so clones are
/// cheap and requests can be checked concurrently without coordination.
#[derive(Clone, Debug)]
pub struct AuthGate {
    secret: Arc<Secret>,
}

impl AuthGate {
    pub fn new(secret: Arc<Secret>) -> Self {
        Self { secret }
    }

    /// Resolves the caller identity from request headers.
    ///
    /// `now` is the current Unix time in seconds, used for the expiry check.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
    /// use chrono::TimeDelta;
    /// use tsumi_auth::{claims::SessionClaims, error::VerifyError, secret::Secret};
    /// use tsumi_web::ctx::resolver::AuthGate;
    ///
    /// let secret = Arc::new(Secret::new("MySuperSecret").unwrap());
    /// let gate = AuthGate::new(secret.clone());
    ///
    /// let mut headers = HeaderMap::new();
    /// assert_eq!(gate.authenticate(&headers, 0), Err(VerifyError::NoCredentials));
    ///
    /// let token = SessionClaims::new(7, "a@b.com", "Alice", TimeDelta::hours(1))
    ///     .unwrap()
    ///     .sign(&secret)
    ///     .unwrap();
    /// headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());
    /// assert_eq!(gate.authenticate(&headers, 0).unwrap().user_id, 7);
    /// ```
    pub fn authenticate(
        &self,
        headers: &HeaderMap,
        now: i64,
    ) -> core::result::Result<Ctx, VerifyError> {
        let token = extract_token(headers).ok_or(VerifyError::NoCredentials)?;
        let claims: SessionClaims = verify(&token, &self.secret)?;
        claims.ensure_fresh(now)?;
        Ok(Ctx::from(claims))
    }
}

/// Finds the candidate token in a request.
///
/// An `Authorization: Bearer <token>` header wins, even when nothing follows the
/// prefix. Otherwise the `tsumi_session` cookie is used, percent-decoded; an
/// empty cookie counts as absent.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| session_cookie(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(AUTH_HEADER_PREFIX))
        .map(|token| token.to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == SESSION_COOKIE && !c.value().is_empty())
        .and_then(|c| urlencoding::decode(c.value()).ok().map(|v| v.into_owned()))
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(Error::CtxMissing)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::{TimeDelta, Utc};

    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn secret() -> Arc<Secret> {
        Arc::new(Secret::new("MySuperSecret").unwrap())
    }

    fn token_for(user_id: i64, secret: &Secret) -> String {
        SessionClaims::new(user_id, "a@b.com", "Alice", TimeDelta::hours(24))
            .unwrap()
            .sign(secret)
            .unwrap()
    }

    fn headers(pairs: &[(axum::http::HeaderName, String)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    fn now() -> i64 {
        Utc::now().timestamp()
    }

    #[test]
    fn no_headers_means_no_credentials() {
        let gate = AuthGate::new(secret());
        assert_eq!(
            gate.authenticate(&HeaderMap::new(), NOW),
            Err(VerifyError::NoCredentials)
        );
    }

    #[test]
    fn bearer_token_is_accepted() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[(AUTHORIZATION, format!("Bearer {}", token_for(7, &secret)))]);
        let ctx = gate.authenticate(&map, now()).unwrap();
        assert_eq!(ctx.user_id, 7);
        assert_eq!(ctx.claims.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn bearer_takes_precedence_over_cookie() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[
            (AUTHORIZATION, format!("Bearer {}", token_for(7, &secret))),
            (COOKIE, format!("{SESSION_COOKIE}=not.a.token")),
        ]);
        assert_eq!(gate.authenticate(&map, now()).unwrap().user_id, 7);
    }

    #[test]
    fn invalid_bearer_does_not_fall_back_to_cookie() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[
            (AUTHORIZATION, String::from("Bearer garbage")),
            (COOKIE, format!("{SESSION_COOKIE}={}", token_for(7, &secret))),
        ]);
        assert_eq!(
            gate.authenticate(&map, now()),
            Err(VerifyError::MalformedToken)
        );
    }

    #[test]
    fn cookie_is_found_among_others() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[(
            COOKIE,
            format!(
                "theme=dark; {SESSION_COOKIE}={}; lang=ja",
                token_for(9, &secret)
            ),
        )]);
        assert_eq!(gate.authenticate(&map, now()).unwrap().user_id, 9);
    }

    #[test]
    fn cookie_value_is_percent_decoded() {
        let secret = secret();
        let token = token_for(4, &secret);
        let encoded = token.replace('.', "%2E");
        let map = headers(&[(COOKIE, format!("{SESSION_COOKIE}={encoded}"))]);
        assert_eq!(extract_token(&map), Some(token));
    }

    #[test]
    fn cookie_in_second_header_line_is_found() {
        let map = headers(&[
            (COOKIE, String::from("theme=dark")),
            (COOKIE, format!("{SESSION_COOKIE}=a.b.c")),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("a.b.c"));
    }

    #[test]
    fn other_auth_schemes_fall_through_to_cookie() {
        let map = headers(&[
            (AUTHORIZATION, String::from("Basic dXNlcjpwYXNz")),
            (COOKIE, format!("{SESSION_COOKIE}=a.b.c")),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some("a.b.c"));
    }

    #[test]
    fn similarly_named_cookie_is_ignored() {
        let map = headers(&[(COOKIE, format!("x{SESSION_COOKIE}=a.b.c"))]);
        assert_eq!(extract_token(&map), None);
    }

    #[test]
    fn empty_bearer_does_not_fall_back_to_cookie() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[
            (AUTHORIZATION, String::from("Bearer ")),
            (COOKIE, format!("{SESSION_COOKIE}={}", token_for(7, &secret))),
        ]);
        assert_eq!(extract_token(&map).as_deref(), Some(""));
        assert_eq!(
            gate.authenticate(&map, now()),
            Err(VerifyError::MalformedToken)
        );
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let gate = AuthGate::new(secret());
        let map = headers(&[(COOKIE, format!("{SESSION_COOKIE}="))]);
        assert_eq!(extract_token(&map), None);
        assert_eq!(
            gate.authenticate(&map, now()),
            Err(VerifyError::NoCredentials)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let gate = AuthGate::new(secret());
        let other = Secret::new("another secret").unwrap();
        let map = headers(&[(AUTHORIZATION, format!("Bearer {}", token_for(7, &other)))]);
        assert_eq!(
            gate.authenticate(&map, now()),
            Err(VerifyError::SignatureInvalid)
        );
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let issued = chrono::DateTime::from_timestamp(NOW, 0).unwrap();
        let token = SessionClaims::new_at(1, "a@b.com", "Alice", TimeDelta::seconds(60), issued)
            .unwrap()
            .sign(&secret)
            .unwrap();
        let map = headers(&[(AUTHORIZATION, format!("Bearer {token}"))]);
        assert!(gate.authenticate(&map, NOW + 60).is_ok());
        assert_eq!(
            gate.authenticate(&map, NOW + 61),
            Err(VerifyError::ExpiredToken)
        );
    }

    #[test]
    fn repeated_authentication_is_stable() {
        let secret = secret();
        let gate = AuthGate::new(secret.clone());
        let map = headers(&[(AUTHORIZATION, format!("Bearer {}", token_for(7, &secret)))]);
        let first = gate.authenticate(&map, now()).unwrap();
        for _ in 0..10 {
            assert_eq!(gate.authenticate(&map, now()).unwrap(), first);
        }
    }
}
