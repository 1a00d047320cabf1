//! services/api/src/web/middleware.rs
//!
//! The session resolver: extracts token material from each request, verifies
//! it, and attaches the resolved identity to the request extensions.
//!
//! The resolver never rejects a request. A missing, expired, or tampered
//! token all resolve to anonymous, and each protected handler decides for
//! itself by taking [`CurrentUser`] in its signature. That keeps routes like
//! `/auth/status` answerable without authentication while making it
//! impossible for a protected handler to forget its guard.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use mindgarden_core::domain::Identity;
use std::sync::Arc;

use crate::web::state::AppState;
use crate::web::{failure, ApiFailure};

/// The identity attachment: `None` means anonymous.
#[derive(Clone)]
pub struct AuthContext(pub Option<Identity>);

/// Middleware that resolves the caller's identity and always proceeds.
pub async fn resolve_identity(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = extract_token(req.headers())
        .and_then(|token| state.tokens.verify(&token));
    req.extensions_mut().insert(AuthContext(identity));
    next.run(req).await
}

/// Pulls raw token material from the request, if any.
///
/// The `token` cookie takes precedence over an `Authorization: Bearer`
/// header when both are present.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .find_map(|c| c.trim().strip_prefix("token="))
        })
        .filter(|t| !t.is_empty());
    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Extractor for handlers that require an authenticated caller.
///
/// Rejects with 401 when the session resolver attached an anonymous
/// identity. Expired and tampered tokens land here too; the caller is never
/// told which it was.
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthContext>() {
            Some(AuthContext(Some(identity))) => Ok(CurrentUser(identity.clone())),
            _ => Err(failure(StatusCode::UNAUTHORIZED, "Not authenticated")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn no_token_material_resolves_to_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn reads_the_token_cookie() {
        let headers = headers(&[(header::COOKIE, "theme=dark; token=abc123")]);
        assert_eq!(extract_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn reads_the_bearer_header() {
        let headers = headers(&[(header::AUTHORIZATION, "Bearer abc123")]);
        assert_eq!(extract_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn cookie_takes_precedence_over_bearer_header() {
        let headers = headers(&[
            (header::COOKIE, "token=from-cookie"),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&headers), Some("from-cookie".to_string()));
    }

    #[test]
    fn an_empty_cookie_falls_back_to_the_header() {
        let headers = headers(&[
            (header::COOKIE, "token="),
            (header::AUTHORIZATION, "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&headers), Some("from-header".to_string()));
    }
}
