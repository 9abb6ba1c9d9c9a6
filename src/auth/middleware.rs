//! Per-request session gate
//!
//! The policy is a pure predicate over (path, session-present): paths under
//! the protected prefix require authentication and redirect to the login
//! page otherwise; every other path is allowed regardless of session state.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::gateway::state::AppState;

pub const PROTECTED_PREFIX: &str = "/dashboard";
pub const LOGIN_PATH: &str = "/login";
pub const SESSION_COOKIE: &str = "session";

/// Gate decision for a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(&'static str),
}

/// Pure authorization predicate, no side effects
pub fn authorize(path: &str, authenticated: bool) -> Access {
    if path.starts_with(PROTECTED_PREFIX) && !authenticated {
        Access::Redirect(LOGIN_PATH)
    } else {
        Access::Allow
    }
}

/// Extract the session token from the Cookie header, if present
pub fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then_some(value)
    })
}

pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // A session is only "present" if the token signature and expiry check out
    let claims = session_cookie(request.headers())
        .and_then(|token| state.auth.verify_token(token).ok());
    let authenticated = claims.is_some();

    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }

    match authorize(request.uri().path(), authenticated) {
        Access::Allow => next.run(request).await,
        Access::Redirect(to) => {
            tracing::debug!(path = %request.uri().path(), "unauthenticated, redirecting");
            Redirect::to(to).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_protected_paths_require_auth() {
        assert_eq!(authorize("/dashboard", false), Access::Redirect(LOGIN_PATH));
        assert_eq!(
            authorize("/dashboard/invoices", false),
            Access::Redirect(LOGIN_PATH)
        );
        assert_eq!(
            authorize("/dashboard/customers", false),
            Access::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_protected_paths_allow_authenticated() {
        assert_eq!(authorize("/dashboard", true), Access::Allow);
        assert_eq!(authorize("/dashboard/invoices", true), Access::Allow);
    }

    #[test]
    fn test_public_paths_always_allowed() {
        for path in ["/", "/login", "/query", "/api/v1/health"] {
            assert_eq!(authorize(path, false), Access::Allow, "path {path}");
            assert_eq!(authorize(path, true), Access::Allow, "path {path}");
        }
    }

    #[test]
    fn test_session_cookie_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session=abc.def.ghi; other=1"),
        );
        assert_eq!(session_cookie(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_session_cookie_absent() {
        let headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_cookie(&headers), None);
    }
}
