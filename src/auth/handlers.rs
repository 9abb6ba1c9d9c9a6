//! Login and logout endpoints

use axum::{
    Form, Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use validator::Validate;

use super::middleware::{PROTECTED_PREFIX, SESSION_COOKIE};
use super::service::LoginForm;
use crate::gateway::{
    state::AppState,
    types::{ApiResponse, error_codes},
};

/// The only two messages a failed login can produce. Malformed input, unknown
/// email and wrong password all collapse into the first one.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";

fn login_rejected(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(error_codes::AUTH_FAILED, message)),
    )
        .into_response()
}

/// Login landing page (redirect target for the session gate)
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login prompt")
    ),
    tag = "Auth"
)]
pub async fn login_page() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Sign in to continue."))
}

/// Authenticate with email and password
///
/// POST /login (form submission)
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Authenticated; session cookie set, redirect to the dashboard"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    // Shape check before any lookup; rejected input gets the same message
    // as a credential mismatch
    if form.validate().is_err() {
        tracing::debug!("login rejected: malformed input");
        return login_rejected(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS);
    }

    match state
        .auth
        .verify_credentials(&form.email, &form.password)
        .await
    {
        Ok(Some(user)) => match state.auth.issue_token(&user) {
            Ok(token) => {
                let cookie = format!(
                    "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
                    SESSION_COOKIE,
                    token,
                    state.auth.session_ttl_secs()
                );
                ([(SET_COOKIE, cookie)], Redirect::to(PROTECTED_PREFIX)).into_response()
            }
            Err(e) => {
                tracing::error!("Failed to issue session token: {e}");
                login_rejected(StatusCode::INTERNAL_SERVER_ERROR, SOMETHING_WENT_WRONG)
            }
        },
        Ok(None) => {
            tracing::warn!("Login failed: invalid credentials");
            login_rejected(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
        }
        Err(e) => {
            tracing::error!("Login error: {e}");
            login_rejected(StatusCode::INTERNAL_SERVER_ERROR, SOMETHING_WENT_WRONG)
        }
    }
}

/// Clear the session cookie
///
/// POST /logout
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared, redirect to the landing page")
    ),
    tag = "Auth"
)]
pub async fn logout() -> Response {
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}
