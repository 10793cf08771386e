//! Login/logout: session refresh is the one place the role-hint cookie is
//! written, from the authoritative store-backed role.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use serde::Deserialize;

use crate::app::{errors, AppState};
use crate::session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Session token issued by the external auth provider.
    pub token: String,
}

pub async fn login_page() -> axum::response::Response {
    Json(serde_json::json!({ "page": "login" })).into_response()
}

/// POST /login - exchange a provider-issued token for site cookies.
///
/// Sets the HttpOnly session cookie plus the non-HttpOnly `role_hint` cookie
/// the edge interceptor uses for its coarse check.
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let Some(principal) = state.identity.resolve_principal(&body.token) else {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_session",
            "session token was not accepted",
        );
    };

    tracing::info!(identity = %principal.identity, role = %principal.role, "login");

    (
        StatusCode::OK,
        AppendHeaders([
            (SET_COOKIE, session::session_cookie(&body.token)),
            (SET_COOKIE, session::role_hint_cookie(principal.role)),
        ]),
        Json(serde_json::json!({
            "success": true,
            "role": principal.role.as_str(),
            "display_name": principal.display_name,
        })),
    )
        .into_response()
}

pub async fn logout() -> axum::response::Response {
    (
        StatusCode::OK,
        AppendHeaders([
            (SET_COOKIE, session::clear_cookie(session::SESSION_COOKIE)),
            (SET_COOKIE, session::clear_cookie(session::ROLE_HINT_COOKIE)),
        ]),
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}
