//! Edge interceptor: coarse, cookie-driven route gate.
//!
//! Runs before every handler. Verifying the session token is pure crypto (no
//! I/O); the role comes from the `role_hint` cookie as a fast path. The hint
//! is never placed in request extensions; fine-grained guards re-resolve
//! the role from the durable store.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use flock_auth::{is_public_route, route_allows, Role};

use crate::app::AppState;
use crate::session::{cookie_value, ROLE_HINT_COOKIE, SESSION_COOKIE};

/// Landing page for authenticated principals.
pub const DEFAULT_LANDING: &str = "/dashboard";

pub async fn edge_interceptor(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let authenticated = cookie_value(req.headers(), SESSION_COOKIE)
        .map(|token| state.verifier.verify(&token).is_some())
        .unwrap_or(false);

    if is_public_route(&path) {
        // Reverse guard: a signed-in principal has no business on the login
        // page; bounce to the landing page.
        if authenticated && (path == "/login" || path.starts_with("/login/")) {
            return Redirect::to(DEFAULT_LANDING).into_response();
        }
        return next.run(req).await;
    }

    if !authenticated {
        return Redirect::to("/login").into_response();
    }

    // Coarse role check from the hint cookie. Absent or garbled hints parse
    // to the lowest-privilege role (fail closed); the worst a forged hint can
    // do is pass this gate, and every page guard re-checks authoritatively.
    let hint = cookie_value(req.headers(), ROLE_HINT_COOKIE)
        .and_then(|v| Role::parse(&v))
        .unwrap_or(Role::Member);

    if !route_allows(&path, hint) {
        tracing::debug!(%path, role = %hint, "edge interceptor denied route");
        return Redirect::to("/unauthorized").into_response();
    }

    next.run(req).await
}
