//! Page-level guard: fine-grained permission enforcement.
//!
//! Unlike the edge interceptor, guards resolve the principal's role from the
//! durable store; the role cookie is never consulted here.

use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};

use flock_auth::{has_permission, Permission};

use crate::app::AppState;
use crate::context::Principal;
use crate::session::{cookie_value, SESSION_COOKIE};

/// Enforce `required` for the current request.
///
/// Denials come back as redirect responses: unauthenticated → `/login`;
/// under-privileged → `/dashboard?error=unauthorized` when the principal at
/// least holds baseline self-service access, otherwise `/login`. The softer
/// landing avoids bouncing a known, signed-in user back through login.
pub fn require_permission(
    state: &AppState,
    headers: &HeaderMap,
    required: Permission,
) -> Result<Principal, Response> {
    let principal = cookie_value(headers, SESSION_COOKIE)
        .and_then(|token| state.identity.resolve_principal(&token));

    let Some(principal) = principal else {
        return Err(Redirect::to("/login").into_response());
    };

    if has_permission(principal.role, required) {
        return Ok(principal);
    }

    tracing::debug!(
        identity = %principal.identity,
        role = %principal.role,
        required = %required,
        "page guard denied"
    );

    if has_permission(principal.role, Permission::MembersViewOwn) {
        Err(Redirect::to("/dashboard?error=unauthorized").into_response())
    } else {
        Err(Redirect::to("/login").into_response())
    }
}
