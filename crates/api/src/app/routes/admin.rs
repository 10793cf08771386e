//! Administrative routes: user records, role reassignment, and registry
//! introspection.
//!
//! Administrative contexts use strict identity resolution (store failures
//! propagate instead of degrading) and report failures as structured JSON,
//! never as silent no-ops.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;

use flock_auth::{can_manage_role, has_permission, permissions_for, Permission, Role};
use flock_core::UserId;
use flock_store::UserRecord;

use crate::app::{errors, AppState};
use crate::context::Principal;
use crate::session::{cookie_value, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", patch(set_user_role))
        .route("/roles", get(list_roles))
        .route("/permissions", get(list_permissions))
}

/// Strict guard for administrative handlers: resolve from the store (no
/// degradation) and require `users:manage`.
fn require_manager(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Principal, axum::response::Response> {
    let token = cookie_value(headers, SESSION_COOKIE).unwrap_or_default();

    let principal = state
        .identity
        .resolve_principal_strict(&token)
        .map_err(errors::store_error_to_response)?;

    let Some(principal) = principal else {
        return Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "no verifiable session",
        ));
    };

    if !has_permission(principal.role, Permission::UsersManage) {
        return Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "missing permission 'users:manage'",
        ));
    }

    Ok(principal)
}

/// GET /admin/users - list durable user records.
pub async fn list_users(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(denied) = require_manager(&state, &headers) {
        return denied;
    }

    let users = match state.users.list() {
        Ok(users) => users,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items: Vec<_> = users.into_iter().map(user_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// PATCH /admin/users/:id/role - reassign a user's role.
///
/// The acting role must rank strictly above both the target's current role
/// and the requested new role; no role manages its own rank or above.
pub async fn set_user_role(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> axum::response::Response {
    let actor = match require_manager(&state, &headers) {
        Ok(actor) => actor,
        Err(denied) => return denied,
    };

    let Some(new_role) = Role::parse(&body.role) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            format!("unknown role '{}'", body.role),
        );
    };

    let user_id = match UserId::from_str(&id) {
        Ok(user_id) => user_id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()),
    };

    let target = match state.users.find_by_id(user_id) {
        Ok(Some(target)) => target,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if !can_manage_role(actor.role, target.role) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "cannot_manage",
            format!("role '{}' cannot manage a '{}' user", actor.role, target.role),
        );
    }

    if !can_manage_role(actor.role, new_role) {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "cannot_manage",
            format!("role '{}' cannot grant role '{}'", actor.role, new_role),
        );
    }

    if let Err(e) = state.users.set_role(&target.identity, new_role) {
        return errors::store_error_to_response(e);
    }

    tracing::info!(
        actor = %actor.identity,
        target = %target.identity,
        from = %target.role,
        to = %new_role,
        "role reassigned"
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "user_id": user_id.to_string(),
            "role": new_role.as_str(),
        })),
    )
        .into_response()
}

/// GET /admin/roles - registry introspection: each role with its grant set.
pub async fn list_roles(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(denied) = require_manager(&state, &headers) {
        return denied;
    }

    let roles: Vec<_> = Role::ALL
        .into_iter()
        .map(|role| {
            serde_json::json!({
                "name": role.as_str(),
                "permissions": permissions_for(role)
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
}

/// GET /admin/permissions - the closed permission set.
pub async fn list_permissions(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(denied) = require_manager(&state, &headers) {
        return denied;
    }

    let permissions: Vec<_> = Permission::ALL.iter().map(|p| p.as_str()).collect();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "permissions": permissions })),
    )
        .into_response()
}

fn user_to_json(user: UserRecord) -> serde_json::Value {
    serde_json::json!({
        "user_id": user.user_id.to_string(),
        "identity": user.identity,
        "email": user.email,
        "role": user.role.as_str(),
        "member_id": user.member_id.map(|id| id.to_string()),
        "display_name": user.display_name,
        "created_at": user.created_at,
    })
}
