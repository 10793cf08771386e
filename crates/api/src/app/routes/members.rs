//! Member listing with query-level scoping.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use flock_auth::Permission;
use flock_store::Member;

use crate::app::{errors, AppState};
use crate::guard::require_permission;

pub fn router() -> Router {
    Router::new().route("/", get(list_members))
}

/// GET /members - scoped member listing.
///
/// The scope resolver runs first; an empty explicit scope short-circuits to
/// an empty page without querying the directory at all.
pub async fn list_members(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = match require_permission(&state, &headers, Permission::MembersView) {
        Ok(p) => p,
        Err(denied) => return denied,
    };

    let scope = match state.scope.member_scope(&principal) {
        Ok(scope) => scope,
        Err(e) => return errors::store_error_to_response(e),
    };

    if scope.is_empty() {
        return (StatusCode::OK, Json(serde_json::json!({ "items": [] }))).into_response();
    }

    let members = match state.directory.list_members() {
        Ok(members) => members,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items: Vec<_> = members
        .into_iter()
        .filter(|m| scope.allows(m.id))
        .map(member_to_json)
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

fn member_to_json(member: Member) -> serde_json::Value {
    serde_json::json!({
        "id": member.id.to_string(),
        "name": member.name,
        "email": member.email,
        "department_id": member.department_id.map(|id| id.to_string()),
        "active": member.active,
    })
}
