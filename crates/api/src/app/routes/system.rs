use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::session::{cookie_value, SESSION_COOKIE};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub error: Option<String>,
}

/// Default authenticated landing page. Page guards redirect here with
/// `?error=unauthorized` for soft denials.
pub async fn dashboard(Query(query): Query<DashboardQuery>) -> axum::response::Response {
    Json(serde_json::json!({
        "page": "dashboard",
        "error": query.error,
    }))
    .into_response()
}

/// Coarse-denial landing page (edge interceptor target).
pub async fn unauthorized() -> axum::response::Response {
    Json(serde_json::json!({
        "page": "unauthorized",
        "message": "you do not have access to that area",
    }))
    .into_response()
}

pub async fn whoami(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    let principal = cookie_value(&headers, SESSION_COOKIE)
        .and_then(|token| state.identity.resolve_principal(&token));

    match principal {
        Some(p) => Json(serde_json::json!({
            "identity": p.identity,
            "email": p.email,
            "role": p.role.as_str(),
            "member_id": p.member_id.map(|id| id.to_string()),
            "display_name": p.display_name,
        }))
        .into_response(),
        // The edge interceptor normally catches this; kept for direct calls.
        None => axum::response::Redirect::to("/login").into_response(),
    }
}
