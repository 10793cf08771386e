//! Event pages: a viewable listing plus a creation page with a stricter
//! permission, exercising the two-tier page-guard fallback.

use std::sync::Arc;

use axum::{
    extract::Extension, http::HeaderMap, response::IntoResponse, routing::get, Json, Router,
};

use flock_auth::Permission;

use crate::app::AppState;
use crate::guard::require_permission;

pub fn router() -> Router {
    Router::new()
        .route("/", get(events_page))
        .route("/new", get(new_event_page))
}

pub async fn events_page(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    match require_permission(&state, &headers, Permission::EventsView) {
        Ok(_) => Json(serde_json::json!({ "page": "events" })).into_response(),
        Err(denied) => denied,
    }
}

pub async fn new_event_page(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    match require_permission(&state, &headers, Permission::EventsCreate) {
        Ok(_) => Json(serde_json::json!({ "page": "events_new" })).into_response(),
        Err(denied) => denied,
    }
}
