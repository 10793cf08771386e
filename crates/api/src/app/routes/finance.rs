use std::sync::Arc;

use axum::{
    extract::Extension, http::HeaderMap, response::IntoResponse, routing::get, Json, Router,
};

use flock_auth::Permission;

use crate::app::AppState;
use crate::guard::require_permission;

pub fn router() -> Router {
    Router::new().route("/", get(finance_page))
}

pub async fn finance_page(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> axum::response::Response {
    match require_permission(&state, &headers, Permission::FinanceView) {
        Ok(principal) => Json(serde_json::json!({
            "page": "finance",
            "role": principal.role.as_str(),
        }))
        .into_response(),
        Err(denied) => denied,
    }
}
