use axum::{
    routing::{get, post},
    Router,
};

pub mod admin;
pub mod auth;
pub mod events;
pub mod finance;
pub mod members;
pub mod system;

/// Full routing tree. The edge interceptor layered in `app::build_app`
/// decides which of these a request may reach.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/unauthorized", get(system::unauthorized))
        .route("/dashboard", get(system::dashboard))
        .route("/whoami", get(system::whoami))
        .nest("/members", members::router())
        .nest("/events", events::router())
        .nest("/finance", finance::router())
        .nest("/admin", admin::router())
}
