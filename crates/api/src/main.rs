use std::sync::Arc;

use flock_store::{InMemoryDirectory, InMemoryUserStore};

#[tokio::main]
async fn main() {
    flock_observability::init();

    let session_secret = std::env::var("SESSION_SECRET").unwrap_or_else(|_| {
        tracing::warn!("SESSION_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    // In-memory stores; swap for provider-backed implementations in deploys.
    let users = Arc::new(InMemoryUserStore::new());
    let directory = Arc::new(InMemoryDirectory::new());

    let state = flock_api::app::AppState::new(session_secret.as_bytes(), users, directory);
    let app = flock_api::app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
