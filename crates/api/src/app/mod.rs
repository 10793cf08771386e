//! HTTP application wiring (axum router + state).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent JSON error responses
//! - `AppState`: shared resolvers and store handles

use std::sync::Arc;

use axum::{Extension, Router};

use flock_store::{DirectoryStore, UserStore};

use crate::identity::IdentityResolver;
use crate::middleware;
use crate::scope::ScopeResolver;
use crate::session::{Hs256SessionVerifier, SessionVerifier};

pub mod errors;
pub mod routes;

/// Shared per-process state; everything request-scoped lives on the stack.
pub struct AppState {
    pub verifier: Arc<dyn SessionVerifier>,
    pub users: Arc<dyn UserStore>,
    pub directory: Arc<dyn DirectoryStore>,
    pub identity: IdentityResolver,
    pub scope: ScopeResolver,
}

impl AppState {
    pub fn new(
        session_secret: &[u8],
        users: Arc<dyn UserStore>,
        directory: Arc<dyn DirectoryStore>,
    ) -> Self {
        let verifier: Arc<dyn SessionVerifier> = Arc::new(Hs256SessionVerifier::new(session_secret));
        let identity =
            IdentityResolver::new(Arc::clone(&verifier), Arc::clone(&users), Arc::clone(&directory));
        let scope = ScopeResolver::new(Arc::clone(&directory));

        Self {
            verifier,
            users,
            directory,
            identity,
            scope,
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(state: AppState) -> Router {
    let state = Arc::new(state);

    routes::router()
        .layer(Extension(Arc::clone(&state)))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::edge_interceptor,
        ))
}
