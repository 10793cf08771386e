//! HTTP enforcement pipeline: edge interceptor, identity resolution, page
//! guards, and query-level scoping over the pure policy in `flock-auth`.

pub mod app;
pub mod context;
pub mod guard;
pub mod identity;
pub mod middleware;
pub mod scope;
pub mod session;
