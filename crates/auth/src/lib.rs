//! `flock-auth` — pure authorization core (zero-trust, fail closed).
//!
//! This crate is intentionally decoupled from HTTP and storage. It holds the
//! single source of truth for role/permission policy; enforcement layers call
//! into it rather than re-deriving any rule.

pub mod permissions;
pub mod registry;
pub mod roles;
pub mod routes;
pub mod scope;

pub use permissions::Permission;
pub use registry::{can_manage_role, has_permission, has_permission_named, permissions_for};
pub use roles::Role;
pub use routes::{is_public_route, required_roles, route_allows};
pub use scope::ScopeSet;
