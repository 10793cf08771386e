//! Route-prefix → allowed-roles table used by the edge interceptor.
//!
//! Prefixes are disjoint top-level segments, so first match suffices. A path
//! matching no prefix is authenticated-only: any role may proceed.

use crate::Role::{self, *};

/// Routes reachable without a session.
const PUBLIC_ROUTES: &[&str] = &["/login", "/logout", "/unauthorized", "/health"];

const ROUTE_ACCESS: &[(&str, &[Role])] = &[
    (
        "/dashboard",
        &[SuperAdmin, Pastor, Admin, Treasurer, DeptLeader, Shepherd, Member],
    ),
    ("/members", &[SuperAdmin, Pastor, Admin, DeptLeader, Shepherd]),
    ("/attendance", &[SuperAdmin, Pastor, Admin, DeptLeader, Shepherd]),
    ("/finance", &[SuperAdmin, Pastor, Admin, Treasurer]),
    (
        "/events",
        &[SuperAdmin, Pastor, Admin, Treasurer, DeptLeader, Shepherd, Member],
    ),
    ("/messaging", &[SuperAdmin, Pastor, Admin, DeptLeader]),
    ("/reports", &[SuperAdmin, Pastor, Admin, Treasurer]),
    ("/admin", &[SuperAdmin, Admin]),
    ("/settings", &[SuperAdmin, Admin]),
];

/// True iff the path bypasses authentication entirely.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|p| path == *p || path.starts_with(&format!("{p}/")))
}

/// The allowed-role set for a path, or `None` when no prefix matches
/// (authenticated-only).
pub fn required_roles(path: &str) -> Option<&'static [Role]> {
    ROUTE_ACCESS
        .iter()
        .find(|(prefix, _)| path == *prefix || path.starts_with(&format!("{prefix}/")))
        .map(|(_, roles)| *roles)
}

/// Coarse route check: may `role` enter `path`?
pub fn route_allows(path: &str, role: Role) -> bool {
    match required_roles(path) {
        Some(roles) => roles.contains(&role),
        None => true,
    }
}
