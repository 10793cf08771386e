//! Role → permission registry and role-management hierarchy.
//!
//! This table is the single source of truth for policy. Each role's grant set
//! is explicit; there is no inheritance between roles, even where one set
//! happens to contain another.

use crate::Permission::{self, *};
use crate::Role;

const SUPER_ADMIN: &[Permission] = &Permission::ALL;

const PASTOR: &[Permission] = &[
    MembersView,
    MembersViewOwn,
    MembersCreate,
    MembersEdit,
    AttendanceView,
    AttendanceRecord,
    FinanceView,
    FinanceApprove,
    EventsView,
    EventsCreate,
    EventsEdit,
    MessagingSend,
    ReportsView,
];

const ADMIN: &[Permission] = &[
    MembersView,
    MembersViewOwn,
    MembersCreate,
    MembersEdit,
    MembersDelete,
    AttendanceView,
    AttendanceRecord,
    FinanceView,
    EventsView,
    EventsCreate,
    EventsEdit,
    MessagingSend,
    ReportsView,
    UsersManage,
    SettingsManage,
];

const TREASURER: &[Permission] = &[
    MembersViewOwn,
    FinanceView,
    FinanceRecord,
    FinanceApprove,
    ReportsView,
];

const DEPT_LEADER: &[Permission] = &[
    MembersView,
    MembersViewOwn,
    AttendanceView,
    AttendanceRecord,
    EventsView,
    MessagingSend,
];

const SHEPHERD: &[Permission] = &[
    MembersView,
    MembersViewOwn,
    AttendanceView,
    AttendanceRecord,
    EventsView,
];

const MEMBER: &[Permission] = &[MembersViewOwn, EventsView];

/// The explicit grant set for a role.
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN,
        Role::Pastor => PASTOR,
        Role::Admin => ADMIN,
        Role::Treasurer => TREASURER,
        Role::DeptLeader => DEPT_LEADER,
        Role::Shepherd => SHEPHERD,
        Role::Member => MEMBER,
    }
}

/// True iff `permission` is a member of the role's grant set.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// String-form check for callers holding an unvalidated permission name.
///
/// An unrecognized name is granted by no role.
pub fn has_permission_named(role: Role, name: &str) -> bool {
    match Permission::parse(name) {
        Some(permission) => has_permission(role, permission),
        None => false,
    }
}

/// True iff `acting` ranks strictly above `target` in the management
/// hierarchy.
///
/// This governs administrative role reassignment only; it says nothing about
/// data access. No role manages a role equal or senior to itself.
pub fn can_manage_role(acting: Role, target: Role) -> bool {
    acting.rank() > target.rank()
}
