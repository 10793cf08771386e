use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC.
///
/// The role set is closed: every authenticated principal holds exactly one of
/// these at a time, stored durably against their identity. Parsing an unknown
/// role string yields `None` (fail closed) rather than an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Pastor,
    Admin,
    Treasurer,
    DeptLeader,
    Shepherd,
    Member,
}

impl Role {
    /// All roles, in descending management rank.
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Pastor,
        Role::Admin,
        Role::Treasurer,
        Role::DeptLeader,
        Role::Shepherd,
        Role::Member,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Pastor => "pastor",
            Role::Admin => "admin",
            Role::Treasurer => "treasurer",
            Role::DeptLeader => "dept_leader",
            Role::Shepherd => "shepherd",
            Role::Member => "member",
        }
    }

    /// Parse a role name. Unknown names are `None`, never a default role.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "super_admin" => Some(Role::SuperAdmin),
            "pastor" => Some(Role::Pastor),
            "admin" => Some(Role::Admin),
            "treasurer" => Some(Role::Treasurer),
            "dept_leader" => Some(Role::DeptLeader),
            "shepherd" => Some(Role::Shepherd),
            "member" => Some(Role::Member),
            _ => None,
        }
    }

    /// Management rank used by [`crate::registry::can_manage_role`].
    ///
    /// Higher rank manages lower rank, never an equal or higher one. This is
    /// a separate axis from the permission sets: holding a senior rank does
    /// not by itself grant any data permission.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 6,
            Role::Pastor => 5,
            Role::Admin => 4,
            Role::Treasurer => 3,
            Role::DeptLeader => 2,
            Role::Shepherd => 1,
            Role::Member => 0,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
