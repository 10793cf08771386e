use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions form a closed `resource:action` set defined at build time;
/// nothing creates or destroys them at runtime. An unrecognized permission
/// string parses to `None`, which callers must treat as "no role grants it".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    MembersView,
    MembersViewOwn,
    MembersCreate,
    MembersEdit,
    MembersDelete,
    AttendanceView,
    AttendanceRecord,
    FinanceView,
    FinanceRecord,
    FinanceApprove,
    EventsView,
    EventsCreate,
    EventsEdit,
    MessagingSend,
    ReportsView,
    UsersManage,
    SettingsManage,
}

impl Permission {
    pub const ALL: [Permission; 17] = [
        Permission::MembersView,
        Permission::MembersViewOwn,
        Permission::MembersCreate,
        Permission::MembersEdit,
        Permission::MembersDelete,
        Permission::AttendanceView,
        Permission::AttendanceRecord,
        Permission::FinanceView,
        Permission::FinanceRecord,
        Permission::FinanceApprove,
        Permission::EventsView,
        Permission::EventsCreate,
        Permission::EventsEdit,
        Permission::MessagingSend,
        Permission::ReportsView,
        Permission::UsersManage,
        Permission::SettingsManage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::MembersView => "members:view",
            Permission::MembersViewOwn => "members:view_own",
            Permission::MembersCreate => "members:create",
            Permission::MembersEdit => "members:edit",
            Permission::MembersDelete => "members:delete",
            Permission::AttendanceView => "attendance:view",
            Permission::AttendanceRecord => "attendance:record",
            Permission::FinanceView => "finance:view",
            Permission::FinanceRecord => "finance:record",
            Permission::FinanceApprove => "finance:approve",
            Permission::EventsView => "events:view",
            Permission::EventsCreate => "events:create",
            Permission::EventsEdit => "events:edit",
            Permission::MessagingSend => "messaging:send",
            Permission::ReportsView => "reports:view",
            Permission::UsersManage => "users:manage",
            Permission::SettingsManage => "settings:manage",
        }
    }

    /// Parse a `resource:action` name. Unknown names are `None`.
    pub fn parse(s: &str) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
