//! Scope resolver: role + relationship data → visible member set.
//!
//! One shared component; list operations must come through here rather than
//! rebuilding role-specific filters at call sites.

use std::sync::Arc;

use flock_auth::{Role, ScopeSet};
use flock_core::MemberId;
use flock_store::{DirectoryStore, StoreResult};

use crate::context::Principal;

/// Roles whose member scope is unconditionally unrestricted.
const UNRESTRICTED_ROLES: &[Role] = &[Role::SuperAdmin, Role::Pastor, Role::Admin];

pub struct ScopeResolver {
    directory: Arc<dyn DirectoryStore>,
}

impl ScopeResolver {
    pub fn new(directory: Arc<dyn DirectoryStore>) -> Self {
        Self { directory }
    }

    /// Compute the member records this principal may see.
    ///
    /// Fail closed: roles without a recognized scoping rule get the empty
    /// set, as does a shepherd with no active assignments or a department
    /// leader with no active department.
    pub fn member_scope(&self, principal: &Principal) -> StoreResult<ScopeSet> {
        if UNRESTRICTED_ROLES.contains(&principal.role) {
            return Ok(ScopeSet::Unrestricted);
        }

        match principal.role {
            Role::Shepherd => {
                let Some(member_id) = self.linked_member_id(principal)? else {
                    return Ok(ScopeSet::empty());
                };
                let ids = self.directory.active_assigned_member_ids(member_id)?;
                Ok(ScopeSet::from_ids(ids))
            }
            Role::DeptLeader => {
                let Some(member_id) = self.linked_member_id(principal)? else {
                    return Ok(ScopeSet::empty());
                };
                let Some(department) = self.directory.department_led_by(member_id)? else {
                    return Ok(ScopeSet::empty());
                };
                let ids = self.directory.active_department_member_ids(department.id)?;
                Ok(ScopeSet::from_ids(ids))
            }
            _ => Ok(ScopeSet::empty()),
        }
    }

    fn linked_member_id(&self, principal: &Principal) -> StoreResult<Option<MemberId>> {
        if principal.member_id.is_some() {
            return Ok(principal.member_id);
        }
        // Enrichment may have been skipped; the directory stays authoritative.
        Ok(self
            .directory
            .member_for_identity(&principal.identity)?
            .map(|m| m.id))
    }
}
