//! Read-only domain directory: members, departments, care assignments.
//!
//! The scope resolver is the only authorization-core consumer; everything
//! here is a lookup, never a mutation.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use flock_core::{AssignmentId, DepartmentId, MemberId};

use crate::error::StoreResult;

/// A church member record (directory view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub active: bool,
}

/// A department with an optional leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub leader_member_id: Option<MemberId>,
    pub active: bool,
}

/// A shepherd-to-member care assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShepherdAssignment {
    pub id: AssignmentId,
    pub shepherd_member_id: MemberId,
    pub member_id: MemberId,
    pub active: bool,
}

/// Read-only contract over the member/department/assignment data.
pub trait DirectoryStore: Send + Sync {
    fn member_by_id(&self, id: MemberId) -> StoreResult<Option<Member>>;

    /// The member record linked to an auth-provider identity, if any.
    fn member_for_identity(&self, identity: &str) -> StoreResult<Option<Member>>;

    /// The active department this member leads, if any.
    fn department_led_by(&self, member_id: MemberId) -> StoreResult<Option<Department>>;

    /// Active members of a department.
    fn active_department_member_ids(&self, dept_id: DepartmentId) -> StoreResult<Vec<MemberId>>;

    /// Members currently assigned to a shepherd (active assignments only).
    fn active_assigned_member_ids(&self, shepherd: MemberId) -> StoreResult<Vec<MemberId>>;

    fn list_members(&self) -> StoreResult<Vec<Member>>;
}

/// In-memory directory (wiring and tests).
#[derive(Default)]
pub struct InMemoryDirectory {
    members: RwLock<HashMap<MemberId, Member>>,
    departments: RwLock<HashMap<DepartmentId, Department>>,
    assignments: RwLock<Vec<ShepherdAssignment>>,
    identity_links: RwLock<HashMap<String, MemberId>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_member(&self, member: Member) {
        self.members
            .write()
            .expect("directory lock poisoned")
            .insert(member.id, member);
    }

    pub fn insert_department(&self, department: Department) {
        self.departments
            .write()
            .expect("directory lock poisoned")
            .insert(department.id, department);
    }

    pub fn insert_assignment(&self, assignment: ShepherdAssignment) {
        self.assignments
            .write()
            .expect("directory lock poisoned")
            .push(assignment);
    }

    pub fn link_identity(&self, identity: impl Into<String>, member_id: MemberId) {
        self.identity_links
            .write()
            .expect("directory lock poisoned")
            .insert(identity.into(), member_id);
    }
}

impl DirectoryStore for InMemoryDirectory {
    fn member_by_id(&self, id: MemberId) -> StoreResult<Option<Member>> {
        Ok(self
            .members
            .read()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned())
    }

    fn member_for_identity(&self, identity: &str) -> StoreResult<Option<Member>> {
        let links = self.identity_links.read().expect("directory lock poisoned");
        match links.get(identity) {
            Some(id) => self.member_by_id(*id),
            None => Ok(None),
        }
    }

    fn department_led_by(&self, member_id: MemberId) -> StoreResult<Option<Department>> {
        let departments = self.departments.read().expect("directory lock poisoned");
        Ok(departments
            .values()
            .find(|d| d.active && d.leader_member_id == Some(member_id))
            .cloned())
    }

    fn active_department_member_ids(&self, dept_id: DepartmentId) -> StoreResult<Vec<MemberId>> {
        let members = self.members.read().expect("directory lock poisoned");
        Ok(members
            .values()
            .filter(|m| m.active && m.department_id == Some(dept_id))
            .map(|m| m.id)
            .collect())
    }

    fn active_assigned_member_ids(&self, shepherd: MemberId) -> StoreResult<Vec<MemberId>> {
        let assignments = self.assignments.read().expect("directory lock poisoned");
        Ok(assignments
            .iter()
            .filter(|a| a.active && a.shepherd_member_id == shepherd)
            .map(|a| a.member_id)
            .collect())
    }

    fn list_members(&self) -> StoreResult<Vec<Member>> {
        let members = self.members.read().expect("directory lock poisoned");
        let mut all: Vec<_> = members.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}
