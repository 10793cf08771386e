//! Durable user-record store: role records keyed by auth-provider identity.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use flock_auth::Role;
use flock_core::{MemberId, UserId};

use crate::error::{StoreError, StoreResult};

/// Durable record for an authenticated identity.
///
/// Created lazily on first login; the role is the authoritative one (the
/// edge-layer role cookie is only a hint derived from this).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    /// Opaque stable identity from the external auth provider.
    pub identity: String,
    pub email: String,
    pub role: Role,
    /// Linked church-member record, when one exists.
    pub member_id: Option<MemberId>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for the lazy first-login create.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub identity: String,
    pub email: String,
    pub role: Role,
}

/// Contract for the durable user-record store.
///
/// `create_user_record` must be idempotent under concurrent duplicate
/// attempts: the store's uniqueness constraint on `identity` is the
/// correctness backstop, and "already exists" is success, not an error.
pub trait UserStore: Send + Sync {
    fn find_by_identity(&self, identity: &str) -> StoreResult<Option<UserRecord>>;

    fn find_role_by_identity(&self, identity: &str) -> StoreResult<Option<Role>> {
        Ok(self.find_by_identity(identity)?.map(|u| u.role))
    }

    fn create_user_record(&self, new: NewUserRecord) -> StoreResult<()>;

    fn set_role(&self, identity: &str, role: Role) -> StoreResult<()>;

    fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>>;

    fn list(&self) -> StoreResult<Vec<UserRecord>>;
}

/// In-memory user store (wiring and tests).
#[derive(Default)]
pub struct InMemoryUserStore {
    // Keyed by identity: the map key is the uniqueness constraint.
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a fully-formed record (tests).
    pub fn insert(&self, record: UserRecord) {
        self.users
            .write()
            .expect("user store lock poisoned")
            .insert(record.identity.clone(), record);
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_identity(&self, identity: &str) -> StoreResult<Option<UserRecord>> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.get(identity).cloned())
    }

    fn create_user_record(&self, new: NewUserRecord) -> StoreResult<()> {
        let mut users = self.users.write().expect("user store lock poisoned");
        if users.contains_key(&new.identity) {
            // Lost the create race (or a re-login): the record exists, which
            // is the outcome the caller wanted.
            tracing::debug!(identity = %new.identity, "user record already exists");
            return Ok(());
        }
        users.insert(
            new.identity.clone(),
            UserRecord {
                user_id: UserId::new(),
                identity: new.identity,
                email: new.email,
                role: new.role,
                member_id: None,
                display_name: None,
                photo_url: None,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn set_role(&self, identity: &str, role: Role) -> StoreResult<()> {
        let mut users = self.users.write().expect("user store lock poisoned");
        match users.get_mut(identity) {
            Some(user) => {
                user.role = role;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let users = self.users.read().expect("user store lock poisoned");
        Ok(users.values().find(|u| u.user_id == id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().expect("user store lock poisoned");
        let mut all: Vec<_> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(all)
    }
}
