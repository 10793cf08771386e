//! Identity resolver: verified session → durable role → `Principal`.

use std::sync::Arc;

use flock_auth::Role;
use flock_store::{DirectoryStore, NewUserRecord, StoreError, UserStore};

use crate::context::Principal;
use crate::session::{SessionIdentity, SessionVerifier};

/// First-login default. Lowest privilege; an administrator raises it later.
const DEFAULT_ROLE: Role = Role::Member;

/// Resolves the authenticated principal for a request.
///
/// Two entry points with different failure semantics: [`resolve_principal`]
/// degrades store failures to the default role (fail-safe but restrictive),
/// [`resolve_principal_strict`] propagates them for administrative contexts.
///
/// [`resolve_principal`]: IdentityResolver::resolve_principal
/// [`resolve_principal_strict`]: IdentityResolver::resolve_principal_strict
pub struct IdentityResolver {
    verifier: Arc<dyn SessionVerifier>,
    users: Arc<dyn UserStore>,
    directory: Arc<dyn DirectoryStore>,
}

impl IdentityResolver {
    pub fn new(
        verifier: Arc<dyn SessionVerifier>,
        users: Arc<dyn UserStore>,
        directory: Arc<dyn DirectoryStore>,
    ) -> Self {
        Self {
            verifier,
            users,
            directory,
        }
    }

    /// Resolve the principal for a session token, or `None` when the session
    /// is absent or invalid.
    ///
    /// A store failure during role lookup degrades to [`Role::Member`] with a
    /// warning rather than failing the request.
    pub fn resolve_principal(&self, token: &str) -> Option<Principal> {
        let session = self.verifier.verify(token)?;

        let role = match self.durable_role(&session) {
            Ok(role) => role,
            Err(e) => {
                tracing::warn!(
                    identity = %session.identity,
                    error = %e,
                    "role lookup failed; degrading to default role"
                );
                DEFAULT_ROLE
            }
        };

        Some(self.build_principal(session, role))
    }

    /// Like [`IdentityResolver::resolve_principal`], but store failures
    /// propagate instead of degrading. Administrative actions use this.
    pub fn resolve_principal_strict(
        &self,
        token: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let Some(session) = self.verifier.verify(token) else {
            return Ok(None);
        };

        let role = self.durable_role(&session)?;
        Ok(Some(self.build_principal(session, role)))
    }

    /// Look up the durable role, lazily creating the user record on first
    /// login. Duplicate creates (concurrent first requests) are success; the
    /// store's uniqueness constraint is the backstop.
    fn durable_role(&self, session: &SessionIdentity) -> Result<Role, StoreError> {
        if let Some(role) = self.users.find_role_by_identity(&session.identity)? {
            return Ok(role);
        }

        match self.users.create_user_record(NewUserRecord {
            identity: session.identity.clone(),
            email: session.email.clone(),
            role: DEFAULT_ROLE,
        }) {
            Ok(()) => {}
            Err(StoreError::Conflict(_)) => {
                tracing::debug!(identity = %session.identity, "lost first-login create race");
            }
            Err(e) => return Err(e),
        }

        // Re-read: a concurrent creator may have won with the same default.
        Ok(self
            .users
            .find_role_by_identity(&session.identity)?
            .unwrap_or(DEFAULT_ROLE))
    }

    /// Attach display attributes from the linked member record, best-effort.
    fn build_principal(&self, session: SessionIdentity, role: Role) -> Principal {
        let mut principal = Principal {
            identity: session.identity,
            email: session.email,
            role,
            member_id: None,
            display_name: None,
        };

        match self.directory.member_for_identity(&principal.identity) {
            Ok(Some(member)) => {
                principal.member_id = Some(member.id);
                principal.display_name = Some(member.name);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = %e, "profile enrichment skipped");
            }
        }

        principal
    }
}
