use flock_auth::Role;
use flock_core::MemberId;

/// The fully resolved principal for a request.
///
/// Built by the identity resolver from the verified session plus the durable
/// user record, never from the edge-layer role cookie, which is only a
/// routing hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Opaque stable identity from the external auth provider.
    pub identity: String,
    pub email: String,
    pub role: Role,
    /// Linked church-member record, when one exists.
    pub member_id: Option<MemberId>,
    /// Best-effort display attribute; absence never fails resolution.
    pub display_name: Option<String>,
}
