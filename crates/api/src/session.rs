//! Session verification boundary and cookie plumbing.
//!
//! The external auth provider issues HS256-signed session tokens; this module
//! verifies them behind a trait so the rest of the pipeline never touches the
//! token format.

use axum::http::HeaderMap;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Session cookie carrying the provider token (HttpOnly).
pub const SESSION_COOKIE: &str = "flock_session";

/// Fast-path role indicator for the edge interceptor.
///
/// Not HttpOnly, site-wide, ~7 days. Page guards never trust this alone.
pub const ROLE_HINT_COOKIE: &str = "role_hint";

const ROLE_HINT_MAX_AGE_SECS: u64 = 7 * 24 * 60 * 60;

/// Verified identity extracted from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub identity: String,
    pub email: String,
}

/// Claims carried in the provider's session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject / provider identity.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// External auth provider boundary: `verify` answers "who is this session
/// for", or `None` when the token is absent, malformed, or expired.
pub trait SessionVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Option<SessionIdentity>;
}

/// HS256 verifier over shared-secret session tokens.
pub struct Hs256SessionVerifier {
    decoding: DecodingKey,
}

impl Hs256SessionVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl SessionVerifier for Hs256SessionVerifier {
    fn verify(&self, token: &str) -> Option<SessionIdentity> {
        let validation = Validation::new(Algorithm::HS256);
        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => Some(SessionIdentity {
                identity: data.claims.sub,
                email: data.claims.email,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "session token rejected");
                None
            }
        }
    }
}

/// Read a single cookie value from the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    for pair in raw.split(';') {
        if let Some((key, value)) = pair.trim().split_once('=') {
            if key == name {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// `Set-Cookie` value for the session token.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value for the role hint.
pub fn role_hint_cookie(role: flock_auth::Role) -> String {
    format!(
        "{ROLE_HINT_COOKIE}={}; Path=/; Max-Age={ROLE_HINT_MAX_AGE_SECS}; SameSite=Lax",
        role.as_str()
    )
}

/// `Set-Cookie` value clearing a cookie.
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}
