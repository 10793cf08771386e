use std::collections::HashSet;

use flock_core::MemberId;

/// The subset of member records a principal may act upon.
///
/// `Unrestricted` is only ever produced for the administrative role subset.
/// Every other role gets an explicit set, possibly empty; an empty set is a
/// deny-all decision, not an error. Computed fresh per request; never cached
/// across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSet {
    Unrestricted,
    Ids(HashSet<MemberId>),
}

impl ScopeSet {
    pub fn empty() -> Self {
        ScopeSet::Ids(HashSet::new())
    }

    pub fn from_ids(ids: impl IntoIterator<Item = MemberId>) -> Self {
        ScopeSet::Ids(ids.into_iter().collect())
    }

    /// True iff the scope permits acting on `id`.
    pub fn allows(&self, id: MemberId) -> bool {
        match self {
            ScopeSet::Unrestricted => true,
            ScopeSet::Ids(ids) => ids.contains(&id),
        }
    }

    /// True iff the scope is an explicit empty set (deny-all).
    ///
    /// Callers short-circuit to an empty result on this, skipping the store.
    pub fn is_empty(&self) -> bool {
        match self {
            ScopeSet::Unrestricted => false,
            ScopeSet::Ids(ids) => ids.is_empty(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ScopeSet::Unrestricted)
    }
}
