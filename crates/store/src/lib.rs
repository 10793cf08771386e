//! `flock-store` — durable-store contracts consumed by the authorization core.
//!
//! Persistence itself is delegated to external collaborators; this crate
//! defines the trait boundaries (user-record store, read-only domain
//! directory) plus in-memory implementations used for wiring and tests.

pub mod directory;
pub mod error;
pub mod users;

pub use directory::{Department, DirectoryStore, InMemoryDirectory, Member, ShepherdAssignment};
pub use error::{StoreError, StoreResult};
pub use users::{InMemoryUserStore, NewUserRecord, UserRecord, UserStore};
