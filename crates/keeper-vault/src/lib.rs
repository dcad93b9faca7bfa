//! # keeper-vault: Encrypted Key-Value Storage for Keeper
//!
//! This crate owns the client-side storage boundary: a file-backed key-value
//! vault whose values are optionally encrypted, plus the two consumers that
//! live directly on top of it (the activity log and the domain state
//! container).
//!
//! ## Data Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DomainStore (container)                                     │
//! │    add/update/delete entity                                  │
//! │        │ 1. mutate in-memory collection                      │
//! │        │ 2. persist full collection (encrypted)              │
//! │        │ 3. append activity record                           │
//! │        ▼                                                     │
//! │  Vault (store)  ── save(key, value, encrypt) ──┐             │
//! │        │                                       ▼             │
//! │        │                              SecureCodec            │
//! │        │                              AES-256-GCM            │
//! │        ▼                                                     │
//! │  <root>/logins.dat, tasks.dat, ..., activities.dat           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`codec`] - Symmetric encryption/decryption with a machine-derived key
//! - [`store`] - Keyed persistence store (save/load with default fallback)
//! - [`activity`] - Bounded, most-recent-first activity log
//! - [`container`] - In-memory state container for the five entity
//!   collections, mirrored to the vault on every mutation
//! - [`config`] - Vault configuration
//! - [`error`] - Vault error types

pub mod activity;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod store;

pub use activity::ActivityLog;
pub use codec::SecureCodec;
pub use config::VaultConfig;
pub use container::DomainStore;
pub use error::{VaultError, VaultResult};
pub use store::Vault;

/// Fixed keys of the persisted namespace.
///
/// Each key holds a JSON-serialized array, encrypted as a whole string value.
pub mod keys {
    pub const LOGINS: &str = "logins";
    pub const TASKS: &str = "tasks";
    pub const ROUTINES: &str = "routines";
    pub const NOTES: &str = "notes";
    pub const FAVORITES: &str = "favorites";
    pub const ACTIVITIES: &str = "activities";
    /// Reserved slot in the namespace; no in-memory collection reads it yet.
    pub const AUTOMATIONS: &str = "automations";
}
