//! # keeper-sync: Remote Shape Mapping
//!
//! Translates local entity shapes to and from the remote backend's row
//! shapes. Pure translation: no network I/O, no auth, no retry logic.
//!
//! ## Why Explicit Mapping
//! The local shapes are richer than the remote tables. Instead of coercing
//! shapes field-by-field at runtime, each entity declares its remote row
//! struct and the exact fields that do not survive a round trip, so loss is
//! visible in the type system rather than implicit.
//!
//! ## Module Organization
//!
//! - [`mapping`] - Remote row structs and the [`mapping::RemoteMapped`] trait
//! - [`error`] - Sync error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keeper_sync::{RemoteMapped, parse_remote_rows};
//!
//! let row = task.to_remote();                       // drops lossy fields
//! let tasks: Vec<TaskItem> = parse_remote_rows(&payload)?;
//! ```

pub mod error;
pub mod mapping;

pub use error::{SyncError, SyncResult};
pub use mapping::{
    parse_remote_rows, RemoteFavoriteRow, RemoteLoginRow, RemoteMapped, RemoteNoteRow,
    RemoteRoutineRow, RemoteTaskRow, LOSSY_FIELDS,
};
