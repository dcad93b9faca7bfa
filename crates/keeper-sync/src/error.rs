//! # Sync Error Types
//!
//! Errors from remote payload handling. Mapping itself is infallible; only
//! parsing rows received from the remote can fail.

use thiserror::Error;

/// Remote mapping errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A remote payload could not be parsed into the expected row shape.
    #[error("Invalid remote payload for table '{table}': {source}")]
    InvalidPayload {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;
