//! # Activity Log
//!
//! Append-only, size-bounded record of user actions, persisted encrypted
//! under the fixed `activities` key.
//!
//! ## Ordering & Bound
//! New records are prepended; on every append the list is truncated to the
//! most recent [`keeper_core::ACTIVITY_LOG_CAPACITY`] entries (oldest dropped
//! silently beyond that bound). Most-recent-first is the storage order, so
//! readers need no sort.
//!
//! There is no read API beyond the generic [`Vault::load`].

use keeper_core::{ActivityKind, ActivityRecord, ACTIVITY_LOG_CAPACITY};
use tracing::debug;

use crate::error::VaultResult;
use crate::keys;
use crate::store::Vault;

/// Writer handle for the activity log.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    vault: Vault,
}

impl ActivityLog {
    pub fn new(vault: Vault) -> Self {
        ActivityLog { vault }
    }

    /// Appends a record: fresh id, current timestamp, prepended, truncated to
    /// the capacity bound, written back encrypted.
    pub fn record(
        &self,
        kind: ActivityKind,
        action: impl Into<String>,
        item_title: impl Into<String>,
    ) -> VaultResult<()> {
        let record = ActivityRecord::new(kind, action, item_title);
        debug!(kind = kind.label(), action = %record.action, title = %record.item_title, "Activity recorded");

        let mut entries: Vec<ActivityRecord> = self.vault.load(keys::ACTIVITIES, Vec::new(), true);
        entries.insert(0, record);
        entries.truncate(ACTIVITY_LOG_CAPACITY);

        self.vault.save(keys::ACTIVITIES, &entries, true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
