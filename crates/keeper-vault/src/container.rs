//! # Domain State Container
//!
//! Owns the five in-memory entity collections and keeps their encrypted
//! persisted mirrors in lock-step on every mutation.
//!
//! ## Mutation Contract (per entity type)
//! ```text
//! add(e)      append → persist full collection → log "Created"
//! update(e)   stamp updated_at → replace by id → persist → log "Edited"
//! delete(id)  present: remove → persist → log "Deleted"
//!             absent:  strict no-op (no persist, no log entry)
//! ```
//!
//! All operations are synchronous with respect to the in-memory state; there
//! is no entity-level locking, so two racing mutations resolve to
//! last-write-wins. The container is the sole writer of the persisted
//! mirrors.

use chrono::Utc;
use serde::Serialize;

use keeper_core::{DomainEntity, FavoriteItem, LoginItem, NoteItem, RoutineItem, TaskItem};

use crate::activity::ActivityLog;
use crate::config::VaultConfig;
use crate::error::VaultResult;
use crate::keys;
use crate::store::Vault;

/// In-memory store for the five user-facing collections, hydrated from the
/// vault on open and mirrored back on every mutation.
#[derive(Debug)]
pub struct DomainStore {
    vault: Vault,
    log: ActivityLog,
    logins: Vec<LoginItem>,
    tasks: Vec<TaskItem>,
    routines: Vec<RoutineItem>,
    notes: Vec<NoteItem>,
    favorites: Vec<FavoriteItem>,
}

// =============================================================================
// Generic mutation helpers
// =============================================================================

fn add_entity<E>(
    vault: &Vault,
    log: &ActivityLog,
    items: &mut Vec<E>,
    key: &str,
    entity: E,
) -> VaultResult<()>
where
    E: DomainEntity + Serialize,
{
    let title = entity.title().to_string();
    items.push(entity);
    vault.save(key, items, true)?;
    log.record(E::KIND, "Created", title)
}

fn update_entity<E>(
    vault: &Vault,
    log: &ActivityLog,
    items: &mut Vec<E>,
    key: &str,
    mut entity: E,
) -> VaultResult<()>
where
    E: DomainEntity + Serialize,
{
    entity.touch(Utc::now());
    let title = entity.title().to_string();

    if let Some(slot) = items.iter_mut().find(|e| e.id() == entity.id()) {
        *slot = entity;
    }

    vault.save(key, items, true)?;
    log.record(E::KIND, "Edited", title)
}

fn delete_entity<E>(
    vault: &Vault,
    log: &ActivityLog,
    items: &mut Vec<E>,
    key: &str,
    id: &str,
) -> VaultResult<()>
where
    E: DomainEntity + Serialize,
{
    let Some(index) = items.iter().position(|e| e.id() == id) else {
        // Unknown id: leave the collection and the activity log untouched.
        return Ok(());
    };

    let removed = items.remove(index);
    vault.save(key, items, true)?;
    log.record(E::KIND, "Deleted", removed.title().to_string())
}

impl DomainStore {
    /// Opens the vault and hydrates all five collections.
    ///
    /// A collection whose mirror is missing or unreadable starts empty; the
    /// store never fails to open over a degraded mirror.
    pub fn open(config: VaultConfig) -> VaultResult<Self> {
        let vault = Vault::open(config)?;
        let log = ActivityLog::new(vault.clone());

        Ok(DomainStore {
            logins: vault.load(keys::LOGINS, Vec::new(), true),
            tasks: vault.load(keys::TASKS, Vec::new(), true),
            routines: vault.load(keys::ROUTINES, Vec::new(), true),
            notes: vault.load(keys::NOTES, Vec::new(), true),
            favorites: vault.load(keys::FAVORITES, Vec::new(), true),
            vault,
            log,
        })
    }

    // =========================================================================
    // Logins
    // =========================================================================

    pub fn logins(&self) -> &[LoginItem] {
        &self.logins
    }

    pub fn add_login(&mut self, login: LoginItem) -> VaultResult<()> {
        add_entity(&self.vault, &self.log, &mut self.logins, keys::LOGINS, login)
    }

    pub fn update_login(&mut self, login: LoginItem) -> VaultResult<()> {
        update_entity(&self.vault, &self.log, &mut self.logins, keys::LOGINS, login)
    }

    pub fn delete_login(&mut self, id: &str) -> VaultResult<()> {
        delete_entity(&self.vault, &self.log, &mut self.logins, keys::LOGINS, id)
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    pub fn tasks(&self) -> &[TaskItem] {
        &self.tasks
    }

    pub fn add_task(&mut self, task: TaskItem) -> VaultResult<()> {
        add_entity(&self.vault, &self.log, &mut self.tasks, keys::TASKS, task)
    }

    pub fn update_task(&mut self, task: TaskItem) -> VaultResult<()> {
        update_entity(&self.vault, &self.log, &mut self.tasks, keys::TASKS, task)
    }

    pub fn delete_task(&mut self, id: &str) -> VaultResult<()> {
        delete_entity(&self.vault, &self.log, &mut self.tasks, keys::TASKS, id)
    }

    // =========================================================================
    // Routines
    // =========================================================================

    pub fn routines(&self) -> &[RoutineItem] {
        &self.routines
    }

    pub fn add_routine(&mut self, routine: RoutineItem) -> VaultResult<()> {
        add_entity(&self.vault, &self.log, &mut self.routines, keys::ROUTINES, routine)
    }

    pub fn update_routine(&mut self, routine: RoutineItem) -> VaultResult<()> {
        update_entity(&self.vault, &self.log, &mut self.routines, keys::ROUTINES, routine)
    }

    pub fn delete_routine(&mut self, id: &str) -> VaultResult<()> {
        delete_entity(&self.vault, &self.log, &mut self.routines, keys::ROUTINES, id)
    }

    // =========================================================================
    // Notes
    // =========================================================================

    pub fn notes(&self) -> &[NoteItem] {
        &self.notes
    }

    pub fn add_note(&mut self, note: NoteItem) -> VaultResult<()> {
        add_entity(&self.vault, &self.log, &mut self.notes, keys::NOTES, note)
    }

    pub fn update_note(&mut self, note: NoteItem) -> VaultResult<()> {
        update_entity(&self.vault, &self.log, &mut self.notes, keys::NOTES, note)
    }

    pub fn delete_note(&mut self, id: &str) -> VaultResult<()> {
        delete_entity(&self.vault, &self.log, &mut self.notes, keys::NOTES, id)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub fn favorites(&self) -> &[FavoriteItem] {
        &self.favorites
    }

    pub fn add_favorite(&mut self, favorite: FavoriteItem) -> VaultResult<()> {
        add_entity(&self.vault, &self.log, &mut self.favorites, keys::FAVORITES, favorite)
    }

    pub fn update_favorite(&mut self, favorite: FavoriteItem) -> VaultResult<()> {
        update_entity(&self.vault, &self.log, &mut self.favorites, keys::FAVORITES, favorite)
    }

    pub fn delete_favorite(&mut self, id: &str) -> VaultResult<()> {
        delete_entity(&self.vault, &self.log, &mut self.favorites, keys::FAVORITES, id)
    }

    /// The underlying vault, for generic reads (e.g. the activity list).
    pub fn vault(&self) -> &Vault {
        &self.vault
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use keeper_core::{ActivityRecord, TaskItem};
    use tempfile::tempdir;

    fn open_store(dir: &std::path::Path) -> DomainStore {
        DomainStore::open(VaultConfig::new(dir)).unwrap()
    }

    fn activities(store: &DomainStore) -> Vec<ActivityRecord> {
        store.vault().load(keys::ACTIVITIES, Vec::new(), true)
    }

    #[test]
    fn test_add_persists_mirror_and_logs() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        store.add_task(TaskItem::new("Buy milk")).unwrap();

        assert_eq!(store.tasks().len(), 1);

        // Mirror is readable by a fresh store over the same vault.
        let reopened = open_store(dir.path());
        assert_eq!(reopened.tasks().len(), 1);
        assert_eq!(reopened.tasks()[0].title, "Buy milk");

        let log = activities(&store);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "Created");
        assert_eq!(log[0].item_title, "Buy milk");
    }

    #[test]
    fn test_update_stamps_updated_at_and_logs() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        let task = TaskItem::new("Buy milk");
        let created_at = task.created_at;
        store.add_task(task.clone()).unwrap();

        let mut edited = task;
        edited.completed = true;
        store.update_task(edited).unwrap();

        let stored = &store.tasks()[0];
        assert!(stored.completed);
        assert!(stored.updated_at >= created_at);

        let log = activities(&store);
        assert_eq!(log[0].action, "Edited");
    }

    #[test]
    fn test_delete_removes_and_logs() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        let note = NoteItem::new("Ideas", "...");
        let id = note.id.clone();
        store.add_note(note).unwrap();

        store.delete_note(&id).unwrap();
        assert!(store.notes().is_empty());

        let log = activities(&store);
        assert_eq!(log[0].action, "Deleted");
        assert_eq!(log[0].item_title, "Ideas");
    }

    #[test]
    fn test_delete_unknown_id_is_a_strict_noop() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        store.add_login(LoginItem::new("Email", "me", "pw")).unwrap();
        let log_before = activities(&store);

        store.delete_login("no-such-id").unwrap();

        assert_eq!(store.logins().len(), 1);
        assert_eq!(activities(&store), log_before);
    }

    #[test]
    fn test_collections_are_independent() {
        let dir = tempdir().unwrap();
        let mut store = open_store(dir.path());

        store.add_task(TaskItem::new("t")).unwrap();
        store.add_routine(RoutineItem::new("gym", "daily")).unwrap();
        store
            .add_favorite(FavoriteItem::new("docs", "https://example.com"))
            .unwrap();

        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.routines().len(), 1);
        assert_eq!(store.favorites().len(), 1);
        assert!(store.notes().is_empty());
        assert!(store.logins().is_empty());

        let log = activities(&store);
        assert_eq!(log.len(), 3);
        // Most recent first.
        assert_eq!(log[0].item_title, "docs");
    }
}
