//! # Local <-> Remote Row Mapping
//!
//! One remote row struct per domain entity, shaped exactly like the remote
//! table (snake_case columns), plus the bidirectional transforms.
//!
//! ## Lossy By Design
//! The remote schema predates several local fields. Rather than coerce shapes
//! dynamically, the loss is explicit: each entity declares a `LOSSY_FIELDS`
//! list, those fields are dropped in [`RemoteMapped::to_remote`] and come
//! back as their defaults in [`RemoteMapped::from_remote`].
//!
//! ```text
//! local entity ──to_remote──► remote row ──from_remote──► local entity
//!                (drops LOSSY_FIELDS)        (defaults LOSSY_FIELDS)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SyncError, SyncResult};
use keeper_core::{ChecklistEntry, FavoriteItem, LoginItem, NoteItem, RoutineItem, TaskItem};

/// Every local field, across all entities, that does not survive a round
/// trip through the remote.
pub const LOSSY_FIELDS: &[&str] = &[
    "is_favorite",
    "is_pinned",
    "is_recurring",
    "due_time",
    "checklist",
];

// =============================================================================
// Mapping Trait
// =============================================================================

/// Bidirectional transform between a local entity and its remote row.
pub trait RemoteMapped: Sized {
    /// The remote row shape (snake_case columns).
    type Remote: Serialize + for<'de> Deserialize<'de>;

    /// Remote table name.
    const TABLE: &'static str;

    /// Local fields with no remote column. Dropped by `to_remote`,
    /// defaulted by `from_remote`.
    const LOSSY_FIELDS: &'static [&'static str];

    fn to_remote(&self) -> Self::Remote;
    fn from_remote(row: Self::Remote) -> Self;
}

/// Parses a JSON array of remote rows into local entities.
pub fn parse_remote_rows<T: RemoteMapped>(payload: &str) -> SyncResult<Vec<T>> {
    let rows: Vec<T::Remote> =
        serde_json::from_str(payload).map_err(|source| SyncError::InvalidPayload {
            table: T::TABLE,
            source,
        })?;

    debug!(table = T::TABLE, rows = rows.len(), "Parsed remote rows");
    Ok(rows.into_iter().map(T::from_remote).collect())
}

// =============================================================================
// Logins
// =============================================================================

/// Row shape of the remote `logins` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLoginRow {
    pub id: String,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteMapped for LoginItem {
    type Remote = RemoteLoginRow;

    const TABLE: &'static str = "logins";
    const LOSSY_FIELDS: &'static [&'static str] = &["is_favorite"];

    fn to_remote(&self) -> RemoteLoginRow {
        RemoteLoginRow {
            id: self.id.clone(),
            title: self.title.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            url: self.url.clone(),
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_remote(row: RemoteLoginRow) -> Self {
        LoginItem {
            id: row.id,
            title: row.title,
            username: row.username,
            password: row.password,
            url: row.url,
            notes: row.notes,
            is_favorite: false,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Tasks
// =============================================================================

/// Row shape of the remote `tasks` table.
///
/// The remote has no columns for the display time, the recurrence flag, or
/// the checklist; only the due date survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteMapped for TaskItem {
    type Remote = RemoteTaskRow;

    const TABLE: &'static str = "tasks";
    const LOSSY_FIELDS: &'static [&'static str] = &["due_time", "is_recurring", "checklist"];

    fn to_remote(&self) -> RemoteTaskRow {
        RemoteTaskRow {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_remote(row: RemoteTaskRow) -> Self {
        TaskItem {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            due_time: None,
            completed: row.completed,
            is_recurring: false,
            checklist: Vec::<ChecklistEntry>::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Routines
// =============================================================================

/// Row shape of the remote `routines` table. Nothing is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRoutineRow {
    pub id: String,
    pub title: String,
    pub schedule: String,
    pub time_of_day: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteMapped for RoutineItem {
    type Remote = RemoteRoutineRow;

    const TABLE: &'static str = "routines";
    const LOSSY_FIELDS: &'static [&'static str] = &[];

    fn to_remote(&self) -> RemoteRoutineRow {
        RemoteRoutineRow {
            id: self.id.clone(),
            title: self.title.clone(),
            schedule: self.schedule.clone(),
            time_of_day: self.time_of_day.clone(),
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_remote(row: RemoteRoutineRow) -> Self {
        RoutineItem {
            id: row.id,
            title: row.title,
            schedule: row.schedule,
            time_of_day: row.time_of_day,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Notes
// =============================================================================

/// Row shape of the remote `notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteNoteRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteMapped for NoteItem {
    type Remote = RemoteNoteRow;

    const TABLE: &'static str = "notes";
    const LOSSY_FIELDS: &'static [&'static str] = &["is_pinned"];

    fn to_remote(&self) -> RemoteNoteRow {
        RemoteNoteRow {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_remote(row: RemoteNoteRow) -> Self {
        NoteItem {
            id: row.id,
            title: row.title,
            content: row.content,
            is_pinned: false,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// Row shape of the remote `favorites` table. Nothing is lost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteFavoriteRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RemoteMapped for FavoriteItem {
    type Remote = RemoteFavoriteRow;

    const TABLE: &'static str = "favorites";
    const LOSSY_FIELDS: &'static [&'static str] = &[];

    fn to_remote(&self) -> RemoteFavoriteRow {
        RemoteFavoriteRow {
            id: self.id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            category: self.category.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn from_remote(row: RemoteFavoriteRow) -> Self {
        FavoriteItem {
            id: row.id,
            title: row.title,
            url: row.url,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_round_trip_defaults_lossy_fields() {
        let mut login = LoginItem::new("Email", "me@example.com", "hunter2");
        login.is_favorite = true;

        let back = LoginItem::from_remote(login.to_remote());

        // The flag does not survive the remote
        assert!(!back.is_favorite);
        assert_eq!(back.id, login.id);
        assert_eq!(back.title, login.title);
        assert_eq!(back.username, login.username);
        assert_eq!(back.created_at, login.created_at);
    }

    #[test]
    fn test_task_round_trip_drops_checklist_and_time() {
        let mut task = TaskItem::new("Ship release");
        task.due_time = Some("14:30".to_string());
        task.is_recurring = true;
        task.checklist = vec![ChecklistEntry {
            text: "tag".to_string(),
            done: false,
        }];

        let back = TaskItem::from_remote(task.to_remote());

        assert_eq!(back.due_time, None);
        assert!(!back.is_recurring);
        assert!(back.checklist.is_empty());
        assert_eq!(back.title, task.title);
    }

    #[test]
    fn test_routine_round_trip_is_lossless() {
        let mut routine = RoutineItem::new("Gym", "mon,wed,fri");
        routine.time_of_day = Some("07:00".to_string());

        let back = RoutineItem::from_remote(routine.to_remote());
        assert_eq!(back, routine);
        assert!(RoutineItem::LOSSY_FIELDS.is_empty());
    }

    #[test]
    fn test_remote_rows_serialize_snake_case() {
        let note = NoteItem::new("Ideas", "...");
        let json = serde_json::to_value(note.to_remote()).unwrap();

        assert!(json.get("created_at").is_some());
        assert!(json.get("createdAt").is_none());
        assert!(json.get("is_pinned").is_none());
    }

    #[test]
    fn test_parse_remote_rows() {
        let note = NoteItem::new("Ideas", "...");
        let payload = serde_json::to_string(&vec![note.to_remote()]).unwrap();

        let parsed: Vec<NoteItem> = parse_remote_rows(&payload).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Ideas");

        let err = parse_remote_rows::<NoteItem>("not json").unwrap_err();
        assert!(matches!(err, SyncError::InvalidPayload { table: "notes", .. }));
    }

    #[test]
    fn test_lossy_field_list_covers_all_entities() {
        for field in LoginItem::LOSSY_FIELDS
            .iter()
            .chain(TaskItem::LOSSY_FIELDS)
            .chain(NoteItem::LOSSY_FIELDS)
        {
            assert!(LOSSY_FIELDS.contains(field));
        }
    }
}
