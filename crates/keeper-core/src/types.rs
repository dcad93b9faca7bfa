//! # Domain Types
//!
//! The five user-facing entity collections and the activity record.
//!
//! ## Entity Shape
//! Every entity carries:
//! - `id`: UUID v4 string - immutable, generated at creation
//! - descriptive fields specific to the entity
//! - `created_at`: set once at creation
//! - `updated_at`: refreshed to "now" on every update
//!
//! ## Serialized Form
//! Entities are persisted through the vault as JSON arrays in camelCase,
//! which is also the wire shape the remote mapping layer starts from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::generate_id;

// =============================================================================
// Activity Record
// =============================================================================

/// The entity family an activity record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Login,
    Task,
    Routine,
    Note,
    Favorite,
}

impl ActivityKind {
    /// Human-readable label, used in activity messages.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Login => "login",
            ActivityKind::Task => "task",
            ActivityKind::Routine => "routine",
            ActivityKind::Note => "note",
            ActivityKind::Favorite => "favorite",
        }
    }
}

/// A single entry in the activity log.
///
/// Created on every create/update/delete of a domain entity. The log keeps
/// the most recent [`crate::ACTIVITY_LOG_CAPACITY`] entries, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// What happened: "Created", "Edited", "Deleted".
    pub action: String,
    /// Title of the entity the action was applied to.
    pub item_title: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a record with a fresh id and the current timestamp.
    pub fn new(kind: ActivityKind, action: impl Into<String>, item_title: impl Into<String>) -> Self {
        ActivityRecord {
            id: generate_id(),
            kind,
            action: action.into(),
            item_title: item_title.into(),
            timestamp: Utc::now(),
        }
    }
}

// =============================================================================
// Domain Entity Trait
// =============================================================================

/// Common surface of the five user-facing entity types.
///
/// The state container is generic over this trait: it needs the id to match
/// on update/delete, the title for activity messages, and `touch` to refresh
/// `updated_at` on every update.
pub trait DomainEntity {
    /// The activity family this entity belongs to.
    const KIND: ActivityKind;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    /// Refreshes `updated_at` to the given instant.
    fn touch(&mut self, now: DateTime<Utc>);
}

// =============================================================================
// Login Item
// =============================================================================

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginItem {
    pub id: String,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    /// No remote counterpart; dropped by the sync mapping.
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoginItem {
    pub fn new(title: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        let now = Utc::now();
        LoginItem {
            id: generate_id(),
            title: title.into(),
            username: username.into(),
            password: password.into(),
            url: None,
            notes: None,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl DomainEntity for LoginItem {
    const KIND: ActivityKind = ActivityKind::Login;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// =============================================================================
// Task Item
// =============================================================================

/// A single step in a task checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistEntry {
    pub text: String,
    pub done: bool,
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// "HH:MM" display time. No remote counterpart.
    #[serde(default)]
    pub due_time: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// No remote counterpart; dropped by the sync mapping.
    #[serde(default)]
    pub is_recurring: bool,
    /// No remote counterpart; dropped by the sync mapping.
    #[serde(default)]
    pub checklist: Vec<ChecklistEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskItem {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        TaskItem {
            id: generate_id(),
            title: title.into(),
            description: None,
            due_date: None,
            due_time: None,
            completed: false,
            is_recurring: false,
            checklist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl DomainEntity for TaskItem {
    const KIND: ActivityKind = ActivityKind::Task;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// =============================================================================
// Routine Item
// =============================================================================

/// A recurring routine (e.g. "gym, mon/wed/fri at 07:00").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineItem {
    pub id: String,
    pub title: String,
    /// Free-form schedule description ("daily", "mon,wed,fri", ...).
    pub schedule: String,
    pub time_of_day: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl RoutineItem {
    pub fn new(title: impl Into<String>, schedule: impl Into<String>) -> Self {
        let now = Utc::now();
        RoutineItem {
            id: generate_id(),
            title: title.into(),
            schedule: schedule.into(),
            time_of_day: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl DomainEntity for RoutineItem {
    const KIND: ActivityKind = ActivityKind::Routine;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// =============================================================================
// Note Item
// =============================================================================

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// No remote counterpart; dropped by the sync mapping.
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NoteItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        NoteItem {
            id: generate_id(),
            title: title.into(),
            content: content.into(),
            is_pinned: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl DomainEntity for NoteItem {
    const KIND: ActivityKind = ActivityKind::Note;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// =============================================================================
// Favorite Item
// =============================================================================

/// A bookmarked link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FavoriteItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        let now = Utc::now();
        FavoriteItem {
            id: generate_id(),
            title: title.into(),
            url: url.into(),
            category: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl DomainEntity for FavoriteItem {
    const KIND: ActivityKind = ActivityKind::Favorite;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
