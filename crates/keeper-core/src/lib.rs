//! # keeper-core: Pure Domain Logic for Keeper
//!
//! This crate is the heart of Keeper. It contains all domain logic as pure
//! functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  keeper-vault          keeper-db            keeper-sync      │
//! │  (encrypted store,     (SQLite ledger,      (remote shape    │
//! │   state container)      repositories)        mapping)        │
//! │        │                     │                    │          │
//! │        └─────────────────────┼────────────────────┘          │
//! │                              ▼                               │
//! │                  ★ keeper-core (THIS CRATE) ★                │
//! │                                                              │
//! │   types        ledger        ids         validation         │
//! │   LoginItem    Product       generate_id  rules             │
//! │   TaskItem     Transaction                                  │
//! │   ...          FinancialSummary                              │
//! │                                                              │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - User-facing entities (logins, tasks, routines, notes,
//!   favorites) and the activity record
//! - [`ledger`] - Inventory ledger types (Product, Client, Transaction) and
//!   the derived financial summary
//! - [`ids`] - Id generation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: deterministic, same input = same output
//! 2. **Integer Money**: all monetary values are cents (i64), never floats
//! 3. **Explicit Errors**: typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod ledger;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::generate_id;
pub use ledger::{
    Client, ClientDraft, FinancialSummary, PaymentStatus, Product, ProductDraft, Transaction,
    TransactionDraft, TransactionKind,
};
pub use types::{
    ActivityKind, ActivityRecord, ChecklistEntry, DomainEntity, FavoriteItem, LoginItem, NoteItem,
    RoutineItem, TaskItem,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of activity records retained in the log.
///
/// On every append the log is truncated to the most recent entries; anything
/// beyond this bound is silently dropped.
pub const ACTIVITY_LOG_CAPACITY: usize = 100;
