//! # keeper-db: Ledger Database for Keeper
//!
//! This crate provides the local SQLite ledger: products, clients, and the
//! transaction journal, with async access via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Keeper Data Flow                          │
//! │                                                                  │
//! │  Caller (app shell)                                              │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  ┌────────────────────────────────────────────────────────────┐  │
//! │  │                  keeper-db (THIS CRATE)                    │  │
//! │  │                                                            │  │
//! │  │   ┌────────────┐   ┌───────────────┐   ┌──────────────┐   │  │
//! │  │   │   Ledger   │   │  Repositories │   │  Migrations  │   │  │
//! │  │   │(ledger.rs) │──►│ (product.rs)  │   │  (embedded)  │   │  │
//! │  │   │            │   │ (client.rs)   │   │              │   │  │
//! │  │   │ mirrors +  │   │(transaction.rs│   │ 001_init.sql │   │  │
//! │  │   │ stock rules│   │               │   │              │   │  │
//! │  │   └────────────┘   └───────────────┘   └──────────────┘   │  │
//! │  └────────────────────────────────────────────────────────────┘  │
//! │       │                                                          │
//! │       ▼                                                          │
//! │  SQLite database file (WAL mode)                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Thin per-table repositories
//! - [`ledger`] - The ledger service: validation, stock rules, mirrors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keeper_db::{DbConfig, Ledger};
//!
//! let ledger = Ledger::open(DbConfig::new("keeper.db")).await?;
//! let product = ledger.add_product(draft).await?;
//! let summary = ledger.financial_summary(None, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use ledger::Ledger;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::product::ProductRepository;
pub use repository::transaction::TransactionRepository;
