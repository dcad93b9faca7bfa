//! # Repository Layer
//!
//! One repository per ledger table. Repositories are thin: SQL in, domain
//! types out, errors mapped to [`crate::error::DbError`]. Cross-table rules
//! (stock adjustment on transaction insert, mirror refresh) live in
//! [`crate::ledger::Ledger`], not here.

pub mod client;
pub mod product;
pub mod transaction;
