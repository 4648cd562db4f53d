//! Reminder domain model.
//!
//! # Responsibility
//! - Define the catalog/log records that make up the event-sourced store.
//! - Define timestamp handling shared by loaders, queries and exports.
//!
//! # Invariants
//! - Stored records are append-only; derived views are recomputed per query.

pub mod reminder;
pub mod time;
