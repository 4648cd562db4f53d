//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract for the catalog and both event logs.
//! - Isolate delimited-file details from service/business orchestration.
//!
//! # Invariants
//! - Repositories only append; reference checks live in services.
//! - Loads are all-or-nothing.

pub mod csv_store;
pub mod reminder_repo;
