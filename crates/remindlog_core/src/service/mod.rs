//! Core use-case services.
//!
//! # Responsibility
//! - Derive reminder state from the event logs (`classifier`, `snapshot`).
//! - Orchestrate log appends behind validated entry points (`reminder_service`).
//! - Resolve menu numbers shown by interactive callers (`menu`).

pub mod classifier;
pub mod menu;
pub mod reminder_service;
pub mod snapshot;
