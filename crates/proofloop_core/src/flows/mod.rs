//! Feature flows: one container, view model and coordinator per screen flow.
//!
//! # Invariants
//! - View models never touch navigation or sibling flows.
//! - Coordinators only translate intents into attach/detach/emit/finish.

pub mod join;
pub mod login;
pub mod organize;
pub mod profile;
pub mod report;
pub mod search;
pub mod shell;
