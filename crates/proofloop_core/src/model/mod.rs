//! Domain values shared by flows and use-case contracts.
//!
//! # Responsibility
//! - Define the small value types that cross the flow boundary.
//! - Host the organize/modify wizard accumulator (`ChallengeDraft`).
//!
//! # Invariants
//! - Values here carry no navigation state.
//! - A draft only becomes a request once every required field is set.

pub mod challenge;
pub mod draft;
