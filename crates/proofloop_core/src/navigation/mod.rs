//! Navigation stack boundary.
//!
//! # Responsibility
//! - Define the opaque `ViewUnit` and the host `NavigationStack` seam.
//! - Own the adapter that keeps the stack consistent with the coordinator tree.
//!
//! # Invariants
//! - A coordinator's unit is on the stack iff the coordinator is attached.
//! - Only the coordinator that showed a unit (or its ancestors' teardown)
//!   removes it.

pub mod adapter;
pub mod view;

pub use adapter::{NavCommand, NavigationAdapter, StackEntry};
pub use view::{InMemoryNavigationStack, NavigationStack, Presentation, ViewUnit, ViewUnitId};
