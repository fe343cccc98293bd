//! Coordinator tree runtime.
//!
//! # Responsibility
//! - Model flow coordinators as arena nodes with slot-keyed children.
//! - Own navigation side effects for attach, detach and finish.
//!
//! # Invariants
//! - Each live non-root node has exactly one listener, the parent that
//!   attached it.
//! - A subtree is always detached as a whole.

pub mod context;
pub mod contract;
pub mod runtime;
pub mod slot;
pub mod tree;

pub use context::{AttachOutcome, DetachOutcome, FlowContext, SignalRecord};
pub use contract::{Coordinating, Coordinator, InputDisposition};
pub use runtime::{DispatchOutcome, IgnoreReason, Navigator};
pub use slot::{SlotKey, SlotState};
pub use tree::{CoordinatorNode, CoordinatorTree, TreeError};

/// Stable identity of one coordinator instance.
pub type CoordinatorId = uuid::Uuid;

/// Coordinator lifecycle. Transitions are monotonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Constructed,
    Active,
    Terminated,
}

impl Lifecycle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Active => "active",
            Self::Terminated => "terminated",
        }
    }
}
