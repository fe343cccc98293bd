//! Logical child slots and their attach state machine.

use crate::coordinator::CoordinatorId;
use std::fmt::{Display, Formatter};

/// Name of one logical child position inside a coordinator.
///
/// At most one live child exists per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey(&'static str);

impl SlotKey {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Slot occupancy.
///
/// `Empty → Attaching → Active → Empty`. An attach request is accepted only
/// from `Empty`, which makes double attach structurally impossible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Empty,
    /// Reserved for a child that is queued but not yet started.
    Attaching(CoordinatorId),
    Active(CoordinatorId),
}

impl SlotState {
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Child occupying or about to occupy the slot.
    pub fn occupant(self) -> Option<CoordinatorId> {
        match self {
            Self::Empty => None,
            Self::Attaching(id) | Self::Active(id) => Some(id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Attaching(_) => "attaching",
            Self::Active(_) => "active",
        }
    }
}
