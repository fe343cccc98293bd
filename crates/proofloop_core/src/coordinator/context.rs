//! Callback context handed to coordinators.
//!
//! # Responsibility
//! - Give a running coordinator a narrow way to request tree changes.
//! - Reserve slots synchronously so repeated attach calls collapse to one.
//!
//! # Invariants
//! - Tree mutations requested here are queued and applied in call order once
//!   the callback returns; nothing re-enters a coordinator mid-callback.
//! - `attach` flips the slot `Empty → Attaching` before it returns.

use crate::config::RuntimeConfig;
use crate::coordinator::contract::Coordinating;
use crate::coordinator::slot::{SlotKey, SlotState};
use crate::coordinator::tree::{CoordinatorTree, TreeError};
use crate::coordinator::{CoordinatorId, Lifecycle};
use crate::flow::{FlowEvent, FlowKind, UiSignal};
use log::{debug, warn};
use std::collections::VecDeque;
use uuid::Uuid;

/// Result of an attach request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Slot reserved for the new child with this id.
    Attached(CoordinatorId),
    /// Slot already attaching/active; nothing was built or pushed.
    AlreadyAttached(CoordinatorId),
    Refused(TreeError),
}

impl AttachOutcome {
    pub fn child(&self) -> Option<CoordinatorId> {
        match self {
            Self::Attached(id) | Self::AlreadyAttached(id) => Some(*id),
            Self::Refused(_) => None,
        }
    }
}

/// Result of a detach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    Detached(CoordinatorId),
    /// Slot was empty; no stack mutation happens.
    NotAttached,
}

/// UI-local signal raised by a view model, e.g. an inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRecord {
    pub source: CoordinatorId,
    pub flow: FlowKind,
    pub signal: UiSignal,
}

pub(crate) enum Command {
    Attach {
        parent: CoordinatorId,
        slot: SlotKey,
        child: CoordinatorId,
        coordinating: Coordinating,
    },
    Detach {
        parent: CoordinatorId,
        slot: SlotKey,
        animated: bool,
    },
    Emit {
        from: CoordinatorId,
        event: FlowEvent,
    },
    Finish {
        node: CoordinatorId,
        event: FlowEvent,
        animated: bool,
    },
}

pub struct FlowContext<'a> {
    me: CoordinatorId,
    flow: FlowKind,
    tree: &'a mut CoordinatorTree,
    commands: &'a mut VecDeque<Command>,
    signals: &'a mut Vec<SignalRecord>,
    config: &'a RuntimeConfig,
}

impl<'a> FlowContext<'a> {
    pub(crate) fn new(
        me: CoordinatorId,
        flow: FlowKind,
        tree: &'a mut CoordinatorTree,
        commands: &'a mut VecDeque<Command>,
        signals: &'a mut Vec<SignalRecord>,
        config: &'a RuntimeConfig,
    ) -> Self {
        Self {
            me,
            flow,
            tree,
            commands,
            signals,
            config,
        }
    }

    /// Id of the coordinator this context belongs to.
    pub fn id(&self) -> CoordinatorId {
        self.me
    }

    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }

    /// Attaches `child` into `slot` with this coordinator as its listener.
    pub fn attach(&mut self, slot: SlotKey, child: Coordinating) -> AttachOutcome {
        schedule_attach(self.tree, self.commands, self.config, self.me, slot, child)
    }

    /// Detaches the child in `slot` using the configured animation default.
    pub fn detach(&mut self, slot: SlotKey) -> DetachOutcome {
        let animated = self.config.animated_transitions;
        self.detach_animated(slot, animated)
    }

    pub fn detach_animated(&mut self, slot: SlotKey, animated: bool) -> DetachOutcome {
        schedule_detach(self.tree, self.commands, self.me, slot, animated)
    }

    /// Delivers `event` to this coordinator's listener.
    pub fn emit(&mut self, event: FlowEvent) {
        self.commands.push_back(Command::Emit {
            from: self.me,
            event,
        });
    }

    /// Detaches this coordinator's whole subtree, then delivers `event` to
    /// its listener.
    pub fn finish(&mut self, event: FlowEvent) {
        self.commands.push_back(Command::Finish {
            node: self.me,
            event,
            animated: self.config.animated_transitions,
        });
    }

    /// Raises a UI-local signal; the tree is untouched.
    pub fn signal(&mut self, signal: UiSignal) {
        debug!(
            "event=ui_signal module=coordinator flow={} signal={}",
            self.flow.as_str(),
            signal.kind()
        );
        self.signals.push(SignalRecord {
            source: self.me,
            flow: self.flow,
            signal,
        });
    }

    pub fn slot_state(&self, slot: SlotKey) -> SlotState {
        self.tree.slot_state(self.me, slot)
    }

    pub fn is_attached(&self, slot: SlotKey) -> bool {
        !self.slot_state(slot).is_empty()
    }
}

pub(crate) fn schedule_attach(
    tree: &mut CoordinatorTree,
    commands: &mut VecDeque<Command>,
    config: &RuntimeConfig,
    parent: CoordinatorId,
    slot: SlotKey,
    coordinating: Coordinating,
) -> AttachOutcome {
    let flow = coordinating.flow();
    if let Some(existing) = tree.slot_state(parent, slot).occupant() {
        debug!(
            "event=flow_attach module=coordinator status=skipped reason=occupied slot={} flow={}",
            slot,
            flow.as_str()
        );
        return AttachOutcome::AlreadyAttached(existing);
    }

    let depth = match (tree.depth_of(parent), tree.lifecycle(parent)) {
        (Some(depth), _) => depth,
        (None, Some(Lifecycle::Terminated)) => {
            return AttachOutcome::Refused(TreeError::NodeTerminated(parent))
        }
        (None, _) => return AttachOutcome::Refused(TreeError::NodeNotFound(parent)),
    };
    if depth + 1 > config.max_depth {
        warn!(
            "event=flow_attach module=coordinator status=refused reason=depth_limit slot={} max={}",
            slot,
            config.max_depth
        );
        return AttachOutcome::Refused(TreeError::DepthLimitExceeded {
            limit: config.max_depth,
        });
    }

    let child = Uuid::new_v4();
    match tree.reserve_slot(parent, slot, child) {
        Ok(true) => {
            commands.push_back(Command::Attach {
                parent,
                slot,
                child,
                coordinating,
            });
            AttachOutcome::Attached(child)
        }
        Ok(false) => match tree.slot_state(parent, slot).occupant() {
            Some(existing) => AttachOutcome::AlreadyAttached(existing),
            None => AttachOutcome::Refused(TreeError::SlotNotReserved { parent, slot }),
        },
        Err(err) => {
            warn!(
                "event=flow_attach module=coordinator status=refused slot={} flow={} error={}",
                slot,
                flow.as_str(),
                err
            );
            AttachOutcome::Refused(err)
        }
    }
}

pub(crate) fn schedule_detach(
    tree: &CoordinatorTree,
    commands: &mut VecDeque<Command>,
    parent: CoordinatorId,
    slot: SlotKey,
    animated: bool,
) -> DetachOutcome {
    match tree.slot_state(parent, slot).occupant() {
        Some(child) => {
            commands.push_back(Command::Detach {
                parent,
                slot,
                animated,
            });
            DetachOutcome::Detached(child)
        }
        None => {
            debug!(
                "event=flow_detach module=coordinator status=skipped reason=slot_empty slot={}",
                slot
            );
            DetachOutcome::NotAttached
        }
    }
}
