//! Single-threaded flow runtime.
//!
//! # Responsibility
//! - Own the coordinator arena, the navigation adapter and runtime config.
//! - Route user input down to coordinators and flow events up to listeners.
//! - Apply attach/detach/emit/finish commands in call order.
//!
//! # Invariants
//! - Commands raised by one callback run before anything queued earlier, so
//!   a listener's reaction to an event lands before the emitter's next event.
//! - Teardown order is fixed: tree bookkeeping first, then the visual pop.
//! - Events from retired coordinators are dropped, never delivered twice.
//! - Input addressed to a retired coordinator is ignored.

use crate::config::RuntimeConfig;
use crate::coordinator::context::{
    schedule_attach, schedule_detach, AttachOutcome, Command, DetachOutcome, FlowContext,
    SignalRecord,
};
use crate::coordinator::contract::{Coordinating, Coordinator, InputDisposition};
use crate::coordinator::slot::{SlotKey, SlotState};
use crate::coordinator::tree::{CoordinatorTree, TreeError};
use crate::coordinator::CoordinatorId;
use crate::flow::{FlowEvent, UserInput};
use crate::navigation::{NavigationAdapter, NavigationStack};
use log::{debug, info, warn};
use std::collections::{BTreeSet, VecDeque};
use uuid::Uuid;

/// Why an input was not delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownCoordinator,
    Terminated,
    UnsupportedInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    Ignored(IgnoreReason),
}

pub struct Navigator {
    tree: CoordinatorTree,
    navigation: NavigationAdapter,
    config: RuntimeConfig,
    commands: VecDeque<Command>,
    signals: Vec<SignalRecord>,
}

impl Navigator {
    pub fn new(stack: Box<dyn NavigationStack>, config: RuntimeConfig) -> Self {
        let navigation = NavigationAdapter::new(stack, config.history_limit);
        Self {
            tree: CoordinatorTree::new(),
            navigation,
            config,
            commands: VecDeque::new(),
            signals: Vec::new(),
        }
    }

    /// Starts the root coordinator (the host shell).
    ///
    /// # Errors
    /// - `RootAlreadyLaunched` when a root is live.
    pub fn launch(&mut self, root: Coordinating) -> Result<CoordinatorId, TreeError> {
        let id = Uuid::new_v4();
        let flow = root.flow();
        self.tree.insert_root(id, root)?;
        self.start_node(id)?;
        info!(
            "event=flow_launch module=coordinator status=ok flow={} id={}",
            flow.as_str(),
            id
        );
        self.drain();
        Ok(id)
    }

    /// Delivers user input to the coordinator that owns the visible screen.
    pub fn dispatch(&mut self, id: CoordinatorId, input: UserInput) -> DispatchOutcome {
        if !self.tree.contains(id) {
            let reason = if self.tree.is_retired(id) {
                IgnoreReason::Terminated
            } else {
                IgnoreReason::UnknownCoordinator
            };
            debug!(
                "event=flow_dispatch module=coordinator status=ignored reason={:?} id={}",
                reason, id
            );
            return DispatchOutcome::Ignored(reason);
        }

        let disposition = self.invoke(id, |coordinator, ctx| {
            coordinator.handle_input(input, ctx)
        });
        self.drain();
        match disposition {
            Some(InputDisposition::Handled) => DispatchOutcome::Handled,
            Some(InputDisposition::Unsupported) => {
                DispatchOutcome::Ignored(IgnoreReason::UnsupportedInput)
            }
            None => DispatchOutcome::Ignored(IgnoreReason::Terminated),
        }
    }

    /// Attaches `child` under `parent` from outside any callback.
    pub fn attach(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        child: Coordinating,
    ) -> AttachOutcome {
        let outcome = schedule_attach(
            &mut self.tree,
            &mut self.commands,
            &self.config,
            parent,
            slot,
            child,
        );
        self.drain();
        outcome
    }

    pub fn detach(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        animated: bool,
    ) -> DetachOutcome {
        let outcome = schedule_detach(&self.tree, &mut self.commands, parent, slot, animated);
        self.drain();
        outcome
    }

    /// Terminates every live coordinator, root included.
    pub fn shutdown(&mut self) {
        if let Some(root) = self.tree.root() {
            self.teardown(root, false);
        }
        self.commands.clear();
    }

    /// Takes UI-local signals raised since the last call.
    pub fn drain_signals(&mut self) -> Vec<SignalRecord> {
        std::mem::take(&mut self.signals)
    }

    pub fn tree(&self) -> &CoordinatorTree {
        &self.tree
    }

    pub fn navigation(&self) -> &NavigationAdapter {
        &self.navigation
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn root(&self) -> Option<CoordinatorId> {
        self.tree.root()
    }

    pub fn slot_state(&self, parent: CoordinatorId, slot: SlotKey) -> SlotState {
        self.tree.slot_state(parent, slot)
    }

    /// Concrete coordinator behind `id`, for inspection.
    pub fn coordinator<T: Coordinator + 'static>(&self, id: CoordinatorId) -> Option<&T> {
        self.tree
            .coordinator(id)
            .and_then(|coordinator| coordinator.as_any().downcast_ref::<T>())
    }

    fn drain(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            match command {
                Command::Attach {
                    parent,
                    slot,
                    child,
                    coordinating,
                } => self.apply_attach(parent, slot, child, coordinating),
                Command::Detach {
                    parent,
                    slot,
                    animated,
                } => self.apply_detach(parent, slot, animated),
                Command::Emit { from, event } => self.apply_emit(from, event),
                Command::Finish {
                    node,
                    event,
                    animated,
                } => self.apply_finish(node, event, animated),
            }
        }
    }

    fn apply_attach(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        child: CoordinatorId,
        coordinating: Coordinating,
    ) {
        let flow = coordinating.flow();
        if let Err(err) = self.tree.insert_child(parent, slot, child, coordinating) {
            self.tree.release_reservation(parent, slot, child);
            warn!(
                "event=flow_attach module=coordinator status=dropped slot={} flow={} error={}",
                slot,
                flow.as_str(),
                err
            );
            return;
        }
        if let Err(err) = self.start_node(child) {
            warn!(
                "event=flow_start module=coordinator status=error flow={} error={}",
                flow.as_str(),
                err
            );
            return;
        }
        info!(
            "event=flow_attach module=coordinator status=ok parent={} slot={} child={} flow={}",
            parent,
            slot,
            child,
            flow.as_str()
        );
    }

    fn apply_detach(&mut self, parent: CoordinatorId, slot: SlotKey, animated: bool) {
        match self.tree.slot_state(parent, slot) {
            SlotState::Active(child) => {
                self.teardown(child, animated);
            }
            SlotState::Attaching(_) | SlotState::Empty => {
                debug!(
                    "event=flow_detach module=coordinator status=skipped reason=slot_empty slot={}",
                    slot
                );
            }
        }
    }

    fn apply_emit(&mut self, from: CoordinatorId, event: FlowEvent) {
        if !self.tree.contains(from) {
            debug!(
                "event=flow_event module=coordinator status=dropped reason=retired from={} kind={}",
                from,
                event.kind()
            );
            return;
        }
        match self.tree.parent_link(from) {
            Some((listener, slot)) => self.deliver(listener, slot, event),
            None => debug!(
                "event=flow_event module=coordinator status=unrouted reason=root from={} event={}",
                from,
                event.kind()
            ),
        }
    }

    fn apply_finish(&mut self, node: CoordinatorId, event: FlowEvent, animated: bool) {
        if !self.tree.contains(node) {
            debug!(
                "event=flow_finish module=coordinator status=dropped reason=retired id={}",
                node
            );
            return;
        }
        let link = self.tree.parent_link(node);
        self.teardown(node, animated);
        if let Some((listener, slot)) = link {
            self.deliver(listener, slot, event);
        }
    }

    fn deliver(&mut self, listener: CoordinatorId, slot: SlotKey, event: FlowEvent) {
        debug!(
            "event=flow_event module=coordinator status=delivered listener={} slot={} event={}",
            listener,
            slot,
            event.kind()
        );
        self.invoke(listener, |coordinator, ctx| {
            coordinator.on_event(slot, event, ctx)
        });
    }

    fn teardown(&mut self, node: CoordinatorId, animated: bool) {
        let flow = self.tree.get(node).map(|entry| entry.flow());
        let retired = match self.tree.retire_subtree(node) {
            Ok(retired) => retired,
            Err(err) => {
                debug!(
                    "event=flow_detach module=coordinator status=skipped error={}",
                    err
                );
                return;
            }
        };
        let owners = retired.iter().copied().collect::<BTreeSet<_>>();
        let removed = self.navigation.remove_owned(&owners, animated);
        info!(
            "event=flow_detach module=coordinator status=ok id={} flow={} retired={} popped={}",
            node,
            flow.map_or("unknown", |flow| flow.as_str()),
            retired.len(),
            removed
        );
    }

    fn start_node(&mut self, id: CoordinatorId) -> Result<(), TreeError> {
        let (view, presentation) = self.tree.start(id)?;
        self.navigation
            .show(id, view, presentation, self.config.animated_transitions);
        self.invoke(id, |coordinator, ctx| coordinator.start(ctx));
        Ok(())
    }

    fn invoke<R>(
        &mut self,
        id: CoordinatorId,
        callback: impl FnOnce(&mut dyn Coordinator, &mut FlowContext<'_>) -> R,
    ) -> Option<R> {
        let flow = self.tree.get(id)?.flow();
        let mut coordinator = self.tree.take_coordinator(id)?;
        let mut raised = VecDeque::new();
        let result = {
            let mut ctx = FlowContext::new(
                id,
                flow,
                &mut self.tree,
                &mut raised,
                &mut self.signals,
                &self.config,
            );
            callback(coordinator.as_mut(), &mut ctx)
        };
        self.tree.restore_coordinator(id, coordinator);
        // Raised commands run next, in call order, ahead of older ones.
        while let Some(command) = raised.pop_back() {
            self.commands.push_front(command);
        }
        Some(result)
    }
}
