//! Coordinator arena.
//!
//! # Responsibility
//! - Own every live coordinator node, addressed by stable id.
//! - Track parent links, child sets, slot occupancy and lifecycle.
//!
//! # Invariants
//! - A node is live iff it is reachable from the root through child sets.
//! - `child ∈ parent.children` iff `parent.slots[slot] == Active(child)`.
//! - Lifecycle is monotonic: `Constructed → Active → Terminated`.
//! - Retired ids are tombstoned and never revived. Only the most recent
//!   `retired_limit` tombstones are kept; older ids report as unknown.

use crate::coordinator::contract::{Coordinating, Coordinator};
use crate::coordinator::slot::{SlotKey, SlotState};
use crate::coordinator::{CoordinatorId, Lifecycle};
use crate::flow::FlowKind;
use crate::navigation::{Presentation, ViewUnit};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structural errors from arena operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    NodeNotFound(CoordinatorId),
    /// Node existed once and has been retired.
    NodeTerminated(CoordinatorId),
    AlreadyStarted(CoordinatorId),
    ParentNotActive(CoordinatorId),
    RootAlreadyLaunched(CoordinatorId),
    SlotNotReserved {
        parent: CoordinatorId,
        slot: SlotKey,
    },
    DepthLimitExceeded {
        limit: usize,
    },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "coordinator not found: {id}"),
            Self::NodeTerminated(id) => write!(f, "coordinator already terminated: {id}"),
            Self::AlreadyStarted(id) => write!(f, "coordinator already started: {id}"),
            Self::ParentNotActive(id) => write!(f, "parent coordinator is not active: {id}"),
            Self::RootAlreadyLaunched(id) => write!(f, "root coordinator already launched: {id}"),
            Self::SlotNotReserved { parent, slot } => {
                write!(f, "slot `{slot}` of {parent} is not reserved for attach")
            }
            Self::DepthLimitExceeded { limit } => {
                write!(f, "coordinator tree depth limit {limit} exceeded")
            }
        }
    }
}

impl Error for TreeError {}

/// One live coordinator with its bookkeeping.
pub struct CoordinatorNode {
    id: CoordinatorId,
    flow: FlowKind,
    view: ViewUnit,
    presentation: Presentation,
    parent: Option<(CoordinatorId, SlotKey)>,
    children: BTreeSet<CoordinatorId>,
    slots: BTreeMap<SlotKey, SlotState>,
    lifecycle: Lifecycle,
    // `None` only while one of its callbacks is running.
    coordinator: Option<Box<dyn Coordinator>>,
}

impl CoordinatorNode {
    fn new(
        id: CoordinatorId,
        parent: Option<(CoordinatorId, SlotKey)>,
        coordinating: Coordinating,
    ) -> Self {
        let flow = coordinating.flow();
        let (view, presentation, coordinator) = coordinating.into_parts();
        Self {
            id,
            flow,
            view,
            presentation,
            parent,
            children: BTreeSet::new(),
            slots: BTreeMap::new(),
            lifecycle: Lifecycle::Constructed,
            coordinator: Some(coordinator),
        }
    }

    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    pub fn flow(&self) -> FlowKind {
        self.flow
    }

    pub fn view(&self) -> &ViewUnit {
        &self.view
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Listener of this node: the parent that attached it.
    pub fn listener(&self) -> Option<CoordinatorId> {
        self.parent.map(|(parent, _)| parent)
    }

    pub fn parent_slot(&self) -> Option<SlotKey> {
        self.parent.map(|(_, slot)| slot)
    }

    pub fn children(&self) -> &BTreeSet<CoordinatorId> {
        &self.children
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn slot_state(&self, slot: SlotKey) -> SlotState {
        self.slots.get(&slot).copied().unwrap_or_default()
    }
}

/// Tombstones kept by [`CoordinatorTree::new`].
pub const DEFAULT_RETIRED_LIMIT: usize = 1024;

pub struct CoordinatorTree {
    nodes: BTreeMap<CoordinatorId, CoordinatorNode>,
    retired: BTreeSet<CoordinatorId>,
    // Retirement order, oldest first; drives tombstone eviction.
    retired_order: VecDeque<CoordinatorId>,
    retired_limit: usize,
    root: Option<CoordinatorId>,
}

impl Default for CoordinatorTree {
    fn default() -> Self {
        Self::with_retired_limit(DEFAULT_RETIRED_LIMIT)
    }
}

impl CoordinatorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retired_limit(retired_limit: usize) -> Self {
        Self {
            nodes: BTreeMap::new(),
            retired: BTreeSet::new(),
            retired_order: VecDeque::new(),
            retired_limit: retired_limit.max(1),
            root: None,
        }
    }

    pub fn insert_root(
        &mut self,
        id: CoordinatorId,
        coordinating: Coordinating,
    ) -> Result<(), TreeError> {
        if let Some(root) = self.root {
            return Err(TreeError::RootAlreadyLaunched(root));
        }
        self.nodes
            .insert(id, CoordinatorNode::new(id, None, coordinating));
        self.root = Some(id);
        Ok(())
    }

    /// Moves a reserved slot to `Active(id)` and inserts the child node.
    pub fn insert_child(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        id: CoordinatorId,
        coordinating: Coordinating,
    ) -> Result<(), TreeError> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(TreeError::NodeNotFound(parent))?;
        if parent_node.lifecycle != Lifecycle::Active {
            return Err(TreeError::ParentNotActive(parent));
        }
        if parent_node.slot_state(slot) != SlotState::Attaching(id) {
            return Err(TreeError::SlotNotReserved { parent, slot });
        }

        parent_node.slots.insert(slot, SlotState::Active(id));
        parent_node.children.insert(id);
        self.nodes.insert(
            id,
            CoordinatorNode::new(id, Some((parent, slot)), coordinating),
        );
        Ok(())
    }

    /// Transitions `Constructed → Active`, returning what must become visible.
    pub fn start(&mut self, id: CoordinatorId) -> Result<(ViewUnit, Presentation), TreeError> {
        let missing = self.missing(id);
        let node = self.nodes.get_mut(&id).ok_or(missing)?;
        if node.lifecycle != Lifecycle::Constructed {
            return Err(TreeError::AlreadyStarted(id));
        }
        node.lifecycle = Lifecycle::Active;
        Ok((node.view.clone(), node.presentation))
    }

    /// Reserves `slot` for `pending` when it is empty.
    ///
    /// Returns `Ok(false)` when the slot is already attaching or active.
    pub fn reserve_slot(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        pending: CoordinatorId,
    ) -> Result<bool, TreeError> {
        let missing = self.missing(parent);
        let node = self.nodes.get_mut(&parent).ok_or(missing)?;
        if node.lifecycle != Lifecycle::Active {
            return Err(TreeError::ParentNotActive(parent));
        }
        if !node.slot_state(slot).is_empty() {
            return Ok(false);
        }
        node.slots.insert(slot, SlotState::Attaching(pending));
        Ok(true)
    }

    /// Drops a reservation that never turned into a child.
    pub fn release_reservation(
        &mut self,
        parent: CoordinatorId,
        slot: SlotKey,
        pending: CoordinatorId,
    ) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            if node.slot_state(slot) == SlotState::Attaching(pending) {
                node.slots.remove(&slot);
            }
        }
    }

    /// Unlinks `id` from its parent and retires it with all descendants.
    ///
    /// Returns retired ids in pre-order (the node itself first).
    pub fn retire_subtree(&mut self, id: CoordinatorId) -> Result<Vec<CoordinatorId>, TreeError> {
        if !self.nodes.contains_key(&id) {
            return Err(self.missing(id));
        }
        let subtree = self.subtree(id);

        if let Some((parent, slot)) = self.nodes.get(&id).and_then(|node| node.parent) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.remove(&id);
                if parent_node.slot_state(slot).occupant() == Some(id) {
                    parent_node.slots.remove(&slot);
                }
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }

        for retired in &subtree {
            self.nodes.remove(retired);
            self.tombstone(*retired);
        }
        Ok(subtree)
    }

    fn tombstone(&mut self, id: CoordinatorId) {
        if self.retired_order.len() == self.retired_limit {
            if let Some(evicted) = self.retired_order.pop_front() {
                self.retired.remove(&evicted);
            }
        }
        self.retired.insert(id);
        self.retired_order.push_back(id);
    }

    /// `id` followed by all of its descendants, pre-order.
    pub fn subtree(&self, id: CoordinatorId) -> Vec<CoordinatorId> {
        let mut ordered = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            ordered.push(current);
            pending.extend(node.children.iter().rev().copied());
        }
        ordered
    }

    pub fn get(&self, id: CoordinatorId) -> Option<&CoordinatorNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: CoordinatorId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn is_retired(&self, id: CoordinatorId) -> bool {
        self.retired.contains(&id)
    }

    /// Live-or-retired lifecycle; `None` for ids this tree never saw.
    pub fn lifecycle(&self, id: CoordinatorId) -> Option<Lifecycle> {
        if let Some(node) = self.nodes.get(&id) {
            return Some(node.lifecycle);
        }
        self.retired.contains(&id).then_some(Lifecycle::Terminated)
    }

    pub fn is_active(&self, id: CoordinatorId) -> bool {
        self.lifecycle(id) == Some(Lifecycle::Active)
    }

    pub fn root(&self) -> Option<CoordinatorId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: CoordinatorId) -> Vec<CoordinatorId> {
        self.nodes
            .get(&id)
            .map(|node| node.children.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn slot_state(&self, parent: CoordinatorId, slot: SlotKey) -> SlotState {
        self.nodes
            .get(&parent)
            .map(|node| node.slot_state(slot))
            .unwrap_or_default()
    }

    pub fn listener_of(&self, id: CoordinatorId) -> Option<CoordinatorId> {
        self.nodes.get(&id).and_then(CoordinatorNode::listener)
    }

    pub fn parent_link(&self, id: CoordinatorId) -> Option<(CoordinatorId, SlotKey)> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// Number of nodes on the path root..=id.
    pub fn depth_of(&self, id: CoordinatorId) -> Option<usize> {
        let mut depth = 0;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(&current)?;
            depth += 1;
            cursor = node.listener();
        }
        Some(depth)
    }

    /// Depth of the deepest live node, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.nodes
            .keys()
            .filter_map(|id| self.depth_of(*id))
            .max()
            .unwrap_or(0)
    }

    /// Live nodes driving `flow`.
    pub fn find_flow(&self, flow: FlowKind) -> Vec<CoordinatorId> {
        self.nodes
            .values()
            .filter(|node| node.flow == flow)
            .map(|node| node.id)
            .collect()
    }

    pub fn coordinator(&self, id: CoordinatorId) -> Option<&dyn Coordinator> {
        self.nodes
            .get(&id)
            .and_then(|node| node.coordinator.as_deref())
    }

    pub(crate) fn take_coordinator(&mut self, id: CoordinatorId) -> Option<Box<dyn Coordinator>> {
        self.nodes
            .get_mut(&id)
            .and_then(|node| node.coordinator.take())
    }

    pub(crate) fn restore_coordinator(
        &mut self,
        id: CoordinatorId,
        coordinator: Box<dyn Coordinator>,
    ) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.coordinator = Some(coordinator);
        }
    }

    fn missing(&self, id: CoordinatorId) -> TreeError {
        if self.retired.contains(&id) {
            TreeError::NodeTerminated(id)
        } else {
            TreeError::NodeNotFound(id)
        }
    }
}
