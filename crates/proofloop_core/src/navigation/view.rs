//! Opaque view units and the external navigation stack seam.

use log::warn;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier of one view unit instance.
pub type ViewUnitId = Uuid;

/// Opaque presentable screen built by a container.
///
/// The runtime never looks inside; `screen` is a key the host maps to a
/// concrete widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewUnit {
    pub id: ViewUnitId,
    pub screen: &'static str,
}

impl ViewUnit {
    pub fn new(screen: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            screen,
        }
    }
}

/// How a flow's view unit becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// Pushed onto the shared navigation stack.
    Push,
    /// Presented modally over the stack.
    Modal,
}

/// Fire-and-forget stack commands implemented by the host view layer.
pub trait NavigationStack: Send {
    fn push(&mut self, unit: &ViewUnit, animated: bool);
    fn pop(&mut self, animated: bool);
    fn present(&mut self, unit: &ViewUnit, animated: bool);
    fn dismiss(&mut self, animated: bool);
}

/// Host-less stack used by the bridge and by tests.
#[derive(Debug, Default)]
pub struct InMemoryNavigationStack {
    pushed: Vec<ViewUnit>,
    presented: Vec<ViewUnit>,
}

impl InMemoryNavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen currently on top (modal first).
    pub fn visible(&self) -> Option<&ViewUnit> {
        self.presented.last().or_else(|| self.pushed.last())
    }

    pub fn pushed(&self) -> &[ViewUnit] {
        &self.pushed
    }

    pub fn presented(&self) -> &[ViewUnit] {
        &self.presented
    }
}

impl NavigationStack for InMemoryNavigationStack {
    fn push(&mut self, unit: &ViewUnit, _animated: bool) {
        self.pushed.push(unit.clone());
    }

    fn pop(&mut self, _animated: bool) {
        if self.pushed.pop().is_none() {
            warn!("event=nav_pop module=navigation status=skipped reason=empty_stack");
        }
    }

    fn present(&mut self, unit: &ViewUnit, _animated: bool) {
        self.presented.push(unit.clone());
    }

    fn dismiss(&mut self, _animated: bool) {
        if self.presented.pop().is_none() {
            warn!("event=nav_dismiss module=navigation status=skipped reason=no_modal");
        }
    }
}
