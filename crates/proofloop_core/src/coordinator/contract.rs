//! Node contract implemented by every flow coordinator.

use crate::coordinator::context::FlowContext;
use crate::coordinator::slot::SlotKey;
use crate::flow::{FlowEvent, FlowKind, UserInput};
use crate::navigation::{Presentation, ViewUnit};
use std::any::Any;
use std::fmt::{Debug, Formatter};

/// Whether a coordinator consumed one user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Handled,
    /// Input belongs to another flow's screen.
    Unsupported,
}

/// One node of the navigation tree.
///
/// Coordinators only sequence attach/detach and relay events; screen state and
/// use-case calls live in the view model they own.
pub trait Coordinator: Send {
    fn flow(&self) -> FlowKind;

    /// Runs right after the node's view unit became visible.
    fn start(&mut self, _ctx: &mut FlowContext<'_>) {}

    /// Forwards user input to the owned view model and acts on its intent.
    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition;

    /// Receives an upward event from the child attached in `slot`.
    fn on_event(&mut self, slot: SlotKey, event: FlowEvent, ctx: &mut FlowContext<'_>);

    fn as_any(&self) -> &dyn Any;
}

/// Opaque handle produced by a container: view unit plus wired coordinator.
pub struct Coordinating {
    view: ViewUnit,
    presentation: Presentation,
    coordinator: Box<dyn Coordinator>,
}

impl Coordinating {
    pub fn new(
        view: ViewUnit,
        presentation: Presentation,
        coordinator: impl Coordinator + 'static,
    ) -> Self {
        Self {
            view,
            presentation,
            coordinator: Box::new(coordinator),
        }
    }

    pub fn flow(&self) -> FlowKind {
        self.coordinator.flow()
    }

    pub fn view(&self) -> &ViewUnit {
        &self.view
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub(crate) fn into_parts(self) -> (ViewUnit, Presentation, Box<dyn Coordinator>) {
        (self.view, self.presentation, self.coordinator)
    }
}

impl Debug for Coordinating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinating")
            .field("flow", &self.flow())
            .field("view", &self.view)
            .field("presentation", &self.presentation)
            .finish()
    }
}
