//! Modal report sheet for a challenge, user or proof photo.

use crate::container::{Container, Coordinating, ReportScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    FlowEvent, FlowKind, FlowOutcome, FlowResult, Reaction, ReportInput, TerminalFailure,
    UserInput,
};
use crate::model::challenge::{ReportReason, ReportTarget};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::ReportUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "report.sheet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportIntent {
    Reported,
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for ReportIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct ReportViewModel {
    report: Arc<dyn ReportUseCase>,
    target: ReportTarget,
}

impl ReportViewModel {
    pub fn new(report: Arc<dyn ReportUseCase>, target: ReportTarget) -> Self {
        Self { report, target }
    }

    pub fn submit(&self, reason: ReportReason) -> Reaction<ReportIntent> {
        match self.report.report(self.target, reason) {
            Ok(()) => Reaction::Navigate(ReportIntent::Reported),
            Err(err) => Reaction::from_failure(FlowKind::Report, &err),
        }
    }
}

pub struct ReportContainer {
    scope: ReportScope,
}

impl Container for ReportContainer {
    type Scope = ReportScope;
    type Params = ReportTarget;

    fn new(scope: ReportScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, target: ReportTarget) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Modal,
            ReportCoordinator {
                view_model: ReportViewModel::new(Arc::clone(&self.scope.report), target),
            },
        )
    }
}

pub struct ReportCoordinator {
    view_model: ReportViewModel,
}

impl Coordinator for ReportCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Report
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::Report(ReportInput::Submit(reason)) => match self.view_model.submit(reason) {
                Reaction::Navigate(ReportIntent::Reported) => {
                    ctx.emit(FlowResult::Finished(FlowOutcome::Reported));
                }
                Reaction::Navigate(ReportIntent::Terminate(failure)) => ctx.finish(failure.into()),
                Reaction::Signal(signal) => ctx.signal(signal),
                Reaction::Idle => {}
            },
            UserInput::Back => ctx.emit(FlowResult::Back),
            _ => return InputDisposition::Unsupported,
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, _slot: SlotKey, _event: FlowEvent, _ctx: &mut FlowContext<'_>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
