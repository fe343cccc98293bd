//! Modal preview of a complete draft; submitting creates the challenge.

use crate::container::{Container, Coordinating, OrganizeScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    FlowEvent, FlowKind, FlowOutcome, FlowResult, PreviewInput, Reaction, TerminalFailure,
    UserInput,
};
use crate::model::challenge::ChallengeId;
use crate::model::draft::OrganizeChallengeRequest;
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::OrganizeUseCase;
use log::info;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "organize.preview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewIntent {
    Submitted(ChallengeId),
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for PreviewIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct PreviewViewModel {
    organize: Arc<dyn OrganizeUseCase>,
    request: OrganizeChallengeRequest,
    attempts: u32,
}

impl PreviewViewModel {
    pub fn new(organize: Arc<dyn OrganizeUseCase>, request: OrganizeChallengeRequest) -> Self {
        Self {
            organize,
            request,
            attempts: 0,
        }
    }

    /// Submits the request; a failure keeps it for the next attempt.
    pub fn submit(&mut self) -> Reaction<PreviewIntent> {
        self.attempts += 1;
        match self.organize.organize(&self.request) {
            Ok(challenge_id) => {
                info!(
                    "event=challenge_submit module=organize status=ok attempts={} challenge_id={}",
                    self.attempts, challenge_id
                );
                Reaction::Navigate(PreviewIntent::Submitted(challenge_id))
            }
            Err(err) => Reaction::from_failure(FlowKind::Preview, &err),
        }
    }

    pub fn request(&self) -> &OrganizeChallengeRequest {
        &self.request
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

pub struct PreviewContainer {
    scope: OrganizeScope,
}

impl Container for PreviewContainer {
    type Scope = OrganizeScope;
    type Params = OrganizeChallengeRequest;

    fn new(scope: OrganizeScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, request: OrganizeChallengeRequest) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Modal,
            PreviewCoordinator {
                view_model: PreviewViewModel::new(Arc::clone(&self.scope.organize), request),
            },
        )
    }
}

pub struct PreviewCoordinator {
    view_model: PreviewViewModel,
}

impl PreviewCoordinator {
    pub fn view_model(&self) -> &PreviewViewModel {
        &self.view_model
    }
}

impl Coordinator for PreviewCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Preview
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::Preview(PreviewInput::Submit) => match self.view_model.submit() {
                Reaction::Navigate(PreviewIntent::Submitted(challenge_id)) => {
                    ctx.emit(FlowResult::Finished(FlowOutcome::ChallengeSubmitted {
                        challenge_id,
                    }));
                }
                Reaction::Navigate(PreviewIntent::Terminate(failure)) => {
                    ctx.finish(failure.into())
                }
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
