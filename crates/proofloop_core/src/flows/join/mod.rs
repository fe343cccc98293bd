//! Challenge join flow: detail screen, then goal entry.
//!
//! # Invariants
//! - A terminal failure anywhere in the flow detaches the whole flow and
//!   reaches the listener exactly once.
//! - Joining an already-joined challenge is a local signal only.

pub mod goal;

use crate::container::{Container, Coordinating, JoinScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    FlowEvent, FlowKind, FlowOutcome, FlowResult, JoinInput, Reaction, TerminalFailure, UiSignal,
    UserInput,
};
use crate::model::challenge::{ChallengeId, ChallengeSummary};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::ChallengeUseCase;
use goal::GoalEntryContainer;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "challenge.detail";
pub const GOAL: SlotKey = SlotKey::new("goal");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinIntent {
    AttachGoalEntry(ChallengeId),
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for JoinIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct ChallengeJoinViewModel {
    challenge: Arc<dyn ChallengeUseCase>,
    challenge_id: ChallengeId,
    detail: Option<ChallengeSummary>,
}

impl ChallengeJoinViewModel {
    pub fn new(challenge: Arc<dyn ChallengeUseCase>, challenge_id: ChallengeId) -> Self {
        Self {
            challenge,
            challenge_id,
            detail: None,
        }
    }

    /// Fetches the detail shown on screen.
    pub fn load(&mut self) -> Reaction<JoinIntent> {
        match self.challenge.challenge_detail(self.challenge_id) {
            Ok(detail) => {
                self.detail = Some(detail);
                Reaction::Idle
            }
            Err(err) => Reaction::from_failure(FlowKind::ChallengeJoin, &err),
        }
    }

    pub fn tap_join(&self) -> Reaction<JoinIntent> {
        match &self.detail {
            Some(detail) if detail.joined => Reaction::Signal(UiSignal::AlreadyJoined),
            _ => Reaction::Navigate(JoinIntent::AttachGoalEntry(self.challenge_id)),
        }
    }

    pub fn detail(&self) -> Option<&ChallengeSummary> {
        self.detail.as_ref()
    }

    pub fn challenge_id(&self) -> ChallengeId {
        self.challenge_id
    }
}

pub struct ChallengeJoinContainer {
    scope: JoinScope,
}

impl Container for ChallengeJoinContainer {
    type Scope = JoinScope;
    type Params = ChallengeId;

    fn new(scope: JoinScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, challenge_id: ChallengeId) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            ChallengeJoinCoordinator {
                view_model: ChallengeJoinViewModel::new(
                    Arc::clone(&self.scope.challenge),
                    challenge_id,
                ),
                scope: self.scope.clone(),
            },
        )
    }
}

pub struct ChallengeJoinCoordinator {
    view_model: ChallengeJoinViewModel,
    scope: JoinScope,
}

impl ChallengeJoinCoordinator {
    pub fn view_model(&self) -> &ChallengeJoinViewModel {
        &self.view_model
    }

    fn apply(&mut self, reaction: Reaction<JoinIntent>, ctx: &mut FlowContext<'_>) {
        match reaction {
            Reaction::Navigate(JoinIntent::AttachGoalEntry(challenge_id)) => {
                let child = GoalEntryContainer::new(self.scope.clone()).coordinator(challenge_id);
                ctx.attach(GOAL, child);
            }
            Reaction::Navigate(JoinIntent::Terminate(failure)) => ctx.finish(failure.into()),
            Reaction::Signal(signal) => ctx.signal(signal),
            Reaction::Idle => {}
        }
    }
}

impl Coordinator for ChallengeJoinCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::ChallengeJoin
    }

    fn start(&mut self, ctx: &mut FlowContext<'_>) {
        let reaction = self.view_model.load();
        self.apply(reaction, ctx);
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::Join(JoinInput::TapJoin) => {
                let reaction = self.view_model.tap_join();
                self.apply(reaction, ctx);
            }
            UserInput::Back => ctx.emit(FlowResult::Back),
            _ => return InputDisposition::Unsupported,
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, slot: SlotKey, event: FlowEvent, ctx: &mut FlowContext<'_>) {
        match event {
            FlowResult::Finished(FlowOutcome::Joined { challenge_id }) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::Joined { challenge_id }));
            }
            FlowResult::Finished(_) | FlowResult::Back => {
                ctx.detach(slot);
            }
            FlowResult::AuthenticationFailed => ctx.finish(FlowResult::AuthenticationFailed),
            FlowResult::NotFound => ctx.finish(FlowResult::NotFound),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
