//! Personal goal entry; submitting it joins the challenge.

use crate::container::{Container, Coordinating, JoinScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, FlowEvent, FlowKind, FlowOutcome, FlowResult, GoalInput, Reaction, TerminalFailure,
    UiSignal, UserInput,
};
use crate::model::challenge::ChallengeId;
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::ChallengeUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "challenge.goal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalIntent {
    Joined(ChallengeId),
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for GoalIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct GoalEntryViewModel {
    challenge: Arc<dyn ChallengeUseCase>,
    challenge_id: ChallengeId,
}

impl GoalEntryViewModel {
    pub fn new(challenge: Arc<dyn ChallengeUseCase>, challenge_id: ChallengeId) -> Self {
        Self {
            challenge,
            challenge_id,
        }
    }

    pub fn submit_goal(&self, goal: &str) -> Reaction<GoalIntent> {
        let Some(goal) = validate::bounded_text(goal, validate::GOAL_MAX_CHARS) else {
            return Reaction::Signal(UiSignal::InvalidInput("goal".to_string()));
        };
        match self.challenge.join(self.challenge_id, &goal) {
            Ok(()) => Reaction::Navigate(GoalIntent::Joined(self.challenge_id)),
            Err(err) => Reaction::from_failure(FlowKind::GoalEntry, &err),
        }
    }
}

pub struct GoalEntryContainer {
    scope: JoinScope,
}

impl Container for GoalEntryContainer {
    type Scope = JoinScope;
    type Params = ChallengeId;

    fn new(scope: JoinScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, challenge_id: ChallengeId) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            GoalEntryCoordinator {
                view_model: GoalEntryViewModel::new(
                    Arc::clone(&self.scope.challenge),
                    challenge_id,
                ),
            },
        )
    }
}

pub struct GoalEntryCoordinator {
    view_model: GoalEntryViewModel,
}

impl Coordinator for GoalEntryCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::GoalEntry
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let reaction = match input {
            UserInput::Goal(GoalInput::SubmitGoal(goal)) => self.view_model.submit_goal(&goal),
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                return InputDisposition::Handled;
            }
            _ => return InputDisposition::Unsupported,
        };
        match reaction {
            Reaction::Navigate(GoalIntent::Joined(challenge_id)) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::Joined { challenge_id }));
            }
            Reaction::Navigate(GoalIntent::Terminate(failure)) => ctx.finish(failure.into()),
            Reaction::Signal(signal) => ctx.signal(signal),
            Reaction::Idle => {}
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, _slot: SlotKey, _event: FlowEvent, _ctx: &mut FlowContext<'_>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
