//! Profile nickname edit.

use crate::container::{Container, Coordinating, ProfileScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, FlowEvent, FlowKind, FlowOutcome, FlowResult, ProfileInput, Reaction,
    TerminalFailure, UiSignal, UserInput,
};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::ProfileUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "profile.edit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileIntent {
    Updated { nickname: String },
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for ProfileIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct ProfileEditViewModel {
    profile: Arc<dyn ProfileUseCase>,
    nickname: String,
}

impl ProfileEditViewModel {
    pub fn new(profile: Arc<dyn ProfileUseCase>, nickname: String) -> Self {
        Self { profile, nickname }
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn submit_nickname(&mut self, nickname: &str) -> Reaction<ProfileIntent> {
        let nickname = nickname.trim();
        if !validate::is_valid_nickname(nickname) {
            return Reaction::Signal(UiSignal::InvalidNickname);
        }
        if nickname == self.nickname {
            return Reaction::Navigate(ProfileIntent::Updated {
                nickname: self.nickname.clone(),
            });
        }
        match self.profile.update_nickname(nickname) {
            Ok(()) => {
                self.nickname = nickname.to_string();
                Reaction::Navigate(ProfileIntent::Updated {
                    nickname: self.nickname.clone(),
                })
            }
            Err(err) => Reaction::from_failure(FlowKind::ProfileEdit, &err),
        }
    }
}

pub struct ProfileEditContainer {
    scope: ProfileScope,
}

impl Container for ProfileEditContainer {
    type Scope = ProfileScope;
    /// Current nickname shown in the text field.
    type Params = String;

    fn new(scope: ProfileScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, nickname: String) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            ProfileEditCoordinator {
                view_model: ProfileEditViewModel::new(Arc::clone(&self.scope.profile), nickname),
            },
        )
    }
}

pub struct ProfileEditCoordinator {
    view_model: ProfileEditViewModel,
}

impl Coordinator for ProfileEditCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::ProfileEdit
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let reaction = match input {
            UserInput::Profile(ProfileInput::SubmitNickname(nickname)) => {
                self.view_model.submit_nickname(&nickname)
            }
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                return InputDisposition::Handled;
            }
            _ => return InputDisposition::Unsupported,
        };
        match reaction {
            Reaction::Navigate(ProfileIntent::Updated { nickname }) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::ProfileUpdated { nickname }));
            }
            Reaction::Navigate(ProfileIntent::Terminate(failure)) => ctx.finish(failure.into()),
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
