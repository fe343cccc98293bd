//! Nickname registration for emails without an account.

use crate::container::{Container, Coordinating, LoginScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, FlowEvent, FlowKind, FlowOutcome, FlowResult, Reaction, SignUpInput,
    TerminalFailure, UiSignal, UserInput,
};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::AuthUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "login.sign_up";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpIntent {
    SignedUp { user_name: String },
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for SignUpIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct SignUpViewModel {
    auth: Arc<dyn AuthUseCase>,
    email: String,
}

impl SignUpViewModel {
    pub fn new(auth: Arc<dyn AuthUseCase>, email: String) -> Self {
        Self { auth, email }
    }

    pub fn submit_nickname(&self, nickname: &str) -> Reaction<SignUpIntent> {
        if !validate::is_valid_nickname(nickname) {
            return Reaction::Signal(UiSignal::InvalidNickname);
        }
        match self.auth.sign_up(&self.email, nickname.trim()) {
            Ok(user_name) => Reaction::Navigate(SignUpIntent::SignedUp { user_name }),
            Err(err) => Reaction::from_failure(FlowKind::SignUp, &err),
        }
    }
}

pub struct SignUpContainer {
    scope: LoginScope,
}

impl Container for SignUpContainer {
    type Scope = LoginScope;
    type Params = String;

    fn new(scope: LoginScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, email: String) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            SignUpCoordinator {
                view_model: SignUpViewModel::new(Arc::clone(&self.scope.auth), email),
            },
        )
    }
}

pub struct SignUpCoordinator {
    view_model: SignUpViewModel,
}

impl Coordinator for SignUpCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::SignUp
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::SignUp(SignUpInput::SubmitNickname(nickname)) => {
                match self.view_model.submit_nickname(&nickname) {
                    Reaction::Navigate(SignUpIntent::SignedUp { user_name }) => {
                        ctx.emit(FlowResult::Finished(FlowOutcome::SignedUp { user_name }));
                    }
                    Reaction::Navigate(SignUpIntent::Terminate(failure)) => {
                        ctx.finish(failure.into())
                    }
                    Reaction::Signal(signal) => ctx.signal(signal),
                    Reaction::Idle => {}
                }
                InputDisposition::Handled
            }
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                InputDisposition::Handled
            }
            _ => InputDisposition::Unsupported,
        }
    }

    fn on_event(&mut self, _slot: SlotKey, _event: FlowEvent, _ctx: &mut FlowContext<'_>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
