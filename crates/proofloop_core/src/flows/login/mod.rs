//! Email login flow.
//!
//! # Responsibility
//! - Collect an email, request a code, then run verification and, for new
//!   accounts, sign-up as child flows.
//! - Report `Finished(LoggedIn)` once an account name is known.
//!
//! # Invariants
//! - Emails and codes stay in view models; they are never logged.

pub mod sign_up;
pub mod verification;

use crate::container::{Container, Coordinating, LoginScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, FlowEvent, FlowKind, FlowOutcome, FlowResult, LoginInput, Reaction,
    TerminalFailure, UiSignal, UserInput,
};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::AuthUseCase;
use sign_up::SignUpContainer;
use std::any::Any;
use std::sync::Arc;
use verification::EmailVerificationContainer;

pub const SCREEN: &str = "login.email";
pub const VERIFICATION: SlotKey = SlotKey::new("verification");
pub const SIGN_UP: SlotKey = SlotKey::new("sign_up");

/// Coordinatable calls raised by [`LoginViewModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIntent {
    AttachVerification { email: String },
    AttachSignUp { email: String },
    Finish { user_name: String },
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for LoginIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct LoginViewModel {
    auth: Arc<dyn AuthUseCase>,
}

impl LoginViewModel {
    pub fn new(auth: Arc<dyn AuthUseCase>) -> Self {
        Self { auth }
    }

    pub fn submit_email(&self, email: &str) -> Reaction<LoginIntent> {
        if !validate::is_valid_email(email) {
            return Reaction::Signal(UiSignal::InvalidEmail);
        }
        let email = email.trim();
        match self.auth.request_code(email) {
            Ok(()) => Reaction::Navigate(LoginIntent::AttachVerification {
                email: email.to_string(),
            }),
            Err(err) => Reaction::from_failure(FlowKind::Login, &err),
        }
    }

    /// Decides between finishing and sign-up after the code was accepted.
    pub fn verified(&self, email: String, user_name: Option<String>) -> Reaction<LoginIntent> {
        match user_name {
            Some(user_name) => Reaction::Navigate(LoginIntent::Finish { user_name }),
            None => Reaction::Navigate(LoginIntent::AttachSignUp { email }),
        }
    }
}

pub struct LoginContainer {
    scope: LoginScope,
}

impl Container for LoginContainer {
    type Scope = LoginScope;
    type Params = ();

    fn new(scope: LoginScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, _params: ()) -> Coordinating {
        let view_model = LoginViewModel::new(Arc::clone(&self.scope.auth));
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            LoginCoordinator {
                view_model,
                scope: self.scope.clone(),
            },
        )
    }
}

pub struct LoginCoordinator {
    view_model: LoginViewModel,
    scope: LoginScope,
}

impl LoginCoordinator {
    fn apply(&mut self, reaction: Reaction<LoginIntent>, ctx: &mut FlowContext<'_>) {
        match reaction {
            Reaction::Navigate(LoginIntent::AttachVerification { email }) => {
                let child = EmailVerificationContainer::new(self.scope.clone()).coordinator(email);
                ctx.attach(VERIFICATION, child);
            }
            Reaction::Navigate(LoginIntent::AttachSignUp { email }) => {
                let child = SignUpContainer::new(self.scope.clone()).coordinator(email);
                ctx.attach(SIGN_UP, child);
            }
            Reaction::Navigate(LoginIntent::Finish { user_name }) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::LoggedIn { user_name }));
            }
            Reaction::Navigate(LoginIntent::Terminate(failure)) => ctx.finish(failure.into()),
            Reaction::Signal(signal) => ctx.signal(signal),
            Reaction::Idle => {}
        }
    }
}

impl Coordinator for LoginCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Login
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::Login(LoginInput::SubmitEmail(email)) => {
                let reaction = self.view_model.submit_email(&email);
                self.apply(reaction, ctx);
            }
            UserInput::Back => ctx.emit(FlowResult::Back),
            _ => return InputDisposition::Unsupported,
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, slot: SlotKey, event: FlowEvent, ctx: &mut FlowContext<'_>) {
        match event {
            FlowResult::Finished(FlowOutcome::EmailVerified { email, user_name }) => {
                let reaction = self.view_model.verified(email, user_name);
                self.apply(reaction, ctx);
            }
            FlowResult::Finished(FlowOutcome::SignedUp { user_name }) => {
                self.apply(Reaction::Navigate(LoginIntent::Finish { user_name }), ctx);
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
