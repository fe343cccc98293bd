//! Four-digit email code verification.

use crate::container::{Container, Coordinating, LoginScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, FlowEvent, FlowKind, FlowOutcome, FlowResult, Reaction, TerminalFailure, UiSignal,
    UserInput, VerificationInput,
};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::AuthUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "login.verification";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationIntent {
    Verified {
        email: String,
        user_name: Option<String>,
    },
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for VerificationIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct EmailVerificationViewModel {
    auth: Arc<dyn AuthUseCase>,
    email: String,
    failed_attempts: u32,
}

impl EmailVerificationViewModel {
    pub fn new(auth: Arc<dyn AuthUseCase>, email: String) -> Self {
        Self {
            auth,
            email,
            failed_attempts: 0,
        }
    }

    pub fn submit_code(&mut self, code: &str) -> Reaction<VerificationIntent> {
        if !validate::is_valid_code(code) {
            self.failed_attempts += 1;
            return Reaction::Signal(UiSignal::InvalidVerificationCode);
        }
        match self.auth.verify_code(&self.email, code.trim()) {
            Ok(result) => Reaction::Navigate(VerificationIntent::Verified {
                email: self.email.clone(),
                user_name: result.user_name,
            }),
            Err(err) => {
                self.failed_attempts += 1;
                Reaction::from_failure(FlowKind::EmailVerification, &err)
            }
        }
    }

    pub fn resend_code(&mut self) -> Reaction<VerificationIntent> {
        match self.auth.request_code(&self.email) {
            Ok(()) => {
                self.failed_attempts = 0;
                Reaction::Idle
            }
            Err(err) => Reaction::from_failure(FlowKind::EmailVerification, &err),
        }
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }
}

pub struct EmailVerificationContainer {
    scope: LoginScope,
}

impl Container for EmailVerificationContainer {
    type Scope = LoginScope;
    /// Email the code was sent to.
    type Params = String;

    fn new(scope: LoginScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, email: String) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            EmailVerificationCoordinator {
                view_model: EmailVerificationViewModel::new(Arc::clone(&self.scope.auth), email),
            },
        )
    }
}

pub struct EmailVerificationCoordinator {
    view_model: EmailVerificationViewModel,
}

impl EmailVerificationCoordinator {
    pub fn view_model(&self) -> &EmailVerificationViewModel {
        &self.view_model
    }
}

impl Coordinator for EmailVerificationCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::EmailVerification
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let reaction = match input {
            UserInput::Verification(VerificationInput::SubmitCode(code)) => {
                self.view_model.submit_code(&code)
            }
            UserInput::Verification(VerificationInput::ResendCode) => self.view_model.resend_code(),
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                return InputDisposition::Handled;
            }
            _ => return InputDisposition::Unsupported,
        };
        match reaction {
            Reaction::Navigate(VerificationIntent::Verified { email, user_name }) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::EmailVerified {
                    email,
                    user_name,
                }));
            }
            Reaction::Navigate(VerificationIntent::Terminate(failure)) => {
                ctx.finish(failure.into())
            }
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
