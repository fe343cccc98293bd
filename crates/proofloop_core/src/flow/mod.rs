//! Flow contracts shared by every feature.
//!
//! # Responsibility
//! - Name each flow and the upward events it may produce.
//! - Define the view model output type coordinators act on.
//!
//! # Invariants
//! - Upward traffic is a single `FlowResult<FlowOutcome>` channel.
//! - Terminal failures (`AuthenticationFailed`, `NotFound`) always end the
//!   flow that observed them.

pub mod input;
pub mod validate;

pub use input::{
    DraftStepInput, GoalInput, JoinInput, LoginInput, OrganizeInput, PreviewInput, ProfileInput,
    ReportInput, SearchInput, ShellInput, SignUpInput, UserInput, VerificationInput,
};

use crate::model::challenge::ChallengeId;
use crate::model::draft::{ChallengeDraft, DraftField, DraftStep};
use crate::usecase::{FailureClass, UseCaseError};
use log::warn;

/// Every flow a coordinator can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Shell,
    Login,
    EmailVerification,
    SignUp,
    ChallengeJoin,
    GoalEntry,
    Organize,
    DraftStep(DraftStep),
    Preview,
    ProfileEdit,
    Report,
    Search,
}

impl FlowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Login => "login",
            Self::EmailVerification => "email_verification",
            Self::SignUp => "sign_up",
            Self::ChallengeJoin => "challenge_join",
            Self::GoalEntry => "goal_entry",
            Self::Organize => "organize",
            Self::DraftStep(DraftStep::Name) => "draft_step_name",
            Self::DraftStep(DraftStep::Goal) => "draft_step_goal",
            Self::DraftStep(DraftStep::Cover) => "draft_step_cover",
            Self::DraftStep(DraftStep::Rules) => "draft_step_rules",
            Self::DraftStep(DraftStep::Hashtags) => "draft_step_hashtags",
            Self::Preview => "preview",
            Self::ProfileEdit => "profile_edit",
            Self::Report => "report",
            Self::Search => "search",
        }
    }
}

/// Upward result of one flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowResult<E> {
    Finished(E),
    Back,
    AuthenticationFailed,
    NotFound,
}

impl<E> FlowResult<E> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Finished(_) => "finished",
            Self::Back => "back",
            Self::AuthenticationFailed => "authentication_failed",
            Self::NotFound => "not_found",
        }
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::NotFound)
    }

    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> FlowResult<F> {
        match self {
            Self::Finished(value) => FlowResult::Finished(f(value)),
            Self::Back => FlowResult::Back,
            Self::AuthenticationFailed => FlowResult::AuthenticationFailed,
            Self::NotFound => FlowResult::NotFound,
        }
    }
}

/// Typed payloads of `FlowResult::Finished`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    LoggedIn { user_name: String },
    /// `user_name` is `None` when the email still needs sign-up.
    EmailVerified {
        email: String,
        user_name: Option<String>,
    },
    SignedUp { user_name: String },
    Joined { challenge_id: ChallengeId },
    DraftUpdated(ChallengeDraft),
    ChallengeSubmitted { challenge_id: ChallengeId },
    OrganizeFinished { challenge_id: ChallengeId },
    ProfileUpdated { nickname: String },
    Reported,
}

impl FlowOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoggedIn { .. } => "logged_in",
            Self::EmailVerified { .. } => "email_verified",
            Self::SignedUp { .. } => "signed_up",
            Self::Joined { .. } => "joined",
            Self::DraftUpdated(_) => "draft_updated",
            Self::ChallengeSubmitted { .. } => "challenge_submitted",
            Self::OrganizeFinished { .. } => "organize_finished",
            Self::ProfileUpdated { .. } => "profile_updated",
            Self::Reported => "reported",
        }
    }
}

pub type FlowEvent = FlowResult<FlowOutcome>;

/// Failure that ends the current flow instead of staying local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalFailure {
    AuthenticationFailed,
    NotFound,
}

impl<E> From<TerminalFailure> for FlowResult<E> {
    fn from(failure: TerminalFailure) -> Self {
        match failure {
            TerminalFailure::AuthenticationFailed => Self::AuthenticationFailed,
            TerminalFailure::NotFound => Self::NotFound,
        }
    }
}

/// Screen-local notice; never changes the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiSignal {
    InvalidEmail,
    InvalidVerificationCode,
    InvalidNickname,
    /// Field name of the rejected value.
    InvalidInput(String),
    AlreadyJoined,
    SubmissionFailed(String),
    DraftIncomplete(Vec<DraftField>),
    NetworkUnstable,
    SearchResults(usize),
    NotFound,
}

impl UiSignal {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::InvalidVerificationCode => "invalid_verification_code",
            Self::InvalidNickname => "invalid_nickname",
            Self::InvalidInput(_) => "invalid_input",
            Self::AlreadyJoined => "already_joined",
            Self::SubmissionFailed(_) => "submission_failed",
            Self::DraftIncomplete(_) => "draft_incomplete",
            Self::NetworkUnstable => "network_unstable",
            Self::SearchResults(_) => "search_results",
            Self::NotFound => "not_found",
        }
    }
}

/// What a view model asks for after handling one input or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction<I> {
    /// Coordinatable call on the owning coordinator.
    Navigate(I),
    Signal(UiSignal),
    Idle,
}

impl<I: From<TerminalFailure>> Reaction<I> {
    /// Applies the failure propagation policy to one use-case error.
    pub fn from_failure(flow: FlowKind, error: &UseCaseError) -> Self {
        let class = FailureClass::classify(error);
        warn!(
            "event=usecase_failure module=flow flow={} class={:?} error={}",
            flow.as_str(),
            class,
            error
        );
        match class {
            FailureClass::Authentication => {
                Self::Navigate(TerminalFailure::AuthenticationFailed.into())
            }
            FailureClass::Missing => Self::Navigate(TerminalFailure::NotFound.into()),
            FailureClass::Unrecoverable => Self::Signal(UiSignal::NetworkUnstable),
            FailureClass::Recoverable => Self::Signal(match error {
                UseCaseError::InvalidVerificationCode => UiSignal::InvalidVerificationCode,
                UseCaseError::AlreadyJoined => UiSignal::AlreadyJoined,
                UseCaseError::InvalidInput(field) => UiSignal::InvalidInput(field.clone()),
                other => UiSignal::SubmissionFailed(other.to_string()),
            }),
        }
    }
}
