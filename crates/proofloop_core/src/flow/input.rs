//! User input delivered to the coordinator owning the visible screen.

use crate::model::challenge::{ChallengeId, ReportReason, ReportTarget};
use crate::model::draft::{ChallengeDraft, DraftStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    OpenLogin,
    OpenChallenge(ChallengeId),
    OpenOrganize,
    OpenModify {
        challenge_id: ChallengeId,
        draft: ChallengeDraft,
    },
    OpenProfile {
        nickname: String,
    },
    OpenReport(ReportTarget),
    OpenSearch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginInput {
    SubmitEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationInput {
    SubmitCode(String),
    ResendCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpInput {
    SubmitNickname(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinInput {
    TapJoin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalInput {
    SubmitGoal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrganizeInput {
    /// Intro screen "start" button (create mode).
    Start,
    /// Summary row tap (modify mode).
    EditStep(DraftStep),
    /// Summary submit (modify mode).
    Submit,
}

/// Completion of one wizard step screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftStepInput {
    Name(String),
    Goal {
        goal: String,
        /// `HH:MM`, 24h clock.
        prove_time: String,
        end_date_epoch_ms: i64,
    },
    Cover(String),
    Rules(Vec<String>),
    Hashtags(Vec<String>),
}

impl DraftStepInput {
    pub fn step(&self) -> DraftStep {
        match self {
            Self::Name(_) => DraftStep::Name,
            Self::Goal { .. } => DraftStep::Goal,
            Self::Cover(_) => DraftStep::Cover,
            Self::Rules(_) => DraftStep::Rules,
            Self::Hashtags(_) => DraftStep::Hashtags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewInput {
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileInput {
    SubmitNickname(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportInput {
    Submit(ReportReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    Query(String),
    Select(ChallengeId),
}

/// One user action on a screen.
///
/// `Back` is accepted by every flow; the other variants only by the flow
/// whose screen produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Back,
    Shell(ShellInput),
    Login(LoginInput),
    Verification(VerificationInput),
    SignUp(SignUpInput),
    Join(JoinInput),
    Goal(GoalInput),
    Organize(OrganizeInput),
    DraftStep(DraftStepInput),
    Preview(PreviewInput),
    Profile(ProfileInput),
    Report(ReportInput),
    Search(SearchInput),
}
