//! Challenge browsing, participation and organizing use cases.

use crate::model::challenge::{ChallengeId, ChallengeSummary};
use crate::model::draft::OrganizeChallengeRequest;
use crate::usecase::error::UseCaseResult;

pub trait ChallengeUseCase: Send + Sync {
    fn challenge_detail(&self, id: ChallengeId) -> UseCaseResult<ChallengeSummary>;
    /// Joins `id` with the participant's personal goal.
    fn join(&self, id: ChallengeId, goal: &str) -> UseCaseResult<()>;
}

pub trait OrganizeUseCase: Send + Sync {
    /// Creates a new challenge and returns its backend id.
    fn organize(&self, request: &OrganizeChallengeRequest) -> UseCaseResult<ChallengeId>;
    fn modify(&self, id: ChallengeId, request: &OrganizeChallengeRequest) -> UseCaseResult<()>;
}

pub trait SearchUseCase: Send + Sync {
    fn search(&self, query: &str) -> UseCaseResult<Vec<ChallengeSummary>>;
}
