//! Profile and moderation use cases.

use crate::model::challenge::{ReportReason, ReportTarget};
use crate::usecase::error::UseCaseResult;

pub trait ProfileUseCase: Send + Sync {
    fn update_nickname(&self, nickname: &str) -> UseCaseResult<()>;
}

pub trait ReportUseCase: Send + Sync {
    fn report(&self, target: ReportTarget, reason: ReportReason) -> UseCaseResult<()>;
}
