//! Authentication use cases (email code sign-in and sign-up).

use crate::usecase::error::UseCaseResult;

/// Outcome of a successful verification code check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    /// Existing account name; `None` means the email still needs sign-up.
    pub user_name: Option<String>,
}

pub trait AuthUseCase: Send + Sync {
    /// Sends a 4-digit verification code to `email`.
    fn request_code(&self, email: &str) -> UseCaseResult<()>;
    fn verify_code(&self, email: &str, code: &str) -> UseCaseResult<VerificationResult>;
    /// Registers `nickname` for a verified email, returning the account name.
    fn sign_up(&self, email: &str, nickname: &str) -> UseCaseResult<String>;
}
