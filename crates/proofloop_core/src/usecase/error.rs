//! Use-case failure taxonomy and propagation policy.
//!
//! # Invariants
//! - Only `Authentication` failures ever reach the coordinator tree as a
//!   teardown; `Missing` is the one other terminal class.
//! - Classification is total: every error maps to exactly one class.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// Typed failure returned by any use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    AuthenticationFailed,
    TokenUnauthorized,
    ServerError,
    ClientError { code: u16, message: String },
    NotFound,
    AlreadyJoined,
    InvalidInput(String),
    InvalidVerificationCode,
    SignUpFailed(String),
    ChallengeFailed(String),
    OrganizeFailed(String),
    MyPageFailed(String),
    NetworkUnstable,
}

impl Display for UseCaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed => write!(f, "authentication failed"),
            Self::TokenUnauthorized => write!(f, "access token unauthorized"),
            Self::ServerError => write!(f, "server error"),
            Self::ClientError { code, message } => write!(f, "client error {code}: {message}"),
            Self::NotFound => write!(f, "resource not found"),
            Self::AlreadyJoined => write!(f, "challenge already joined"),
            Self::InvalidInput(field) => write!(f, "invalid input: {field}"),
            Self::InvalidVerificationCode => write!(f, "verification code does not match"),
            Self::SignUpFailed(reason) => write!(f, "sign up failed: {reason}"),
            Self::ChallengeFailed(reason) => write!(f, "challenge request failed: {reason}"),
            Self::OrganizeFailed(reason) => write!(f, "organize challenge failed: {reason}"),
            Self::MyPageFailed(reason) => write!(f, "my page request failed: {reason}"),
            Self::NetworkUnstable => write!(f, "network unstable"),
        }
    }
}

impl Error for UseCaseError {}

/// How a view model reacts to one failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Local inline error or toast; the coordinator is never told.
    Recoverable,
    /// Tears down the whole current flow and notifies its listener.
    Authentication,
    /// Target vanished; the flow detaches itself with `NotFound`.
    Missing,
    /// Generic "network unstable" message, nothing else happens.
    Unrecoverable,
}

impl FailureClass {
    pub fn classify(error: &UseCaseError) -> Self {
        match error {
            UseCaseError::AuthenticationFailed | UseCaseError::TokenUnauthorized => {
                Self::Authentication
            }
            UseCaseError::NotFound => Self::Missing,
            UseCaseError::ServerError | UseCaseError::NetworkUnstable => Self::Unrecoverable,
            UseCaseError::ClientError { .. }
            | UseCaseError::AlreadyJoined
            | UseCaseError::InvalidInput(_)
            | UseCaseError::InvalidVerificationCode
            | UseCaseError::SignUpFailed(_)
            | UseCaseError::ChallengeFailed(_)
            | UseCaseError::OrganizeFailed(_)
            | UseCaseError::MyPageFailed(_) => Self::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FailureClass, UseCaseError};

    #[test]
    fn auth_errors_propagate_to_tree() {
        assert_eq!(
            FailureClass::classify(&UseCaseError::AuthenticationFailed),
            FailureClass::Authentication
        );
        assert_eq!(
            FailureClass::classify(&UseCaseError::TokenUnauthorized),
            FailureClass::Authentication
        );
    }

    #[test]
    fn flow_specific_reasons_stay_local() {
        for error in [
            UseCaseError::InvalidVerificationCode,
            UseCaseError::AlreadyJoined,
            UseCaseError::SignUpFailed("duplicate nickname".to_string()),
            UseCaseError::OrganizeFailed("image too large".to_string()),
            UseCaseError::ClientError {
                code: 409,
                message: "conflict".to_string(),
            },
        ] {
            assert_eq!(FailureClass::classify(&error), FailureClass::Recoverable);
        }
    }

    #[test]
    fn transport_errors_are_unrecoverable() {
        assert_eq!(
            FailureClass::classify(&UseCaseError::ServerError),
            FailureClass::Unrecoverable
        );
        assert_eq!(
            FailureClass::classify(&UseCaseError::NotFound),
            FailureClass::Missing
        );
    }

    #[test]
    fn display_keeps_reason_text() {
        let err = UseCaseError::ClientError {
            code: 400,
            message: "bad goal".to_string(),
        };
        assert_eq!(err.to_string(), "client error 400: bad goal");
    }
}
