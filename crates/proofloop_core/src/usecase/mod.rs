//! Use-case contracts consumed by view models.
//!
//! # Responsibility
//! - Describe the backend-facing operations as opaque, typed seams.
//! - Keep transport details (REST, token refresh, image upload) outside core.
//!
//! # Invariants
//! - Results are delivered on the caller's thread before any coordinator
//!   callback runs.
//! - Implementations are shared (`Arc`) across scopes and must be
//!   `Send + Sync`.

pub mod account;
pub mod auth;
pub mod challenge;
pub mod error;

pub use account::{ProfileUseCase, ReportUseCase};
pub use auth::{AuthUseCase, VerificationResult};
pub use challenge::{ChallengeUseCase, OrganizeUseCase, SearchUseCase};
pub use error::{FailureClass, UseCaseError, UseCaseResult};
