//! Flow runtime for the proofloop challenge app.
//! Coordinators, containers and view models live here; screens and
//! transport stay in the host.

pub mod config;
pub mod container;
pub mod coordinator;
pub mod flow;
pub mod flows;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod usecase;

pub use config::{ConfigError, RuntimeConfig};
pub use container::{AppDependencies, Container, Coordinating};
pub use coordinator::{
    AttachOutcome, CoordinatorId, DetachOutcome, DispatchOutcome, IgnoreReason, Lifecycle,
    Navigator, SlotKey, SlotState, TreeError,
};
pub use flow::{FlowEvent, FlowKind, FlowOutcome, FlowResult, UiSignal, UserInput};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::challenge::{ChallengeId, ChallengeSummary, ProveTime, ReportReason, ReportTarget};
pub use model::draft::{
    ChallengeDraft, DraftField, DraftIncomplete, DraftStep, OrganizeChallengeRequest,
};
pub use navigation::{InMemoryNavigationStack, NavigationStack, Presentation, ViewUnit};
pub use usecase::{FailureClass, UseCaseError, UseCaseResult};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
