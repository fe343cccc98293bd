//! Dependency scopes: read-only capability bags passed down the tree.
//!
//! # Invariants
//! - Scopes only narrow. A feature scope is derived from a wider scope and
//!   never gains a capability its source lacks.
//! - Capabilities are shared `Arc`s; cloning a scope never clones a use case.

use crate::usecase::{
    AuthUseCase, ChallengeUseCase, OrganizeUseCase, ProfileUseCase, ReportUseCase, SearchUseCase,
};
use std::sync::Arc;

/// Root scope assembled by the host at launch.
#[derive(Clone)]
pub struct AppDependencies {
    pub auth: Arc<dyn AuthUseCase>,
    pub challenge: Arc<dyn ChallengeUseCase>,
    pub organize: Arc<dyn OrganizeUseCase>,
    pub profile: Arc<dyn ProfileUseCase>,
    pub report: Arc<dyn ReportUseCase>,
    pub search: Arc<dyn SearchUseCase>,
}

#[derive(Clone)]
pub struct LoginScope {
    pub auth: Arc<dyn AuthUseCase>,
}

impl From<&AppDependencies> for LoginScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            auth: Arc::clone(&deps.auth),
        }
    }
}

#[derive(Clone)]
pub struct JoinScope {
    pub challenge: Arc<dyn ChallengeUseCase>,
}

impl From<&AppDependencies> for JoinScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            challenge: Arc::clone(&deps.challenge),
        }
    }
}

#[derive(Clone)]
pub struct OrganizeScope {
    pub organize: Arc<dyn OrganizeUseCase>,
}

impl From<&AppDependencies> for OrganizeScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            organize: Arc::clone(&deps.organize),
        }
    }
}

#[derive(Clone)]
pub struct ProfileScope {
    pub profile: Arc<dyn ProfileUseCase>,
}

impl From<&AppDependencies> for ProfileScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            profile: Arc::clone(&deps.profile),
        }
    }
}

#[derive(Clone)]
pub struct ReportScope {
    pub report: Arc<dyn ReportUseCase>,
}

impl From<&AppDependencies> for ReportScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            report: Arc::clone(&deps.report),
        }
    }
}

/// Search screen plus the nested challenge join it can open.
#[derive(Clone)]
pub struct SearchScope {
    pub search: Arc<dyn SearchUseCase>,
    pub challenge: Arc<dyn ChallengeUseCase>,
}

impl SearchScope {
    /// Narrows to what the nested join container needs.
    pub fn join_scope(&self) -> JoinScope {
        JoinScope {
            challenge: Arc::clone(&self.challenge),
        }
    }
}

impl From<&AppDependencies> for SearchScope {
    fn from(deps: &AppDependencies) -> Self {
        Self {
            search: Arc::clone(&deps.search),
            challenge: Arc::clone(&deps.challenge),
        }
    }
}
