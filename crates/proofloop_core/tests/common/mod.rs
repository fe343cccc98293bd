#![allow(dead_code)]

use proofloop_core::container::Container;
use proofloop_core::coordinator::{CoordinatorId, DispatchOutcome, Navigator, SlotKey, SlotState};
use proofloop_core::flow::{ShellInput, UserInput};
use proofloop_core::flows::shell::{AppShellCoordinator, ShellContainer};
use proofloop_core::navigation::{InMemoryNavigationStack, NavCommand};
use proofloop_core::usecase::{
    AuthUseCase, ChallengeUseCase, OrganizeUseCase, ProfileUseCase, ReportUseCase, SearchUseCase,
    UseCaseResult, VerificationResult,
};
use proofloop_core::{
    AppDependencies, ChallengeId, ChallengeSummary, OrganizeChallengeRequest, ReportReason,
    ReportTarget, RuntimeConfig,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted use-case result: queued results first, then the fallback.
pub struct Script<T: Clone> {
    queued: Mutex<VecDeque<UseCaseResult<T>>>,
    fallback: UseCaseResult<T>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    pub fn new(fallback: UseCaseResult<T>) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, result: UseCaseResult<T>) {
        self.queued.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> UseCaseResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub struct StubAuth {
    pub request_code: Script<()>,
    pub verify_code: Script<VerificationResult>,
    pub sign_up: Script<String>,
}

impl AuthUseCase for StubAuth {
    fn request_code(&self, _email: &str) -> UseCaseResult<()> {
        self.request_code.next()
    }

    fn verify_code(&self, _email: &str, _code: &str) -> UseCaseResult<VerificationResult> {
        self.verify_code.next()
    }

    fn sign_up(&self, _email: &str, _nickname: &str) -> UseCaseResult<String> {
        self.sign_up.next()
    }
}

pub struct StubChallenge {
    pub detail: Script<ChallengeSummary>,
    pub join: Script<()>,
}

impl ChallengeUseCase for StubChallenge {
    fn challenge_detail(&self, _id: ChallengeId) -> UseCaseResult<ChallengeSummary> {
        self.detail.next()
    }

    fn join(&self, _id: ChallengeId, _goal: &str) -> UseCaseResult<()> {
        self.join.next()
    }
}

pub struct StubOrganize {
    pub organize: Script<ChallengeId>,
    pub modify: Script<()>,
    pub last_request: Mutex<Option<OrganizeChallengeRequest>>,
}

impl OrganizeUseCase for StubOrganize {
    fn organize(&self, request: &OrganizeChallengeRequest) -> UseCaseResult<ChallengeId> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.organize.next()
    }

    fn modify(&self, _id: ChallengeId, request: &OrganizeChallengeRequest) -> UseCaseResult<()> {
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.modify.next()
    }
}

pub struct StubProfile {
    pub update: Script<()>,
}

impl ProfileUseCase for StubProfile {
    fn update_nickname(&self, _nickname: &str) -> UseCaseResult<()> {
        self.update.next()
    }
}

pub struct StubReport {
    pub report: Script<()>,
}

impl ReportUseCase for StubReport {
    fn report(&self, _target: ReportTarget, _reason: ReportReason) -> UseCaseResult<()> {
        self.report.next()
    }
}

pub struct StubSearch {
    pub search: Script<Vec<ChallengeSummary>>,
}

impl SearchUseCase for StubSearch {
    fn search(&self, _query: &str) -> UseCaseResult<Vec<ChallengeSummary>> {
        self.search.next()
    }
}

pub fn summary(id: ChallengeId, joined: bool) -> ChallengeSummary {
    ChallengeSummary {
        id,
        title: format!("challenge-{id}"),
        joined,
    }
}

/// Launched shell over an in-memory stack, with every use case stubbed to
/// succeed unless a test scripts otherwise.
pub struct Harness {
    pub navigator: Navigator,
    pub shell: CoordinatorId,
    pub auth: Arc<StubAuth>,
    pub challenge: Arc<StubChallenge>,
    pub organize: Arc<StubOrganize>,
    pub profile: Arc<StubProfile>,
    pub report: Arc<StubReport>,
    pub search: Arc<StubSearch>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let auth = Arc::new(StubAuth {
            request_code: Script::new(Ok(())),
            verify_code: Script::new(Ok(VerificationResult {
                user_name: Some("dawn".to_string()),
            })),
            sign_up: Script::new(Ok("dawn".to_string())),
        });
        let challenge = Arc::new(StubChallenge {
            detail: Script::new(Ok(summary(7, false))),
            join: Script::new(Ok(())),
        });
        let organize = Arc::new(StubOrganize {
            organize: Script::new(Ok(42)),
            modify: Script::new(Ok(())),
            last_request: Mutex::new(None),
        });
        let profile = Arc::new(StubProfile {
            update: Script::new(Ok(())),
        });
        let report = Arc::new(StubReport {
            report: Script::new(Ok(())),
        });
        let search = Arc::new(StubSearch {
            search: Script::new(Ok(vec![summary(7, false), summary(8, true)])),
        });
        let deps = AppDependencies {
            auth: auth.clone(),
            challenge: challenge.clone(),
            organize: organize.clone(),
            profile: profile.clone(),
            report: report.clone(),
            search: search.clone(),
        };

        let mut navigator = Navigator::new(Box::new(InMemoryNavigationStack::new()), config);
        let shell = navigator
            .launch(ShellContainer::new(deps).coordinator(()))
            .unwrap();
        Self {
            navigator,
            shell,
            auth,
            challenge,
            organize,
            profile,
            report,
            search,
        }
    }

    pub fn open(&mut self, input: ShellInput) -> DispatchOutcome {
        self.navigator.dispatch(self.shell, UserInput::Shell(input))
    }

    pub fn send(&mut self, id: CoordinatorId, input: UserInput) -> DispatchOutcome {
        self.navigator.dispatch(id, input)
    }

    /// Active child in `slot` of `parent`; panics when the slot is not active.
    pub fn child(&self, parent: CoordinatorId, slot: SlotKey) -> CoordinatorId {
        match self.navigator.slot_state(parent, slot) {
            SlotState::Active(child) => child,
            other => panic!("slot `{slot}` is not active: {other:?}"),
        }
    }

    pub fn shell(&self) -> &AppShellCoordinator {
        self.navigator
            .coordinator::<AppShellCoordinator>(self.shell)
            .unwrap()
    }

    pub fn screens(&self) -> Vec<&'static str> {
        self.navigator.navigation().screens()
    }

    /// Push/present commands issued for `screen`.
    pub fn shows_of(&self, screen: &str) -> usize {
        self.navigator
            .navigation()
            .history()
            .filter(|command| match command {
                NavCommand::Push { screen: shown, .. }
                | NavCommand::Present { screen: shown, .. } => *shown == screen,
                _ => false,
            })
            .count()
    }
}
