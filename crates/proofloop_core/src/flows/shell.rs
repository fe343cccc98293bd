//! Hosting shell: root coordinator and listener of every top-level flow.
//!
//! # Responsibility
//! - Open top-level flows from host input, one per slot.
//! - Close a flow on `Finished`/`Back`, and send the user back to login
//!   after an authentication failure.
//!
//! # Invariants
//! - Every upward event the shell receives is recorded once, in order.

use crate::container::{
    AppDependencies, Container, Coordinating, JoinScope, LoginScope, OrganizeScope, ProfileScope,
    ReportScope, SearchScope,
};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{FlowEvent, FlowKind, FlowOutcome, FlowResult, ShellInput, UiSignal, UserInput};
use crate::flows::join::ChallengeJoinContainer;
use crate::flows::login::LoginContainer;
use crate::flows::organize::{OrganizeContainer, OrganizeMode};
use crate::flows::profile::ProfileEditContainer;
use crate::flows::report::ReportContainer;
use crate::flows::search::SearchContainer;
use crate::navigation::{Presentation, ViewUnit};
use log::info;
use std::any::Any;

pub const SCREEN: &str = "shell.home";
pub const LOGIN: SlotKey = SlotKey::new("login");
pub const JOIN: SlotKey = SlotKey::new("join");
pub const ORGANIZE: SlotKey = SlotKey::new("organize");
pub const MODIFY: SlotKey = SlotKey::new("modify");
pub const PROFILE: SlotKey = SlotKey::new("profile");
pub const REPORT: SlotKey = SlotKey::new("report");
pub const SEARCH: SlotKey = SlotKey::new("search");

pub struct ShellContainer {
    deps: AppDependencies,
}

impl Container for ShellContainer {
    type Scope = AppDependencies;
    type Params = ();

    fn new(deps: AppDependencies) -> Self {
        Self { deps }
    }

    fn coordinator(&self, _params: ()) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            AppShellCoordinator {
                deps: self.deps.clone(),
                received: Vec::new(),
                user_name: None,
            },
        )
    }
}

pub struct AppShellCoordinator {
    deps: AppDependencies,
    received: Vec<(SlotKey, FlowEvent)>,
    user_name: Option<String>,
}

impl AppShellCoordinator {
    /// Upward events in arrival order, tagged with the slot they came from.
    pub fn received(&self) -> &[(SlotKey, FlowEvent)] {
        &self.received
    }

    pub fn count(&self, slot: SlotKey, predicate: impl Fn(&FlowEvent) -> bool) -> usize {
        self.received
            .iter()
            .filter(|(from, event)| *from == slot && predicate(event))
            .count()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    fn open_login(&self, ctx: &mut FlowContext<'_>) {
        let login = LoginContainer::new(LoginScope::from(&self.deps)).coordinator(());
        ctx.attach(LOGIN, login);
    }
}

impl Coordinator for AppShellCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Shell
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let UserInput::Shell(input) = input else {
            return InputDisposition::Unsupported;
        };
        match input {
            ShellInput::OpenLogin => self.open_login(ctx),
            ShellInput::OpenChallenge(challenge_id) => {
                let join = ChallengeJoinContainer::new(JoinScope::from(&self.deps))
                    .coordinator(challenge_id);
                ctx.attach(JOIN, join);
            }
            ShellInput::OpenOrganize => {
                let organize = OrganizeContainer::new(OrganizeScope::from(&self.deps))
                    .coordinator(OrganizeMode::Create);
                ctx.attach(ORGANIZE, organize);
            }
            ShellInput::OpenModify {
                challenge_id,
                draft,
            } => {
                let modify = OrganizeContainer::new(OrganizeScope::from(&self.deps)).coordinator(
                    OrganizeMode::Modify {
                        challenge_id,
                        draft,
                    },
                );
                ctx.attach(MODIFY, modify);
            }
            ShellInput::OpenProfile { nickname } => {
                let profile =
                    ProfileEditContainer::new(ProfileScope::from(&self.deps)).coordinator(nickname);
                ctx.attach(PROFILE, profile);
            }
            ShellInput::OpenReport(target) => {
                let report =
                    ReportContainer::new(ReportScope::from(&self.deps)).coordinator(target);
                ctx.attach(REPORT, report);
            }
            ShellInput::OpenSearch => {
                let search = SearchContainer::new(SearchScope::from(&self.deps)).coordinator(());
                ctx.attach(SEARCH, search);
            }
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, slot: SlotKey, event: FlowEvent, ctx: &mut FlowContext<'_>) {
        info!(
            "event=shell_event module=shell slot={} event={}",
            slot,
            event.kind()
        );
        self.received.push((slot, event.clone()));
        match event {
            FlowResult::Finished(outcome) => {
                if let FlowOutcome::LoggedIn { user_name } = outcome {
                    self.user_name = Some(user_name);
                }
                ctx.detach(slot);
            }
            FlowResult::Back => {
                ctx.detach(slot);
            }
            FlowResult::AuthenticationFailed => {
                self.user_name = None;
                ctx.detach(slot);
                self.open_login(ctx);
            }
            FlowResult::NotFound => {
                ctx.detach(slot);
                ctx.signal(UiSignal::NotFound);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
