//! Challenge search with a nested join flow.
//!
//! The nested join container is built from `SearchScope::join_scope`, so the
//! join flow sees the same capabilities whether the shell or search opens it.

use crate::container::{Container, Coordinating, SearchScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    FlowEvent, FlowKind, FlowOutcome, FlowResult, Reaction, SearchInput, TerminalFailure,
    UiSignal, UserInput,
};
use crate::flows::join::ChallengeJoinContainer;
use crate::model::challenge::{ChallengeId, ChallengeSummary};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::SearchUseCase;
use std::any::Any;
use std::sync::Arc;

pub const SCREEN: &str = "search.results";
pub const JOIN: SlotKey = SlotKey::new("join");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIntent {
    OpenChallenge(ChallengeId),
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for SearchIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct SearchViewModel {
    search: Arc<dyn SearchUseCase>,
    results: Vec<ChallengeSummary>,
}

impl SearchViewModel {
    pub fn new(search: Arc<dyn SearchUseCase>) -> Self {
        Self {
            search,
            results: Vec::new(),
        }
    }

    pub fn query(&mut self, query: &str) -> Reaction<SearchIntent> {
        let query = query.trim();
        if query.is_empty() {
            return Reaction::Signal(UiSignal::InvalidInput("query".to_string()));
        }
        match self.search.search(query) {
            Ok(results) => {
                self.results = results;
                Reaction::Signal(UiSignal::SearchResults(self.results.len()))
            }
            Err(err) => Reaction::from_failure(FlowKind::Search, &err),
        }
    }

    pub fn select(&self, challenge_id: ChallengeId) -> Reaction<SearchIntent> {
        if self.results.iter().any(|summary| summary.id == challenge_id) {
            Reaction::Navigate(SearchIntent::OpenChallenge(challenge_id))
        } else {
            Reaction::Signal(UiSignal::InvalidInput("challenge".to_string()))
        }
    }

    pub fn mark_joined(&mut self, challenge_id: ChallengeId) {
        if let Some(summary) = self
            .results
            .iter_mut()
            .find(|summary| summary.id == challenge_id)
        {
            summary.joined = true;
        }
    }

    pub fn results(&self) -> &[ChallengeSummary] {
        &self.results
    }
}

pub struct SearchContainer {
    scope: SearchScope,
}

impl Container for SearchContainer {
    type Scope = SearchScope;
    type Params = ();

    fn new(scope: SearchScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, _params: ()) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(SCREEN),
            Presentation::Push,
            SearchCoordinator {
                view_model: SearchViewModel::new(Arc::clone(&self.scope.search)),
                scope: self.scope.clone(),
            },
        )
    }
}

pub struct SearchCoordinator {
    view_model: SearchViewModel,
    scope: SearchScope,
}

impl SearchCoordinator {
    pub fn view_model(&self) -> &SearchViewModel {
        &self.view_model
    }

    fn apply(&mut self, reaction: Reaction<SearchIntent>, ctx: &mut FlowContext<'_>) {
        match reaction {
            Reaction::Navigate(SearchIntent::OpenChallenge(challenge_id)) => {
                let child =
                    ChallengeJoinContainer::new(self.scope.join_scope()).coordinator(challenge_id);
                ctx.attach(JOIN, child);
            }
            Reaction::Navigate(SearchIntent::Terminate(failure)) => ctx.finish(failure.into()),
            Reaction::Signal(signal) => ctx.signal(signal),
            Reaction::Idle => {}
        }
    }
}

impl Coordinator for SearchCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Search
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let reaction = match input {
            UserInput::Search(SearchInput::Query(query)) => self.view_model.query(&query),
            UserInput::Search(SearchInput::Select(challenge_id)) => {
                self.view_model.select(challenge_id)
            }
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                return InputDisposition::Handled;
            }
            _ => return InputDisposition::Unsupported,
        };
        self.apply(reaction, ctx);
        InputDisposition::Handled
    }

    fn on_event(&mut self, slot: SlotKey, event: FlowEvent, ctx: &mut FlowContext<'_>) {
        match event {
            FlowResult::Finished(FlowOutcome::Joined { challenge_id }) => {
                self.view_model.mark_joined(challenge_id);
                ctx.detach(slot);
            }
            FlowResult::Finished(_) | FlowResult::Back => {
                ctx.detach(slot);
            }
            FlowResult::NotFound => ctx.signal(UiSignal::NotFound),
            FlowResult::AuthenticationFailed => {
                self.apply(
                    Reaction::Navigate(TerminalFailure::AuthenticationFailed.into()),
                    ctx,
                );
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
