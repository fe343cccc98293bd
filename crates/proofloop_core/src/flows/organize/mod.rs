//! Challenge organize wizard (create) and challenge edit (modify).
//!
//! # Responsibility
//! - Own the `ChallengeDraft` accumulator for the whole wizard.
//! - Create mode: chain step screens in order, then present the preview.
//! - Modify mode: open single steps from a summary and submit the edit.
//!
//! # Invariants
//! - A completed step rewrites only its own fields (last write wins).
//! - Create mode checks readiness only when the hashtags step completes.
//! - A failed submit leaves the accumulator untouched.

pub mod preview;
pub mod step;

use crate::container::{Container, Coordinating, OrganizeScope};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    FlowEvent, FlowKind, FlowOutcome, FlowResult, OrganizeInput, Reaction, TerminalFailure,
    UiSignal, UserInput,
};
use crate::model::challenge::ChallengeId;
use crate::model::draft::{ChallengeDraft, DraftStep, OrganizeChallengeRequest};
use crate::navigation::{Presentation, ViewUnit};
use crate::usecase::OrganizeUseCase;
use log::debug;
use preview::PreviewContainer;
use std::any::Any;
use std::sync::Arc;
use step::DraftStepContainer;

pub const INTRO_SCREEN: &str = "organize.intro";
pub const SUMMARY_SCREEN: &str = "organize.summary";
pub const PREVIEW: SlotKey = SlotKey::new("preview");
/// Single slot used by modify mode for whichever step is being edited.
pub const EDIT: SlotKey = SlotKey::new("edit");

/// Create-mode slot of `step`.
pub fn step_slot(step: DraftStep) -> SlotKey {
    match step {
        DraftStep::Name => SlotKey::new("step.name"),
        DraftStep::Goal => SlotKey::new("step.goal"),
        DraftStep::Cover => SlotKey::new("step.cover"),
        DraftStep::Rules => SlotKey::new("step.rules"),
        DraftStep::Hashtags => SlotKey::new("step.hashtags"),
    }
}

fn slot_step(slot: SlotKey) -> Option<DraftStep> {
    DraftStep::ORDER
        .into_iter()
        .find(|step| step_slot(*step) == slot)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeMode {
    Create,
    Modify {
        challenge_id: ChallengeId,
        draft: ChallengeDraft,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeIntent {
    AttachStep(DraftStep),
    AttachPreview(OrganizeChallengeRequest),
    AttachEdit(DraftStep),
    CloseEdit,
    Finish(ChallengeId),
    Terminate(TerminalFailure),
}

impl From<TerminalFailure> for OrganizeIntent {
    fn from(failure: TerminalFailure) -> Self {
        Self::Terminate(failure)
    }
}

pub struct OrganizeViewModel {
    organize: Arc<dyn OrganizeUseCase>,
    /// `Some` in modify mode.
    editing: Option<ChallengeId>,
    /// Step open in the edit slot, modify mode only.
    edit_open: Option<DraftStep>,
    draft: ChallengeDraft,
    pending: Option<OrganizeChallengeRequest>,
    readiness_checks: Vec<bool>,
}

impl OrganizeViewModel {
    pub fn new(organize: Arc<dyn OrganizeUseCase>, mode: OrganizeMode) -> Self {
        let (editing, draft) = match mode {
            OrganizeMode::Create => (None, ChallengeDraft::new()),
            OrganizeMode::Modify {
                challenge_id,
                draft,
            } => (Some(challenge_id), draft),
        };
        Self {
            organize,
            editing,
            edit_open: None,
            draft,
            pending: None,
            readiness_checks: Vec::new(),
        }
    }

    pub fn is_modify(&self) -> bool {
        self.editing.is_some()
    }

    pub fn accepts(&self, input: OrganizeInput) -> bool {
        match input {
            OrganizeInput::Start => !self.is_modify(),
            OrganizeInput::EditStep(_) | OrganizeInput::Submit => self.is_modify(),
        }
    }

    pub fn start(&self) -> Reaction<OrganizeIntent> {
        Reaction::Navigate(OrganizeIntent::AttachStep(DraftStep::first()))
    }

    /// Create mode: stores the step's fields and moves on.
    pub fn step_completed(
        &mut self,
        step: DraftStep,
        draft: &ChallengeDraft,
    ) -> Reaction<OrganizeIntent> {
        self.draft.merge_step(step, draft);
        match step.next() {
            Some(next) => Reaction::Navigate(OrganizeIntent::AttachStep(next)),
            None => self.evaluate_readiness(),
        }
    }

    pub fn edit_step(&mut self, step: DraftStep) -> Reaction<OrganizeIntent> {
        if self.edit_open.is_none() {
            self.edit_open = Some(step);
        }
        Reaction::Navigate(OrganizeIntent::AttachEdit(step))
    }

    /// Modify mode: stores the edited step's fields and closes it.
    pub fn edit_completed(&mut self, draft: &ChallengeDraft) -> Reaction<OrganizeIntent> {
        if let Some(step) = self.edit_open.take() {
            self.draft.merge_step(step, draft);
        }
        Reaction::Navigate(OrganizeIntent::CloseEdit)
    }

    /// Modify mode: the edit slot closed without a result.
    pub fn edit_dismissed(&mut self) {
        self.edit_open = None;
    }

    /// Modify mode submit.
    pub fn submit(&mut self) -> Reaction<OrganizeIntent> {
        let Some(challenge_id) = self.editing else {
            return Reaction::Idle;
        };
        let request = match self.draft.build() {
            Ok(request) => request,
            Err(incomplete) => {
                return Reaction::Signal(UiSignal::DraftIncomplete(incomplete.missing))
            }
        };
        match self.organize.modify(challenge_id, &request) {
            Ok(()) => Reaction::Navigate(OrganizeIntent::Finish(challenge_id)),
            Err(err) => Reaction::from_failure(FlowKind::Organize, &err),
        }
    }

    pub fn preview_submitted(&mut self, challenge_id: ChallengeId) -> Reaction<OrganizeIntent> {
        self.pending = None;
        Reaction::Navigate(OrganizeIntent::Finish(challenge_id))
    }

    pub fn draft(&self) -> &ChallengeDraft {
        &self.draft
    }

    /// Request built at the last readiness check, if it passed.
    pub fn pending_request(&self) -> Option<&OrganizeChallengeRequest> {
        self.pending.as_ref()
    }

    /// Outcome of every readiness check so far, oldest first.
    pub fn readiness_checks(&self) -> &[bool] {
        &self.readiness_checks
    }

    fn evaluate_readiness(&mut self) -> Reaction<OrganizeIntent> {
        let built = self.draft.build();
        self.readiness_checks.push(built.is_ok());
        debug!(
            "event=draft_readiness module=organize ready={} missing={}",
            built.is_ok(),
            self.draft.missing_fields().len()
        );
        match built {
            Ok(request) => {
                self.pending = Some(request.clone());
                Reaction::Navigate(OrganizeIntent::AttachPreview(request))
            }
            Err(incomplete) => {
                self.pending = None;
                Reaction::Signal(UiSignal::DraftIncomplete(incomplete.missing))
            }
        }
    }
}

pub struct OrganizeContainer {
    scope: OrganizeScope,
}

impl Container for OrganizeContainer {
    type Scope = OrganizeScope;
    type Params = OrganizeMode;

    fn new(scope: OrganizeScope) -> Self {
        Self { scope }
    }

    fn coordinator(&self, mode: OrganizeMode) -> Coordinating {
        let screen = match mode {
            OrganizeMode::Create => INTRO_SCREEN,
            OrganizeMode::Modify { .. } => SUMMARY_SCREEN,
        };
        Coordinating::new(
            ViewUnit::new(screen),
            Presentation::Push,
            OrganizeCoordinator {
                view_model: OrganizeViewModel::new(Arc::clone(&self.scope.organize), mode),
                scope: self.scope.clone(),
            },
        )
    }
}

pub struct OrganizeCoordinator {
    view_model: OrganizeViewModel,
    scope: OrganizeScope,
}

impl OrganizeCoordinator {
    pub fn view_model(&self) -> &OrganizeViewModel {
        &self.view_model
    }

    fn apply(&mut self, reaction: Reaction<OrganizeIntent>, ctx: &mut FlowContext<'_>) {
        match reaction {
            Reaction::Navigate(OrganizeIntent::AttachStep(step)) => {
                let child = DraftStepContainer::new(())
                    .coordinator((step, self.view_model.draft().clone()));
                ctx.attach(step_slot(step), child);
            }
            Reaction::Navigate(OrganizeIntent::AttachPreview(request)) => {
                let child = PreviewContainer::new(self.scope.clone()).coordinator(request);
                ctx.attach(PREVIEW, child);
            }
            Reaction::Navigate(OrganizeIntent::AttachEdit(step)) => {
                let child = DraftStepContainer::new(())
                    .coordinator((step, self.view_model.draft().clone()));
                ctx.attach(EDIT, child);
            }
            Reaction::Navigate(OrganizeIntent::CloseEdit) => {
                ctx.detach(EDIT);
            }
            Reaction::Navigate(OrganizeIntent::Finish(challenge_id)) => {
                ctx.emit(FlowResult::Finished(FlowOutcome::OrganizeFinished {
                    challenge_id,
                }));
            }
            Reaction::Navigate(OrganizeIntent::Terminate(failure)) => ctx.finish(failure.into()),
            Reaction::Signal(signal) => ctx.signal(signal),
            Reaction::Idle => {}
        }
    }
}

impl Coordinator for OrganizeCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::Organize
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        let reaction = match input {
            UserInput::Organize(input) if self.view_model.accepts(input) => match input {
                OrganizeInput::Start => self.view_model.start(),
                OrganizeInput::EditStep(step) => self.view_model.edit_step(step),
                OrganizeInput::Submit => self.view_model.submit(),
            },
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
        let reaction = match event {
            FlowResult::Finished(FlowOutcome::DraftUpdated(draft)) if slot == EDIT => {
                self.view_model.edit_completed(&draft)
            }
            FlowResult::Finished(FlowOutcome::DraftUpdated(draft)) => match slot_step(slot) {
                Some(step) => self.view_model.step_completed(step, &draft),
                None => Reaction::Idle,
            },
            FlowResult::Back if slot == EDIT => {
                self.view_model.edit_dismissed();
                ctx.detach(slot);
                Reaction::Idle
            }
            FlowResult::Finished(FlowOutcome::ChallengeSubmitted { challenge_id }) => {
                self.view_model.preview_submitted(challenge_id)
            }
            FlowResult::Finished(_) | FlowResult::Back => {
                ctx.detach(slot);
                Reaction::Idle
            }
            FlowResult::AuthenticationFailed => {
                Reaction::Navigate(TerminalFailure::AuthenticationFailed.into())
            }
            FlowResult::NotFound => Reaction::Navigate(TerminalFailure::NotFound.into()),
        };
        self.apply(reaction, ctx);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
