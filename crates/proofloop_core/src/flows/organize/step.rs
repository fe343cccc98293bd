//! One wizard step screen writing its slice of the draft.

use crate::container::{Container, Coordinating};
use crate::coordinator::{Coordinator, FlowContext, InputDisposition, SlotKey};
use crate::flow::{
    validate, DraftStepInput, FlowEvent, FlowKind, FlowOutcome, FlowResult, Reaction, UiSignal,
    UserInput,
};
use crate::model::challenge::ProveTime;
use crate::model::draft::{ChallengeDraft, DraftStep};
use crate::navigation::{Presentation, ViewUnit};
use std::any::Any;

pub fn screen(step: DraftStep) -> &'static str {
    match step {
        DraftStep::Name => "organize.step.name",
        DraftStep::Goal => "organize.step.goal",
        DraftStep::Cover => "organize.step.cover",
        DraftStep::Rules => "organize.step.rules",
        DraftStep::Hashtags => "organize.step.hashtags",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepIntent {
    Complete(ChallengeDraft),
}

pub struct DraftStepViewModel {
    step: DraftStep,
    draft: ChallengeDraft,
}

impl DraftStepViewModel {
    pub fn new(step: DraftStep, draft: ChallengeDraft) -> Self {
        Self { step, draft }
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    pub fn accepts(&self, input: &DraftStepInput) -> bool {
        input.step() == self.step
    }

    /// Validates the screen input and writes it into a copy of the draft.
    pub fn submit(&mut self, input: DraftStepInput) -> Reaction<StepIntent> {
        let updated = match self.apply(input) {
            Ok(updated) => updated,
            Err(field) => return Reaction::Signal(UiSignal::InvalidInput(field.to_string())),
        };
        self.draft = updated.clone();
        Reaction::Navigate(StepIntent::Complete(updated))
    }

    fn apply(&self, input: DraftStepInput) -> Result<ChallengeDraft, &'static str> {
        let draft = self.draft.clone();
        match input {
            DraftStepInput::Name(name) => {
                let name = validate::bounded_text(&name, validate::CHALLENGE_NAME_MAX_CHARS)
                    .ok_or("name")?;
                Ok(draft.with_name(name))
            }
            DraftStepInput::Goal {
                goal,
                prove_time,
                end_date_epoch_ms,
            } => {
                let goal = validate::bounded_text(&goal, validate::GOAL_MAX_CHARS).ok_or("goal")?;
                let prove_time = ProveTime::parse(&prove_time).map_err(|_| "prove_time")?;
                if end_date_epoch_ms <= 0 {
                    return Err("end_date");
                }
                Ok(draft
                    .with_goal(goal)
                    .with_prove_time(prove_time)
                    .with_end_date(end_date_epoch_ms))
            }
            DraftStepInput::Cover(image) => {
                let image = image.trim();
                if image.is_empty() {
                    return Err("cover_image");
                }
                Ok(draft.with_cover_image(image))
            }
            DraftStepInput::Rules(rules) => {
                let rules = rules
                    .iter()
                    .map(|rule| rule.trim())
                    .filter(|rule| !rule.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                if rules.len() > validate::MAX_RULES {
                    return Err("rules");
                }
                Ok(draft.with_rules(rules))
            }
            DraftStepInput::Hashtags(tags) => {
                let tags = validate::normalize_hashtags(&tags).ok_or("hashtags")?;
                Ok(draft.with_hashtags(tags))
            }
        }
    }
}

/// Step screens need no use case; the draft travels in the params.
pub struct DraftStepContainer;

impl Container for DraftStepContainer {
    type Scope = ();
    type Params = (DraftStep, ChallengeDraft);

    fn new(_scope: ()) -> Self {
        Self
    }

    fn coordinator(&self, (step, draft): (DraftStep, ChallengeDraft)) -> Coordinating {
        Coordinating::new(
            ViewUnit::new(screen(step)),
            Presentation::Push,
            DraftStepCoordinator {
                view_model: DraftStepViewModel::new(step, draft),
            },
        )
    }
}

pub struct DraftStepCoordinator {
    view_model: DraftStepViewModel,
}

impl Coordinator for DraftStepCoordinator {
    fn flow(&self) -> FlowKind {
        FlowKind::DraftStep(self.view_model.step())
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::DraftStep(step_input) if self.view_model.accepts(&step_input) => {
                match self.view_model.submit(step_input) {
                    Reaction::Navigate(StepIntent::Complete(draft)) => {
                        ctx.emit(FlowResult::Finished(FlowOutcome::DraftUpdated(draft)));
                    }
                    Reaction::Signal(signal) => ctx.signal(signal),
                    Reaction::Idle => {}
                }
                InputDisposition::Handled
            }
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
                InputDisposition::Handled
            }
            _ => InputDisposition::Unsupported,
        }
    }

    fn on_event(&mut self, _slot: SlotKey, _event: FlowEvent, _ctx: &mut FlowContext<'_>) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
