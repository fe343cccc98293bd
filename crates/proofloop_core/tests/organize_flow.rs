mod common;

use common::Harness;
use proofloop_core::coordinator::{CoordinatorId, DispatchOutcome, IgnoreReason, SlotState};
use proofloop_core::flow::{
    DraftStepInput, FlowOutcome, FlowResult, OrganizeInput, PreviewInput, ShellInput, UiSignal,
    UserInput,
};
use proofloop_core::flows::organize::{
    self, preview, step, step_slot, OrganizeCoordinator, OrganizeViewModel, EDIT, PREVIEW,
};
use proofloop_core::flows::shell::{MODIFY, ORGANIZE};
use proofloop_core::navigation::NavCommand;
use proofloop_core::usecase::UseCaseError;
use proofloop_core::{ChallengeDraft, DraftField, DraftStep, ProveTime};

fn step_input(step: DraftStep) -> DraftStepInput {
    match step {
        DraftStep::Name => DraftStepInput::Name("Dawn run".to_string()),
        DraftStep::Goal => DraftStepInput::Goal {
            goal: "Run 3km".to_string(),
            prove_time: "06:30".to_string(),
            end_date_epoch_ms: 1_800_000_000_000,
        },
        DraftStep::Cover => DraftStepInput::Cover("asset://cover/dawn".to_string()),
        DraftStep::Rules => DraftStepInput::Rules(vec!["Show the sunrise".to_string()]),
        DraftStep::Hashtags => DraftStepInput::Hashtags(vec!["#morning".to_string()]),
    }
}

fn view_model(harness: &Harness, organize_id: CoordinatorId) -> &OrganizeViewModel {
    harness
        .navigator
        .coordinator::<OrganizeCoordinator>(organize_id)
        .unwrap()
        .view_model()
}

fn open_wizard(harness: &mut Harness) -> CoordinatorId {
    harness.open(ShellInput::OpenOrganize);
    let organize_id = harness.child(harness.shell, ORGANIZE);
    harness.send(organize_id, UserInput::Organize(OrganizeInput::Start));
    organize_id
}

/// Completes every step in order and returns the hashtags step id.
fn run_all_steps(harness: &mut Harness, organize_id: CoordinatorId) -> CoordinatorId {
    let mut last = organize_id;
    for step in DraftStep::ORDER {
        last = harness.child(organize_id, step_slot(step));
        harness.send(last, UserInput::DraftStep(step_input(step)));
    }
    last
}

fn complete_draft() -> ChallengeDraft {
    ChallengeDraft::new()
        .with_name("Dawn run")
        .with_goal("Run 3km")
        .with_prove_time(ProveTime { hour: 6, minute: 30 })
        .with_end_date(1_800_000_000_000)
        .with_cover_image("asset://cover/dawn")
}

#[test]
fn readiness_is_observed_only_at_the_hashtags_step() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);

    for step in DraftStep::ORDER {
        assert!(view_model(&harness, organize_id).readiness_checks().is_empty());
        assert!(view_model(&harness, organize_id).pending_request().is_none());
        let step_id = harness.child(organize_id, step_slot(step));
        assert_eq!(harness.screens().last(), Some(&step::screen(step)));
        harness.send(step_id, UserInput::DraftStep(step_input(step)));
    }

    let view_model = view_model(&harness, organize_id);
    assert_eq!(view_model.readiness_checks(), &[true]);
    let pending = view_model.pending_request().expect("ready draft should build");
    assert_eq!(pending.hashtags, vec!["morning".to_string()]);
    assert_eq!(pending.rules, vec!["Show the sunrise".to_string()]);
    assert_eq!(harness.shows_of(preview::SCREEN), 1);
    assert!(matches!(
        harness.navigator.slot_state(organize_id, PREVIEW),
        SlotState::Active(_)
    ));
}

#[test]
fn preview_attaches_once_even_when_hashtags_are_resubmitted() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    let hashtags_id = run_all_steps(&mut harness, organize_id);

    harness.send(
        hashtags_id,
        UserInput::DraftStep(DraftStepInput::Hashtags(vec!["dawn".to_string()])),
    );

    assert_eq!(view_model(&harness, organize_id).readiness_checks(), &[true, true]);
    assert_eq!(view_model(&harness, organize_id).draft().hashtags, vec!["dawn".to_string()]);
    assert_eq!(harness.shows_of(preview::SCREEN), 1);
    let presents = harness
        .navigator
        .navigation()
        .history()
        .filter(|command| matches!(command, NavCommand::Present { .. }))
        .count();
    assert_eq!(presents, 1);
}

#[test]
fn failed_submit_keeps_draft_and_retry_needs_no_reentry() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    run_all_steps(&mut harness, organize_id);
    let preview_id = harness.child(organize_id, PREVIEW);
    let draft_before = view_model(&harness, organize_id).draft().clone();
    let screens_before = harness.screens();
    harness
        .organize
        .organize
        .push(Err(UseCaseError::OrganizeFailed("cover upload".to_string())));

    harness.send(preview_id, UserInput::Preview(PreviewInput::Submit));

    assert_eq!(view_model(&harness, organize_id).draft(), &draft_before);
    assert_eq!(harness.screens(), screens_before);
    assert!(harness.shell().received().is_empty());
    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::SubmissionFailed(
            "organize challenge failed: cover upload".to_string()
        ))
    );

    harness.send(preview_id, UserInput::Preview(PreviewInput::Submit));

    assert_eq!(harness.organize.organize.calls(), 2);
    assert_eq!(
        harness.shell().received(),
        &[(
            ORGANIZE,
            FlowResult::Finished(FlowOutcome::OrganizeFinished { challenge_id: 42 })
        )]
    );
    assert_eq!(harness.screens(), vec!["shell.home"]);
    let dismissals = harness
        .navigator
        .navigation()
        .history()
        .filter(|command| matches!(command, NavCommand::Dismiss { .. }))
        .count();
    assert_eq!(dismissals, 1);
}

#[test]
fn invalid_step_input_stays_on_the_step() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    let name_id = harness.child(organize_id, step_slot(DraftStep::Name));

    harness.send(name_id, UserInput::DraftStep(DraftStepInput::Name("  ".to_string())));
    let foreign = harness.send(
        name_id,
        UserInput::DraftStep(DraftStepInput::Cover("asset://x".to_string())),
    );

    assert_eq!(foreign, DispatchOutcome::Ignored(IgnoreReason::UnsupportedInput));
    assert_eq!(
        harness.navigator.slot_state(organize_id, step_slot(DraftStep::Goal)),
        SlotState::Empty
    );
    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::InvalidInput("name".to_string()))
    );
}

#[test]
fn back_from_a_step_pops_only_that_step() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    let name_id = harness.child(organize_id, step_slot(DraftStep::Name));
    harness.send(name_id, UserInput::DraftStep(step_input(DraftStep::Name)));
    let goal_id = harness.child(organize_id, step_slot(DraftStep::Goal));

    harness.send(goal_id, UserInput::Back);

    assert_eq!(
        harness.screens(),
        vec!["shell.home", organize::INTRO_SCREEN, step::screen(DraftStep::Name)]
    );
    assert_eq!(
        view_model(&harness, organize_id).draft().name.as_deref(),
        Some("Dawn run")
    );
}

#[test]
fn resubmitting_an_earlier_step_keeps_later_fields() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    for step in [DraftStep::Name, DraftStep::Goal, DraftStep::Cover] {
        let step_id = harness.child(organize_id, step_slot(step));
        harness.send(step_id, UserInput::DraftStep(step_input(step)));
    }
    let goal_id = harness.child(organize_id, step_slot(DraftStep::Goal));
    let rules_id = harness.child(organize_id, step_slot(DraftStep::Rules));
    harness.send(rules_id, UserInput::Back);
    let cover_id = harness.child(organize_id, step_slot(DraftStep::Cover));
    harness.send(cover_id, UserInput::Back);
    assert_eq!(harness.screens().last(), Some(&step::screen(DraftStep::Goal)));

    harness.send(
        goal_id,
        UserInput::DraftStep(DraftStepInput::Goal {
            goal: "Run 5km".to_string(),
            prove_time: "06:30".to_string(),
            end_date_epoch_ms: 1_800_000_000_000,
        }),
    );

    let draft = view_model(&harness, organize_id).draft();
    assert_eq!(draft.goal.as_deref(), Some("Run 5km"));
    assert_eq!(draft.name.as_deref(), Some("Dawn run"));
    assert_eq!(draft.cover_image.as_deref(), Some("asset://cover/dawn"));
    assert!(matches!(
        harness.navigator.slot_state(organize_id, step_slot(DraftStep::Cover)),
        SlotState::Active(_)
    ));
}

#[test]
fn modify_mode_edits_one_step_then_submits() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenModify {
        challenge_id: 9,
        draft: complete_draft(),
    });
    let modify_id = harness.child(harness.shell, MODIFY);
    assert_eq!(harness.screens().last(), Some(&organize::SUMMARY_SCREEN));
    assert_eq!(
        harness.send(modify_id, UserInput::Organize(OrganizeInput::Start)),
        DispatchOutcome::Ignored(IgnoreReason::UnsupportedInput)
    );

    harness.send(
        modify_id,
        UserInput::Organize(OrganizeInput::EditStep(DraftStep::Name)),
    );
    let edit_id = harness.child(modify_id, EDIT);
    assert_eq!(harness.screens().last(), Some(&step::screen(DraftStep::Name)));
    harness.send(
        edit_id,
        UserInput::DraftStep(DraftStepInput::Name("Evening run".to_string())),
    );

    assert_eq!(harness.navigator.slot_state(modify_id, EDIT), SlotState::Empty);
    assert_eq!(
        view_model(&harness, modify_id).draft().name.as_deref(),
        Some("Evening run")
    );
    assert!(view_model(&harness, modify_id).readiness_checks().is_empty());

    harness.send(modify_id, UserInput::Organize(OrganizeInput::Submit));

    assert_eq!(harness.organize.modify.calls(), 1);
    let submitted = harness.organize.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(submitted.name, "Evening run");
    assert_eq!(
        harness.shell().received(),
        &[(
            MODIFY,
            FlowResult::Finished(FlowOutcome::OrganizeFinished { challenge_id: 9 })
        )]
    );
    assert_eq!(harness.screens(), vec!["shell.home"]);
}

#[test]
fn modify_with_incomplete_draft_signals_missing_fields() {
    let mut harness = Harness::new();
    let mut draft = complete_draft();
    draft.cover_image = None;
    harness.open(ShellInput::OpenModify {
        challenge_id: 9,
        draft,
    });
    let modify_id = harness.child(harness.shell, MODIFY);

    harness.send(modify_id, UserInput::Organize(OrganizeInput::Submit));

    assert_eq!(harness.organize.modify.calls(), 0);
    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::DraftIncomplete(vec![DraftField::CoverImage]))
    );
    assert!(harness.navigator.tree().is_active(modify_id));
}

#[test]
fn authentication_failure_on_submit_ends_the_wizard() {
    let mut harness = Harness::new();
    let organize_id = open_wizard(&mut harness);
    run_all_steps(&mut harness, organize_id);
    let preview_id = harness.child(organize_id, PREVIEW);
    harness
        .organize
        .organize
        .push(Err(UseCaseError::TokenUnauthorized));

    harness.send(preview_id, UserInput::Preview(PreviewInput::Submit));

    assert_eq!(
        harness
            .shell()
            .count(ORGANIZE, |event| *event == FlowResult::AuthenticationFailed),
        1
    );
    assert!(harness.navigator.tree().is_retired(organize_id));
    assert_eq!(harness.screens().first(), Some(&"shell.home"));
    assert!(!harness.screens().contains(&preview::SCREEN));
}
