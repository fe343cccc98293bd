mod common;

use common::Harness;
use proofloop_core::container::Container;
use proofloop_core::coordinator::{
    AttachOutcome, Coordinating, Coordinator, DetachOutcome, DispatchOutcome, FlowContext,
    IgnoreReason, InputDisposition, Lifecycle, Navigator, SlotKey, SlotState,
};
use proofloop_core::flow::{
    FlowEvent, FlowKind, FlowResult, JoinInput, SearchInput, ShellInput, UserInput,
};
use proofloop_core::flows::join::ChallengeJoinContainer;
use proofloop_core::flows::shell::{JOIN, SEARCH};
use proofloop_core::flows::{join, search};
use proofloop_core::navigation::{InMemoryNavigationStack, NavCommand, Presentation, ViewUnit};
use proofloop_core::RuntimeConfig;
use std::any::Any;
use uuid::Uuid;

#[test]
fn double_tap_attaches_one_child_and_pushes_once() {
    let mut harness = Harness::new();

    assert_eq!(harness.open(ShellInput::OpenChallenge(7)), DispatchOutcome::Handled);
    let first = harness.child(harness.shell, JOIN);
    assert_eq!(harness.open(ShellInput::OpenChallenge(7)), DispatchOutcome::Handled);

    assert_eq!(harness.child(harness.shell, JOIN), first);
    assert_eq!(harness.navigator.tree().children(harness.shell), vec![first]);
    assert_eq!(harness.shows_of(join::SCREEN), 1);
    assert_eq!(harness.challenge.detail.calls(), 1);
}

#[test]
fn runtime_attach_into_occupied_slot_reports_existing_child() {
    let mut harness = Harness::new();
    let scope = proofloop_core::container::JoinScope {
        challenge: harness.challenge.clone(),
    };

    let first = harness.navigator.attach(
        harness.shell,
        JOIN,
        ChallengeJoinContainer::new(scope.clone()).coordinator(7),
    );
    let AttachOutcome::Attached(child) = first else {
        panic!("first attach should succeed: {first:?}");
    };
    let second = harness.navigator.attach(
        harness.shell,
        JOIN,
        ChallengeJoinContainer::new(scope).coordinator(7),
    );

    assert_eq!(second, AttachOutcome::AlreadyAttached(child));
    assert_eq!(harness.navigator.slot_state(harness.shell, JOIN), SlotState::Active(child));
    assert_eq!(harness.shows_of(join::SCREEN), 1);
}

#[test]
fn detaching_an_empty_slot_changes_nothing() {
    let mut harness = Harness::new();
    let history_before = harness.navigator.navigation().history().count();

    let outcome = harness.navigator.detach(harness.shell, JOIN, true);

    assert_eq!(outcome, DetachOutcome::NotAttached);
    assert_eq!(harness.navigator.navigation().history().count(), history_before);
    assert_eq!(harness.screens(), vec!["shell.home"]);
}

#[test]
fn child_listener_is_parent_until_detached() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenChallenge(7));
    let child = harness.child(harness.shell, JOIN);

    assert_eq!(harness.navigator.tree().listener_of(child), Some(harness.shell));
    assert_eq!(harness.navigator.tree().lifecycle(child), Some(Lifecycle::Active));

    assert_eq!(harness.send(child, UserInput::Back), DispatchOutcome::Handled);

    assert_eq!(harness.navigator.slot_state(harness.shell, JOIN), SlotState::Empty);
    assert_eq!(harness.navigator.tree().lifecycle(child), Some(Lifecycle::Terminated));
    assert_eq!(harness.navigator.tree().listener_of(child), None);
    assert_eq!(harness.screens(), vec!["shell.home"]);
    assert_eq!(harness.shell().count(JOIN, |event| *event == FlowResult::Back), 1);
}

#[test]
fn terminated_coordinator_never_comes_back() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenChallenge(7));
    let first = harness.child(harness.shell, JOIN);
    harness.send(first, UserInput::Back);

    assert_eq!(
        harness.send(first, UserInput::Join(JoinInput::TapJoin)),
        DispatchOutcome::Ignored(IgnoreReason::Terminated)
    );

    harness.open(ShellInput::OpenChallenge(7));
    let second = harness.child(harness.shell, JOIN);
    assert_ne!(first, second);
    assert_eq!(harness.navigator.tree().lifecycle(first), Some(Lifecycle::Terminated));
    assert_eq!(harness.navigator.tree().lifecycle(second), Some(Lifecycle::Active));
}

#[test]
fn unknown_ids_and_foreign_input_are_ignored() {
    let mut harness = Harness::new();
    assert_eq!(
        harness.send(Uuid::new_v4(), UserInput::Back),
        DispatchOutcome::Ignored(IgnoreReason::UnknownCoordinator)
    );
    assert_eq!(
        harness.send(harness.shell, UserInput::Join(JoinInput::TapJoin)),
        DispatchOutcome::Ignored(IgnoreReason::UnsupportedInput)
    );
}

#[test]
fn detaching_a_parent_pops_its_whole_subtree() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenSearch);
    let search_id = harness.child(harness.shell, SEARCH);
    harness.send(search_id, UserInput::Search(SearchInput::Query("run".to_string())));
    harness.send(search_id, UserInput::Search(SearchInput::Select(7)));
    let join_id = harness.child(search_id, search::JOIN);
    assert_eq!(
        harness.screens(),
        vec!["shell.home", search::SCREEN, join::SCREEN]
    );

    harness.send(search_id, UserInput::Back);

    assert_eq!(harness.screens(), vec!["shell.home"]);
    assert_eq!(harness.navigator.tree().lifecycle(join_id), Some(Lifecycle::Terminated));
    assert_eq!(harness.navigator.tree().len(), 1);
    let pops = harness
        .navigator
        .navigation()
        .history()
        .filter(|command| matches!(command, NavCommand::Pop { .. }))
        .collect::<Vec<_>>();
    assert_eq!(
        pops,
        vec![
            &NavCommand::Pop { animated: true },
            &NavCommand::Pop { animated: false }
        ]
    );
}

#[test]
fn attach_beyond_depth_limit_is_refused() {
    let mut harness = Harness::with_config(RuntimeConfig {
        max_depth: 2,
        ..RuntimeConfig::default()
    });
    harness.open(ShellInput::OpenSearch);
    let search_id = harness.child(harness.shell, SEARCH);
    harness.send(search_id, UserInput::Search(SearchInput::Query("run".to_string())));
    harness.send(search_id, UserInput::Search(SearchInput::Select(7)));

    assert_eq!(harness.navigator.slot_state(search_id, search::JOIN), SlotState::Empty);
    assert_eq!(harness.navigator.tree().height(), 2);
    assert_eq!(harness.shows_of(join::SCREEN), 0);
}

#[test]
fn shutdown_terminates_every_coordinator() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenChallenge(7));
    let child = harness.child(harness.shell, JOIN);

    harness.navigator.shutdown();

    assert!(harness.navigator.tree().is_empty());
    assert!(harness.navigator.navigation().is_empty());
    assert_eq!(harness.navigator.root(), None);
    assert_eq!(harness.navigator.tree().lifecycle(child), Some(Lifecycle::Terminated));
    assert_eq!(
        harness.send(harness.shell, UserInput::Back),
        DispatchOutcome::Ignored(IgnoreReason::Terminated)
    );
}

const PROBE: SlotKey = SlotKey::new("probe");

struct Leaf;

impl Coordinator for Leaf {
    fn flow(&self) -> FlowKind {
        FlowKind::Report
    }

    fn handle_input(&mut self, input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        match input {
            UserInput::Back => {
                ctx.emit(FlowResult::Back);
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

/// Root that attaches twice per input and counts upward events.
#[derive(Default)]
struct Prober {
    outcomes: Vec<AttachOutcome>,
    events: usize,
}

impl Coordinator for Prober {
    fn flow(&self) -> FlowKind {
        FlowKind::Shell
    }

    fn handle_input(&mut self, _input: UserInput, ctx: &mut FlowContext<'_>) -> InputDisposition {
        for _ in 0..2 {
            let leaf = Coordinating::new(ViewUnit::new("leaf"), Presentation::Modal, Leaf);
            self.outcomes.push(ctx.attach(PROBE, leaf));
        }
        InputDisposition::Handled
    }

    fn on_event(&mut self, slot: SlotKey, _event: FlowEvent, ctx: &mut FlowContext<'_>) {
        self.events += 1;
        ctx.detach(slot);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn reentrant_attach_in_one_callback_reserves_the_slot_once() {
    let mut navigator = Navigator::new(
        Box::new(InMemoryNavigationStack::new()),
        RuntimeConfig::default(),
    );
    let root = navigator
        .launch(Coordinating::new(
            ViewUnit::new("probe.root"),
            Presentation::Push,
            Prober::default(),
        ))
        .unwrap();

    navigator.dispatch(root, UserInput::Back);

    let prober = navigator.coordinator::<Prober>(root).unwrap();
    let AttachOutcome::Attached(child) = prober.outcomes[0] else {
        panic!("first attach should reserve the slot");
    };
    assert_eq!(prober.outcomes[1], AttachOutcome::AlreadyAttached(child));
    assert_eq!(navigator.navigation().screens(), vec!["probe.root", "leaf"]);
    assert_eq!(
        navigator.tree().get(child).map(|node| node.presentation()),
        Some(Presentation::Modal)
    );
}

#[test]
fn events_from_a_detached_child_are_not_delivered_twice() {
    let mut navigator = Navigator::new(
        Box::new(InMemoryNavigationStack::new()),
        RuntimeConfig::default(),
    );
    let root = navigator
        .launch(Coordinating::new(
            ViewUnit::new("probe.root"),
            Presentation::Push,
            Prober::default(),
        ))
        .unwrap();
    navigator.dispatch(root, UserInput::Back);
    let child = match navigator.slot_state(root, PROBE) {
        SlotState::Active(child) => child,
        other => panic!("probe slot should be active: {other:?}"),
    };

    navigator.dispatch(child, UserInput::Back);

    assert_eq!(navigator.coordinator::<Prober>(root).unwrap().events, 1);
    assert_eq!(navigator.slot_state(root, PROBE), SlotState::Empty);
    assert_eq!(navigator.navigation().screens(), vec!["probe.root"]);
}
