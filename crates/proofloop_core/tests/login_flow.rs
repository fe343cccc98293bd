mod common;

use common::Harness;
use proofloop_core::coordinator::{DispatchOutcome, SlotState};
use proofloop_core::flow::{
    FlowOutcome, FlowResult, LoginInput, ShellInput, SignUpInput, UiSignal, UserInput,
    VerificationInput,
};
use proofloop_core::flows::login::verification::EmailVerificationCoordinator;
use proofloop_core::flows::login::{self, sign_up, verification};
use proofloop_core::flows::shell::LOGIN;
use proofloop_core::usecase::{UseCaseError, VerificationResult};
use proofloop_core::FlowKind;

fn open_verification(harness: &mut Harness) -> (uuid::Uuid, uuid::Uuid) {
    harness.open(ShellInput::OpenLogin);
    let login_id = harness.child(harness.shell, LOGIN);
    harness.send(
        login_id,
        UserInput::Login(LoginInput::SubmitEmail("dawn@proof.app".to_string())),
    );
    let verification_id = harness.child(login_id, login::VERIFICATION);
    (login_id, verification_id)
}

#[test]
fn wrong_code_signals_without_touching_navigation() {
    let mut harness = Harness::new();
    let (_, verification_id) = open_verification(&mut harness);
    harness.navigator.drain_signals();
    let screens_before = harness.screens();
    let nodes_before = harness.navigator.tree().len();
    let height_before = harness.navigator.tree().height();
    harness
        .auth
        .verify_code
        .push(Err(UseCaseError::InvalidVerificationCode));

    let outcome = harness.send(
        verification_id,
        UserInput::Verification(VerificationInput::SubmitCode("1234".to_string())),
    );

    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(harness.screens(), screens_before);
    assert_eq!(harness.navigator.tree().len(), nodes_before);
    assert_eq!(harness.navigator.tree().height(), height_before);
    let signals = harness.navigator.drain_signals();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].signal, UiSignal::InvalidVerificationCode);
    assert_eq!(signals[0].flow, FlowKind::EmailVerification);
    assert_eq!(signals[0].source, verification_id);
    assert!(harness.shell().received().is_empty());
    let attempts = harness
        .navigator
        .coordinator::<EmailVerificationCoordinator>(verification_id)
        .unwrap()
        .view_model()
        .failed_attempts();
    assert_eq!(attempts, 1);
}

#[test]
fn malformed_code_never_reaches_the_use_case() {
    let mut harness = Harness::new();
    let (_, verification_id) = open_verification(&mut harness);

    harness.send(
        verification_id,
        UserInput::Verification(VerificationInput::SubmitCode("12a".to_string())),
    );

    assert_eq!(harness.auth.verify_code.calls(), 0);
    let signals = harness.navigator.drain_signals();
    assert_eq!(
        signals.last().map(|record| record.signal.clone()),
        Some(UiSignal::InvalidVerificationCode)
    );
}

#[test]
fn existing_account_finishes_login_and_closes_the_flow() {
    let mut harness = Harness::new();
    let (login_id, verification_id) = open_verification(&mut harness);
    assert_eq!(
        harness.screens(),
        vec!["shell.home", login::SCREEN, verification::SCREEN]
    );

    harness.send(
        verification_id,
        UserInput::Verification(VerificationInput::SubmitCode("0421".to_string())),
    );

    assert_eq!(harness.shell().user_name(), Some("dawn"));
    assert_eq!(
        harness.shell().received(),
        &[(
            LOGIN,
            FlowResult::Finished(FlowOutcome::LoggedIn {
                user_name: "dawn".to_string()
            })
        )]
    );
    assert_eq!(harness.navigator.slot_state(harness.shell, LOGIN), SlotState::Empty);
    assert!(!harness.navigator.tree().contains(login_id));
    assert!(!harness.navigator.tree().contains(verification_id));
    assert_eq!(harness.screens(), vec!["shell.home"]);
}

#[test]
fn new_account_goes_through_sign_up() {
    let mut harness = Harness::new();
    harness
        .auth
        .verify_code
        .push(Ok(VerificationResult { user_name: None }));
    harness.auth.sign_up.push(Ok("새벽러너".to_string()));
    let (login_id, verification_id) = open_verification(&mut harness);

    harness.send(
        verification_id,
        UserInput::Verification(VerificationInput::SubmitCode("0421".to_string())),
    );
    let sign_up_id = harness.child(login_id, login::SIGN_UP);
    assert_eq!(harness.screens().last(), Some(&sign_up::SCREEN));

    harness.send(
        sign_up_id,
        UserInput::SignUp(SignUpInput::SubmitNickname("x".to_string())),
    );
    assert_eq!(harness.auth.sign_up.calls(), 0);
    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::InvalidNickname)
    );

    harness.send(
        sign_up_id,
        UserInput::SignUp(SignUpInput::SubmitNickname("새벽러너".to_string())),
    );

    assert_eq!(harness.shell().user_name(), Some("새벽러너"));
    assert_eq!(harness.screens(), vec!["shell.home"]);
}

#[test]
fn invalid_email_is_rejected_locally() {
    let mut harness = Harness::new();
    harness.open(ShellInput::OpenLogin);
    let login_id = harness.child(harness.shell, LOGIN);

    harness.send(
        login_id,
        UserInput::Login(LoginInput::SubmitEmail("dawn-at-proof".to_string())),
    );

    assert_eq!(harness.auth.request_code.calls(), 0);
    assert_eq!(
        harness.navigator.slot_state(login_id, login::VERIFICATION),
        SlotState::Empty
    );
    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::InvalidEmail)
    );
}

#[test]
fn back_from_verification_returns_to_email_screen() {
    let mut harness = Harness::new();
    let (login_id, verification_id) = open_verification(&mut harness);

    harness.send(verification_id, UserInput::Back);

    assert_eq!(
        harness.navigator.slot_state(login_id, login::VERIFICATION),
        SlotState::Empty
    );
    assert_eq!(harness.screens(), vec!["shell.home", login::SCREEN]);
    assert!(harness.shell().received().is_empty());
}

#[test]
fn server_error_during_code_request_is_unrecoverable_notice() {
    let mut harness = Harness::new();
    harness.auth.request_code.push(Err(UseCaseError::ServerError));
    harness.open(ShellInput::OpenLogin);
    let login_id = harness.child(harness.shell, LOGIN);

    harness.send(
        login_id,
        UserInput::Login(LoginInput::SubmitEmail("dawn@proof.app".to_string())),
    );

    assert_eq!(
        harness.navigator.drain_signals().last().map(|record| record.signal.clone()),
        Some(UiSignal::NetworkUnstable)
    );
    assert_eq!(harness.screens(), vec!["shell.home", login::SCREEN]);
}
