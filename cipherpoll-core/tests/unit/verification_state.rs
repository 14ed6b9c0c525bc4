use cipherpoll_core::domain::{ensure_valid_transition, is_terminal, VerificationState};
use cipherpoll_core::foundation::PollError;

#[test]
fn test_verification_state_when_invalid_transition_then_errors() {
    let err = ensure_valid_transition(VerificationState::Verified, VerificationState::Encrypted).unwrap_err();
    assert!(matches!(err, PollError::InvalidStateTransition { .. }));
    assert!(ensure_valid_transition(VerificationState::AlreadyVerifiedOnChain, VerificationState::Verified).is_err());
}

#[test]
fn test_verification_state_happy_paths() {
    assert!(ensure_valid_transition(VerificationState::Encrypted, VerificationState::ProofRequested).is_ok());
    assert!(ensure_valid_transition(VerificationState::ProofRequested, VerificationState::Verified).is_ok());
    assert!(ensure_valid_transition(VerificationState::Encrypted, VerificationState::AlreadyVerifiedOnChain).is_ok());
}

#[test]
fn test_verification_state_terminals() {
    assert!(is_terminal(VerificationState::Verified));
    assert!(is_terminal(VerificationState::AlreadyVerifiedOnChain));
    assert!(!is_terminal(VerificationState::Encrypted));
    assert!(!is_terminal(VerificationState::ProofRequested));
}
