use crate::foundation::{PollError, RecordId, Result};
use log::{info, warn};

/// States of the decryption-verification protocol for a single record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VerificationState {
    /// Initial: the record's value is ciphertext only.
    Encrypted,
    /// A decryption proof has been requested from the compute service.
    ProofRequested,
    /// Terminal: the proof was accepted on chain and the clear value extracted.
    Verified,
    /// Terminal: the chain already holds the verified clear value, either
    /// from a prior run or because another actor won the race.
    AlreadyVerifiedOnChain,
}

const VALID_TRANSITIONS: &[(VerificationState, VerificationState)] = &[
    (VerificationState::Encrypted, VerificationState::ProofRequested),
    (VerificationState::Encrypted, VerificationState::AlreadyVerifiedOnChain),
    (VerificationState::ProofRequested, VerificationState::Verified),
    (VerificationState::ProofRequested, VerificationState::AlreadyVerifiedOnChain),
];

pub fn is_terminal(state: VerificationState) -> bool {
    matches!(state, VerificationState::Verified | VerificationState::AlreadyVerifiedOnChain)
}

pub fn ensure_valid_transition(from: VerificationState, to: VerificationState) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if VALID_TRANSITIONS.contains(&(from, to)) {
        return Ok(());
    }
    Err(PollError::InvalidStateTransition { from: format!("{from:?}"), to: format!("{to:?}") })
}

/// Apply and log a state transition for a record's verification run.
pub fn transition(record_id: &RecordId, from: VerificationState, to: VerificationState) -> Result<VerificationState> {
    if let Err(err) = ensure_valid_transition(from, to) {
        warn!("invalid verification transition record_id={record_id} from_state={from:?} to_state={to:?} error={err}");
        return Err(err);
    }
    info!("verification transition record_id={record_id} from_state={from:?} to_state={to:?}");
    Ok(to)
}
