use crate::application::notifier::Notifier;
use crate::application::synchronizer::RecordSynchronizer;
use crate::domain::verification::{transition, VerificationState};
use crate::foundation::{AccountAddress, ContractAddress, PollError, RecordId, Result};
use crate::infrastructure::compute::{ConfidentialCompute, ProofCallback};
use crate::infrastructure::ledger::LedgerGateway;
use log::{info, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Outcome of a verification run.
///
/// "Already verified" is a first-class outcome, never an error surfaced to
/// callers: it covers both the fast path (the chain already held the clear
/// value) and the race path (another actor's proof landed first). In the race
/// case the clear value is unknown here; callers should re-read the refreshed
/// record instead of trusting a stale return value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified { value: u64 },
    AlreadyVerified { value: Option<u64> },
}

impl VerifyOutcome {
    pub fn value(&self) -> Option<u64> {
        match self {
            VerifyOutcome::Verified { value } => Some(*value),
            VerifyOutcome::AlreadyVerified { value } => *value,
        }
    }
}

/// Drives the decryption-verification state machine for a single record.
pub struct VerificationWorkflow {
    ledger: Arc<dyn LedgerGateway>,
    compute: Arc<dyn ConfidentialCompute>,
    synchronizer: Arc<RecordSynchronizer>,
    notifier: Arc<Notifier>,
    in_flight: Arc<Mutex<HashSet<RecordId>>>,
}

struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<RecordId>>>,
    record_id: RecordId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.record_id);
        }
    }
}

impl VerificationWorkflow {
    pub fn new(
        ledger: Arc<dyn LedgerGateway>,
        compute: Arc<dyn ConfidentialCompute>,
        synchronizer: Arc<RecordSynchronizer>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self { ledger, compute, synchronizer, notifier, in_flight: Arc::new(Mutex::new(HashSet::new())) }
    }

    pub async fn verify(
        &self,
        record_id: &RecordId,
        account: &AccountAddress,
        contract: &ContractAddress,
    ) -> Result<VerifyOutcome> {
        let _guard = self.acquire(record_id).map_err(|err| self.fail(err))?;
        let state = VerificationState::Encrypted;

        let data = match self.ledger.get_record(record_id).await {
            Ok(data) => data,
            Err(PollError::RecordNotFound { record_id }) => {
                return Err(self.fail(PollError::RecordNotFound { record_id }))
            }
            Err(err) => return Err(self.fail(PollError::decryption_failed(err.to_string()))),
        };

        // Fast path: a one-time verification right must not be re-spent, and
        // redundant proof work is avoided.
        if data.verified {
            transition(record_id, state, VerificationState::AlreadyVerifiedOnChain)?;
            self.notifier.success("Data already verified on chain");
            return Ok(VerifyOutcome::AlreadyVerified { value: Some(data.decrypted_value.unwrap_or(0)) });
        }

        let state = transition(record_id, state, VerificationState::ProofRequested)?;
        let handle = match self.ledger.get_encrypted_handle(record_id).await {
            Ok(handle) => handle,
            Err(err) => return Err(self.fail(PollError::decryption_failed(err.to_string()))),
        };

        self.notifier.pending("Verifying decryption on chain...");
        let callback = self.proof_submitter(record_id.clone(), account.clone());
        let result = match self.compute.request_decryption_proof(&[handle.clone()], contract, callback).await {
            Ok(result) => result,
            // Race lost: another actor verified first. Converge instead of erroring.
            Err(PollError::AlreadyVerifiedOnChain { .. }) => {
                transition(record_id, state, VerificationState::AlreadyVerifiedOnChain)?;
                self.refresh(account).await;
                self.notifier.success("Data already verified on chain");
                return Ok(VerifyOutcome::AlreadyVerified { value: None });
            }
            Err(PollError::DecryptionFailed { details }) => {
                return Err(self.fail(PollError::DecryptionFailed { details }))
            }
            Err(err) => return Err(self.fail(PollError::decryption_failed(err.to_string()))),
        };

        let value = match result.clear_values.get(&handle) {
            Some(value) => *value,
            None => return Err(self.fail(PollError::decryption_failed(format!("no clear value for handle {handle}")))),
        };

        transition(record_id, state, VerificationState::Verified)?;
        info!("decryption verified record_id={record_id} value={value}");
        self.refresh(account).await;
        self.notifier.success("Decryption verified successfully!");
        Ok(VerifyOutcome::Verified { value })
    }

    /// Re-entrancy guard: a second `verify` on the same record while one is
    /// in flight must not double-submit a proof.
    fn acquire(&self, record_id: &RecordId) -> Result<InFlightGuard> {
        let mut set = self
            .in_flight
            .lock()
            .map_err(|_| PollError::decryption_failed("in-flight set lock poisoned"))?;
        if !set.insert(record_id.clone()) {
            return Err(PollError::VerificationInProgress { record_id: record_id.to_string() });
        }
        Ok(InFlightGuard { in_flight: Arc::clone(&self.in_flight), record_id: record_id.clone() })
    }

    fn proof_submitter(&self, record_id: RecordId, account: AccountAddress) -> ProofCallback {
        let ledger = Arc::clone(&self.ledger);
        Box::new(move |clear_values_encoded, proof| {
            Box::pin(async move { ledger.submit_decryption_proof(&account, &record_id, clear_values_encoded, proof).await })
        })
    }

    async fn refresh(&self, account: &AccountAddress) {
        if let Err(err) = self.synchronizer.synchronize(Some(account)).await {
            warn!("post-verification refresh failed error={err}");
        }
    }

    fn fail(&self, err: PollError) -> PollError {
        self.notifier.error(err.to_string());
        err
    }
}
