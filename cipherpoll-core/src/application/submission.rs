use crate::application::notifier::Notifier;
use crate::application::synchronizer::RecordSynchronizer;
use crate::domain::{classify, question_count, score, NewRecord, Record};
use crate::foundation::constants::RECORD_ID_PREFIX;
use crate::foundation::util::time::now_epoch_seconds;
use crate::foundation::{AccountAddress, ContractAddress, EncryptedHandle, PollError, RecordId, Result};
use crate::infrastructure::compute::ConfidentialCompute;
use crate::infrastructure::ledger::LedgerGateway;
use log::{info, warn};
use rand::Rng;
use std::sync::Arc;

/// Orchestrates score computation, encryption, transaction submission,
/// confirmation, and the closing resynchronization.
///
/// Deliberately not idempotent: every call creates a new record with a fresh
/// identifier, since each submission is a distinct event.
pub struct SubmissionWorkflow {
    ledger: Arc<dyn LedgerGateway>,
    compute: Arc<dyn ConfidentialCompute>,
    synchronizer: Arc<RecordSynchronizer>,
    notifier: Arc<Notifier>,
    id_alloc_max_attempts: u32,
}

impl SubmissionWorkflow {
    pub fn new(
        ledger: Arc<dyn LedgerGateway>,
        compute: Arc<dyn ConfidentialCompute>,
        synchronizer: Arc<RecordSynchronizer>,
        notifier: Arc<Notifier>,
        id_alloc_max_attempts: u32,
    ) -> Self {
        Self { ledger, compute, synchronizer, notifier, id_alloc_max_attempts: id_alloc_max_attempts.max(1) }
    }

    pub async fn submit(
        &self,
        answers: &[u32],
        account: &AccountAddress,
        contract: &ContractAddress,
    ) -> Result<Record> {
        let expected = question_count();
        if answers.len() != expected {
            return Err(self.fail(PollError::IncompleteAnswers { answered: answers.len(), expected }));
        }

        let total_score = score(answers);
        let category = classify(total_score);
        info!("submitting questionnaire score={total_score} category={}", category.label);

        let record_id = self.allocate_id().await?;

        self.notifier.pending("Encrypting score...");
        let payload = match self.compute.encrypt(contract, account, total_score).await {
            Ok(payload) => payload,
            Err(PollError::EncryptionFailed { details }) => {
                return Err(self.fail(PollError::EncryptionFailed { details }))
            }
            Err(err) => return Err(self.fail(PollError::encryption_failed(err.to_string()))),
        };

        self.notifier.pending("Submitting transaction...");
        let new_record = NewRecord {
            id: record_id.clone(),
            display_name: format!("{} personality test", category.label),
            encrypted_payload: payload.ciphertext,
            proof: payload.proof,
            public_score: total_score,
            public_question_count: answers.len() as u64,
            note: category.description.to_string(),
        };
        let tx_id = match self.ledger.create_record(account, new_record).await {
            Ok(tx_id) => tx_id,
            // The user declining to sign is not a generic failure; keep it distinct.
            Err(PollError::TransactionRejected) => return Err(self.fail(PollError::TransactionRejected)),
            Err(PollError::DuplicateRecordId { record_id }) => {
                return Err(self.fail(PollError::DuplicateRecordId { record_id }))
            }
            Err(err) => return Err(self.fail(PollError::transaction_failed(err.to_string()))),
        };

        self.notifier.pending("Waiting for transaction confirmation...");
        if let Err(err) = self.ledger.wait_for_confirmation(&tx_id).await {
            return Err(self.fail(PollError::transaction_failed(err.to_string())));
        }
        info!("record created record_id={record_id} tx_id={tx_id}");

        // The record is on chain at this point; a refresh failure must not
        // turn the submission into an error.
        let refreshed = match self.synchronizer.synchronize(Some(account)).await {
            Ok(report) => report.records.into_iter().find(|r| r.id == record_id),
            Err(err) => {
                warn!("post-submission refresh failed record_id={record_id} error={err}");
                None
            }
        };
        self.notifier.success("Test submitted successfully!");

        match refreshed {
            Some(record) => Ok(record),
            None => {
                // Eventual consistency: the ledger may lag one round trip.
                // The transaction is confirmed, so a read failure here must
                // not turn the submission into an error; the next sync picks
                // up whatever this fallback could not read.
                let handle = match self.ledger.get_encrypted_handle(&record_id).await {
                    Ok(handle) => handle,
                    Err(err) => {
                        warn!("handle fetch after confirmed submission failed record_id={record_id} error={err}");
                        EncryptedHandle::default()
                    }
                };
                Ok(Record {
                    id: record_id,
                    display_name: format!("{} personality test", category.label),
                    public_score: total_score,
                    public_question_count: answers.len() as u64,
                    created_at_epoch_seconds: now_epoch_seconds(),
                    creator: account.clone(),
                    encrypted_handle: handle,
                    verified: false,
                    decrypted_value: None,
                })
            }
        }
    }

    /// Collision-checked identifier allocation: a wall-clock-derived candidate
    /// with a random suffix, checked against the ledger before use. Rapid
    /// repeated submissions make pure wall-clock ids a real collision risk.
    async fn allocate_id(&self) -> Result<RecordId> {
        for attempt in 0..self.id_alloc_max_attempts {
            let suffix: [u8; 4] = rand::thread_rng().gen();
            let candidate = RecordId::from(format!("{RECORD_ID_PREFIX}-{}-{}", now_epoch_seconds(), hex::encode(suffix)));
            let existing = match self.ledger.list_record_ids().await {
                Ok(ids) => ids,
                Err(err) => {
                    // No transaction was attempted yet; this is an allocation
                    // failure, not a submission failure.
                    warn!("id allocation listing failed attempt={attempt} error={err}");
                    return Err(self.fail(PollError::IdAllocationFailed { attempts: attempt + 1 }));
                }
            };
            if existing.contains(&candidate) {
                warn!("record id collision, retrying candidate={candidate} attempt={attempt}");
                continue;
            }
            return Ok(candidate);
        }
        Err(self.fail(PollError::IdAllocationFailed { attempts: self.id_alloc_max_attempts }))
    }

    /// Surface the failure once through the notifier and hand it back to the
    /// caller so it can branch without depending on the notification text.
    fn fail(&self, err: PollError) -> PollError {
        self.notifier.error(err.to_string());
        err
    }
}
