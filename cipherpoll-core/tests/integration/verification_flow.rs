use crate::fixtures::{connect_and_submit, test_account, test_config, test_service, LOW_ANSWERS};
use cipherpoll_core::application::{Notifier, PollService, RecordSynchronizer, VerificationWorkflow, VerifyOutcome};
use cipherpoll_core::foundation::{
    AccountAddress, ContractAddress, EncryptedHandle, PollError, RecordId,
};
use cipherpoll_core::infrastructure::compute::{
    ConfidentialCompute, DecryptionResult, EncryptedPayload, InMemoryCompute, ProofCallback,
};
use cipherpoll_core::infrastructure::ledger::InMemoryLedger;
use async_trait::async_trait;
use std::sync::Arc;

#[tokio::test]
async fn test_verify_reveals_originally_encrypted_value() {
    let (_ledger, compute, service) = test_service();
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    let outcome = service.verify(&record.id).await.expect("verify");
    assert_eq!(outcome, VerifyOutcome::Verified { value: 5 });
    // The revealed value is the plaintext the compute service registered.
    assert_eq!(compute.plaintext_of(&record.encrypted_handle), Some(5));

    let view = service.current_view().await;
    let refreshed = view.records.iter().find(|r| r.id == record.id).expect("record");
    assert!(refreshed.verified);
    assert_eq!(refreshed.decrypted_value, Some(5));
    assert_eq!(view.stats.verified_count, 1);
}

#[tokio::test]
async fn test_double_verify_submits_no_second_proof() {
    let (ledger, _compute, service) = test_service();
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    let first = service.verify(&record.id).await.expect("first verify");
    let txs_after_first = ledger.tx_count();

    let second = service.verify(&record.id).await.expect("second verify");
    let third = service.verify(&record.id).await.expect("third verify");

    assert_eq!(ledger.tx_count(), txs_after_first);
    assert_eq!(first.value(), Some(5));
    assert_eq!(second, VerifyOutcome::AlreadyVerified { value: Some(5) });
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_verify_record_verified_by_another_actor_takes_fast_path() {
    let (ledger, _compute, service) = test_service();
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    ledger.force_verified(&record.id, 99);
    let outcome = service.verify(&record.id).await.expect("verify");
    assert_eq!(outcome, VerifyOutcome::AlreadyVerified { value: Some(99) });
}

#[tokio::test]
async fn test_proof_failure_leaves_record_unverified() {
    let (_ledger, compute, service) = test_service();
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    compute.set_proof_failure(true);
    let err = service.verify(&record.id).await.unwrap_err();
    assert!(matches!(err, PollError::DecryptionFailed { .. }));

    service.synchronize().await.expect("sync");
    let view = service.current_view().await;
    let refreshed = view.records.iter().find(|r| r.id == record.id).expect("record");
    assert!(!refreshed.verified);
    assert!(refreshed.decrypted_value.is_none());

    // Retry after clearing the fault converges.
    compute.set_proof_failure(false);
    let outcome = service.verify(&record.id).await.expect("verify");
    assert_eq!(outcome, VerifyOutcome::Verified { value: 5 });
}

#[tokio::test]
async fn test_verify_unknown_record_fails() {
    let (_ledger, _compute, service) = test_service();
    service.connect(test_account()).await.expect("connect");
    let err = service.verify(&RecordId::from("poll-missing")).await.unwrap_err();
    assert!(matches!(err, PollError::RecordNotFound { .. }));
}

#[tokio::test]
async fn test_verify_without_account_fails_not_connected() {
    let (_ledger, _compute, service) = test_service();
    let err = service.verify(&RecordId::from("poll-1")).await.unwrap_err();
    assert!(matches!(err, PollError::NotConnected));
}

/// Compute service that parks every proof request until the test releases it.
struct BlockingCompute {
    gate: tokio::sync::Semaphore,
}

#[async_trait]
impl ConfidentialCompute for BlockingCompute {
    async fn encrypt(
        &self,
        _contract: &ContractAddress,
        _account: &AccountAddress,
        _value: u64,
    ) -> cipherpoll_core::Result<EncryptedPayload> {
        unimplemented!("decryption-only test compute")
    }

    async fn request_decryption_proof(
        &self,
        _handles: &[EncryptedHandle],
        _contract: &ContractAddress,
        _on_proof_ready: ProofCallback,
    ) -> cipherpoll_core::Result<DecryptionResult> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| PollError::decryption_failed("gate closed"))?;
        Err(PollError::decryption_failed("released without proof"))
    }
}

#[tokio::test]
async fn test_concurrent_verify_on_same_record_is_rejected() {
    let ledger = Arc::new(InMemoryLedger::new());
    let compute = Arc::new(InMemoryCompute::new());
    let service = PollService::new(ledger.clone(), compute, &test_config());
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    let blocking = Arc::new(BlockingCompute { gate: tokio::sync::Semaphore::new(0) });
    let synchronizer = Arc::new(RecordSynchronizer::new(ledger.clone(), 4));
    let workflow = Arc::new(VerificationWorkflow::new(
        ledger,
        blocking.clone(),
        synchronizer,
        Arc::new(Notifier::default()),
    ));

    let contract = ContractAddress::from("0xC0ffee");
    let first = tokio::spawn({
        let workflow = workflow.clone();
        let record_id = record.id.clone();
        let contract = contract.clone();
        async move { workflow.verify(&record_id, &test_account(), &contract).await }
    });

    // Give the first run time to park inside the proof request.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let err = workflow.verify(&record.id, &test_account(), &contract).await.unwrap_err();
    assert!(matches!(err, PollError::VerificationInProgress { .. }));

    blocking.gate.add_permits(1);
    let first_result = first.await.expect("join");
    assert!(matches!(first_result, Err(PollError::DecryptionFailed { .. })));

    // The in-flight guard releases once the first run finishes.
    let err = workflow.verify(&record.id, &test_account(), &contract).await.unwrap_err();
    assert!(matches!(err, PollError::DecryptionFailed { .. }));
}

/// Compute service that loses the verification race: its proof submission
/// comes back with the gateway's structured already-verified error.
struct RaceLostCompute;

#[async_trait]
impl ConfidentialCompute for RaceLostCompute {
    async fn encrypt(
        &self,
        _contract: &ContractAddress,
        _account: &AccountAddress,
        _value: u64,
    ) -> cipherpoll_core::Result<EncryptedPayload> {
        unimplemented!("decryption-only test compute")
    }

    async fn request_decryption_proof(
        &self,
        _handles: &[EncryptedHandle],
        _contract: &ContractAddress,
        _on_proof_ready: ProofCallback,
    ) -> cipherpoll_core::Result<DecryptionResult> {
        Err(PollError::AlreadyVerifiedOnChain { record_id: "poll-race".to_string() })
    }
}

#[tokio::test]
async fn test_race_lost_during_proof_converges_to_already_verified() {
    // Seed a ledger with one unverified record through the normal flow.
    let ledger = Arc::new(InMemoryLedger::new());
    let compute = Arc::new(InMemoryCompute::new());
    let service = PollService::new(ledger.clone(), compute, &test_config());
    let record = connect_and_submit(&service, &LOW_ANSWERS).await;

    let synchronizer = Arc::new(RecordSynchronizer::new(ledger.clone(), 4));
    let workflow = VerificationWorkflow::new(
        ledger.clone(),
        Arc::new(RaceLostCompute),
        synchronizer,
        Arc::new(Notifier::default()),
    );

    let outcome = workflow
        .verify(&record.id, &test_account(), &ContractAddress::from("0xC0ffee"))
        .await
        .expect("verify");
    // The caller re-reads the refreshed record rather than trusting a stale value.
    assert_eq!(outcome, VerifyOutcome::AlreadyVerified { value: None });
}
