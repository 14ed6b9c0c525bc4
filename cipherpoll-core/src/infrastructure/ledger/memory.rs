use crate::domain::{NewRecord, RecordData};
use crate::foundation::util::time::now_epoch_seconds;
use crate::foundation::{AccountAddress, EncryptedHandle, PollError, RecordId, Result, TxId};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use super::LedgerGateway;

#[derive(Clone, Debug)]
struct StoredRecord {
    display_name: String,
    encrypted_payload: Vec<u8>,
    #[allow(dead_code)]
    proof: Vec<u8>,
    public_score: u64,
    public_question_count: u64,
    #[allow(dead_code)]
    note: String,
    created_at_epoch_seconds: u64,
    creator: AccountAddress,
    verified: bool,
    decrypted_value: Option<u64>,
}

/// In-memory ledger for tests and devnet runs.
///
/// Supports failure injection covering the whole error taxonomy: listing
/// failure, per-record fetch failure, user-declined signing, generic create
/// failure, and service availability.
pub struct InMemoryLedger {
    records: Mutex<BTreeMap<RecordId, StoredRecord>>,
    failing_fetches: Mutex<HashSet<RecordId>>,
    fail_listing: AtomicBool,
    reject_next_create: AtomicBool,
    fail_next_create: AtomicBool,
    available: AtomicBool,
    tx_counter: AtomicU64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            failing_fetches: Mutex::new(HashSet::new()),
            fail_listing: AtomicBool::new(false),
            reject_next_create: AtomicBool::new(false),
            fail_next_create: AtomicBool::new(false),
            available: AtomicBool::new(true),
            tx_counter: AtomicU64::new(0),
        }
    }

    pub fn set_listing_failure(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::Relaxed);
    }

    pub fn set_fetch_failure(&self, id: RecordId) {
        if let Ok(mut failing) = self.failing_fetches.lock() {
            failing.insert(id);
        }
    }

    /// The next `create_record` call behaves as if the user declined signing.
    pub fn reject_next_create(&self) {
        self.reject_next_create.store(true, Ordering::Relaxed);
    }

    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::Relaxed);
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    /// Mark a record verified out of band, simulating another actor winning
    /// the verification race.
    pub fn force_verified(&self, id: &RecordId, clear_value: u64) {
        if let Ok(mut records) = self.records.lock() {
            if let Some(record) = records.get_mut(id) {
                record.verified = true;
                record.decrypted_value = Some(clear_value);
            }
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Number of write transactions accepted so far. Test hook for asserting
    /// that a code path issued no ledger write.
    pub fn tx_count(&self) -> u64 {
        self.tx_counter.load(Ordering::Relaxed)
    }

    fn next_tx_id(&self) -> TxId {
        let seq = self.tx_counter.fetch_add(1, Ordering::Relaxed);
        TxId::from(format!("tx-{seq}"))
    }

    fn lock_records(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<RecordId, StoredRecord>>> {
        self.records.lock().map_err(|_| PollError::transaction_failed("ledger store lock poisoned"))
    }

    fn handle_of(payload: &[u8]) -> EncryptedHandle {
        match std::str::from_utf8(payload) {
            Ok(text) => EncryptedHandle::from(text),
            Err(_) => EncryptedHandle::from(hex::encode(payload)),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn list_record_ids(&self) -> Result<Vec<RecordId>> {
        if self.fail_listing.load(Ordering::Relaxed) {
            return Err(PollError::synchronization_failed("record id listing unavailable"));
        }
        Ok(self.lock_records()?.keys().cloned().collect())
    }

    async fn get_record(&self, id: &RecordId) -> Result<RecordData> {
        if let Ok(failing) = self.failing_fetches.lock() {
            if failing.contains(id) {
                return Err(PollError::record_fetch_failed(id.as_str(), "injected fetch failure"));
            }
        }
        let records = self.lock_records()?;
        let record = records.get(id).ok_or_else(|| PollError::RecordNotFound { record_id: id.to_string() })?;
        Ok(RecordData {
            display_name: record.display_name.clone(),
            public_score: Some(record.public_score),
            public_question_count: Some(record.public_question_count),
            created_at_epoch_seconds: Some(record.created_at_epoch_seconds),
            creator: record.creator.clone(),
            verified: record.verified,
            decrypted_value: record.decrypted_value,
        })
    }

    async fn get_encrypted_handle(&self, id: &RecordId) -> Result<EncryptedHandle> {
        let records = self.lock_records()?;
        let record = records.get(id).ok_or_else(|| PollError::RecordNotFound { record_id: id.to_string() })?;
        Ok(Self::handle_of(&record.encrypted_payload))
    }

    async fn is_service_available(&self) -> Result<bool> {
        Ok(self.available.load(Ordering::Relaxed))
    }

    async fn create_record(&self, account: &AccountAddress, record: NewRecord) -> Result<TxId> {
        if self.reject_next_create.swap(false, Ordering::Relaxed) {
            return Err(PollError::TransactionRejected);
        }
        if self.fail_next_create.swap(false, Ordering::Relaxed) {
            return Err(PollError::transaction_failed("injected create failure"));
        }
        let mut records = self.lock_records()?;
        if records.contains_key(&record.id) {
            return Err(PollError::DuplicateRecordId { record_id: record.id.to_string() });
        }
        records.insert(
            record.id,
            StoredRecord {
                display_name: record.display_name,
                encrypted_payload: record.encrypted_payload,
                proof: record.proof,
                public_score: record.public_score,
                public_question_count: record.public_question_count,
                note: record.note,
                created_at_epoch_seconds: now_epoch_seconds(),
                creator: account.clone(),
                verified: false,
                decrypted_value: None,
            },
        );
        Ok(self.next_tx_id())
    }

    async fn wait_for_confirmation(&self, _tx_id: &TxId) -> Result<()> {
        Ok(())
    }

    async fn submit_decryption_proof(
        &self,
        _account: &AccountAddress,
        id: &RecordId,
        clear_values_encoded: String,
        proof: Vec<u8>,
    ) -> Result<TxId> {
        if proof.is_empty() {
            return Err(PollError::decryption_failed("empty decryption proof"));
        }
        let clear_values: BTreeMap<EncryptedHandle, u64> = serde_json::from_str(&clear_values_encoded)?;
        let mut records = self.lock_records()?;
        let record = records.get_mut(id).ok_or_else(|| PollError::RecordNotFound { record_id: id.to_string() })?;
        if record.verified {
            return Err(PollError::AlreadyVerifiedOnChain { record_id: id.to_string() });
        }
        let handle = Self::handle_of(&record.encrypted_payload);
        let clear_value = clear_values
            .get(&handle)
            .copied()
            .ok_or_else(|| PollError::decryption_failed(format!("no clear value for handle {handle}")))?;
        record.verified = true;
        record.decrypted_value = Some(clear_value);
        Ok(self.next_tx_id())
    }
}
