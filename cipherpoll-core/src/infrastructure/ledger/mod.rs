use crate::domain::{NewRecord, RecordData};
use crate::foundation::{AccountAddress, EncryptedHandle, RecordId, Result, TxId};
use async_trait::async_trait;

/// Read/signed-write access to the authoritative record store.
///
/// The contract execution engine, signing, and network transport live behind
/// this seam. Write-path failures must come back as structured variants:
/// a user declining to sign is `PollError::TransactionRejected`, a proof race
/// lost to another actor is `PollError::AlreadyVerifiedOnChain` — never as
/// message text for callers to sniff.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn list_record_ids(&self) -> Result<Vec<RecordId>>;

    async fn get_record(&self, id: &RecordId) -> Result<RecordData>;

    async fn get_encrypted_handle(&self, id: &RecordId) -> Result<EncryptedHandle>;

    async fn is_service_available(&self) -> Result<bool>;

    /// Signed write: create a record. Returns once the transaction is
    /// accepted for inclusion; confirmation is a separate wait.
    async fn create_record(&self, account: &AccountAddress, record: NewRecord) -> Result<TxId>;

    /// Suspend until the transaction is confirmed. No timeout is imposed
    /// here; callers may wrap this in one.
    async fn wait_for_confirmation(&self, tx_id: &TxId) -> Result<()>;

    /// Signed write: submit a decryption proof to the on-chain verification
    /// entry point.
    async fn submit_decryption_proof(
        &self,
        account: &AccountAddress,
        id: &RecordId,
        clear_values_encoded: String,
        proof: Vec<u8>,
    ) -> Result<TxId>;
}

pub mod memory;

pub use memory::InMemoryLedger;
