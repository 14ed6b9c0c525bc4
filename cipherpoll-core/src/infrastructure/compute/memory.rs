use crate::foundation::{AccountAddress, ContractAddress, EncryptedHandle, PollError, Result};
use async_trait::async_trait;
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::{ConfidentialCompute, DecryptionResult, EncryptedPayload, ProofCallback};

/// In-memory compute service for tests and devnet runs.
///
/// "Encryption" allocates a fresh opaque handle and remembers the plaintext
/// behind it; the ciphertext bytes carry the handle so the in-memory ledger
/// can resolve `get_encrypted_handle` the way a real contract does.
pub struct InMemoryCompute {
    plaintexts: Mutex<BTreeMap<EncryptedHandle, u64>>,
    fail_encrypt: AtomicBool,
    fail_proof: AtomicBool,
}

impl InMemoryCompute {
    pub fn new() -> Self {
        Self { plaintexts: Mutex::new(BTreeMap::new()), fail_encrypt: AtomicBool::new(false), fail_proof: AtomicBool::new(false) }
    }

    pub fn set_encrypt_failure(&self, fail: bool) {
        self.fail_encrypt.store(fail, Ordering::Relaxed);
    }

    pub fn set_proof_failure(&self, fail: bool) {
        self.fail_proof.store(fail, Ordering::Relaxed);
    }

    /// The plaintext registered behind a handle, if any. Test hook.
    pub fn plaintext_of(&self, handle: &EncryptedHandle) -> Option<u64> {
        self.plaintexts.lock().ok().and_then(|map| map.get(handle).copied())
    }

    fn fresh_handle() -> EncryptedHandle {
        let entropy: [u8; 8] = rand::thread_rng().gen();
        EncryptedHandle::from(format!("handle-{}", hex::encode(entropy)))
    }
}

impl Default for InMemoryCompute {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfidentialCompute for InMemoryCompute {
    async fn encrypt(
        &self,
        contract: &ContractAddress,
        account: &AccountAddress,
        value: u64,
    ) -> Result<EncryptedPayload> {
        if self.fail_encrypt.load(Ordering::Relaxed) {
            return Err(PollError::encryption_failed("injected encrypt failure"));
        }
        let handle = Self::fresh_handle();
        let mut plaintexts =
            self.plaintexts.lock().map_err(|_| PollError::encryption_failed("plaintext store lock poisoned"))?;
        plaintexts.insert(handle.clone(), value);
        // Proof binds the (contract, account) pair; opaque to callers.
        let proof = format!("proof:{contract}:{account}").into_bytes();
        Ok(EncryptedPayload { ciphertext: handle.as_str().as_bytes().to_vec(), proof })
    }

    async fn request_decryption_proof(
        &self,
        handles: &[EncryptedHandle],
        contract: &ContractAddress,
        on_proof_ready: ProofCallback,
    ) -> Result<DecryptionResult> {
        if self.fail_proof.load(Ordering::Relaxed) {
            return Err(PollError::decryption_failed("injected proof failure"));
        }
        let clear_values = {
            let plaintexts =
                self.plaintexts.lock().map_err(|_| PollError::decryption_failed("plaintext store lock poisoned"))?;
            let mut values = BTreeMap::new();
            for handle in handles {
                let value = plaintexts
                    .get(handle)
                    .copied()
                    .ok_or_else(|| PollError::decryption_failed(format!("unknown handle {handle}")))?;
                values.insert(handle.clone(), value);
            }
            values
        };
        let clear_values_encoded = serde_json::to_string(&clear_values)?;
        let proof = format!("decryption-proof:{contract}").into_bytes();
        on_proof_ready(clear_values_encoded, proof).await?;
        Ok(DecryptionResult { clear_values })
    }
}
