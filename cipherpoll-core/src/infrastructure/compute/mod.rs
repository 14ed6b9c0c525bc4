use crate::foundation::{AccountAddress, ContractAddress, EncryptedHandle, Result, TxId};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::collections::BTreeMap;

/// Ciphertext plus input proof produced for a plaintext value, bound to a
/// `(contract, account)` pair.
#[derive(Clone, Debug)]
pub struct EncryptedPayload {
    pub ciphertext: Vec<u8>,
    pub proof: Vec<u8>,
}

/// Clear values recovered by a decryption-proof run, keyed by the encrypted
/// handle they correspond to.
#[derive(Clone, Debug, Default)]
pub struct DecryptionResult {
    pub clear_values: BTreeMap<EncryptedHandle, u64>,
}

/// Callback through which the compute service hands the encoded clear values
/// and proof to the caller-supplied on-chain submitter.
pub type ProofCallback = Box<dyn FnOnce(String, Vec<u8>) -> BoxFuture<'static, Result<TxId>> + Send>;

/// Encryption and decryption-proof generation, consumed as an external
/// coprocessor. The cryptographic scheme itself is out of scope.
#[async_trait]
pub trait ConfidentialCompute: Send + Sync {
    /// Encrypt a plaintext value for the given contract/account binding.
    async fn encrypt(
        &self,
        contract: &ContractAddress,
        account: &AccountAddress,
        value: u64,
    ) -> Result<EncryptedPayload>;

    /// Produce a decryption proof for the given handles, invoking
    /// `on_proof_ready` to submit it on chain before returning the clear
    /// values. An error from the callback propagates unchanged so callers can
    /// branch on structured variants (e.g. already-verified races).
    async fn request_decryption_proof(
        &self,
        handles: &[EncryptedHandle],
        contract: &ContractAddress,
        on_proof_ready: ProofCallback,
    ) -> Result<DecryptionResult>;
}

pub mod memory;

pub use memory::InMemoryCompute;
