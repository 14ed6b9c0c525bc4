use crate::foundation::{AccountAddress, EncryptedHandle, RecordId};
use serde::{Deserialize, Serialize};

/// One questionnaire submission as seen by this client.
///
/// All fields except `verified`/`decrypted_value` are immutable after
/// creation; `verified` flips to true exactly once, via a successful
/// verification run, and `decrypted_value` is set in the same transition.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub display_name: String,
    /// Plaintext score visible to all readers.
    pub public_score: u64,
    /// Number of questions answered, visible to all readers.
    pub public_question_count: u64,
    pub created_at_epoch_seconds: u64,
    pub creator: AccountAddress,
    /// Opaque reference to the ciphertext held by the compute service.
    pub encrypted_handle: EncryptedHandle,
    pub verified: bool,
    /// Present once `verified` is true, absent before.
    pub decrypted_value: Option<u64>,
}

impl Record {
    pub fn is_owned_by(&self, account: &AccountAddress) -> bool {
        self.creator.matches(account)
    }
}

/// Raw per-record data as returned by the ledger read path.
///
/// Numeric fields are optional because older contract deployments omit them;
/// normalization defaults them to zero instead of failing the batch.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordData {
    pub display_name: String,
    #[serde(default)]
    pub public_score: Option<u64>,
    #[serde(default)]
    pub public_question_count: Option<u64>,
    #[serde(default)]
    pub created_at_epoch_seconds: Option<u64>,
    pub creator: AccountAddress,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub decrypted_value: Option<u64>,
}

impl RecordData {
    /// Normalize ledger data into the local record shape.
    pub fn into_record(self, id: RecordId, encrypted_handle: EncryptedHandle) -> Record {
        Record {
            id,
            display_name: self.display_name,
            public_score: self.public_score.unwrap_or(0),
            public_question_count: self.public_question_count.unwrap_or(0),
            created_at_epoch_seconds: self.created_at_epoch_seconds.unwrap_or(0),
            creator: self.creator,
            encrypted_handle,
            verified: self.verified,
            decrypted_value: if self.verified { Some(self.decrypted_value.unwrap_or(0)) } else { None },
        }
    }
}

/// Payload for the ledger's signed create path.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewRecord {
    pub id: RecordId,
    pub display_name: String,
    pub encrypted_payload: Vec<u8>,
    pub proof: Vec<u8>,
    pub public_score: u64,
    pub public_question_count: u64,
    /// Free-form note stored alongside the record (category description).
    pub note: String,
}

/// Derived statistics over the full record set. Never persisted; recomputed
/// in full on every synchronization to avoid drift from partial updates.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AggregateStats {
    pub total_count: usize,
    pub verified_count: usize,
    pub average_public_score: f64,
}
