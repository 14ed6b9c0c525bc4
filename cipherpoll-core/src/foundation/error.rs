use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotConnected,
    IncompleteAnswers,
    InvalidAnswer,
    EncryptionFailed,
    TransactionRejected,
    TransactionFailed,
    DecryptionFailed,
    SynchronizationFailed,
    RecordFetchFailed,
    DuplicateRecordId,
    AlreadyVerifiedOnChain,
    VerificationInProgress,
    IdAllocationFailed,
    InvalidStateTransition,
    RecordNotFound,
    ServiceUnavailable,
    ConfigError,
    SerializationError,
    Message,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("no account connected")]
    NotConnected,

    #[error("incomplete answers: {answered} of {expected} questions answered")]
    IncompleteAnswers { answered: usize, expected: usize },

    #[error("invalid answer rank {rank} for question {question}")]
    InvalidAnswer { question: usize, rank: u32 },

    #[error("encryption failed: {details}")]
    EncryptionFailed { details: String },

    #[error("transaction rejected by user")]
    TransactionRejected,

    #[error("transaction failed: {details}")]
    TransactionFailed { details: String },

    #[error("decryption verification failed: {details}")]
    DecryptionFailed { details: String },

    #[error("synchronization failed: {details}")]
    SynchronizationFailed { details: String },

    #[error("record fetch failed for {record_id}: {details}")]
    RecordFetchFailed { record_id: String, details: String },

    #[error("duplicate record id: {record_id}")]
    DuplicateRecordId { record_id: String },

    #[error("record already verified on chain: {record_id}")]
    AlreadyVerifiedOnChain { record_id: String },

    #[error("verification already in progress for {record_id}")]
    VerificationInProgress { record_id: String },

    #[error("identifier allocation failed after {attempts} attempts")]
    IdAllocationFailed { attempts: u32 },

    #[error("invalid verification state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("record not found: {record_id}")]
    RecordNotFound { record_id: String },

    #[error("ledger service unavailable")]
    ServiceUnavailable,

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, PollError>;

impl PollError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PollError::NotConnected => ErrorCode::NotConnected,
            PollError::IncompleteAnswers { .. } => ErrorCode::IncompleteAnswers,
            PollError::InvalidAnswer { .. } => ErrorCode::InvalidAnswer,
            PollError::EncryptionFailed { .. } => ErrorCode::EncryptionFailed,
            PollError::TransactionRejected => ErrorCode::TransactionRejected,
            PollError::TransactionFailed { .. } => ErrorCode::TransactionFailed,
            PollError::DecryptionFailed { .. } => ErrorCode::DecryptionFailed,
            PollError::SynchronizationFailed { .. } => ErrorCode::SynchronizationFailed,
            PollError::RecordFetchFailed { .. } => ErrorCode::RecordFetchFailed,
            PollError::DuplicateRecordId { .. } => ErrorCode::DuplicateRecordId,
            PollError::AlreadyVerifiedOnChain { .. } => ErrorCode::AlreadyVerifiedOnChain,
            PollError::VerificationInProgress { .. } => ErrorCode::VerificationInProgress,
            PollError::IdAllocationFailed { .. } => ErrorCode::IdAllocationFailed,
            PollError::InvalidStateTransition { .. } => ErrorCode::InvalidStateTransition,
            PollError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            PollError::ServiceUnavailable => ErrorCode::ServiceUnavailable,
            PollError::ConfigError(_) => ErrorCode::ConfigError,
            PollError::SerializationError { .. } => ErrorCode::SerializationError,
            PollError::Message(_) => ErrorCode::Message,
        }
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), message: self.to_string() }
    }

    pub fn encryption_failed(details: impl Into<String>) -> Self {
        PollError::EncryptionFailed { details: details.into() }
    }

    pub fn transaction_failed(details: impl Into<String>) -> Self {
        PollError::TransactionFailed { details: details.into() }
    }

    pub fn decryption_failed(details: impl Into<String>) -> Self {
        PollError::DecryptionFailed { details: details.into() }
    }

    pub fn synchronization_failed(details: impl Into<String>) -> Self {
        PollError::SynchronizationFailed { details: details.into() }
    }

    pub fn record_fetch_failed(record_id: impl Into<String>, details: impl Into<String>) -> Self {
        PollError::RecordFetchFailed { record_id: record_id.into(), details: details.into() }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        PollError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// External collaborators must return structured `PollError` variants so callers
// can branch on `code()` instead of matching message text.
