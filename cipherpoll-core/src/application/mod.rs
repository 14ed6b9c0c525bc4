//! Application layer: orchestration across domain logic and infrastructure I/O.

pub mod notifier;
pub mod service;
pub mod submission;
pub mod synchronizer;
pub mod verification;

pub use notifier::{Notifier, Severity, StatusNotice};
pub use service::PollService;
pub use submission::SubmissionWorkflow;
pub use synchronizer::{LocalView, RecordSynchronizer, SyncReport};
pub use verification::{VerificationWorkflow, VerifyOutcome};
