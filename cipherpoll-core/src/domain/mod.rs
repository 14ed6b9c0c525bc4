//! Domain layer: pure questionnaire/record logic, no I/O.

pub mod model;
pub mod questions;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod verification;

pub use model::{AggregateStats, NewRecord, Record, RecordData};
pub use questions::{question_bank, question_count, Question};
pub use scoring::{classify, score, CategoryProfile};
pub use session::TestSession;
pub use stats::compute_stats;
pub use verification::{ensure_valid_transition, is_terminal, VerificationState};
