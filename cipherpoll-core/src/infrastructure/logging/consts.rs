//! Cipherpoll-specific logging constants for `log` + `log4rs`.

/// Log file name.
pub const LOG_FILE_NAME: &str = "cipherpoll.log";

/// Console log pattern (colored).
///
/// Format: `timestamp [LEVEL] message [module]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}]{n}";

/// File log pattern (no colors).
pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}]{n}";

/// Maximum log file size before rotation (20 MB).
pub const LOG_FILE_MAX_SIZE: u64 = 20_000_000;

/// Maximum number of archived log files.
pub const LOG_FILE_MAX_ROLLS: u32 = 3;

/// Our crates that should log at the requested app level by default.
/// Everything outside the whitelist is silenced unless opted in.
pub const WHITELISTED_CRATES: &[&str] = &["cipherpoll_core"];
