//! System-wide constants for the cipherpoll client.

/// How long a success notice stays visible (milliseconds).
pub const NOTIFY_SUCCESS_TTL_MS: u64 = 2_000;

/// How long an error notice stays visible (milliseconds).
pub const NOTIFY_ERROR_TTL_MS: u64 = 3_000;

/// Default cap on concurrent per-record fetches during synchronization.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Default number of candidate identifiers the allocator tries before giving up.
pub const DEFAULT_ID_ALLOC_MAX_ATTEMPTS: u32 = 5;

/// Prefix for allocator-generated record identifiers.
pub const RECORD_ID_PREFIX: &str = "poll";

/// Environment variable that pins the wall clock for deterministic tests.
pub const TEST_NOW_SECONDS_ENV_VAR: &str = "CIPHERPOLL_TEST_NOW_SECONDS";
