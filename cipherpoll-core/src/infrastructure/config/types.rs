use crate::foundation::constants::{
    DEFAULT_ID_ALLOC_MAX_ATTEMPTS, DEFAULT_MAX_CONCURRENT_FETCHES, NOTIFY_ERROR_TTL_MS, NOTIFY_SUCCESS_TTL_MS,
};
use serde::{Deserialize, Serialize};

/// Base configuration for the client.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address of the record-store contract.
    #[serde(default)]
    pub contract_address: String,
    /// Optional directory for log files; console-only when unset.
    #[serde(default)]
    pub log_dir: Option<String>,
    /// Log filter expression (e.g. `"info"`, `"cipherpoll_core=debug"`).
    #[serde(default = "default_log_filters")]
    pub log_filters: String,
}

fn default_log_filters() -> String {
    "info".to_string()
}

/// Notification display policy. TTLs are policy constants, not correctness
/// requirements.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_success_ttl_ms")]
    pub success_ttl_ms: u64,
    #[serde(default = "default_error_ttl_ms")]
    pub error_ttl_ms: u64,
}

fn default_success_ttl_ms() -> u64 {
    NOTIFY_SUCCESS_TTL_MS
}

fn default_error_ttl_ms() -> u64 {
    NOTIFY_ERROR_TTL_MS
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self { success_ttl_ms: NOTIFY_SUCCESS_TTL_MS, error_ttl_ms: NOTIFY_ERROR_TTL_MS }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Cap on concurrent per-record fetches.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

fn default_max_concurrent_fetches() -> usize {
    DEFAULT_MAX_CONCURRENT_FETCHES
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// Candidate identifiers the allocator tries before failing.
    #[serde(default = "default_id_alloc_max_attempts")]
    pub id_alloc_max_attempts: u32,
}

fn default_id_alloc_max_attempts() -> u32 {
    DEFAULT_ID_ALLOC_MAX_ATTEMPTS
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self { id_alloc_max_attempts: DEFAULT_ID_ALLOC_MAX_ATTEMPTS }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub submit: SubmitConfig,
}
