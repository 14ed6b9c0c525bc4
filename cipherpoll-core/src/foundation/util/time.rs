use crate::foundation::PollError;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_epoch_seconds_env(env_var: Option<&str>) -> Result<u64, PollError> {
    if let Some(var) = env_var {
        if let Ok(value) = std::env::var(var) {
            return value.parse::<u64>().map_err(|err| PollError::Message(err.to_string()));
        }
    }
    let now = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| PollError::Message(err.to_string()))?;
    Ok(now.as_secs())
}

/// Returns the current wall-clock timestamp in epoch seconds.
///
/// For test determinism, this respects `TEST_NOW_SECONDS_ENV_VAR` when set.
pub fn now_epoch_seconds() -> u64 {
    current_epoch_seconds_env(Some(crate::foundation::constants::TEST_NOW_SECONDS_ENV_VAR))
        .or_else(|_| current_epoch_seconds_env(None))
        .unwrap_or(0)
}
