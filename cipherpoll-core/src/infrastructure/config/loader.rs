//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (CIPHERPOLL_* prefix)

use crate::foundation::PollError;
use crate::infrastructure::config::types::PollConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

/// Config file name looked up inside a data directory.
pub const CONFIG_FILE_NAME: &str = "cipherpoll.toml";

/// Environment variable prefix for config overrides.
///
/// Example: `CIPHERPOLL_SERVICE__CONTRACT_ADDRESS` -> `service.contract_address`
const ENV_PREFIX: &str = "CIPHERPOLL_";

/// Load configuration from the default file in `data_dir` (`cipherpoll.toml`).
pub fn load_config(data_dir: &Path) -> Result<PollConfig, PollError> {
    load_config_from_file(&data_dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from a specific file path. The file may be absent; the
/// compiled defaults plus environment overrides still apply.
pub fn load_config_from_file(path: &Path) -> Result<PollConfig, PollError> {
    info!("loading configuration path={}", path.display());
    let figment = Figment::from(Serialized::defaults(PollConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));
    let config: PollConfig =
        figment.extract().map_err(|e| PollError::ConfigError(format!("config extraction failed: {e}")))?;
    validate(&config)?;
    debug!(
        "configuration loaded contract_address={} max_concurrent_fetches={} id_alloc_max_attempts={}",
        config.service.contract_address, config.sync.max_concurrent_fetches, config.submit.id_alloc_max_attempts
    );
    Ok(config)
}

fn validate(config: &PollConfig) -> Result<(), PollError> {
    if config.sync.max_concurrent_fetches == 0 {
        return Err(PollError::ConfigError("sync.max_concurrent_fetches must be at least 1".to_string()));
    }
    if config.submit.id_alloc_max_attempts == 0 {
        return Err(PollError::ConfigError("submit.id_alloc_max_attempts must be at least 1".to_string()));
    }
    Ok(())
}
