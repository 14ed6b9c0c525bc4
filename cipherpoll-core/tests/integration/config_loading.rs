use cipherpoll_core::foundation::constants::{DEFAULT_MAX_CONCURRENT_FETCHES, NOTIFY_ERROR_TTL_MS, NOTIFY_SUCCESS_TTL_MS};
use cipherpoll_core::foundation::PollError;
use cipherpoll_core::infrastructure::config::{load_config, load_config_from_file, CONFIG_FILE_NAME};

#[test]
fn test_missing_file_yields_defaults() {
    figment::Jail::expect_with(|jail| {
        let config = load_config(jail.directory()).expect("load");
        assert!(config.service.contract_address.is_empty());
        assert_eq!(config.notify.success_ttl_ms, NOTIFY_SUCCESS_TTL_MS);
        assert_eq!(config.notify.error_ttl_ms, NOTIFY_ERROR_TTL_MS);
        assert_eq!(config.sync.max_concurrent_fetches, DEFAULT_MAX_CONCURRENT_FETCHES);
        Ok(())
    });
}

#[test]
fn test_file_values_override_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r#"
[service]
contract_address = "0xC0ffee0000000000000000000000000000000003"
log_filters = "cipherpoll_core=debug"

[notify]
success_ttl_ms = 1500

[sync]
max_concurrent_fetches = 2
"#,
        )?;

        let config = load_config(jail.directory()).expect("load");
        assert_eq!(config.service.contract_address, "0xC0ffee0000000000000000000000000000000003");
        assert_eq!(config.service.log_filters, "cipherpoll_core=debug");
        assert_eq!(config.notify.success_ttl_ms, 1500);
        // Unset sections keep their defaults.
        assert_eq!(config.notify.error_ttl_ms, NOTIFY_ERROR_TTL_MS);
        assert_eq!(config.sync.max_concurrent_fetches, 2);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file_and_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE_NAME,
            r#"
[service]
contract_address = "0xFi1e0000000000000000000000000000000000ff"
"#,
        )?;
        jail.set_env("CIPHERPOLL_SERVICE__CONTRACT_ADDRESS", "0xE2000000000000000000000000000000000000ee");
        jail.set_env("CIPHERPOLL_SYNC__MAX_CONCURRENT_FETCHES", "3");

        let config = load_config(jail.directory()).expect("load");
        // Environment wins over the file, which wins over defaults.
        assert_eq!(config.service.contract_address, "0xE2000000000000000000000000000000000000ee");
        assert_eq!(config.sync.max_concurrent_fetches, 3);
        assert_eq!(config.notify.success_ttl_ms, NOTIFY_SUCCESS_TTL_MS);
        Ok(())
    });
}

#[test]
fn test_zero_fetch_concurrency_is_rejected() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE_NAME, "[sync]\nmax_concurrent_fetches = 0\n")?;
        let err = load_config(jail.directory()).unwrap_err();
        assert!(matches!(err, PollError::ConfigError(_)));
        Ok(())
    });
}

#[test]
fn test_zero_id_alloc_attempts_is_rejected() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE_NAME, "[submit]\nid_alloc_max_attempts = 0\n")?;
        let err = load_config_from_file(&jail.directory().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, PollError::ConfigError(_)));
        Ok(())
    });
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE_NAME, "not = [valid\n")?;
        let err = load_config_from_file(&jail.directory().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, PollError::ConfigError(_)));
        Ok(())
    });
}
