use crate::DEFAULT_API_BASE_URL;
use crate::config::{ClientConfig, ENV_API_URL, ENV_TIMEOUT_SECS, MAX_CV_BYTES};
use crate::error::ConfigError;

use std::env;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    // SAFETY: env-mutating tests are #[serial].
    unsafe {
        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_TIMEOUT_SECS);
    }
}

#[test]
fn given_missing_file_when_loading_then_defaults_returned() {
    let dir = TempDir::new().unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.base_url, "http://127.0.0.1:8000/api/");
    assert_eq!(config.debounce(), Duration::from_millis(250));
    assert_eq!(config.upload.max_cv_bytes, MAX_CV_BYTES);
}

#[test]
fn given_saved_config_when_loading_then_same_values_come_back() {
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.api.base_url = String::from("https://jobs.example.com/api/");
    config.search.debounce_millis = 400;

    config.save(dir.path()).unwrap();
    let loaded = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists(), "Temp file renamed away");
}

/// **VALUE**: Partial files are filled in from defaults.
///
/// **BUG THIS CATCHES**: A config written by an older version (no `upload`
/// section) failing to load.
#[test]
fn given_partial_file_when_loading_then_missing_sections_defaulted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"version": 1, "api": {"timeout_secs": 5}}"#,
    )
    .unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.max_retries, 2);
}

#[test]
fn given_corrupt_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{not json").unwrap();

    let result = ClientConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_out_of_range_values_when_validating_then_rejected() {
    let mut bad_url = ClientConfig::default();
    bad_url.api.base_url = String::from("ftp://example.com");

    let mut zero_timeout = ClientConfig::default();
    zero_timeout.api.timeout_secs = 0;

    let mut huge_cv = ClientConfig::default();
    huge_cv.upload.max_cv_bytes = MAX_CV_BYTES + 1;

    let mut slow_debounce = ClientConfig::default();
    slow_debounce.search.debounce_millis = 10_000;

    let mut future_version = ClientConfig::default();
    future_version.version = 99;

    for config in [bad_url, zero_timeout, huge_cv, slow_debounce, future_version] {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "{config:?} should be invalid"
        );
    }
}

#[test]
fn given_invalid_config_when_saving_then_nothing_written() {
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.api.timeout_secs = 0;

    assert!(config.save(dir.path()).is_err());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
#[serial]
fn given_env_overrides_when_applied_then_fields_replaced() {
    clear_env();
    unsafe {
        env::set_var(ENV_API_URL, "http://10.0.0.5:9000/api/");
        env::set_var(ENV_TIMEOUT_SECS, "12");
    }

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    result.unwrap();
    assert_eq!(config.api.base_url, "http://10.0.0.5:9000/api/");
    assert_eq!(config.timeout(), Duration::from_secs(12));
}

#[test]
#[serial]
fn given_non_numeric_timeout_env_when_applied_then_env_error_names_variable() {
    clear_env();
    unsafe {
        env::set_var(ENV_TIMEOUT_SECS, "soon");
    }

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    match result {
        Err(ConfigError::EnvOverride { variable, .. }) => assert_eq!(variable, ENV_TIMEOUT_SECS),
        other => panic!("Expected EnvOverride, got {other:?}"),
    }
}
