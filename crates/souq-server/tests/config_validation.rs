//! Configuration file loading tests for souq-server.
// crates/souq-server/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate strict file-based configuration loading.
// Purpose: Ensure malformed or oversized config files fail closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test-only setup assertions."
)]

use std::fs;

use souq_core::Locale;
use souq_server::ConfigError;
use souq_server::SouqConfig;

#[test]
fn config_file_round_trips_through_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("souq.toml");
    fs::write(
        &path,
        r#"
        [server]
        bind = "127.0.0.1:9100"

        [locales]
        fallback = "ur"
        bundle_dir = "bundles"
        max_bundle_bytes = 4096
        "#,
    )
    .expect("write config");

    let config = SouqConfig::load_from_path(&path).expect("config loads");
    assert_eq!(config.server.bind, "127.0.0.1:9100");
    assert_eq!(config.fallback_locale().expect("fallback"), Locale::Ur);
    assert_eq!(config.locales.max_bundle_bytes, 4096);
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.toml");
    let Err(err) = SouqConfig::load_from_path(&path) else {
        panic!("expected read failure for absent config");
    };
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("souq.toml");
    fs::write(&path, "[server\nbind = ").expect("write config");
    let Err(err) = SouqConfig::load_from_path(&path) else {
        panic!("expected parse failure for malformed config");
    };
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_fallback_in_file_fails_validation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("souq.toml");
    fs::write(&path, "[locales]\nfallback = \"xx\"\n").expect("write config");
    let Err(err) = SouqConfig::load_from_path(&path) else {
        panic!("expected unknown fallback rejection");
    };
    let ConfigError::UnknownFallback { code } = err else {
        panic!("expected UnknownFallback, got {err}");
    };
    assert_eq!(code, "xx");
}

#[test]
fn oversized_config_file_fails_closed() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("souq.toml");
    let padding = format!("# {}\n", "x".repeat(2 * 1024 * 1024));
    fs::write(&path, padding).expect("write config");
    let Err(err) = SouqConfig::load_from_path(&path) else {
        panic!("expected size limit rejection");
    };
    assert!(matches!(err, ConfigError::TooLarge { .. }));
}
