//! Strict key validation and type mismatch tests.

use super::{TEST_CONFIG, TEST_CONFIG_UNKNOWN_KEY, TestConfig, no_env};
use crate::loader::{ConfigError, Loader};

fn unwrap_stage(err: ConfigError) -> ConfigError {
    match err {
        ConfigError::LoadConfig(inner) | ConfigError::LoadConfigBytes(inner) => *inner,
        other => other,
    }
}

#[test]
fn test_unknown_key_fails_strict_mode() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .load_bytes(TEST_CONFIG_UNKNOWN_KEY.as_bytes(), &mut cfg)
        .unwrap_err();

    let inner = unwrap_stage(err);
    assert!(matches!(
        &inner,
        ConfigError::UnknownKey { path } if path == "unknown"
    ));
    assert_eq!(inner.to_string(), "unknown key unknown");
}

#[test]
fn test_unknown_key_ignored_when_validation_off() {
    let mut cfg = TestConfig::default();
    Loader::new()
        .env_getter(no_env)
        .validate_keys(false)
        .load_bytes(TEST_CONFIG_UNKNOWN_KEY.as_bytes(), &mut cfg)
        .unwrap();

    assert_eq!(cfg.key, "value");
}

#[test]
fn test_unknown_nested_key_reports_dotted_path() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .load_bytes(b"section:\n  bogus: 1\n", &mut cfg)
        .unwrap_err();

    let inner = unwrap_stage(err);
    assert!(matches!(
        inner,
        ConfigError::UnknownKey { path } if path == "section.bogus"
    ));
}

#[test]
fn test_validation_applies_to_override_layers() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .override_bytes("unknown: 1\n".as_bytes())
        .load_bytes(TEST_CONFIG.as_bytes(), &mut cfg)
        .unwrap_err();

    let rendered = err.to_string();
    assert!(
        rendered.starts_with("load config bytes error: override error: unknown key unknown"),
        "{rendered}"
    );

    // With validation off the same override is accepted.
    let mut cfg = TestConfig::default();
    Loader::new()
        .env_getter(no_env)
        .validate_keys(false)
        .override_bytes("unknown: 1\n".as_bytes())
        .load_bytes(TEST_CONFIG.as_bytes(), &mut cfg)
        .unwrap();
}

#[test]
fn test_string_into_float_is_type_mismatch() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .load_bytes(b"pi: \"abc\"\n", &mut cfg)
        .unwrap_err();

    let inner = unwrap_stage(err);
    assert_eq!(inner.to_string(), "expected number at pi, found string");
}

#[test]
fn test_number_into_bool_is_type_mismatch() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .load_bytes(b"do: 1\n", &mut cfg)
        .unwrap_err();

    let inner = unwrap_stage(err);
    assert!(matches!(
        inner,
        ConfigError::TypeMismatch { expected: "boolean", found: "number", .. }
    ));
}

#[test]
fn test_scalar_into_section_is_type_mismatch() {
    let mut cfg = TestConfig::default();
    let err = Loader::new()
        .env_getter(no_env)
        .load_bytes(b"section: 5\n", &mut cfg)
        .unwrap_err();

    let inner = unwrap_stage(err);
    assert!(matches!(
        inner,
        ConfigError::TypeMismatch { expected: "mapping", found: "number", .. }
    ));
}

#[test]
fn test_integer_into_float_field_is_accepted() {
    let mut cfg = TestConfig::default();
    Loader::new()
        .env_getter(no_env)
        .load_bytes(b"pi: 3\n", &mut cfg)
        .unwrap();

    assert_eq!(cfg.pi, 3.0);
}
