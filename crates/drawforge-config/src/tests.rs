//! Tests for draw configuration.

use std::io::Write;

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42
        allow_minimal_cycles = true
        max_attempts = 50
        search_node_limit = 5000
    "#;

    let config = DrawConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert!(config.allow_minimal_cycles);
    assert_eq!(config.max_attempts, 50);
    assert_eq!(config.search_node_limit, 5000);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        random_seed: 42
        max_attempts: 10
    "#;

    let config = DrawConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert!(config.is_full_assert());
    assert!(!config.allow_minimal_cycles);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = DrawConfig::from_toml_str("").unwrap();

    assert_eq!(config, DrawConfig::default());
    assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(config.search_node_limit, DEFAULT_SEARCH_NODE_LIMIT);
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
}

#[test]
fn test_zero_attempts_rejected() {
    let err = DrawConfig::from_toml_str("max_attempts = 0").unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_reproducible_requires_seed() {
    let err = DrawConfig::from_toml_str(r#"environment_mode = "reproducible""#).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("random_seed")));
}

#[test]
fn test_unknown_mode_is_parse_error() {
    let err = DrawConfig::from_toml_str(r#"environment_mode = "chaotic""#).unwrap_err();

    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_builder() {
    let config = DrawConfig::new()
        .with_random_seed(123)
        .with_max_attempts(20)
        .with_minimal_cycles(true)
        .with_environment_mode(EnvironmentMode::Reproducible);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.max_attempts, 20);
    assert!(config.allow_minimal_cycles);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_picks_format_by_extension() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(yaml, "max_attempts: 7").unwrap();
    assert_eq!(DrawConfig::load(yaml.path()).unwrap().max_attempts, 7);

    let mut toml = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml, "max_attempts = 9").unwrap();
    assert_eq!(DrawConfig::load(toml.path()).unwrap().max_attempts, 9);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = DrawConfig::load("/definitely/not/here/draw.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Io(_)));
}
