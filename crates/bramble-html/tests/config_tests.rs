//! Loading `ParserConfig` from JSON.

use std::fs;

use bramble_html::{ConfigError, ParserConfig};

#[test]
fn test_empty_object_gives_defaults() {
    let config = ParserConfig::from_json_str("{}").unwrap();
    assert_eq!(config, ParserConfig::default());
    assert!(config.scripting_enabled);
    assert!(config.report_errors);
    assert_eq!(config.max_errors, None);
}

#[test]
fn test_partial_config() {
    let config = ParserConfig::from_json_str(r#"{"scripting_enabled": false, "max_errors": 10}"#)
        .unwrap();
    assert!(!config.scripting_enabled);
    assert!(config.report_errors);
    assert_eq!(config.max_errors, Some(10));
}

#[test]
fn test_unknown_field_rejected() {
    let err = ParserConfig::from_json_str(r#"{"scripting": false}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("invalid parser config"));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        ParserConfig::from_json_str("{report_errors: true"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("bramble-config-does-not-exist.json");
    let err = ParserConfig::from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("bramble-config-{}.json", std::process::id()));
    fs::write(&path, r#"{"report_errors": false}"#).unwrap();
    let config = ParserConfig::from_path(&path);
    let _ = fs::remove_file(&path);
    let config = config.unwrap();
    assert!(!config.report_errors);
    assert!(config.scripting_enabled);
}
