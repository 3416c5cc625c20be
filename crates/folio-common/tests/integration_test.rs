//! Integration tests for folio-common crate.

use folio_common::{FolioError, LogFormat, LoggingConfig};

#[test]
fn test_io_error_converts() {
    fn open_missing() -> folio_common::Result<String> {
        Ok(std::fs::read_to_string("/definitely/not/here.json")?)
    }

    let err = open_missing().unwrap_err();
    assert!(matches!(err, FolioError::Io(_)));
    assert_eq!(err.category(), "io");
}

#[test]
fn test_json_error_converts() {
    fn parse() -> folio_common::Result<serde_json::Value> {
        Ok(serde_json::from_str("{not json")?)
    }

    assert!(matches!(parse().unwrap_err(), FolioError::Serialization(_)));
}

#[test]
fn test_logging_config_roundtrips_through_yaml() {
    let config = LoggingConfig {
        level: "debug".into(),
        format: LogFormat::Compact,
        file_path: Some("logs/folio.log".into()),
        include_spans: true,
        include_targets: false,
    };
    let yaml = serde_yaml::to_string(&config).unwrap();
    assert!(yaml.contains("format: compact"));
    let back: LoggingConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, config);
}
