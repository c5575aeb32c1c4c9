//! Integration tests for configuration loading and validation

use chatwire_core::config::{load, load_from_json, load_from_yaml, ConfigError, ValidationErrorKind};
use chatwire_core::protocol::{ContentPart, ImageDetail, Message, Role};
use chatwire_core::wire::{RenderMode, WireContent, WireContentPart, WireConverter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_valid_yaml_config() {
    std::env::set_var("CHATWIRE_IT_MODE", "passthrough");

    let yaml = r#"
version: "0.1"
render:
  mode: ${CHATWIRE_IT_MODE}
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.version, "0.1");
    assert_eq!(config.render.mode, RenderMode::Passthrough);

    std::env::remove_var("CHATWIRE_IT_MODE");
}

#[test]
fn test_load_valid_json_config() {
    let json = r#"{"version": "0.1", "render": {"mode": "openai", "image_detail": "low"}}"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", json);

    let config = load_from_json(&path).unwrap();
    assert_eq!(config.render.mode, RenderMode::OpenAi);
    assert_eq!(config.render.image_detail, Some(ImageDetail::Low));

    let converter = WireConverter::from_config(&config);
    let message = Message::from_parts(
        Role::User,
        vec![ContentPart::image("https://example.com/a.png")],
    );
    let wire = converter.convert(&message).unwrap();
    let WireContent::Parts(parts) = wire.content else {
        panic!("expected parts");
    };
    match &parts[0] {
        WireContentPart::ImageUrl { image_url } => {
            assert_eq!(image_url.detail, Some(ImageDetail::Low))
        }
        other => panic!("unexpected part {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let result = load_from_yaml("/nonexistent/chatwire.yaml");
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_missing_env_var() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(
        &dir,
        "config.yaml",
        "version: \"0.1\"\nrender:\n  mode: ${CHATWIRE_IT_UNSET_VAR}\n",
    );

    match load_from_yaml(path) {
        Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "CHATWIRE_IT_UNSET_VAR"),
        other => panic!("Expected EnvVarNotFound, got {other:?}"),
    }
}

#[test]
fn test_invalid_yaml_reports_location() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: \"0.1\"\nrender:\n  mode: [unclosed\n");

    match load_from_yaml(path) {
        Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_unknown_mode_rejected() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.json", r#"{"version": "0.1", "render": {"mode": "xml"}}"#);
    assert!(matches!(load_from_json(path), Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_unsupported_version() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: \"9.9\"\n");
    let err = load_from_yaml(path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("expected 0.1"));
}

#[test]
fn test_placeholder_inside_env_value_rejected() {
    std::env::set_var("CHATWIRE_IT_NESTED", "${CHATWIRE_IT_INNER}");
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "config.yaml", "version: ${CHATWIRE_IT_NESTED}\n");

    let err = load_from_yaml(path).unwrap_err();
    std::env::remove_var("CHATWIRE_IT_NESTED");

    match err {
        ConfigError::ValidationError(err) => {
            assert_eq!(err.field_path, "version");
            assert!(matches!(
                err.kind,
                ValidationErrorKind::UnresolvedPlaceholder { ref placeholder }
                    if placeholder == "${CHATWIRE_IT_INNER}"
            ));
        }
        other => panic!("expected ValidationError, got {other:?}"),
    }
}

#[test]
fn test_load_by_extension() {
    let dir = TempDir::new().unwrap();
    let yaml = create_test_file(&dir, "a.yml", "version: \"0.1\"\n");
    let toml = create_test_file(&dir, "a.toml", "version = \"0.1\"\n");

    assert!(load(yaml).is_ok());
    assert!(matches!(load(toml), Err(ConfigError::UnsupportedFormat { .. })));
}
