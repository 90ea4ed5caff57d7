//! Configuration system tests
//!
//! Tests for config paths and loading/saving the token catalog.

use std::io::Write;

use token_template::config::{CatalogConfig, ConfigError};
use token_template::config_paths;
use token_template::toolbar::{ToolbarModel, FALLBACK_GROUP_LABEL};
use token_template::{TokenDefinition, TokenName};

fn name(s: &str) -> TokenName {
    TokenName::new(s).unwrap()
}

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("token-template"));
    }
}

#[test]
fn test_catalog_file_ends_with_yaml() {
    if let Some(path) = config_paths::catalog_file() {
        assert!(path.to_string_lossy().ends_with("tokens.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// Catalog Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tokens.yaml");

    let mut config = CatalogConfig::default();
    config
        .definitions
        .insert(name("deadline"), TokenDefinition::new("Deadline", "Date the deal closes."));
    config.save_to(&path).unwrap();

    let loaded = CatalogConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_builtin_groups() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "definitions:\n  quota:\n    label: Quota\n    description: Monthly target."
    )
    .unwrap();

    let config = CatalogConfig::load_from(file.path()).unwrap();
    assert_eq!(config.definitions.len(), 1);
    assert_eq!(config.groups, CatalogConfig::default().groups);
}

#[test]
fn test_groups_only_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "definitions: {{}}\ngroups:\n  - label: Deal\n    tokens: [price, volume]"
    )
    .unwrap();

    let registry = CatalogConfig::load_from(file.path()).unwrap().into_registry();
    let model = ToolbarModel::from_registry(&registry);
    assert_eq!(model.groups.len(), 1);
    assert_eq!(model.groups[0].label, "Deal");
    let labels: Vec<&str> = model.buttons().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["price", "volume"]);
}

#[test]
fn test_empty_catalog_gets_fallback_group() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "definitions:\n  alpha: {{}}\ngroups: []").unwrap();

    let registry = CatalogConfig::load_from(file.path()).unwrap().into_registry();
    let model = ToolbarModel::from_registry(&registry);
    assert_eq!(model.groups[0].label, FALLBACK_GROUP_LABEL);
}

#[test]
fn test_invalid_token_name_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "definitions:\n  \"9bad\":\n    label: Bad").unwrap();

    match CatalogConfig::load_from(file.path()) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CatalogConfig::load_from(&dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}
