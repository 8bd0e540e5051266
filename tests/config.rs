//! Configuration system tests
//!
//! Tests for config paths and sheet persistence config loading.

use std::fs;

use sheet_stack::config::{SheetConfig, DEFAULT_EVICT_DELAY_MS, DEFAULT_PARAM_NAME};
use sheet_stack::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_is_yaml_in_app_dir() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.ends_with("sheet-stack/config.yaml"));
    }
}

#[test]
fn test_logs_dir_shares_app_dir_with_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_file(), config_paths::logs_dir()) {
        assert_eq!(config.parent(), logs.parent());
        assert!(logs.ends_with("logs"));
    }
}

// ========================================================================
// Sheet Config Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = SheetConfig::default();
    assert!(config.enabled);
    assert_eq!(config.param_name, DEFAULT_PARAM_NAME);
    assert!(config.compress_data);
    assert_eq!(config.max_url_length, 2000);
    assert_eq!(config.evict_delay_ms, DEFAULT_EVICT_DELAY_MS);
    assert_eq!(config.evict_delay().as_millis(), 500);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = SheetConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, SheetConfig::default());
}

#[test]
fn test_partial_file_overrides_named_fields_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "param_name: panels\nmax_url_length: 1200\n").unwrap();

    let config = SheetConfig::load_from(&path);

    assert_eq!(config.param_name, "panels");
    assert_eq!(config.max_url_length, 1200);
    assert!(config.enabled);
    assert!(config.compress_data);
    assert_eq!(config.evict_delay_ms, DEFAULT_EVICT_DELAY_MS);
}

#[test]
fn test_full_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let written = SheetConfig {
        enabled: false,
        param_name: "stack".to_string(),
        compress_data: false,
        max_url_length: 4096,
        evict_delay_ms: 250,
    };
    fs::write(&path, serde_yaml::to_string(&written).unwrap()).unwrap();

    assert_eq!(SheetConfig::load_from(&path), written);
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "max_url_length: [not, a, number]\n").unwrap();

    assert_eq!(SheetConfig::load_from(&path), SheetConfig::default());
}

#[test]
fn test_empty_param_name_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "param_name: \"  \"\n").unwrap();

    let config = SheetConfig::load_from(&path);
    assert_eq!(config.param_name, DEFAULT_PARAM_NAME);
}

#[test]
fn test_custom_param_name_is_used_in_urls() {
    let config = SheetConfig {
        param_name: "panels".to_string(),
        ..SheetConfig::default()
    };
    let registry = sheet_stack::panels::default_registry().unwrap();
    let history = sheet_stack::MemoryHistory::new("https://admin.local/");
    let mut controller = sheet_stack::SheetController::new(config, history, registry);

    controller.open_sheet(sheet_stack::SheetKind::ClientCreate, sheet_stack::Props::new());

    let url = &controller.history().current().url;
    assert!(url.contains("?panels="));
    assert!(!url.contains("sheets="));
}
