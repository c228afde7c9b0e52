use dayplan::config::ConfigError;
use dayplan::Config;
use std::fs;
use std::time::Duration;

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.scan_interval(), Duration::from_secs(30));
    assert_eq!(config.default_reminder_minutes, 10);
    assert_eq!(config.key_bindings.quit, "q");
}

#[test]
fn missing_file_yields_defaults_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.scan_interval_secs, 30);
    assert!(!path.exists());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "scan_interval_secs = 5\n\n[key_bindings]\nexport = \"Ctrl+e\"\n",
    )
    .unwrap();

    let config = Config::load_from_path(&path).unwrap();
    assert_eq!(config.scan_interval(), Duration::from_secs(5));
    assert_eq!(config.key_bindings.export, "Ctrl+e");
    assert_eq!(config.key_bindings.new, "n");
    assert_eq!(config.default_reminder_minutes, 10);
}

#[test]
fn zero_interval_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "scan_interval_secs = 0\n").unwrap();
    assert!(matches!(Config::load_from_path(&path), Err(ConfigError::Invalid(_))));
}

#[test]
fn unknown_key_binding_is_rejected() {
    let mut config = Config::default();
    config.key_bindings.help = "Hyper+x".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "scan_interval_secs = \"soon\"\n").unwrap();
    assert!(matches!(Config::load_from_path(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.export_path = "/tmp/plan.csv".to_string();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from_path(&path).unwrap();
    assert_eq!(loaded.export_path, "/tmp/plan.csv");
    assert_eq!(loaded.config_version, Some(dayplan::config::CURRENT_CONFIG_VERSION));
}
