//! Tests for property loading from files and the environment

use std::io::Write;

use arbor_runtime::config::PropertiesLoader;
use serde_json::json;

#[test]
fn toml_file_overrides_defaults_and_adds_host_sections() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[arbor.core.scan]
enabled = false

[arbor.core.log]
level = "warn"

[app]
name = "demo"
"#
    )
    .unwrap();

    let handler = PropertiesLoader::new()
        .with_config_path(file.path())
        .load()
        .unwrap();

    let core = handler.core().unwrap();
    assert!(!core.scan.enabled);
    assert_eq!(core.log.level, "warn");
    assert_eq!(handler.properties("app.name"), Some(&json!("demo")));
}

#[test]
fn argv_overrides_beat_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[arbor.core.log]\nlevel = \"warn\"").unwrap();

    let handler = PropertiesLoader::new()
        .with_config_path(file.path())
        .with_args(["--arbor.core.log.level=trace"])
        .load()
        .unwrap();

    assert_eq!(handler.core().unwrap().log.level, "trace");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let handler = PropertiesLoader::new()
        .with_config_path("/nonexistent/arbor.toml")
        .load()
        .unwrap();
    assert!(handler.core().unwrap().scan.enabled);
}

#[test]
fn prefixed_environment_variables_land_in_the_tree() {
    // A prefix unique to this test keeps parallel tests independent
    std::env::set_var("ARBTEST_CORE_SCAN_PATH", "lib");

    let handler = PropertiesLoader::new()
        .with_env_prefix("ARBTEST_")
        .load()
        .unwrap();

    assert_eq!(handler.core().unwrap().scan.path, "lib");
    std::env::remove_var("ARBTEST_CORE_SCAN_PATH");
}

#[test]
fn precedence_runs_defaults_file_env_argv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[arbor.core.scan]
enabled = false
path = "filesrc"

[arbor.core.log]
level = "warn"
"#
    )
    .unwrap();
    std::env::set_var("ARBCHAIN_CORE_SCAN_PATH", "envsrc");
    std::env::set_var("ARBCHAIN_CORE_LOG_LEVEL", "debug");

    let handler = PropertiesLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("ARBCHAIN_")
        .with_args(["--arbor.core.log.level=trace"])
        .load()
        .unwrap();

    let core = handler.core().unwrap();
    // File beats defaults
    assert!(!core.scan.enabled);
    // Environment beats the file
    assert_eq!(core.scan.path, "envsrc");
    // Argv beats the environment
    assert_eq!(core.log.level, "trace");

    std::env::remove_var("ARBCHAIN_CORE_SCAN_PATH");
    std::env::remove_var("ARBCHAIN_CORE_LOG_LEVEL");
}
