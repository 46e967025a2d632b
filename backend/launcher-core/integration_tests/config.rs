use launcher_core::config::{CONFIG_VERSION, LauncherConfig};
use launcher_core::error::config::ConfigError;
use launcher_core::{BACKEND_SERVER_BASE_URL, BACKEND_SERVER_PORT};

use models::LogLevel;

use std::fs::write;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

/// **VALUE**: Pins the defaults the process-wide launcher runs with.
///
/// **WHY THIS MATTERS**: Frontends are hard-wired to `http://127.0.0.1:8000`. Any drift in
/// the default port, health path or timings silently changes when and whether the backend
/// gets launched.
#[test]
fn given_no_overrides_when_default_called_then_matches_documented_launch_parameters() {
    // GIVEN / WHEN
    let config = LauncherConfig::default();

    // THEN
    assert_eq!(config.version, CONFIG_VERSION);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, BACKEND_SERVER_PORT);
    assert_eq!(config.base_url(), BACKEND_SERVER_BASE_URL);
    assert_eq!(config.health_path, "/health");
    assert_eq!(config.probe_timeout(), Duration::from_secs(1));
    assert_eq!(config.poll_interval(), Duration::from_millis(250));
    assert_eq!(config.startup_deadline(), Duration::from_secs(10));
    assert_eq!(config.log_level, LogLevel::Warning);
    assert!(!config.access_log);
    assert!(config.validate().is_ok());
}

#[test]
fn given_missing_file_when_load_called_then_returns_defaults() {
    // GIVEN: An empty config directory
    let dir = TempDir::new().unwrap();

    // WHEN
    let config = LauncherConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config, LauncherConfig::default());
}

/// **VALUE**: Verifies a saved config loads back identically.
///
/// **BUG THIS CATCHES**: Would catch serde renames or `default` attributes that make a saved
/// field come back different, e.g. an explicit backend path dropped on reload.
#[test]
fn given_saved_config_when_loaded_then_round_trips() {
    // GIVEN: A customized config saved to disk
    let dir = TempDir::new().unwrap();
    let config = LauncherConfig {
        port: 9000,
        log_level: LogLevel::Error,
        startup_deadline_ms: 30_000,
        backend_path: Some(PathBuf::from("/opt/backend/server")),
        ..LauncherConfig::default()
    };
    config.save(dir.path()).unwrap();

    // WHEN
    let loaded = LauncherConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(loaded, config);
    assert!(!dir.path().join("launcher.json.tmp").exists(), "Temp file renamed away");
}

#[test]
fn given_partial_file_when_loaded_then_missing_fields_take_defaults() {
    // GIVEN: A file that only overrides the port
    let dir = TempDir::new().unwrap();
    write(dir.path().join("launcher.json"), r#"{ "port": 8123 }"#).unwrap();

    // WHEN
    let config = LauncherConfig::load(dir.path()).unwrap();

    // THEN
    assert_eq!(config.port, 8123);
    assert_eq!(config.health_path, "/health");
    assert_eq!(config.poll_interval_ms, 250);
}

#[test]
fn given_corrupt_file_when_loaded_then_returns_parse_error() {
    // GIVEN: Invalid JSON
    let dir = TempDir::new().unwrap();
    write(dir.path().join("launcher.json"), "{ port: ").unwrap();

    // WHEN
    let result = LauncherConfig::load(dir.path());

    // THEN
    assert!(
        matches!(result, Err(ConfigError::Parse { .. })),
        "Expected parse error, got {result:?}"
    );
}

/// **VALUE**: Verifies each invalid setting is rejected before a launcher can be built from it.
///
/// **WHY THIS MATTERS**: A zero deadline would time out every launch; a non-loopback host
/// would expose the backend; a poll interval longer than the deadline never polls at all.
#[test]
fn given_invalid_values_when_validate_called_then_each_is_rejected() {
    let base = LauncherConfig::default();
    let cases = [
        ("version 0", LauncherConfig { version: 0, ..base.clone() }),
        (
            "future version",
            LauncherConfig {
                version: CONFIG_VERSION + 1,
                ..base.clone()
            },
        ),
        (
            "public host",
            LauncherConfig {
                host: String::from("0.0.0.0"),
                ..base.clone()
            },
        ),
        ("port 0", LauncherConfig { port: 0, ..base.clone() }),
        (
            "relative health path",
            LauncherConfig {
                health_path: String::from("health"),
                ..base.clone()
            },
        ),
        (
            "zero probe timeout",
            LauncherConfig {
                probe_timeout_ms: 0,
                ..base.clone()
            },
        ),
        (
            "interval past deadline",
            LauncherConfig {
                poll_interval_ms: 5_000,
                startup_deadline_ms: 1_000,
                ..base.clone()
            },
        ),
        (
            "empty binary",
            LauncherConfig {
                backend_binary: String::new(),
                ..base.clone()
            },
        ),
    ];

    for (name, config) in cases {
        // WHEN
        let result = config.validate();

        // THEN
        assert!(
            matches!(result, Err(ConfigError::Validation { .. })),
            "{name} should be rejected"
        );
    }
}

#[test]
fn given_invalid_config_when_save_called_then_nothing_is_written() {
    // GIVEN: An invalid config
    let dir = TempDir::new().unwrap();
    let config = LauncherConfig {
        port: 0,
        ..LauncherConfig::default()
    };

    // WHEN
    let result = config.save(dir.path());

    // THEN
    assert!(result.is_err());
    assert!(!dir.path().join("launcher.json").exists());
}

#[test]
fn given_default_config_when_serve_options_called_then_matches_fixed_launch_settings() {
    // GIVEN / WHEN
    let options = LauncherConfig::default().serve_options().unwrap();

    // THEN: 127.0.0.1:8000, warning level, no access log
    assert_eq!(options.host, "127.0.0.1");
    assert_eq!(options.port, 8000);
    assert_eq!(options.log_level, LogLevel::Warning);
    assert!(!options.access_log);
}
