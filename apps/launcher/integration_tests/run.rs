use backend_launcher::cli::Cli;
use backend_launcher::error::LauncherAppError;
use backend_launcher::run;

use models::LaunchOutcome;

use std::fs::write;

use clap::Parser;
use tempfile::TempDir;

/// **VALUE**: Verifies the binary's flow leaves remote targets alone end to end.
///
/// **WHY THIS MATTERS**: The same CLI is used in scripts against remote deployments; it must
/// exit cleanly without spawning anything.
#[test]
fn given_remote_url_when_run_called_then_returns_unmanaged() {
    // GIVEN: An empty config dir and a remote URL
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().to_string_lossy().to_string();
    let cli = Cli::parse_from([
        "backend-launcher",
        "--url",
        "https://api.example.com",
        "--config-dir",
        config_dir.as_str(),
    ]);

    // WHEN
    let outcome = run(&cli).expect("run should succeed");

    // THEN
    assert_eq!(outcome, LaunchOutcome::Unmanaged);
}

#[test]
fn given_invalid_config_file_when_run_called_then_returns_core_error() {
    // GIVEN: A config file that fails validation
    let dir = TempDir::new().unwrap();
    write(dir.path().join("launcher.json"), r#"{ "host": "0.0.0.0" }"#).unwrap();
    let config_dir = dir.path().to_string_lossy().to_string();
    let cli = Cli::parse_from(["backend-launcher", "--config-dir", config_dir.as_str()]);

    // WHEN
    let result = run(&cli);

    // THEN: Refused before any launch attempt
    assert!(
        matches!(result, Err(LauncherAppError::Core { .. })),
        "Expected core error, got {result:?}"
    );
}
