// Unit tests for runner module private functions
// Integration tests for the public launcher API are in integration_tests/launcher/

use crate::BACKEND_BINARY;
use crate::config::LauncherConfig;
use crate::launcher::runner::{ProcessRunner, build_serve_command};

use models::{LogLevel, ServeOptionsBuilder};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

fn serve_args(access_log: bool) -> Vec<String> {
    let options = ServeOptionsBuilder::default()
        .with_host("127.0.0.1")
        .with_port(8000)
        .with_log_level(LogLevel::Warning)
        .with_access_log(access_log)
        .build()
        .unwrap();

    let cmd = build_serve_command(Path::new(BACKEND_BINARY), &options);
    cmd.get_args()
        .map(|arg| arg.to_string_lossy().to_string())
        .collect()
}

/// **VALUE**: Verifies the backend is told exactly where to listen and how quietly to log.
///
/// **WHY THIS MATTERS**: The launcher polls a fixed host and port. If the command line
/// drifts from the configured options, the backend binds somewhere the launcher never probes
/// and every launch ends in a timeout.
///
/// **BUG THIS CATCHES**: Would catch swapped or dropped flags in `build_serve_command()`.
#[test]
fn given_default_options_when_build_serve_command_called_then_passes_host_port_and_level() {
    // GIVEN / WHEN: The default serve options turned into a command
    let args = serve_args(false);

    // THEN: Host, port, level and the access-log switch are all present
    assert_eq!(
        args,
        vec![
            "--host",
            "127.0.0.1",
            "--port",
            "8000",
            "--log-level",
            "warning",
            "--no-access-log",
        ]
    );
}

#[test]
fn given_access_log_enabled_when_build_serve_command_called_then_omits_no_access_log() {
    // GIVEN / WHEN: Access logging requested
    let args = serve_args(true);

    // THEN: The suppression flag is not passed
    assert!(!args.iter().any(|arg| arg == "--no-access-log"));
}

#[test]
fn given_program_path_when_build_serve_command_called_then_uses_it() {
    // GIVEN: An explicit program path
    let options = LauncherConfig::default().serve_options().unwrap();

    // WHEN: Building the command
    let cmd = build_serve_command(Path::new("/opt/backend/bin/server"), &options);

    // THEN: That program is what gets executed
    assert_eq!(cmd.get_program(), OsStr::new("/opt/backend/bin/server"));
}

/// **VALUE**: Verifies an explicitly configured executable always wins the lookup.
///
/// **BUG THIS CATCHES**: Would catch the sibling-directory search running first and picking
/// up a stale binary when the user pointed the launcher at a specific build.
#[test]
fn given_explicit_executable_when_resolve_called_then_returns_it_unchanged() {
    // GIVEN: A runner with an explicit executable
    let runner = ProcessRunner::new(BACKEND_BINARY).with_executable("/tmp/custom-backend");

    // WHEN: Resolving
    let resolved = runner.resolve_executable();

    // THEN: The explicit path is used as-is
    assert_eq!(resolved, PathBuf::from("/tmp/custom-backend"));
}

#[test]
fn given_missing_binary_when_resolve_called_then_falls_back_to_path_lookup() {
    // GIVEN: A binary name that exists nowhere next to the test executable
    let runner = ProcessRunner::new("no-such-backend-binary-for-tests");

    // WHEN: Resolving
    let resolved = runner.resolve_executable();

    // THEN: Bare name, left for PATH resolution at spawn time
    assert_eq!(resolved, PathBuf::from("no-such-backend-binary-for-tests"));
}

#[test]
fn given_config_with_backend_path_when_from_config_called_then_uses_configured_path() {
    // GIVEN: Config naming an explicit backend path
    let config = LauncherConfig {
        backend_path: Some(PathBuf::from("/srv/backend-server")),
        ..LauncherConfig::default()
    };

    // WHEN: Building the runner from config
    let runner = ProcessRunner::from_config(&config);

    // THEN: The configured path is resolved
    assert_eq!(
        runner.resolve_executable(),
        PathBuf::from("/srv/backend-server")
    );
}
