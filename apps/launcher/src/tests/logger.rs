// Unit tests for logger module initialization logic
// Tests focus on idempotence and error handling

use crate::error::LauncherAppError;
use crate::logger::{DEFAULT_LOG_LEVEL, initialize, install};

use std::path::PathBuf;

use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Embedding hosts and tests may both try to set up logging. A second
/// call must not try to install a second global logger, which `log` refuses.
///
/// **BUG THIS CATCHES**: Would catch the Once or AtomicBool guards being removed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A writable log directory
    let dir = TempDir::new().unwrap();

    // WHEN: Calling initialize twice
    let first = initialize(dir.path(), DEFAULT_LOG_LEVEL);
    let second = initialize(dir.path(), DEFAULT_LOG_LEVEL);

    // THEN: Both succeed; whichever call installed the logger created the file
    assert!(first.is_ok(), "First initialization should succeed");
    assert!(second.is_ok(), "Second initialization should be a no-op");
}

/// **VALUE**: Verifies an unusable log directory is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` or `create_dir_all()` being unwrapped.
#[test]
fn given_invalid_log_dir_when_install_called_then_returns_app_error() {
    // GIVEN: A path below a file, which can never be a directory
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN
    let result = install(&invalid_dir, DEFAULT_LOG_LEVEL);

    // THEN
    assert!(
        matches!(result, Err(LauncherAppError::App { .. })),
        "Expected App error, got {result:?}"
    );
}
