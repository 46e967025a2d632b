use launcher_core::error::launcher::LauncherError;

use error_location::ErrorLocation;

use std::error::Error;
use std::io::Error as IoError;
use std::io::ErrorKind;
use std::panic::Location;

/// **VALUE**: Verifies spawn failures carry their message and kind in the Display output.
///
/// **WHY THIS MATTERS**: Runner failures are only ever seen in the log, from the launcher
/// thread. The logged line is all a developer gets when the backend silently never starts.
#[test]
fn given_spawn_error_when_formatted_then_includes_kind_and_message() {
    // GIVEN: A Spawn error wrapping an OS error
    let err = LauncherError::Spawn {
        message: "Failed to spawn backend-server".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: Box::new(IoError::new(ErrorKind::NotFound, "binary not found")),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN
    assert!(error_string.starts_with("Spawn Error"));
    assert!(error_string.contains("Failed to spawn backend-server"));
}

/// **VALUE**: Verifies the OS error behind a spawn failure stays reachable.
///
/// **BUG THIS CATCHES**: Would catch `#[source]` being dropped from `LauncherError::Spawn`,
/// losing "permission denied" vs "not found".
#[test]
fn given_spawn_error_with_source_when_inspected_then_preserves_chain() {
    // GIVEN
    let err = LauncherError::Spawn {
        message: "Spawn failed".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: Box::new(IoError::new(ErrorKind::PermissionDenied, "permission denied")),
    };

    // WHEN
    let source = err.source();

    // THEN
    assert!(source.is_some(), "Should have error source");
    assert!(source.unwrap().to_string().contains("permission denied"));
}

#[test]
fn given_backend_error_when_formatted_then_includes_kind_and_exit_status() {
    // GIVEN: A Backend error for a non-zero exit
    let err = LauncherError::Backend {
        message: "Backend exited with exit status: 3".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN
    let error_string = err.to_string();

    // THEN: Kind and status are in the text, and there is no source
    assert!(error_string.starts_with("Backend Error"));
    assert!(error_string.contains("exit status: 3"));
    assert!(err.source().is_none());
}
