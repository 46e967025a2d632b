use launcher_core::config::LauncherConfig;
use launcher_core::error::CoreError;
use launcher_core::error::config::ConfigError;
use launcher_core::error::launcher::LauncherError;
use launcher_core::launcher::BackendLauncher;

use models::ServeOptions;

/// **VALUE**: Verifies an invalid config is refused when building a launcher, not at launch time.
///
/// **WHY THIS MATTERS**: `ensure_started` never raises. The only place a bad config can be
/// reported to the host is construction.
#[test]
fn given_invalid_config_when_launcher_built_then_returns_config_error() {
    // GIVEN: A config with a public bind address
    let config = LauncherConfig {
        host: String::from("0.0.0.0"),
        ..LauncherConfig::default()
    };

    // WHEN
    let result = BackendLauncher::new(
        config,
        |_health_url: &str| false,
        |_options: &ServeOptions| -> Result<(), LauncherError> { Ok(()) },
    );

    // THEN
    match result {
        Err(CoreError::Config(ConfigError::Validation { message, .. })) => {
            assert!(message.contains("0.0.0.0"), "Unexpected message: {message}")
        }
        Err(other) => panic!("Expected validation error, got {other}"),
        Ok(_) => panic!("Expected validation error, got a launcher"),
    }
}
