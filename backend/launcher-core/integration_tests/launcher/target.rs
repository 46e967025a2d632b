use launcher_core::config::LauncherConfig;
use launcher_core::launcher::target::is_managed_target;

/// **VALUE**: Verifies the exact set of targets the launcher considers its own.
///
/// **WHY THIS MATTERS**: This check is the only thing stopping the launcher from starting a
/// local server when the frontend is pointed at a remote deployment.
#[test]
fn given_default_config_when_matching_targets_then_only_local_port_8000_is_managed() {
    // GIVEN: The default configuration
    let config = LauncherConfig::default();

    let managed = [
        "http://127.0.0.1:8000",
        "http://127.0.0.1:8000/",
        "http://localhost:8000",
        "http://localhost:8000/api",
        "HTTP://LOCALHOST:8000",
    ];
    let unmanaged = [
        "http://127.0.0.1:8001",
        "http://127.0.0.1:80001",
        "http://0.0.0.0:8000",
        "http://[::1]:8000",
        "http://10.0.0.5:8000",
        "https://localhost:8000",
        "ws://localhost:8000",
        "http://localhost",
        "127.0.0.1:8000",
        "",
    ];

    // WHEN / THEN
    for target in managed {
        assert!(is_managed_target(target, &config), "{target} should be managed");
    }
    for target in unmanaged {
        assert!(!is_managed_target(target, &config), "{target} should be unmanaged");
    }
}

#[test]
fn given_custom_port_when_matching_targets_then_follows_configured_port() {
    // GIVEN: A launcher configured for another port
    let config = LauncherConfig {
        port: 9100,
        ..LauncherConfig::default()
    };

    // WHEN / THEN
    assert!(is_managed_target("http://127.0.0.1:9100", &config));
    assert!(!is_managed_target("http://127.0.0.1:8000", &config));
}

#[test]
fn given_port_80_config_when_target_omits_port_then_default_port_matches() {
    // GIVEN: A launcher managing the scheme's default port
    let config = LauncherConfig {
        port: 80,
        ..LauncherConfig::default()
    };

    // WHEN / THEN: An implicit :80 is the same target
    assert!(is_managed_target("http://localhost", &config));
}
