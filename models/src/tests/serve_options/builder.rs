use crate::{LogLevel, ModelError, ServeOptionsBuilder, is_loopback_host};

fn complete_builder() -> ServeOptionsBuilder {
    ServeOptionsBuilder::default()
        .with_host("127.0.0.1")
        .with_port(8000)
        .with_log_level(LogLevel::Warning)
        .with_access_log(false)
}

/// **VALUE**: Verifies the happy path produces exactly the options the backend is started with.
///
/// **WHY THIS MATTERS**: These fields become the backend's command line. A builder that drops
/// or rewrites a field would start the backend on the wrong port or with noisy logging.
#[test]
fn given_all_fields_when_build_called_then_returns_options() {
    // GIVEN: A builder with every field set
    let builder = complete_builder();

    // WHEN: Building
    let options = builder.build().expect("complete builder should validate");

    // THEN: Fields are carried over unchanged
    assert_eq!(options.host, "127.0.0.1");
    assert_eq!(options.port, 8000);
    assert_eq!(options.log_level, LogLevel::Warning);
    assert!(!options.access_log);
    assert_eq!(options.base_url(), "http://127.0.0.1:8000");
}

/// **VALUE**: Verifies missing required fields are rejected with a descriptive message.
///
/// **BUG THIS CATCHES**: Would catch a builder that silently defaults the port to 0,
/// letting the OS pick a port the launcher then never probes.
#[test]
fn given_missing_port_when_build_called_then_returns_validation_error() {
    // GIVEN: A builder without a port
    let builder = ServeOptionsBuilder::default()
        .with_host("127.0.0.1")
        .with_log_level(LogLevel::Warning)
        .with_access_log(false);

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation fails naming the port
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("Port"), "Unexpected message: {message}")
        }
        Ok(options) => panic!("Expected validation error, got {options:?}"),
    }
}

#[test]
fn given_port_zero_when_build_called_then_returns_validation_error() {
    // GIVEN: Port 0 (auto-select)
    let builder = complete_builder().with_port(0);

    // WHEN / THEN: Rejected
    assert!(builder.build().is_err(), "Port 0 must be rejected");
}

/// **VALUE**: Verifies the launcher can never be configured to expose the backend off-box.
///
/// **WHY THIS MATTERS**: The launcher only manages loopback services. Binding 0.0.0.0 or a
/// public address would expose an unauthenticated development backend to the network.
#[test]
fn given_non_loopback_host_when_build_called_then_returns_validation_error() {
    // GIVEN: Hosts outside loopback
    for host in ["0.0.0.0", "192.168.1.10", "example.com", ""] {
        // WHEN: Building
        let result = complete_builder().with_host(host).build();

        // THEN: Rejected
        assert!(result.is_err(), "Host {host:?} must be rejected");
    }
}

#[test]
fn given_loopback_spellings_when_checked_then_all_accepted() {
    // GIVEN: The loopback spellings the launcher recognizes
    let hosts = ["127.0.0.1", "localhost", "LOCALHOST", "::1", "127.0.0.2"];

    // WHEN / THEN: Each is treated as loopback
    for host in hosts {
        assert!(is_loopback_host(host), "{host} should be loopback");
    }
}

#[test]
fn given_log_level_when_serialized_then_uses_lowercase_name() {
    // GIVEN / WHEN: Serializing a level
    let json = serde_json::to_string(&LogLevel::Warning).unwrap();

    // THEN: Lowercase, matching the backend's CLI spelling
    assert_eq!(json, "\"warning\"");
    assert_eq!(LogLevel::Warning.to_string(), "warning");
}
