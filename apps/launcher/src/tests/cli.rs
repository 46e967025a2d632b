use crate::cli::Cli;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[test]
fn given_explicit_dirs_when_parsed_then_used_verbatim() {
    // GIVEN / WHEN: All options passed explicitly
    let cli = Cli::parse_from([
        "backend-launcher",
        "--url",
        "http://localhost:8000",
        "--config-dir",
        "/etc/launcher",
        "--log-dir",
        "/var/log/launcher",
        "--verbose",
    ]);

    // THEN
    assert_eq!(cli.url.as_deref(), Some("http://localhost:8000"));
    assert_eq!(cli.config_dir().unwrap(), PathBuf::from("/etc/launcher"));
    assert_eq!(cli.log_dir().unwrap(), PathBuf::from("/var/log/launcher"));
    assert_eq!(cli.log_level(), LevelFilter::Trace);
}

/// **VALUE**: Verifies the zero-argument invocation works, which is how frontends call it.
///
/// **BUG THIS CATCHES**: Would catch `--url` becoming required, or default directories
/// ignoring the per-app subdirectory and writing into the user's config root.
#[test]
fn given_no_arguments_when_parsed_then_defaults_apply() {
    // GIVEN / WHEN
    let cli = Cli::parse_from(["backend-launcher"]);

    // THEN
    assert!(cli.url.is_none());
    assert!(!cli.verbose);
    if let Ok(config_dir) = cli.config_dir() {
        assert!(config_dir.ends_with("backend-launcher"));
    }
    if let Ok(log_dir) = cli.log_dir() {
        assert!(log_dir.ends_with("backend-launcher/logs"));
    }
}
