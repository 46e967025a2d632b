//! Launcher configuration.
//!
//! [`LauncherConfig::default`] is what the process-wide launcher uses; the
//! library itself never reads a file. Hosts that want to tune timings or
//! point at a different backend binary load `{config_dir}/launcher.json`
//! explicitly with [`LauncherConfig::load`].

use crate::error::config::ConfigError;
use crate::{BACKEND_BINARY, BACKEND_SERVER_HOSTNAME, BACKEND_SERVER_PORT};

use models::{LogLevel, ServeOptions, ServeOptionsBuilder, is_loopback_host};

use error_location::ErrorLocation;

use std::fs::{create_dir_all, read_to_string, rename, write};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "launcher.json";
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Address the launched backend binds.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the backend binds, and the only port a target may name.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_startup_deadline_ms")]
    pub startup_deadline_ms: u64,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub access_log: bool,

    #[serde(default = "default_backend_binary")]
    pub backend_binary: String,

    /// Explicit executable; skips the lookup next to the current executable.
    #[serde(default)]
    pub backend_path: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            host: default_host(),
            port: default_port(),
            health_path: default_health_path(),
            probe_timeout_ms: default_probe_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            startup_deadline_ms: default_startup_deadline_ms(),
            log_level: LogLevel::default(),
            access_log: false,
            backend_binary: default_backend_binary(),
            backend_path: None,
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_host() -> String {
    BACKEND_SERVER_HOSTNAME.to_string()
}
fn default_port() -> u16 {
    BACKEND_SERVER_PORT
}
fn default_health_path() -> String {
    "/health".to_string()
}
fn default_probe_timeout_ms() -> u64 {
    1_000
}
fn default_poll_interval_ms() -> u64 {
    250
}
fn default_startup_deadline_ms() -> u64 {
    10_000
}
fn default_backend_binary() -> String {
    BACKEND_BINARY.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl LauncherConfig {
    /// Load config from {config_dir}/launcher.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(LauncherConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Launcher config not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = read_to_string(&config_path).map_err(|e| ConfigError::Read {
            path: config_path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        let config: LauncherConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse {}: {e}", config_path.display());
            ConfigError::Parse {
                path: config_path.clone(),
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        config.validate()?;

        info!("Launcher config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/launcher.json via temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            path: config_dir.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        write(&temp_path, json).map_err(|e| ConfigError::Write {
            path: temp_path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        rename(&temp_path, &config_path).map_err(|e| ConfigError::Write {
            path: config_path.clone(),
            location: ErrorLocation::from(Location::caller()),
            source: e,
        })?;

        info!("Launcher config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Validation {
            message,
            location: ErrorLocation::from(Location::caller()),
        };

        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(invalid(format!(
                "Invalid version: {} (expected 1-{CONFIG_VERSION})",
                self.version
            )));
        }

        if !is_loopback_host(&self.host) {
            return Err(invalid(format!(
                "Host must be a loopback address: {}",
                self.host
            )));
        }

        if self.port == 0 {
            return Err(invalid(String::from("Port must be non-zero")));
        }

        if !self.health_path.starts_with('/') {
            return Err(invalid(format!(
                "Health path must start with '/': {}",
                self.health_path
            )));
        }

        if self.probe_timeout_ms == 0 || self.poll_interval_ms == 0 || self.startup_deadline_ms == 0
        {
            return Err(invalid(String::from(
                "Probe timeout, poll interval and startup deadline must be non-zero",
            )));
        }

        if self.poll_interval_ms > self.startup_deadline_ms {
            return Err(invalid(format!(
                "Poll interval {}ms exceeds startup deadline {}ms",
                self.poll_interval_ms, self.startup_deadline_ms
            )));
        }

        if self.backend_binary.is_empty() {
            return Err(invalid(String::from("Backend binary name cannot be empty")));
        }

        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn startup_deadline(&self) -> Duration {
        Duration::from_millis(self.startup_deadline_ms)
    }

    /// `http://{host}:{port}`, the URL a frontend would hand to the launcher.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Options the launcher thread passes to the backend runner.
    #[track_caller]
    pub fn serve_options(&self) -> Result<ServeOptions, ConfigError> {
        ServeOptionsBuilder::default()
            .with_host(self.host.as_str())
            .with_port(self.port)
            .with_log_level(self.log_level)
            .with_access_log(self.access_log)
            .build()
            .map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
