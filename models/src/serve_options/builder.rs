use crate::error::model_error::ModelError;
use crate::{LogLevel, ServeOptions};

use std::net::IpAddr;
use std::panic::Location;

use error_location::ErrorLocation;

const LOCALHOST: &str = "localhost";

/// Builder for creating validated ServeOptions instances.
///
/// Every field is required; the launcher never lets the backend bind
/// anything but a loopback address.
#[derive(Debug, Default)]
pub struct ServeOptionsBuilder {
    host: Option<String>,
    port: Option<u16>,
    log_level: Option<LogLevel>,
    access_log: Option<bool>,
}

impl ServeOptionsBuilder {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn with_access_log(mut self, enabled: bool) -> Self {
        self.access_log = Some(enabled);
        self
    }

    /// Build the ServeOptions with validation.
    #[track_caller]
    pub fn build(self) -> Result<ServeOptions, ModelError> {
        let host = self.host.ok_or_else(|| ModelError::Validation {
            message: String::from("Host is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !is_loopback_host(&host) {
            return Err(ModelError::Validation {
                message: format!("Host must be a loopback address: {host}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let port = self.port.ok_or_else(|| ModelError::Validation {
            message: String::from("Port is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if port == 0 {
            return Err(ModelError::Validation {
                message: String::from("Port must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let log_level = self.log_level.ok_or_else(|| ModelError::Validation {
            message: String::from("Log level is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let access_log = self.access_log.ok_or_else(|| ModelError::Validation {
            message: String::from("Access log flag is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(ServeOptions {
            host,
            port,
            log_level,
            access_log,
        })
    }
}

/// `localhost` or any IP literal in the loopback range.
pub fn is_loopback_host(host: &str) -> bool {
    host.eq_ignore_ascii_case(LOCALHOST)
        || host
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}
