use error_location::ErrorLocation;

use std::io::Error as IoError;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    Read {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Config Parse Error: {path}: {message} {location}")]
    Parse {
        path: PathBuf,
        message: String,
        location: ErrorLocation,
    },

    #[error("Config Write Error: {path}: {source} {location}")]
    Write {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: IoError,
    },

    #[error("Config Serialization Error: {message} {location}")]
    Serialize {
        message: String,
        location: ErrorLocation,
    },

    #[error("Config Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
