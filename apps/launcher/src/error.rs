use error_location::ErrorLocation;

use thiserror::Error;

/// Errors that stop the launcher binary before or instead of a launch attempt.
#[derive(Debug, Error)]
pub enum LauncherAppError {
    /// Error from this App
    #[error("Launcher Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// Error from launcher-core (config, launcher construction)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}
