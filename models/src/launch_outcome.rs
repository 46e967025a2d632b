use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::Serialize;

/// Which branch a call to `ensure_started` took.
///
/// Callers are free to ignore it: a failed start is never raised, it only
/// shows up later as a connection error against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaunchOutcome {
    /// A previous call already confirmed the backend healthy.
    AlreadyStarted,
    /// The target is not the local backend this launcher manages.
    Unmanaged,
    /// The backend was already answering before any launch.
    AlreadyRunning,
    /// A launcher thread from an earlier call is still alive.
    LaunchInProgress,
    /// The backend was launched and became healthy before the deadline.
    Launched,
    /// The backend was launched but never became healthy.
    TimedOut,
    /// The launcher thread could not be created, or its runner failed
    /// before the backend became healthy.
    LaunchFailed,
}

impl LaunchOutcome {
    /// True when the backend was confirmed healthy by this or an earlier call.
    pub fn is_healthy(&self) -> bool {
        matches!(
            self,
            LaunchOutcome::AlreadyStarted | LaunchOutcome::AlreadyRunning | LaunchOutcome::Launched
        )
    }
}

impl Display for LaunchOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        let text = match self {
            LaunchOutcome::AlreadyStarted => "already started",
            LaunchOutcome::Unmanaged => "unmanaged target",
            LaunchOutcome::AlreadyRunning => "already running",
            LaunchOutcome::LaunchInProgress => "launch in progress",
            LaunchOutcome::Launched => "launched",
            LaunchOutcome::TimedOut => "timed out",
            LaunchOutcome::LaunchFailed => "launch failed",
        };
        formatter.write_str(text)
    }
}
