//! Domain models for the backend launcher.
//!
//! Plain data passed between the launcher and the backend it starts.
//! Validation lives in the builders; everything else is behavior-free.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **launcher-core**: Probing, launching and the start-once guard
//! - **backend-launcher**: CLI wiring everything together

pub mod error;
pub mod launch_outcome;
pub mod serve_options;

#[cfg(test)]
mod tests;

pub use error::model_error::ModelError;
pub use launch_outcome::LaunchOutcome;
pub use serve_options::builder::{ServeOptionsBuilder, is_loopback_host};
pub use serve_options::{LogLevel, ServeOptions};
