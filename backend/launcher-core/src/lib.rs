pub mod config;
pub mod error;
pub mod launcher;

#[cfg(test)]
mod tests;

pub use launcher::ensure_backend_started;

pub const BACKEND_BINARY: &str = "backend-server";
pub const BACKEND_SERVER_HOSTNAME: &str = "127.0.0.1";
pub const BACKEND_SERVER_PORT: u16 = 8000;
pub const BACKEND_SERVER_BASE_URL: &str =
    const_format::concatcp!("http://", BACKEND_SERVER_HOSTNAME, ":", BACKEND_SERVER_PORT);
