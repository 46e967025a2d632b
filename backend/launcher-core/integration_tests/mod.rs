mod config;
mod error;
mod launcher;
