mod config;
mod launcher;
