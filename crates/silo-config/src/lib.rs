//! Silo Config - Settings file and credential loading.
//!
//! Two configuration layers, both resolved once at startup and handed to the
//! components that need them:
//! - a TOML settings file (`silo.toml`) for categories and tunables,
//! - a dotenv-style file for credentials, tolerant of the encodings the
//!   corpus' env files actually show up in.

mod config;
mod env_file;
mod error;

pub use config::*;
pub use env_file::EnvFile;
pub use error::{ConfigError, ConfigResult};
