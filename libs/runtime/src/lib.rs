//! Shared runtime plumbing for the Pagestack server: layered configuration
//! loading and tracing initialization.

pub mod config;
pub mod logging;

pub use config::{AppConfig, AuthConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig};
