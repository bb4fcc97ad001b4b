//! Configuration and file management for the logview console
//!
//! This crate provides:
//! - Data directory paths for log files
//! - Configuration file loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, ConsoleConfig};
pub use config_file::{load_config_file, ConfigSource};
pub use paths::cache_dir;
