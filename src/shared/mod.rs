//! Shared Utilities Module
//!
//! Configuration types used across the layout and action subsystems.

pub mod config;

pub use config::{ActionConfig, Config, ConfigError, LayoutConfig, LogConfig};
