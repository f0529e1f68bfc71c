//! Crate error types
//!
//! Geometry problems degrade to sentinels rather than erroring; these
//! variants cover structural misuse of the widget tree, config loading and
//! logger setup.

use thiserror::Error;

use crate::shared::config::ConfigError;
use crate::widget::WidgetId;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Handle does not refer to a live widget
    #[error("Widget not found: {0:?}")]
    WidgetNotFound(WidgetId),

    /// Widget has no layout attached
    #[error("Widget {0:?} has no layout")]
    NoLayout(WidgetId),

    /// Argument rejected before any state was touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, Error>;
