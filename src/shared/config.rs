//! Engine Configuration
//!
//! Loaded from `trellis.toml`. Every field has a default, so a partial file
//! (or no file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::Easing;
use crate::geom::Alignment;

/// Name of the config file searched for by [`Config::find_config_path`]
pub const CONFIG_FILE_NAME: &str = "trellis.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub actions: ActionConfig,
}

/// `[log]` section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; `None` means `trellis.log` next to the executable
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Write to stderr instead of a file
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
            stderr: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// `[layout]` section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Default gap between layout items in pixels
    #[serde(default)]
    pub spacing: i32,

    /// Default alignment name, e.g. "top-left" or "center"
    #[serde(default = "default_alignment")]
    pub alignment: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing: 0,
            alignment: default_alignment(),
        }
    }
}

fn default_alignment() -> String {
    "top-left".to_string()
}

impl LayoutConfig {
    /// Resolved alignment; unknown names fall back to top-left
    pub fn alignment(&self) -> Alignment {
        Alignment::from_name(&self.alignment).unwrap_or_else(|| {
            tracing::warn!(name = %self.alignment, "unknown alignment, using top-left");
            Alignment::TOP_LEFT
        })
    }
}

/// `[actions]` section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Global time scale applied by action players
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Default timing curve name
    #[serde(default = "default_easing")]
    pub easing: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            easing: default_easing(),
        }
    }
}

fn default_speed() -> f32 {
    1.0
}

fn default_easing() -> String {
    "linear".to_string()
}

impl ActionConfig {
    /// Resolved timing curve
    pub fn easing(&self) -> Easing {
        Easing::from_name(&self.easing)
    }
}

impl Config {
    /// Find trellis.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: user config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("trellis").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load configuration, returning defaults if no file is found or it is unreadable
    pub fn load() -> Self {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.actions.speed, 1.0);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [layout]
            spacing = 4
            alignment = "center"

            [actions]
            easing = "ease_in_out_quad"
        "#,
        )
        .unwrap();

        assert_eq!(config.layout.spacing, 4);
        assert_eq!(config.layout.alignment(), Alignment::CENTER);
        assert_eq!(config.actions.speed, 1.0);
        assert_eq!(config.actions.easing(), Easing::QuadInOut);
    }

    #[test]
    fn test_unknown_alignment_falls_back() {
        let config = Config::parse("[layout]\nalignment = \"diagonal\"\n").unwrap();
        assert_eq!(config.layout.alignment(), Alignment::TOP_LEFT);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[layout\nspacing = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.layout.spacing = 6;
        config.log.stderr = true;
        config.save(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
