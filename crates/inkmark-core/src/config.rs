//! Engine configuration.

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::input::ClassifierConfig;
use crate::tools::{ToolKind, ToolPalette};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default eraser radius in px.
pub const DEFAULT_ERASE_RADIUS: f64 = 20.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for a drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Radius of the point eraser in px.
    pub erase_radius: f64,
    /// Maximum number of history snapshots.
    pub history_limit: usize,
    /// Whether the session starts with the toolbar shown (write mode).
    pub start_in_write_mode: bool,
    /// Tool selected when the session starts.
    pub initial_tool: ToolKind,
    /// Pen detection tunables.
    pub classifier: ClassifierConfig,
    /// Per-tool colors and widths.
    pub palette: ToolPalette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            erase_radius: DEFAULT_ERASE_RADIUS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            start_in_write_mode: true,
            initial_tool: ToolKind::default(),
            classifier: ClassifierConfig::default(),
            palette: ToolPalette::default(),
        }
    }
}

impl EngineConfig {
    /// Deserialize and validate a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.erase_radius.is_finite() || self.erase_radius <= 0.0 {
            return Err(invalid(format!("erase_radius must be positive, got {}", self.erase_radius)));
        }
        if self.history_limit == 0 {
            return Err(invalid("history_limit must be at least 1".to_string()));
        }
        let area = self.classifier.small_area_threshold;
        if !area.is_finite() || area < 0.0 {
            return Err(invalid(format!("small_area_threshold must be non-negative, got {}", area)));
        }
        for tool in ToolKind::DRAWING {
            let Some(style) = self.palette.style(tool) else { continue };
            let base = style.base_width;
            if !base.is_finite() || base <= 0.0 {
                return Err(invalid(format!("{} base width must be positive, got {}", tool.name(), base)));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    log::warn!("Rejected engine config: {}", message);
    ConfigError::Invalid(message)
}
