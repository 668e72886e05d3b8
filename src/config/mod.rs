//! Configuration file support for pixgrid.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/pixgrid/config.toml`. Settings include canvas geometry, the
//! palette, editor behaviour, preview marker colors and extra alignment guides.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, EditorConfig, GuideConfig, PaletteConfig, PreviewConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 22
/// height = 22
/// cell_size = 12
/// gutter = 1
///
/// [palette]
/// colors = ["transparent", "black", "#e53935"]
///
/// [editor]
/// input_mode = "rectangle-outline"
/// disable_transparency = false
/// history_debounce_ms = 1000
///
/// [preview]
/// ring_color = "white"
/// dot_color = [30, 136, 229]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Grid dimensions and cell geometry
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Indexed colors addressable by the grid
    #[serde(default)]
    pub palette: PaletteConfig,

    /// Input mode, transparency display and history settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Shape-tool preview marker colors
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Additional alignment guides
    #[serde(default)]
    pub guides: Vec<GuideConfig>,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width` / `canvas.height`: 1 - 1024
    /// - `canvas.cell_size`: 2 - 64
    /// - `canvas.gutter`: 0 - 4
    /// - `editor.history_debounce_ms`: 0 - 10000
    /// - `guides[].opacity`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        if !(1..=1024).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-1024 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 1024);
        }

        if !(1..=1024).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-1024 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 1024);
        }

        if !(2..=64).contains(&self.canvas.cell_size) {
            log::warn!(
                "Invalid cell_size {}, clamping to 2-64 range",
                self.canvas.cell_size
            );
            self.canvas.cell_size = self.canvas.cell_size.clamp(2, 64);
        }

        if self.canvas.gutter > 4 {
            log::warn!(
                "Invalid gutter {}, clamping to 0-4 range",
                self.canvas.gutter
            );
            self.canvas.gutter = 4;
        }

        if self.editor.history_debounce_ms > 10_000 {
            log::warn!(
                "Invalid history_debounce_ms {}, clamping to 0-10000 range",
                self.editor.history_debounce_ms
            );
            self.editor.history_debounce_ms = 10_000;
        }

        for guide in &mut self.guides {
            if !(0.0..=1.0).contains(&guide.opacity) {
                log::warn!(
                    "Invalid opacity {:.2} for guide '{}', clamping to 0.0-1.0",
                    guide.opacity,
                    guide.name
                );
                guide.opacity = guide.opacity.clamp(0.0, 1.0);
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/pixgrid/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pixgrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default location.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Serializes the config to TOML and writes it to `config_path`.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema of the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
