//! Configuration for the decoration engine
//!
//! Loads from a TOML file at `~/.config/area/decor.toml`.
//! Auto-generates the default file on first run if missing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::decor::ControlIcon;
use crate::error::DecorError;
use crate::render::ColorRole;

const DEFAULT_TITLE_HEIGHT: u32 = 20;
const DEFAULT_BORDER_WIDTH: u32 = 4;
const DEFAULT_BORDER_RADIUS: u32 = 4;

/// Decoration settings as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub frame: FrameConfig,
    pub buttons: ControlIconNames,
    /// Colour overrides, `role = 0xRRGGBB`.
    pub colors: BTreeMap<String, u32>,
}

impl Config {
    /// Load configuration from file, or use defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            if let Err(e) = Self::save_default(&config_path) {
                warn!("Failed to create default config file: {}", e);
            }
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = Self::from_toml_str(&content).context("Failed to parse config file")?;

        info!("Configuration loaded from {:?}", path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, DecorError> {
        toml::from_str(content).map_err(|e| DecorError::Config(e.to_string()))
    }

    /// Colour overrides keyed by role. Unknown role names are skipped.
    pub fn color_overrides(&self) -> BTreeMap<ColorRole, u32> {
        self.colors
            .iter()
            .filter_map(|(name, rgb)| match name.parse::<ColorRole>() {
                Ok(role) => Some((role, *rgb)),
                Err(_) => {
                    warn!("Unknown colour role {:?} in config", name);
                    None
                }
            })
            .collect()
    }

    /// Record the themed icon to use for a control glyph.
    ///
    /// Takes effect the next time a [`Theme`](crate::decor::Theme) is started
    /// from these settings.
    pub fn set_control_icon(&mut self, icon: ControlIcon, name: impl Into<String>) {
        self.buttons.set(icon, name.into());
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("area");

        Ok(config_dir.join("decor.toml"))
    }

    fn save_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;

        fs::write(path, toml_string).context("Failed to write default config file")?;

        info!("Created default config file at {:?}", path);
        Ok(())
    }
}

/// Frame geometry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Title bar height in pixels
    pub title_height: u32,
    /// Outline width in pixels
    pub border_width: u32,
    /// Corner radius of the frame outline and clip mask
    pub border_radius: u32,
    /// Draw bevelled handles instead of a flat outline
    pub handles: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            title_height: DEFAULT_TITLE_HEIGHT,
            border_width: DEFAULT_BORDER_WIDTH,
            border_radius: DEFAULT_BORDER_RADIUS,
            handles: false,
        }
    }
}

impl FrameConfig {
    /// Normalise raw settings. Must run exactly once per loaded config.
    ///
    /// With handles the border is stacked into the title height before the
    /// range checks; a value outside its range falls back to its default.
    pub fn startup(mut self) -> Self {
        self.border_width = fix_range(self.border_width, 1, 128, DEFAULT_BORDER_WIDTH);
        if self.handles {
            self.title_height = self.title_height.saturating_add(self.border_width);
        }
        self.title_height = fix_range(self.title_height, 1, 256, DEFAULT_TITLE_HEIGHT);
        self.border_radius = fix_range(self.border_radius, 1, 64, DEFAULT_BORDER_RADIUS);
        self
    }

    pub(crate) fn title(&self) -> i32 {
        debug_assert!(self.title_height >= 1, "title height must be normalised");
        self.title_height as i32
    }

    pub(crate) fn border(&self) -> i32 {
        debug_assert!(self.border_width >= 1, "border width must be normalised");
        self.border_width as i32
    }

    pub(crate) fn radius(&self) -> i32 {
        self.border_radius as i32
    }

    /// Title bar tall enough to hold the title and its buttons.
    pub fn title_fits(&self) -> bool {
        self.title_height > self.border_width
    }

    /// Edge length of the window icon drawn in the title bar.
    pub fn icon_size(&self) -> i32 {
        self.title() - 4
    }
}

fn fix_range(value: u32, min: u32, max: u32, default: u32) -> u32 {
    if value < min || value > max {
        warn!("Setting value {} outside {}..={}, using {}", value, min, max, default);
        default
    } else {
        value
    }
}

/// Themed icon names for the control glyphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlIconNames {
    pub close: Option<String>,
    pub maximize: Option<String>,
    pub maximize_active: Option<String>,
    pub minimize: Option<String>,
}

impl ControlIconNames {
    pub fn get(&self, icon: ControlIcon) -> Option<&str> {
        match icon {
            ControlIcon::Close => self.close.as_deref(),
            ControlIcon::Maximize => self.maximize.as_deref(),
            ControlIcon::MaximizeActive => self.maximize_active.as_deref(),
            ControlIcon::Minimize => self.minimize.as_deref(),
        }
    }

    pub fn set(&mut self, icon: ControlIcon, name: String) {
        let slot = match icon {
            ControlIcon::Close => &mut self.close,
            ControlIcon::Maximize => &mut self.maximize,
            ControlIcon::MaximizeActive => &mut self.maximize_active,
            ControlIcon::Minimize => &mut self.minimize,
        };
        *slot = Some(name);
    }
}
