//! Flip configuration file handling (flip.toml)

use anyhow::{Context, Result};
use flip_animation::input::DEFAULT_STRENGTH;
use flip_animation::palette::DEFAULT_START_COLOR;
use flip_animation::{Palette, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level flip configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FlipConfig {
    /// Draw at twice the logical resolution
    #[serde(default)]
    pub high_density: bool,
    /// Spin both glyphs start with, in radians per frame
    #[serde(default = "default_initial_velocity")]
    pub initial_velocity: f32,
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub input: InputConfig,
}

fn default_initial_velocity() -> f32 {
    -0.06
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            high_density: false,
            initial_velocity: default_initial_velocity(),
            palette: PaletteConfig::default(),
            layout: LayoutConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Palette colors as whole 0..=255 channel triples; anything else fails to
/// parse
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PaletteConfig {
    #[serde(default = "default_colors")]
    pub colors: Vec<[u8; 3]>,
    #[serde(default = "default_start_color")]
    pub start_color: [u8; 3],
}

fn rgb8(color: Rgb) -> [u8; 3] {
    [color.r as u8, color.g as u8, color.b as u8]
}

fn default_colors() -> Vec<[u8; 3]> {
    Palette::BRAND.colors().iter().copied().map(rgb8).collect()
}

fn default_start_color() -> [u8; 3] {
    rgb8(DEFAULT_START_COLOR)
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            start_color: default_start_color(),
        }
    }
}

/// Base geometry, scaled by `scale_factor * bounds_width` on resize
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
    #[serde(default = "default_bar_radius")]
    pub bar_radius: f32,
    #[serde(default = "default_bar_position")]
    pub bar_position: [f32; 2],
    #[serde(default = "default_disc_radius")]
    pub disc_radius: f32,
    #[serde(default = "default_disc_position")]
    pub disc_position: [f32; 2],
}

fn default_scale_factor() -> f32 {
    0.00382
}

fn default_bar_radius() -> f32 {
    56.0
}

fn default_bar_position() -> [f32; 2] {
    [53.0, 98.0]
}

fn default_disc_radius() -> f32 {
    59.0
}

fn default_disc_position() -> [f32; 2] {
    [182.0, 98.0]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale_factor: default_scale_factor(),
            bar_radius: default_bar_radius(),
            bar_position: default_bar_position(),
            disc_radius: default_disc_radius(),
            disc_position: default_disc_position(),
        }
    }
}

/// Click response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_strength")]
    pub strength: f32,
}

fn default_strength() -> f32 {
    DEFAULT_STRENGTH
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            strength: default_strength(),
        }
    }
}

impl FlipConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: FlipConfig = toml::from_str(content).context("Failed to parse flip.toml")?;
        config.palette()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Validated palette
    pub fn palette(&self) -> Result<Palette> {
        Palette::from_rgb8(&self.palette.colors).context("Invalid [palette] colors")
    }

    pub fn start_color(&self) -> Rgb {
        Rgb::from_rgb8(self.palette.start_color)
    }
}
