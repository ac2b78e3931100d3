//! Terrain configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::layout::LayoutConfig;
use crate::noise::NoiseNode;
use crate::noise::preset::{reference_terrain, REFERENCE_TERRAIN_MAX};

/// Mapping from world coordinates to noise input and from noise output to
/// quantized height samples
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// World coordinates are divided by this before evaluating noise (larger = smoother)
    pub horizontal_scale: f64,
    /// Noise output is multiplied by this before quantizing to `[0, 255]`
    pub vertical_scale: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            horizontal_scale: 100.0,
            vertical_scale: 255.0 / REFERENCE_TERRAIN_MAX,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.horizontal_scale.is_finite() || self.horizontal_scale == 0.0 {
            return Err(Error::InvalidSampling(format!(
                "horizontal scale must be finite and non-zero, got {}",
                self.horizontal_scale
            )));
        }
        if !self.vertical_scale.is_finite() {
            return Err(Error::InvalidSampling(format!(
                "vertical scale must be finite, got {}",
                self.vertical_scale
            )));
        }
        Ok(())
    }
}

/// Streaming window parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Half the side length of the square heightmap window
    pub window_radius: u32,
    /// Movement (world units, per axis) tolerated before the window is re-streamed
    pub hysteresis: i32,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            window_radius: 256,
            hysteresis: 20,
        }
    }
}

impl StreamingConfig {
    /// Largest accepted window radius; keeps buffer indices inside `u32`
    pub const MAX_WINDOW_RADIUS: u32 = 1 << 14;

    pub fn validate(&self) -> Result<()> {
        if self.window_radius == 0 {
            return Err(Error::InvalidStreaming("window radius must be at least 1".into()));
        }
        if self.window_radius > Self::MAX_WINDOW_RADIUS {
            return Err(Error::InvalidStreaming(format!(
                "window radius {} exceeds {}",
                self.window_radius,
                Self::MAX_WINDOW_RADIUS
            )));
        }
        if self.hysteresis < 0 {
            return Err(Error::InvalidStreaming(format!(
                "hysteresis must not be negative, got {}",
                self.hysteresis
            )));
        }
        Ok(())
    }

    /// Side length of the heightmap buffer
    pub fn side(&self) -> u32 {
        self.window_radius * 2
    }
}

/// Complete configuration for a streamed terrain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Seed for every noise node without its own override
    pub seed: u32,
    /// Height noise tree
    pub noise: NoiseNode,
    pub sampling: SamplingConfig,
    pub streaming: StreamingConfig,
    pub layout: LayoutConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            noise: reference_terrain(),
            sampling: SamplingConfig::default(),
            streaming: StreamingConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl TerrainConfig {
    /// Run every construction-time check.
    pub fn validate(&self) -> Result<()> {
        self.noise.validate()?;
        self.sampling.validate()?;
        self.streaming.validate()?;
        self.layout.validate()?;
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}
