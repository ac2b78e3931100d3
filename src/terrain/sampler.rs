//! World coordinate → quantized height sample

use crate::core::types::{HeightSample, I64Vec2, Result};
use crate::noise::NoiseField;
use super::config::SamplingConfig;

/// Quantize a height to one byte, saturating at both ends. NaN maps to 0.
///
/// # Examples
/// ```
/// use lodscape::terrain::quantize;
///
/// assert_eq!(quantize(-4.0), 0);
/// assert_eq!(quantize(17.9), 17);
/// assert_eq!(quantize(300.0), 255);
/// assert_eq!(quantize(f64::NAN), 0);
/// ```
pub fn quantize(height: f64) -> HeightSample {
    if height.is_nan() {
        return 0;
    }
    height.clamp(0.0, 255.0) as HeightSample
}

/// Samples a noise field on the integer world grid
#[derive(Debug)]
pub struct HeightSampler {
    field: NoiseField,
    config: SamplingConfig,
}

impl HeightSampler {
    /// Create a sampler over a compiled noise field
    pub fn new(field: NoiseField, config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { field, config })
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Unquantized height at any world position
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        let scale = self.config.horizontal_scale;
        self.field.evaluate(x / scale, y / scale) * self.config.vertical_scale
    }

    /// Quantized sample for an integer world coordinate
    ///
    /// Coordinates up to ±2^53 convert to `f64` exactly.
    pub fn sample(&self, world: I64Vec2) -> HeightSample {
        quantize(self.height_at(world.x as f64, world.y as f64))
    }
}
