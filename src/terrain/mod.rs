//! Streamed procedural terrain
//!
//! [`Terrain`] ties a [`HeightmapStreamer`] to a [`TileLayout`]: the driver
//! moves the shared observer, calls [`Terrain::update`] once per frame, uploads
//! the returned dirty regions and draws every tile relative to the returned
//! recentering offset.

pub mod config;
pub use config::{SamplingConfig, StreamingConfig, TerrainConfig};

pub mod sampler;
pub use sampler::{quantize, HeightSampler};

pub mod buffer;
pub use buffer::ToroidalBuffer;

pub mod streamer;
pub use streamer::{HeightmapStreamer, ObserverHandle, TickOutcome};

use crate::core::types::{DVec2, Result};
use crate::layout::{TileLayout, TileUniform};
use crate::math::rect::BufferRect;
use crate::noise::NoiseField;

/// Per-frame output for the renderer
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUpdate {
    /// Observer position every tile is drawn relative to
    pub recenter_offset: DVec2,
    /// Buffer regions to re-upload, empty when nothing changed
    pub dirty: Vec<BufferRect>,
    pub outcome: TickOutcome,
}

/// Heightmap streamer plus the static tile layout drawn over it
#[derive(Debug)]
pub struct Terrain {
    streamer: HeightmapStreamer,
    layout: TileLayout,
}

impl Terrain {
    /// Validate the config, build the layout and fill the initial window.
    pub fn new(config: &TerrainConfig, observer: ObserverHandle) -> Result<Self> {
        config.validate()?;
        let field = NoiseField::new(&config.noise, config.seed)?;
        let sampler = HeightSampler::new(field, config.sampling)?;
        let layout = TileLayout::from_config(&config.layout)?;
        let streamer = HeightmapStreamer::initialize(sampler, &config.streaming, observer)?;
        Ok(Self { streamer, layout })
    }

    /// Stream around the observer's current position.
    pub fn update(&mut self) -> FrameUpdate {
        let outcome = self.streamer.tick();
        let dirty = if self.streamer.needs_upload() {
            self.streamer.take_dirty()
        } else {
            Vec::new()
        };
        FrameUpdate {
            recenter_offset: self.streamer.recenter_offset(),
            dirty,
            outcome,
        }
    }

    pub fn streamer(&self) -> &HeightmapStreamer {
        &self.streamer
    }

    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// Uniform data for every tile
    pub fn tile_uniforms(&self) -> Vec<TileUniform> {
        self.layout.uniforms()
    }

    /// Unquantized height at any world position
    pub fn height_at(&self, x: f64, y: f64) -> f64 {
        self.streamer.sampler().height_at(x, y)
    }
}
