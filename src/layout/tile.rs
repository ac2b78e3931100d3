//! Tile descriptors and their GPU uniform form

use bytemuck::{Pod, Zeroable};

use crate::core::types::DVec2;
use super::edge::EdgeMorph;

/// One mesh tile of the LOD layout
///
/// The tile covers `[offset, offset + scale)` on both axes, relative to the
/// observer's recentering offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileDescriptor {
    /// Minimum corner in world units
    pub offset: DVec2,
    /// Edge length in world units
    pub scale: f64,
    /// Grid subdivisions per side, shared by every tile
    pub resolution: u32,
    pub edge_morph: EdgeMorph,
    /// Ring index, `None` for the four innermost tiles
    pub ring: Option<u32>,
}

impl TileDescriptor {
    /// Exclusive maximum corner
    pub fn max(&self) -> DVec2 {
        self.offset + DVec2::splat(self.scale)
    }

    pub fn center(&self) -> DVec2 {
        self.offset + DVec2::splat(self.scale * 0.5)
    }

    /// Check if a point (relative to the recentering offset) lies on this tile
    pub fn contains(&self, point: DVec2) -> bool {
        let max = self.max();
        point.x >= self.offset.x && point.x < max.x && point.y >= self.offset.y && point.y < max.y
    }

    /// World distance between neighbouring vertices
    pub fn vertex_spacing(&self) -> f64 {
        self.scale / self.resolution as f64
    }

    /// Per-draw uniform data
    pub fn uniform(&self) -> TileUniform {
        TileUniform {
            offset: self.offset.as_vec2().to_array(),
            scale: self.scale as f32,
            edge_morph: self.edge_morph.bits(),
            resolution: self.resolution,
            ring: self.ring.map_or(0, |r| r + 1),
            _pad: [0; 2],
        }
    }
}

/// GPU uniform parameters for drawing one tile.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TileUniform {
    /// Tile minimum corner relative to the recentering offset
    pub offset: [f32; 2],
    /// Tile edge length
    pub scale: f32,
    /// `EdgeMorph` bits
    pub edge_morph: u32,
    pub resolution: u32,
    /// 0 for the inner tiles, ring index + 1 otherwise
    pub ring: u32,
    /// Padding for alignment
    pub _pad: [u32; 2],
}
