//! Concentric quadtree ("clip-map") tile layout
//!
//! The layout is built once. Four tiles of the finest scale cover a 2×2 block
//! around the origin; each following ring doubles the tile scale and adds the
//! twelve tiles that surround everything built so far:
//!
//! ```text
//! +---+---+---+---+
//! | A | A | A | A |
//! +---+---+---+---+
//! | A |   |   | A |
//! +---+---+---+---+
//! | A |   |   | A |
//! +---+---+---+---+
//! | A | A | A | A |
//! +---+---+---+---+
//! ```
//!
//! Tile count is `4 + 12 × rings`, so detail density halves with every
//! doubling of distance from the observer.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{DVec2, Result};
use super::edge::{EdgeMorph, RING_CELLS};
use super::mesh::MAX_TILE_RESOLUTION;
use super::tile::{TileDescriptor, TileUniform};

/// Largest accepted ring count
pub const MAX_RING_COUNT: u32 = 24;

/// Static layout parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge length of the outermost ring's tiles times two
    pub world_width: f64,
    /// Number of rings around the inner 2×2 block
    pub ring_count: u32,
    /// Grid subdivisions per tile side
    pub resolution: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            world_width: 1024.0,
            ring_count: 4,
            resolution: 128,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.world_width.is_finite() || self.world_width <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "world width must be finite and positive, got {}",
                self.world_width
            )));
        }
        if self.ring_count > MAX_RING_COUNT {
            return Err(Error::InvalidLayout(format!(
                "ring count {} exceeds {}",
                self.ring_count, MAX_RING_COUNT
            )));
        }
        if self.resolution == 0 || self.resolution > MAX_TILE_RESOLUTION {
            return Err(Error::InvalidLayout(format!(
                "resolution must be in 1..={}, got {}",
                MAX_TILE_RESOLUTION, self.resolution
            )));
        }
        Ok(())
    }
}

/// Immutable set of LOD tiles
#[derive(Clone, Debug)]
pub struct TileLayout {
    config: LayoutConfig,
    initial_scale: f64,
    tiles: Vec<TileDescriptor>,
}

impl TileLayout {
    /// Build the layout for the given parameters.
    pub fn build(world_width: f64, ring_count: u32, resolution: u32) -> Result<Self> {
        Self::from_config(&LayoutConfig {
            world_width,
            ring_count,
            resolution,
        })
    }

    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        config.validate()?;

        let initial_scale = config.world_width / f64::from(1u32 << config.ring_count);
        let mut tiles = Vec::with_capacity(4 + 12 * config.ring_count as usize);

        for (x, y) in [(-1.0, -1.0), (-1.0, 0.0), (0.0, 0.0), (0.0, -1.0)] {
            tiles.push(TileDescriptor {
                offset: DVec2::new(x, y) * initial_scale,
                scale: initial_scale,
                resolution: config.resolution,
                edge_morph: EdgeMorph::NONE,
                ring: None,
            });
        }

        for ring in 0..config.ring_count {
            let scale = initial_scale * f64::from(1u32 << ring);
            for col in 0..RING_CELLS {
                for row in 0..RING_CELLS {
                    // the middle 2×2 is covered by finer tiles
                    if (1..=2).contains(&col) && (1..=2).contains(&row) {
                        continue;
                    }
                    let cell = DVec2::new(col as f64 - 2.0, row as f64 - 2.0);
                    tiles.push(TileDescriptor {
                        offset: cell * scale,
                        scale,
                        resolution: config.resolution,
                        edge_morph: EdgeMorph::for_ring_cell(col, row),
                        ring: Some(ring),
                    });
                }
            }
        }

        log::info!(
            "TileLayout: {} tiles over {} rings (initial scale {}, resolution {})",
            tiles.len(),
            config.ring_count,
            initial_scale,
            config.resolution
        );

        Ok(Self {
            config: *config,
            initial_scale,
            tiles,
        })
    }

    pub fn tiles(&self) -> &[TileDescriptor] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Edge length of the finest tiles
    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    /// Half the side length of the square the layout covers
    pub fn extent(&self) -> f64 {
        self.initial_scale * f64::from(1u32 << self.config.ring_count)
    }

    /// The four innermost tiles
    pub fn inner(&self) -> impl Iterator<Item = &TileDescriptor> {
        self.tiles.iter().filter(|t| t.ring.is_none())
    }

    /// The twelve tiles of one ring
    pub fn ring(&self, index: u32) -> impl Iterator<Item = &TileDescriptor> {
        self.tiles.iter().filter(move |t| t.ring == Some(index))
    }

    /// Tile covering a point relative to the recentering offset
    pub fn tile_at(&self, point: DVec2) -> Option<&TileDescriptor> {
        self.tiles.iter().find(|t| t.contains(point))
    }

    /// Uniform data for every tile, in layout order
    pub fn uniforms(&self) -> Vec<TileUniform> {
        self.tiles.iter().map(TileDescriptor::uniform).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TileLayout {
        TileLayout::build(1024.0, 4, 128).unwrap()
    }

    #[test]
    fn test_tile_count() {
        assert_eq!(layout().len(), 4 + 12 * 4);
        for rings in 0..6 {
            let l = TileLayout::build(512.0, rings, 16).unwrap();
            assert_eq!(l.len(), 4 + 12 * rings as usize);
        }
    }

    #[test]
    fn test_initial_scale() {
        assert_eq!(layout().initial_scale(), 64.0);
        assert_eq!(layout().extent(), 1024.0);
    }

    #[test]
    fn test_inner_tiles() {
        let l = layout();
        let inner: Vec<_> = l.inner().collect();
        assert_eq!(inner.len(), 4);
        for t in inner {
            assert_eq!(t.scale, 64.0);
            assert_eq!(t.edge_morph, EdgeMorph::NONE);
            assert!(t.offset.x == -64.0 || t.offset.x == 0.0);
            assert!(t.offset.y == -64.0 || t.offset.y == 0.0);
        }
    }

    #[test]
    fn test_ring_scales_and_flags() {
        let l = layout();
        for ring in 0..4 {
            let tiles: Vec<_> = l.ring(ring).collect();
            assert_eq!(tiles.len(), 12);
            let expected = 64.0 * f64::from(1u32 << ring);
            let mut corners = 0;
            let mut edges = 0;
            for t in &tiles {
                assert_eq!(t.scale, expected);
                assert_eq!(t.resolution, 128);
                match t.edge_morph.edge_count() {
                    2 => corners += 1,
                    1 => edges += 1,
                    n => panic!("ring tile with {} morph edges", n),
                }
            }
            assert_eq!((corners, edges), (4, 8));
        }
    }

    #[test]
    fn test_flags_face_outward() {
        let l = layout();
        for t in l.tiles().iter().filter(|t| t.ring.is_some()) {
            let half = t.scale * 2.0;
            assert_eq!(t.edge_morph.contains(EdgeMorph::LEFT), t.offset.x == -half);
            assert_eq!(t.edge_morph.contains(EdgeMorph::RIGHT), t.max().x == half);
            assert_eq!(t.edge_morph.contains(EdgeMorph::BOTTOM), t.offset.y == -half);
            assert_eq!(t.edge_morph.contains(EdgeMorph::TOP), t.max().y == half);
        }
    }

    #[test]
    fn test_tiles_cover_without_overlap() {
        let l = TileLayout::build(256.0, 3, 8).unwrap();
        let step = l.initial_scale() / 2.0;
        let extent = l.extent();
        let mut y = -extent + step / 2.0;
        while y < extent {
            let mut x = -extent + step / 2.0;
            while x < extent {
                let p = DVec2::new(x, y);
                let hits = l.tiles().iter().filter(|t| t.contains(p)).count();
                assert_eq!(hits, 1, "point {:?} covered {} times", p, hits);
                x += step;
            }
            y += step;
        }
        assert!(l.tile_at(DVec2::splat(extent + 1.0)).is_none());
    }

    #[test]
    fn test_tile_at_prefers_finest_near_origin() {
        let l = layout();
        let t = l.tile_at(DVec2::new(1.0, 1.0)).unwrap();
        assert!(t.ring.is_none());
        let far = l.tile_at(DVec2::new(900.0, -900.0)).unwrap();
        assert_eq!(far.ring, Some(3));
    }

    #[test]
    fn test_zero_rings() {
        let l = TileLayout::build(100.0, 0, 4).unwrap();
        assert_eq!(l.len(), 4);
        assert_eq!(l.initial_scale(), 100.0);
        assert_eq!(l.extent(), 100.0);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(layout().tiles(), layout().tiles());
    }

    #[test]
    fn test_uniforms() {
        let l = layout();
        let uniforms = l.uniforms();
        assert_eq!(uniforms.len(), l.len());
        assert_eq!(uniforms[0].edge_morph, 0);
        assert_eq!(uniforms[0].ring, 0);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(TileLayout::build(0.0, 4, 128), Err(Error::InvalidLayout(_))));
        assert!(matches!(TileLayout::build(f64::NAN, 4, 128), Err(Error::InvalidLayout(_))));
        assert!(matches!(TileLayout::build(1024.0, 4, 0), Err(Error::InvalidLayout(_))));
        assert!(matches!(
            TileLayout::build(1024.0, 4, MAX_TILE_RESOLUTION + 1),
            Err(Error::InvalidLayout(_))
        ));
        assert!(TileLayout::build(1024.0, 4, MAX_TILE_RESOLUTION).is_ok());
        assert!(matches!(TileLayout::build(1024.0, MAX_RING_COUNT + 1, 8), Err(Error::InvalidLayout(_))));
    }
}
