//! Shared tile grid mesh

use super::edge::EdgeMorph;

/// Largest grid resolution; keeps every vertex index inside `u32`
pub const MAX_TILE_RESOLUTION: u32 = 4096;

/// Unit-square grid every tile instances
///
/// Vertices lie on `[0, 1]²` with the origin at the minimum corner, so a tile
/// is placed by scaling by its `scale` and translating by its offset.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMesh {
    pub resolution: u32,
    pub positions: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl TileMesh {
    /// Build a `resolution × resolution` quad grid (two triangles per quad, CCW)
    ///
    /// `resolution` is clamped to `1..=MAX_TILE_RESOLUTION`.
    pub fn grid(resolution: u32) -> Self {
        let n = resolution.clamp(1, MAX_TILE_RESOLUTION);
        let stride = n + 1;
        let inv = 1.0 / n as f32;

        let mut positions = Vec::with_capacity(stride as usize * stride as usize);
        for row in 0..=n {
            for col in 0..=n {
                positions.push([col as f32 * inv, row as f32 * inv]);
            }
        }

        let mut indices = Vec::with_capacity(n as usize * n as usize * 6);
        for row in 0..n {
            for col in 0..n {
                let a = row * stride + col;
                let b = a + 1;
                let c = a + stride + 1;
                let d = a + stride;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }

        Self {
            resolution: n,
            positions,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Indices of the vertices along the given sides.
    pub fn edge_vertices(&self, edges: EdgeMorph) -> Vec<u32> {
        let n = self.resolution;
        let stride = n + 1;
        (0..stride * stride)
            .filter(|&i| {
                let (col, row) = (i % stride, i / stride);
                (edges.contains(EdgeMorph::LEFT) && col == 0)
                    || (edges.contains(EdgeMorph::RIGHT) && col == n)
                    || (edges.contains(EdgeMorph::BOTTOM) && row == 0)
                    || (edges.contains(EdgeMorph::TOP) && row == n)
            })
            .collect()
    }
}
