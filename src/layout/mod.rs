//! Level-of-detail tile layout

pub mod edge;
pub mod tile;
pub mod quadtree;
pub mod mesh;

pub use edge::EdgeMorph;
pub use tile::{TileDescriptor, TileUniform};
pub use quadtree::{LayoutConfig, TileLayout, MAX_RING_COUNT};
pub use mesh::{TileMesh, MAX_TILE_RESOLUTION};
