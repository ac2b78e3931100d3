//! Edge-morph flags marking tile borders shared with a coarser ring

bitflags::bitflags! {
    /// Sides of a tile whose vertices blend toward the next coarser ring
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct EdgeMorph: u32 {
        const NONE   = 0;
        const TOP    = 1 << 0;
        const LEFT   = 1 << 1;
        const BOTTOM = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

impl Default for EdgeMorph {
    fn default() -> Self {
        EdgeMorph::NONE
    }
}

impl EdgeMorph {
    /// Flags for the tile at cell `(col, row)` of a ring's 4×4 grid.
    ///
    /// Cells are numbered from the ring's minimum corner; the sides touching
    /// the ring's bounding square face the coarser ring outside it.
    ///
    /// # Examples
    /// ```
    /// use lodscape::layout::EdgeMorph;
    ///
    /// assert_eq!(EdgeMorph::for_ring_cell(0, 0), EdgeMorph::LEFT | EdgeMorph::BOTTOM);
    /// assert_eq!(EdgeMorph::for_ring_cell(3, 2), EdgeMorph::RIGHT);
    /// assert_eq!(EdgeMorph::for_ring_cell(1, 1), EdgeMorph::NONE);
    /// ```
    pub fn for_ring_cell(col: u32, row: u32) -> Self {
        let mut flags = EdgeMorph::NONE;
        if col == 0 {
            flags |= EdgeMorph::LEFT;
        }
        if col == RING_CELLS - 1 {
            flags |= EdgeMorph::RIGHT;
        }
        if row == 0 {
            flags |= EdgeMorph::BOTTOM;
        }
        if row == RING_CELLS - 1 {
            flags |= EdgeMorph::TOP;
        }
        flags
    }

    /// Number of morphing sides
    pub fn edge_count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Tiles per side of one ring's bounding square
pub const RING_CELLS: u32 = 4;
