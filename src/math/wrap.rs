//! Toroidal index arithmetic and the world ↔ window ↔ wrap-index transform
//!
//! A streaming window of side `N` maps every world coordinate `w` to the
//! buffer index `wrap(w, N)`. Moving the window never moves data: only the
//! cells that leave the window get overwritten with the cells that enter it.

use crate::core::types::I64Vec2;

/// Wrap `v` into `[0, n)`, correct for negative `v`.
///
/// World coordinates are `i64`, so every position an `f64` observer can
/// hold exactly maps to a cell.
///
/// # Examples
/// ```
/// use lodscape::math::wrap;
///
/// assert_eq!(wrap(5, 4), 1);
/// assert_eq!(wrap(-1, 4), 3);
/// assert_eq!(wrap(-8, 4), 0);
/// ```
#[inline]
pub fn wrap(v: i64, n: i64) -> i64 {
    debug_assert!(n > 0, "wrap modulus must be positive");
    v.rem_euclid(n)
}

/// Component-wise [`wrap`].
#[inline]
pub fn wrap_vec(v: I64Vec2, n: i64) -> I64Vec2 {
    I64Vec2::new(wrap(v.x, n), wrap(v.y, n))
}

/// A square window of integer world coordinates laid over a toroidal grid.
///
/// The window covers `[corner, corner + side)` on both axes. Every world
/// coordinate inside it owns exactly one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowFrame {
    corner: I64Vec2,
    side: i64,
}

impl WindowFrame {
    /// Create a window from its minimum corner and side length.
    pub fn new(corner: I64Vec2, side: i64) -> Self {
        debug_assert!(side > 0);
        Self { corner, side }
    }

    /// Window of side `2 * radius` whose corner sits `radius` below `center`.
    pub fn centered(center: I64Vec2, radius: i64) -> Self {
        Self::new(center - I64Vec2::splat(radius), radius * 2)
    }

    pub fn corner(&self) -> I64Vec2 {
        self.corner
    }

    pub fn side(&self) -> i64 {
        self.side
    }

    /// Exclusive upper corner.
    pub fn max(&self) -> I64Vec2 {
        self.corner + I64Vec2::splat(self.side)
    }

    /// Check if a world coordinate lies inside the window
    pub fn contains(&self, world: I64Vec2) -> bool {
        let max = self.max();
        world.x >= self.corner.x && world.x < max.x && world.y >= self.corner.y && world.y < max.y
    }

    /// Offset of a world coordinate from the window corner.
    pub fn world_to_window(&self, world: I64Vec2) -> I64Vec2 {
        world - self.corner
    }

    /// Window-local offset back to world space.
    pub fn window_to_world(&self, local: I64Vec2) -> I64Vec2 {
        self.corner + local
    }

    /// Grid cell owning a world coordinate.
    pub fn world_to_wrap(&self, world: I64Vec2) -> I64Vec2 {
        wrap_vec(world, self.side)
    }

    /// The unique world coordinate inside this window stored at grid cell `index`.
    pub fn wrap_to_world(&self, index: I64Vec2) -> I64Vec2 {
        self.corner + wrap_vec(index - self.corner, self.side)
    }

    /// Same window moved by `delta` world units.
    pub fn shifted(&self, delta: I64Vec2) -> Self {
        Self::new(self.corner + delta, self.side)
    }
}
