//! Integer rectangles in world space and in toroidal buffer space

use crate::core::types::I64Vec2;
use super::wrap::wrap;

/// Half-open rectangle of integer world coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldRect {
    pub min: I64Vec2,
    pub size: I64Vec2,
}

impl WorldRect {
    /// Create a rectangle from its minimum corner and size
    pub fn new(min: I64Vec2, size: I64Vec2) -> Self {
        debug_assert!(size.x >= 0 && size.y >= 0, "negative rect size {:?}", size);
        Self { min, size }
    }

    /// Rectangle spanning `[min, max)`
    pub fn from_min_max(min: I64Vec2, max: I64Vec2) -> Self {
        Self::new(min, max - min)
    }

    /// Exclusive upper corner
    pub fn max(&self) -> I64Vec2 {
        self.min + self.size
    }

    pub fn width(&self) -> i64 {
        self.size.x
    }

    pub fn height(&self) -> i64 {
        self.size.y
    }

    /// Number of integer coordinates covered
    pub fn area(&self) -> usize {
        self.size.x.max(0) as usize * self.size.y.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Check if a coordinate is inside the rectangle
    pub fn contains(&self, p: I64Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }

    /// Row-major iteration over every covered coordinate
    pub fn iter(&self) -> impl Iterator<Item = I64Vec2> + use<> {
        let min = self.min;
        let max = self.max();
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| I64Vec2::new(x, y)))
    }
}

/// Rectangle of buffer cells that does not cross the wrap seam
///
/// Suitable for a single sub-image upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BufferRect {
    pub col: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl BufferRect {
    pub fn new(col: u32, row: u32, width: u32, height: u32) -> Self {
        Self { col, row, width, height }
    }

    /// The whole buffer of side `side`
    pub fn full(side: u32) -> Self {
        Self::new(0, 0, side, side)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if a cell is inside the rectangle
    pub fn contains(&self, col: u32, row: u32) -> bool {
        col >= self.col && col < self.col + self.width && row >= self.row && row < self.row + self.height
    }
}

/// Split one axis span `[start, start + len)` at the seam of a ring of size `side`.
fn split_span(start: i64, len: i64, side: i64) -> ([(u32, u32); 2], usize) {
    let len = len.min(side);
    let first = wrap(start, side);
    let head = len.min(side - first);
    let tail = len - head;
    let mut spans = [(first as u32, head as u32), (0, 0)];
    if tail > 0 {
        spans[1] = (0, tail as u32);
        (spans, 2)
    } else {
        (spans, 1)
    }
}

/// Map a world rectangle onto a toroidal buffer of side `side`.
///
/// Returns between one and four buffer rectangles that together cover exactly
/// the cells the world rectangle writes. Rectangles wider than the buffer are
/// clamped to the full side.
pub fn split_wrapped(rect: &WorldRect, side: i64) -> Vec<BufferRect> {
    if rect.is_empty() {
        return Vec::new();
    }

    let (cols, col_count) = split_span(rect.min.x, rect.width(), side);
    let (rows, row_count) = split_span(rect.min.y, rect.height(), side);

    let mut out = Vec::with_capacity(col_count * row_count);
    for &(row, height) in &rows[..row_count] {
        for &(col, width) in &cols[..col_count] {
            out.push(BufferRect::new(col, row, width, height));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_rect_basics() {
        let rect = WorldRect::new(I64Vec2::new(-2, 3), I64Vec2::new(4, 2));
        assert_eq!(rect.max(), I64Vec2::new(2, 5));
        assert_eq!(rect.area(), 8);
        assert!(rect.contains(I64Vec2::new(-2, 3)));
        assert!(!rect.contains(I64Vec2::new(2, 3)));
        assert!(!rect.is_empty());
        assert!(WorldRect::new(I64Vec2::ZERO, I64Vec2::new(0, 5)).is_empty());
    }

    #[test]
    fn test_world_rect_iter_row_major() {
        let rect = WorldRect::from_min_max(I64Vec2::new(0, 0), I64Vec2::new(2, 2));
        let cells: Vec<I64Vec2> = rect.iter().collect();
        assert_eq!(
            cells,
            vec![I64Vec2::new(0, 0), I64Vec2::new(1, 0), I64Vec2::new(0, 1), I64Vec2::new(1, 1)]
        );
    }

    #[test]
    fn test_split_no_seam() {
        let rect = WorldRect::new(I64Vec2::new(2, 1), I64Vec2::new(3, 4));
        assert_eq!(split_wrapped(&rect, 8), vec![BufferRect::new(2, 1, 3, 4)]);
    }

    #[test]
    fn test_split_across_column_seam() {
        let rect = WorldRect::new(I64Vec2::new(6, 0), I64Vec2::new(4, 8));
        let parts = split_wrapped(&rect, 8);
        assert_eq!(parts, vec![BufferRect::new(6, 0, 2, 8), BufferRect::new(0, 0, 2, 8)]);
    }

    #[test]
    fn test_split_negative_origin_both_seams() {
        let rect = WorldRect::new(I64Vec2::new(-1, -2), I64Vec2::new(3, 3));
        let parts = split_wrapped(&rect, 8);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.iter().map(BufferRect::area).sum::<usize>(), 9);
        for cell in rect.iter() {
            let col = wrap(cell.x, 8) as u32;
            let row = wrap(cell.y, 8) as u32;
            assert_eq!(parts.iter().filter(|p| p.contains(col, row)).count(), 1);
        }
    }

    #[test]
    fn test_split_oversized_clamps_to_side() {
        let rect = WorldRect::new(I64Vec2::new(3, 3), I64Vec2::new(20, 8));
        let parts = split_wrapped(&rect, 8);
        assert_eq!(parts.iter().map(BufferRect::area).sum::<usize>(), 64);
    }

    #[test]
    fn test_split_far_from_origin() {
        let rect = WorldRect::new(I64Vec2::new(3_000_000_005, -3_000_000_000), I64Vec2::new(4, 8));
        assert_eq!(rect.max(), I64Vec2::new(3_000_000_009, -2_999_999_992));
        let parts = split_wrapped(&rect, 8);
        assert_eq!(parts, vec![BufferRect::new(5, 0, 3, 8), BufferRect::new(0, 0, 1, 8)]);
    }

    #[test]
    fn test_split_empty() {
        let rect = WorldRect::new(I64Vec2::new(3, 3), I64Vec2::new(0, 8));
        assert!(split_wrapped(&rect, 8).is_empty());
    }
}
