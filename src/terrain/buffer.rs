//! Square height buffer with wrap-around addressing on both axes

use crate::core::types::{HeightSample, I64Vec2};
use crate::math::rect::{BufferRect, WorldRect};
use crate::math::wrap::{wrap, WindowFrame};

/// Two-dimensional ring buffer of height samples
///
/// Storage is row-major with rows along world `y` and columns along world
/// `x`, so the slice can be uploaded directly as a single-channel texture with
/// repeat addressing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToroidalBuffer {
    side: usize,
    data: Vec<HeightSample>,
}

impl ToroidalBuffer {
    /// Create a zeroed buffer of `side × side` samples
    pub fn new(side: usize) -> Self {
        assert!(side > 0 && side <= i32::MAX as usize, "invalid buffer side {}", side);
        Self {
            side,
            data: vec![0; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major samples
    pub fn as_slice(&self) -> &[HeightSample] {
        &self.data
    }

    #[inline]
    fn offset(&self, col: usize, row: usize) -> usize {
        row * self.side + col
    }

    /// Sample at an in-range cell
    pub fn get(&self, row: usize, col: usize) -> HeightSample {
        self.data[self.offset(col, row)]
    }

    /// Sample at any integer index, wrapped into the buffer
    pub fn get_wrapped(&self, index: I64Vec2) -> HeightSample {
        let n = self.side as i64;
        self.data[self.offset(wrap(index.x, n) as usize, wrap(index.y, n) as usize)]
    }

    /// Store a sample at any integer index, wrapped into the buffer
    pub fn set_wrapped(&mut self, index: I64Vec2, value: HeightSample) {
        let n = self.side as i64;
        let offset = self.offset(wrap(index.x, n) as usize, wrap(index.y, n) as usize);
        self.data[offset] = value;
    }

    /// Write `sample(p)` for every world coordinate `p` in `rect`.
    ///
    /// Addresses wrap, so a rectangle crossing the buffer edge continues from
    /// index 0. Returns the number of samples written.
    pub fn fill_rect<F>(&mut self, rect: &WorldRect, mut sample: F) -> usize
    where
        F: FnMut(I64Vec2) -> HeightSample,
    {
        let n = self.side as i64;
        let mut written = 0;
        for y in rect.min.y..rect.max().y {
            let row = wrap(y, n) as usize;
            for x in rect.min.x..rect.max().x {
                let col = wrap(x, n) as usize;
                let offset = self.offset(col, row);
                self.data[offset] = sample(I64Vec2::new(x, y));
                written += 1;
            }
        }
        written
    }

    /// Copy out a seam-free region as a tightly packed row-major image
    pub fn region(&self, rect: &BufferRect) -> Vec<HeightSample> {
        let mut out = Vec::with_capacity(rect.area());
        for row in rect.row as usize..(rect.row + rect.height) as usize {
            let start = self.offset(rect.col as usize, row);
            out.extend_from_slice(&self.data[start..start + rect.width as usize]);
        }
        out
    }

    /// Copy out a world window in world order, corner first.
    ///
    /// The window side must equal the buffer side.
    pub fn unwrap_window(&self, frame: &WindowFrame) -> Vec<HeightSample> {
        debug_assert_eq!(frame.side() as usize, self.side);
        let mut out = Vec::with_capacity(self.data.len());
        let corner = frame.corner();
        for dy in 0..frame.side() {
            for dx in 0..frame.side() {
                out.push(self.get_wrapped(corner + I64Vec2::new(dx, dy)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buffer = ToroidalBuffer::new(8);
        assert_eq!(buffer.side(), 8);
        assert_eq!(buffer.len(), 64);
        assert!(buffer.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_wrapped_access() {
        let mut buffer = ToroidalBuffer::new(4);
        buffer.set_wrapped(I64Vec2::new(-1, 5), 9);
        assert_eq!(buffer.get(1, 3), 9);
        assert_eq!(buffer.get_wrapped(I64Vec2::new(3, 1)), 9);
        assert_eq!(buffer.get_wrapped(I64Vec2::new(7, -3)), 9);
    }

    #[test]
    fn test_fill_rect_wraps() {
        let mut buffer = ToroidalBuffer::new(4);
        let rect = WorldRect::new(I64Vec2::new(3, 0), I64Vec2::new(2, 1));
        let written = buffer.fill_rect(&rect, |p| (p.x * 10) as u8);
        assert_eq!(written, 2);
        assert_eq!(buffer.get(0, 3), 30);
        assert_eq!(buffer.get(0, 0), 40);
        assert_eq!(buffer.get(0, 1), 0);
    }

    #[test]
    fn test_fill_rect_beyond_i32() {
        let mut buffer = ToroidalBuffer::new(4);
        let rect = WorldRect::new(I64Vec2::new(-3_000_000_002, 3_000_000_000), I64Vec2::new(4, 1));
        let written = buffer.fill_rect(&rect, |p| (p.x + 3_000_000_010) as u8);
        assert_eq!(written, 4);
        // -3_000_000_002 wraps to column 2
        assert_eq!(buffer.get(0, 2), 8);
        assert_eq!(buffer.get(0, 1), 11);
        assert_eq!(buffer.get_wrapped(I64Vec2::new(-3_000_000_001, 3_000_000_000)), 9);
    }

    #[test]
    fn test_region_copy() {
        let mut buffer = ToroidalBuffer::new(4);
        let all = WorldRect::new(I64Vec2::ZERO, I64Vec2::splat(4));
        buffer.fill_rect(&all, |p| (p.y * 4 + p.x) as u8);
        let region = buffer.region(&BufferRect::new(1, 2, 2, 2));
        assert_eq!(region, vec![9, 10, 13, 14]);
    }

    #[test]
    fn test_unwrap_window() {
        let mut buffer = ToroidalBuffer::new(4);
        let frame = WindowFrame::new(I64Vec2::new(-2, 1), 4);
        let window = WorldRect::new(frame.corner(), I64Vec2::splat(4));
        buffer.fill_rect(&window, |p| ((p.y - 1) * 4 + (p.x + 2)) as u8);
        let image = buffer.unwrap_window(&frame);
        assert_eq!(image, (0..16).collect::<Vec<u8>>());
    }
}
