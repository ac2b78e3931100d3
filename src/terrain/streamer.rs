//! Incremental heightmap streaming around a moving observer
//!
//! The streamer owns a [`ToroidalBuffer`] covering a square window of world
//! space centered on the observer. When the observer moves far enough, only
//! the strips of world space that entered the window are re-sampled; the rest
//! of the buffer stays put because its wrap-index addressing is independent of
//! where the window currently sits. Cost per update is proportional to the
//! distance travelled, never to the buffer size.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::types::{DVec2, HeightSample, I64Vec2, Result};
use crate::math::rect::{split_wrapped, BufferRect, WorldRect};
use crate::math::wrap::{wrap_vec, WindowFrame};
use super::buffer::ToroidalBuffer;
use super::config::StreamingConfig;
use super::sampler::HeightSampler;

/// Floored observer positions are clamped to `±2^53`, beyond which `f64`
/// no longer holds every integer
pub const MAX_WORLD_COORD: f64 = 9_007_199_254_740_992.0;

/// Shared, live observer position
///
/// The driver keeps one handle and moves it; the streamer reads it on every
/// [`HeightmapStreamer::tick`].
#[derive(Clone, Debug, Default)]
pub struct ObserverHandle(Rc<Cell<DVec2>>);

impl ObserverHandle {
    pub fn new(position: DVec2) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    pub fn get(&self) -> DVec2 {
        self.0.get()
    }

    pub fn set(&self, position: DVec2) {
        self.0.set(position);
    }

    /// Move the observer by `delta`
    pub fn translate(&self, delta: DVec2) {
        self.0.set(self.0.get() + delta);
    }
}

/// What a single tick did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// World rectangles re-sampled
    pub rects_written: u32,
    /// Noise evaluations performed
    pub samples_written: usize,
    /// The whole buffer was re-sampled
    pub full_refill: bool,
}

impl TickOutcome {
    /// Check if any sample changed
    pub fn wrote(&self) -> bool {
        self.samples_written > 0
    }
}

/// Streams a noise-sampled heightmap window around an observer
#[derive(Debug)]
pub struct HeightmapStreamer {
    sampler: HeightSampler,
    buffer: ToroidalBuffer,
    observer: ObserverHandle,
    radius: i64,
    hysteresis: i64,
    /// World coordinate of the current window's minimum corner
    corner_coords: I64Vec2,
    /// Wrap index of the observer's floored position
    write_coords: I64Vec2,
    /// Floored observer position when the buffer was last written
    anchor: I64Vec2,
    recenter_offset: DVec2,
    dirty: Vec<BufferRect>,
    /// Summed area of `dirty`, overlaps counted twice
    dirty_area: usize,
    needs_upload: bool,
}

impl HeightmapStreamer {
    /// Create the streamer and fill the whole buffer around the observer.
    pub fn initialize(
        sampler: HeightSampler,
        config: &StreamingConfig,
        observer: ObserverHandle,
    ) -> Result<Self> {
        config.validate()?;
        let radius = i64::from(config.window_radius);
        let side = radius * 2;
        let hysteresis = i64::from(config.hysteresis);
        if hysteresis >= side {
            log::warn!(
                "hysteresis {} is not smaller than the window side {}; every update will re-fill the whole buffer",
                config.hysteresis,
                side
            );
        }

        let mut streamer = Self {
            sampler,
            buffer: ToroidalBuffer::new(side as usize),
            observer,
            radius,
            hysteresis,
            corner_coords: I64Vec2::ZERO,
            write_coords: I64Vec2::ZERO,
            anchor: I64Vec2::ZERO,
            recenter_offset: DVec2::ZERO,
            dirty: Vec::new(),
            dirty_area: 0,
            needs_upload: false,
        };

        let outcome = streamer.refill();
        log::info!(
            "HeightmapStreamer: filled {}x{} window at corner {:?} ({} samples)",
            side,
            side,
            streamer.corner_coords,
            outcome.samples_written
        );
        Ok(streamer)
    }

    /// Advance one update using the observer's current position.
    pub fn tick(&mut self) -> TickOutcome {
        let position = self.observer.get();
        let floor = self.track(position);
        let movement = floor - self.anchor;

        if movement.x.abs() <= self.hysteresis && movement.y.abs() <= self.hysteresis {
            log::trace!("tick: movement {:?} within hysteresis {}", movement, self.hysteresis);
            return TickOutcome::default();
        }

        let side = self.side();
        if movement.x.abs() >= side || movement.y.abs() >= side {
            log::warn!(
                "observer moved {:?} in one update, beyond the {} wide window; re-filling",
                movement,
                side
            );
            return self.fill_window(floor);
        }

        let old = self.streamed_window();
        let new = WindowFrame::centered(floor, self.radius);
        let mut outcome = TickOutcome::default();

        if movement.x != 0 {
            let (min_x, max_x) = if movement.x > 0 {
                (old.max().x, new.max().x)
            } else {
                (new.corner().x, old.corner().x)
            };
            let strip = WorldRect::from_min_max(
                I64Vec2::new(min_x, new.corner().y),
                I64Vec2::new(max_x, new.max().y),
            );
            outcome.samples_written += self.write_rect(&strip);
            outcome.rects_written += 1;
        }

        if movement.y != 0 {
            let (min_y, max_y) = if movement.y > 0 {
                (old.max().y, new.max().y)
            } else {
                (new.corner().y, old.corner().y)
            };
            let strip = WorldRect::from_min_max(
                I64Vec2::new(new.corner().x, min_y),
                I64Vec2::new(new.max().x, max_y),
            );
            outcome.samples_written += self.write_rect(&strip);
            outcome.rects_written += 1;
        }

        self.anchor = floor;
        outcome
    }

    /// Move the observer to `position`, then tick.
    pub fn tick_at(&mut self, position: DVec2) -> TickOutcome {
        self.observer.set(position);
        self.tick()
    }

    /// Re-sample the whole window around the observer's current position.
    pub fn refill(&mut self) -> TickOutcome {
        let floor = self.track(self.observer.get());
        self.fill_window(floor)
    }

    /// Update the published coordinates and return the floored position
    fn track(&mut self, position: DVec2) -> I64Vec2 {
        let floor = position
            .floor()
            .clamp(DVec2::splat(-MAX_WORLD_COORD), DVec2::splat(MAX_WORLD_COORD))
            .as_i64vec2();
        self.corner_coords = floor - I64Vec2::splat(self.radius);
        self.write_coords = wrap_vec(floor, self.side());
        self.recenter_offset = position;
        floor
    }

    fn fill_window(&mut self, center: I64Vec2) -> TickOutcome {
        let window = WindowFrame::centered(center, self.radius);
        let rect = WorldRect::new(window.corner(), I64Vec2::splat(window.side()));
        let samples_written = self.write_rect(&rect);
        self.anchor = center;
        TickOutcome {
            rects_written: 1,
            samples_written,
            full_refill: true,
        }
    }

    fn write_rect(&mut self, rect: &WorldRect) -> usize {
        let sampler = &self.sampler;
        let written = self.buffer.fill_rect(rect, |p| sampler.sample(p));
        log::debug!("wrote {}x{} rect at {:?} ({} samples)", rect.width(), rect.height(), rect.min, written);

        self.mark_dirty(rect);
        self.needs_upload = true;
        written
    }

    /// Record the buffer cells a world rect touched.
    ///
    /// Once the recorded area reaches the buffer's, the list collapses to a
    /// single full-buffer rect, so it never holds more than about `4 × side`
    /// entries however long it goes untaken.
    fn mark_dirty(&mut self, rect: &WorldRect) {
        let side = self.side();
        let full = BufferRect::full(side as u32);
        if self.dirty_area >= full.area() {
            return;
        }

        let parts = split_wrapped(rect, side);
        self.dirty_area += parts.iter().map(BufferRect::area).sum::<usize>();
        if self.dirty_area >= full.area() {
            self.dirty.clear();
            self.dirty.push(full);
            self.dirty_area = full.area();
        } else {
            self.dirty.extend(parts);
        }
    }

    /// Window whose samples the buffer currently holds
    pub fn streamed_window(&self) -> WindowFrame {
        WindowFrame::centered(self.anchor, self.radius)
    }

    /// World coordinate of the current window's minimum corner
    pub fn corner_coords(&self) -> I64Vec2 {
        self.corner_coords
    }

    /// Wrap index of the observer inside the buffer
    pub fn write_coords(&self) -> I64Vec2 {
        self.write_coords
    }

    /// Observer position published for drawing tiles relative to the observer
    pub fn recenter_offset(&self) -> DVec2 {
        self.recenter_offset
    }

    pub fn window_radius(&self) -> i64 {
        self.radius
    }

    /// Buffer side length
    pub fn side(&self) -> i64 {
        self.radius * 2
    }

    pub fn hysteresis(&self) -> i64 {
        self.hysteresis
    }

    pub fn buffer(&self) -> &ToroidalBuffer {
        &self.buffer
    }

    pub fn sampler(&self) -> &HeightSampler {
        &self.sampler
    }

    pub fn observer(&self) -> &ObserverHandle {
        &self.observer
    }

    /// Check if the buffer changed since the last [`take_dirty`](Self::take_dirty)
    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Seam-free regions changed since the last [`take_dirty`](Self::take_dirty)
    pub fn dirty_regions(&self) -> &[BufferRect] {
        &self.dirty
    }

    /// Hand the changed regions to the uploader and clear the upload flag
    pub fn take_dirty(&mut self) -> Vec<BufferRect> {
        self.needs_upload = false;
        self.dirty_area = 0;
        std::mem::take(&mut self.dirty)
    }

    /// World coordinate held by buffer cell `(row, col)`
    pub fn world_coord_of(&self, row: usize, col: usize) -> I64Vec2 {
        self.streamed_window().wrap_to_world(I64Vec2::new(col as i64, row as i64))
    }

    /// Stored sample for a world coordinate, if it lies in the streamed window
    pub fn height_at_world(&self, world: I64Vec2) -> Option<HeightSample> {
        let window = self.streamed_window();
        window
            .contains(world)
            .then(|| self.buffer.get_wrapped(window.world_to_wrap(world)))
    }
}
