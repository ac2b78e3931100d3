//! Core type aliases and re-exports

pub use glam::{DVec2, I64Vec2, IVec2, UVec2, Vec2};

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// A single quantized height value as stored in the streaming buffer
pub type HeightSample = u8;
