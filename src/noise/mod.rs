//! Composable fractal noise
//!
//! Trees of [`NoiseNode`]s are validated and compiled into a [`NoiseField`],
//! which evaluates a scalar height at any world coordinate.

pub mod node;
pub mod source;
pub mod field;
pub mod preset;

pub use node::{CombineOp, NoiseKind, NoiseNode};
pub use source::{BaseNoise, ConstantNoise, NoiseRange, source_for};
pub use field::{NoiseField, rescale};
