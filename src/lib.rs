//! Lodscape - streaming procedural heightmaps with concentric LOD tile layouts

pub mod core;
pub mod math;
pub mod noise;
pub mod terrain;
pub mod layout;
