//! Grid arithmetic shared by the streamer and the layout

pub mod wrap;
pub mod rect;

pub use wrap::{wrap, wrap_vec, WindowFrame};
pub use rect::{split_wrapped, BufferRect, WorldRect};
