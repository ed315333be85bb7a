//! Color model shared between the drawing API and renderers.
//!
//! - [`Rgba8`]: straight-alpha 8-bit color as callers specify it
//! - [`Color`]: premultiplied `f32` color as the GPU blends it

pub mod color;
mod rgba8;

pub use color::Color;
pub use rgba8::Rgba8;
