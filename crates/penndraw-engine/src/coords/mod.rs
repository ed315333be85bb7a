//! Device-space geometry types shared by the draw list and the renderers.
//!
//! Canonical device space:
//! - canvas pixels
//! - origin at the bottom-left corner
//! - +X right, +Y up
//!
//! Renderers convert to NDC in shaders using a viewport uniform; no axis flip
//! is needed because NDC is also +Y up.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
