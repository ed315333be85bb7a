//! GPU rendering subsystem.
//!
//! [`CanvasRenderer`] consumes a retained [`DrawList`](crate::scene::DrawList)
//! and issues wgpu commands. It owns its GPU resources (pipelines, buffers,
//! glyph atlas).
//!
//! Convention:
//! - CPU geometry is in device pixels (bottom-left origin, +Y up)
//! - vertex shaders convert to NDC using a viewport uniform

mod canvas;
mod common;
mod ctx;
mod text;

pub mod tessellate;

pub use canvas::CanvasRenderer;
pub use ctx::{RenderCtx, RenderTarget};
