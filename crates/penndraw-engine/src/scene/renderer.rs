use crate::coords::Vec2;
use crate::paint::Rgba8;

use super::{PrimitiveHandle, TextCmd};

/// Submission contract between shape geometry and whatever displays it.
///
/// All positions and lengths are device pixels. Every submit returns a handle
/// that stays valid until it is passed back to [`release`](Renderer::release).
pub trait Renderer {
    /// Filled simple polygon; triangulation is the renderer's job.
    fn submit_filled_polygon(&mut self, vertices: Vec<Vec2>, color: Rgba8) -> PrimitiveHandle;

    /// Stroked polyline of full width `thickness`. When `closed`, the last
    /// vertex connects back to the first.
    fn submit_stroked_loop(
        &mut self,
        vertices: Vec<Vec2>,
        thickness: f32,
        color: Rgba8,
        closed: bool,
    ) -> PrimitiveHandle;

    fn submit_line_segment(&mut self, p1: Vec2, p2: Vec2, width: f32, color: Rgba8) -> PrimitiveHandle;

    fn submit_text(&mut self, text: TextCmd) -> PrimitiveHandle;

    /// Frees the primitive behind `handle`.
    fn release(&mut self, handle: PrimitiveHandle);
}
