use crate::coords::Vec2;
use crate::paint::Rgba8;
use crate::scene::{DrawCmd, DrawList, PrimitiveHandle};

/// Filled polygon payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FillCmd {
    pub vertices: Vec<Vec2>,
    pub color: Rgba8,
}

impl FillCmd {
    #[inline]
    pub fn new(vertices: Vec<Vec2>, color: Rgba8) -> Self {
        Self { vertices, color }
    }
}

impl DrawList {
    /// Records a filled polygon.
    #[inline]
    pub fn push_filled_polygon(&mut self, vertices: Vec<Vec2>, color: Rgba8) -> PrimitiveHandle {
        self.push(DrawCmd::FilledPolygon(FillCmd::new(vertices, color)))
    }
}
