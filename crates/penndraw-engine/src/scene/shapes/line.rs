use crate::coords::Vec2;
use crate::paint::Rgba8;
use crate::scene::{DrawCmd, DrawList, PrimitiveHandle};

/// Single stroked segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub p1: Vec2,
    pub p2: Vec2,
    /// Full width in device pixels.
    pub width: f32,
    pub color: Rgba8,
}

impl DrawList {
    /// Records a line segment.
    #[inline]
    pub fn push_line_segment(&mut self, p1: Vec2, p2: Vec2, width: f32, color: Rgba8) -> PrimitiveHandle {
        self.push(DrawCmd::LineSegment(LineCmd { p1, p2, width, color }))
    }
}
