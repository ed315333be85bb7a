use crate::scene::shapes::fill::FillCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::stroke::StrokeCmd;
use crate::scene::shapes::text::TextCmd;

/// Renderer-agnostic primitive stored in a [`DrawList`](super::DrawList).
///
/// Extending the scene:
/// - add a payload module under `scene::shapes::*`
/// - add a new variant here
/// - implement the push helper inside that payload module
/// - teach `render::tessellate` (or the text path) to draw it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FilledPolygon(FillCmd),
    StrokedLoop(StrokeCmd),
    LineSegment(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    /// Short name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCmd::FilledPolygon(_) => "filled polygon",
            DrawCmd::StrokedLoop(_) => "stroked loop",
            DrawCmd::LineSegment(_) => "line segment",
            DrawCmd::Text(_) => "text",
        }
    }
}
