use crate::coords::Vec2;
use crate::paint::Rgba8;
use crate::scene::{DrawCmd, DrawList, PrimitiveHandle};

/// Horizontal alignment of a text block relative to its anchor point.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum HorizontalAnchor {
    Left,
    #[default]
    Center,
    Right,
}

impl HorizontalAnchor {
    /// Fraction of the text width that lies left of the anchor.
    #[inline]
    pub fn offset_fraction(self) -> f32 {
        match self {
            HorizontalAnchor::Left => 0.0,
            HorizontalAnchor::Center => 0.5,
            HorizontalAnchor::Right => 1.0,
        }
    }
}

/// Text draw payload.
///
/// The block is vertically centered on `anchor`; rotation happens around it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub anchor: Vec2,
    pub text: String,
    /// Name the font was registered under in the font system.
    pub font_name: String,
    /// Font size in device pixels.
    pub font_size: f32,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f32,
    pub h_anchor: HorizontalAnchor,
    pub color: Rgba8,
}

impl DrawList {
    /// Records a text command.
    #[inline]
    pub fn push_text(&mut self, cmd: TextCmd) -> PrimitiveHandle {
        self.push(DrawCmd::Text(cmd))
    }
}
