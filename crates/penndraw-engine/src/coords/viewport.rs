use super::Vec2;

/// Pixel size of the canvas that device coordinates live on.
///
/// Device space spans `[0, width] x [0, height]` with the origin at the
/// bottom-left corner. The window surface always shows exactly this area.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Canvas of `width x height` physical pixels.
    #[inline]
    pub fn from_canvas(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// Device position to normalized device coordinates. The mesh and text
    /// shaders apply the same mapping; +Y stays up, so nothing is flipped.
    #[inline]
    pub fn to_ndc(self, p: Vec2) -> [f32; 2] {
        [p.x / self.width * 2.0 - 1.0, p.y / self.height * 2.0 - 1.0]
    }
}
