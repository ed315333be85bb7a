use crate::color::ColorSpec;
use crate::pen::{DEFAULT_FONT_SIZE, DEFAULT_PEN_RADIUS};

/// Initial state of a [`DrawingContext`](crate::DrawingContext).
///
/// Applied through the regular setters, so an invalid field fails
/// [`DrawingContext::with_config`](crate::DrawingContext::with_config) with the
/// same error the setter would return.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConfig {
    pub canvas_width: i64,
    pub canvas_height: i64,
    /// Border fraction applied when `scale` is set.
    pub border: f64,
    /// Symmetric logical extent `[min, max]` for both axes.
    pub scale: (f64, f64),
    pub pen_color: ColorSpec,
    pub pen_radius: f64,
    /// `None` keeps the default font.
    pub font: Option<String>,
    pub font_size: f32,
    /// Window title used by `run`.
    pub title: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            canvas_width: 512,
            canvas_height: 512,
            border: 0.0,
            scale: (0.0, 1.0),
            pen_color: ColorSpec::Rgb(255, 255, 255),
            pen_radius: DEFAULT_PEN_RADIUS,
            font: None,
            font_size: DEFAULT_FONT_SIZE,
            title: "penndraw".to_string(),
        }
    }
}
