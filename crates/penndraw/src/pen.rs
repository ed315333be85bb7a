use penndraw_engine::paint::Rgba8;
use penndraw_engine::text::DEFAULT_FONT;

use crate::color::ColorSpec;
use crate::error::{DrawError, DrawResult};

pub const DEFAULT_PEN_RADIUS: f64 = 0.002;
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Font used for text primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct FontState {
    pub name: String,
    /// Size in device pixels.
    pub size: f32,
}

impl Default for FontState {
    fn default() -> Self {
        Self {
            name: DEFAULT_FONT.to_string(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Current drawing color, stroke radius and font.
#[derive(Debug, Clone, PartialEq)]
pub struct PenState {
    color: Rgba8,
    /// Fraction of the canvas width.
    radius: f64,
    font: FontState,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            color: Rgba8::WHITE,
            radius: DEFAULT_PEN_RADIUS,
            font: FontState::default(),
        }
    }
}

impl PenState {
    #[inline]
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn font(&self) -> &FontState {
        &self.font
    }

    pub fn set_color(&mut self, color: impl Into<ColorSpec>) -> DrawResult<()> {
        self.color = color.into().to_rgba8()?;
        Ok(())
    }

    pub(crate) fn set_rgba(&mut self, color: Rgba8) {
        self.color = color;
    }

    pub fn set_radius(&mut self, radius: f64) -> DrawResult<()> {
        if !radius.is_finite() {
            return Err(DrawError::InvalidPenRadius(format!("pen radius {radius} is not a finite number")));
        }
        if radius <= 0.0 {
            return Err(DrawError::InvalidPenRadius(format!("pen radius must be positive, got {radius}")));
        }
        self.radius = radius;
        Ok(())
    }

    /// Name validity is checked by the caller, which owns the font registry.
    pub(crate) fn set_font_name(&mut self, name: &str) {
        self.font.name = name.to_string();
    }

    pub fn set_font_size(&mut self, size: f32) -> DrawResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(DrawError::invalid_argument(format!(
                "font size must be a positive finite number, got {size}"
            )));
        }
        self.font.size = size;
        Ok(())
    }
}
