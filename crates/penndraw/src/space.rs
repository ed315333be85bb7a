//! Logical-to-device coordinate mapping.
//!
//! Device space has its origin at the bottom-left pixel corner with +X right
//! and +Y up. Logical space is whatever extent the caller picks.

use crate::error::{DrawError, DrawResult};

/// Canvas dimensions in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: 512, height: 512 }
    }
}

/// Logical bounds of the canvas. `x_max > x_min` and `y_max > y_min` always hold.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LogicalExtent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for LogicalExtent {
    fn default() -> Self {
        Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 }
    }
}

impl LogicalExtent {
    #[inline]
    pub fn x_range(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Midpoint of the extent.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        ((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }
}

/// Device pixels per logical unit along each axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleFactors {
    pub x_scale: f64,
    pub y_scale: f64,
}

impl ScaleFactors {
    fn derive(canvas: CanvasSize, extent: &LogicalExtent) -> Self {
        Self {
            x_scale: canvas.width as f64 / extent.x_range(),
            y_scale: canvas.height as f64 / extent.y_range(),
        }
    }
}

/// Canvas size, logical extent and the scale factors derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpace {
    canvas: CanvasSize,
    extent: LogicalExtent,
    scale: ScaleFactors,
    border: f64,
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        let canvas = CanvasSize::default();
        let extent = LogicalExtent::default();
        Self {
            canvas,
            extent,
            scale: ScaleFactors::derive(canvas, &extent),
            border: 0.0,
        }
    }
}

impl CoordinateSpace {
    pub fn new() -> Self {
        Self::default()
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn extent(&self) -> LogicalExtent {
        self.extent
    }

    #[inline]
    pub fn scale(&self) -> ScaleFactors {
        self.scale
    }

    #[inline]
    pub fn border(&self) -> f64 {
        self.border
    }

    // ── mutation ──────────────────────────────────────────────────────────

    /// Resizes the canvas, keeping the current extent.
    ///
    /// Signed so that negative requests are reported instead of wrapping.
    pub fn set_canvas_size(&mut self, width: i64, height: i64) -> DrawResult<()> {
        if width < 1 || height < 1 {
            return Err(DrawError::invalid_size(format!(
                "canvas dimensions must be at least 1x1, got {width}x{height}"
            )));
        }
        let canvas = CanvasSize {
            width: u32::try_from(width)
                .map_err(|_| DrawError::invalid_size(format!("canvas width {width} is too large")))?,
            height: u32::try_from(height)
                .map_err(|_| DrawError::invalid_size(format!("canvas height {height} is too large")))?,
        };
        let scale = ScaleFactors::derive(canvas, &self.extent);

        (self.canvas, self.scale) = (canvas, scale);
        log::debug!("canvas resized to {}x{}, scale {:?}", canvas.width, canvas.height, scale);
        Ok(())
    }

    /// Sets the same `[min, max]` extent on both axes, inflated by the border
    /// fraction.
    pub fn set_scale(&mut self, min: f64, max: f64) -> DrawResult<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DrawError::invalid_argument(format!(
                "scale bounds must be finite, got [{min}, {max}]"
            )));
        }
        if max <= min {
            return Err(DrawError::invalid_argument(format!(
                "scale max must exceed min, got [{min}, {max}]"
            )));
        }

        let pad = self.border * (max - min);
        let (lo, hi) = (min - pad, max + pad);
        let extent = LogicalExtent { x_min: lo, x_max: hi, y_min: lo, y_max: hi };
        let scale = ScaleFactors::derive(self.canvas, &extent);

        (self.extent, self.scale) = (extent, scale);
        log::debug!("extent set to [{lo}, {hi}], scale {:?}", scale);
        Ok(())
    }

    /// Sets the fraction that later [`set_scale`](Self::set_scale) calls pad
    /// each side of the extent with.
    pub fn set_border(&mut self, fraction: f64) -> DrawResult<()> {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(DrawError::invalid_argument(format!(
                "border must be a non-negative finite fraction, got {fraction}"
            )));
        }
        self.border = fraction;
        Ok(())
    }

    // ── scaling ───────────────────────────────────────────────────────────

    /// Logical point to device pixels.
    #[inline]
    pub fn scale_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.extent.x_min) * self.scale.x_scale,
            (y - self.extent.y_min) * self.scale.y_scale,
        )
    }

    /// Logical lengths to device pixels, per axis.
    #[inline]
    pub fn scale_length(&self, w: f64, h: f64) -> (f64, f64) {
        (
            w * self.canvas.width as f64 / self.extent.x_range().abs(),
            h * self.canvas.height as f64 / self.extent.y_range().abs(),
        )
    }

    /// Pen radius is a fraction of the canvas width, whatever the aspect ratio.
    #[inline]
    pub fn scale_pen_radius(&self, radius: f64) -> f64 {
        radius * self.canvas.width as f64
    }
}
