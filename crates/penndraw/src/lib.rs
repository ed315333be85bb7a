//! penndraw: a small 2D drawing API for teaching.
//!
//! Shapes are described in a logical coordinate system of the caller's
//! choosing and mapped onto a fixed-size pixel canvas.
//!
//! ```rust,ignore
//! use penndraw::DrawingContext;
//!
//! let mut pd = DrawingContext::new();
//! pd.set_canvas_size(500, 500)?;
//! pd.clear_with((0, 0, 0))?;
//! pd.set_pen_color((255, 200, 0))?;
//! pd.filled_circle(0.5, 0.5, 0.25)?;
//! pd.run()?;
//! ```

mod app;
mod color;
mod config;
mod context;
mod error;
mod pen;
mod registry;
mod shape;
mod space;

pub mod geometry;

pub use color::ColorSpec;
pub use config::DrawingConfig;
pub use context::DrawingContext;
pub use error::{DrawError, DrawResult};
pub use pen::{FontState, PenState, DEFAULT_FONT_SIZE, DEFAULT_PEN_RADIUS};
pub use registry::SceneRegistry;
pub use shape::ShapeRequest;
pub use space::{CanvasSize, CoordinateSpace, LogicalExtent, ScaleFactors};

pub use penndraw_engine::paint::Rgba8;
pub use penndraw_engine::scene::{HorizontalAnchor, PrimitiveHandle, Renderer};
