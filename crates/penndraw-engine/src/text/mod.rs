//! Font loading and single-line text layout.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem, PlacedGlyph, TextLayout, DEFAULT_FONT};
