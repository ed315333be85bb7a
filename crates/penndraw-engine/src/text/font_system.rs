use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

/// Name that always resolves: the first system font found at run time, or the
/// first font a caller registered.
pub const DEFAULT_FONT: &str = "sans-serif";

/// Locations probed for a fallback face when nothing was registered under
/// [`DEFAULT_FONT`].
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// One glyph of a laid-out line, in text-local pixels (+Y down, origin at the
/// top-left of the line box).
#[derive(Debug, Copy, Clone)]
pub struct PlacedGlyph {
    pub key: GlyphRasterConfig,
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
}

/// Result of [`FontSystem::layout_line`].
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Advance width of the whole line.
    pub width: f32,
    /// Line height (ascent to descent).
    pub height: f32,
}

/// Owns the fonts a drawing may reference, keyed by name.
///
/// Fonts are immutable after loading.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    names: HashMap<String, FontId>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType or OpenType font and registers it under `name`.
    ///
    /// Registering an existing name replaces the mapping.
    pub fn load_font(&mut self, name: &str, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        self.names.insert(name.to_string(), id);
        log::debug!("font system: registered {name:?} as {id:?}");
        Ok(id)
    }

    /// Registers the first readable system face under [`DEFAULT_FONT`], unless
    /// that name is already taken. Returns whether the default name resolves.
    pub fn load_system_default(&mut self) -> bool {
        if self.names.contains_key(DEFAULT_FONT) {
            return true;
        }
        for path in SYSTEM_FONT_PATHS {
            let Ok(bytes) = std::fs::read(path) else { continue };
            match self.load_font(DEFAULT_FONT, &bytes) {
                Ok(_) => {
                    log::info!("font system: default font from {path}");
                    return true;
                }
                Err(e) => log::warn!("font system: skipping {path}: {e}"),
            }
        }
        log::warn!("font system: no system font found; text without a registered font is skipped");
        false
    }

    /// Whether `name` was registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Resolves `name`, falling back to the default and then the first font.
    pub fn resolve(&self, name: &str) -> Option<FontId> {
        self.names
            .get(name)
            .or_else(|| self.names.get(DEFAULT_FONT))
            .copied()
            .or_else(|| (!self.fonts.is_empty()).then_some(FontId(0)))
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Rasterizes one glyph to an 8-bit coverage bitmap.
    pub(crate) fn rasterize(&self, id: FontId, key: GlyphRasterConfig) -> Option<(fontdue::Metrics, Vec<u8>)> {
        self.get(id).map(|font| font.rasterize_config(key))
    }

    /// Lays out `text` as a single unwrapped line at `size` pixels.
    pub fn layout_line(&self, id: FontId, text: &str, size: f32) -> TextLayout {
        let Some(font) = self.get(id) else {
            return TextLayout::default();
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let height = layout.height();
        let mut width = 0.0f32;
        let mut glyphs = Vec::with_capacity(layout.glyphs().len());

        for g in layout.glyphs() {
            // Pen position after the glyph, not the bitmap edge, so trailing
            // spaces count towards alignment.
            let m = font.metrics_indexed(g.key.glyph_index, size);
            width = width.max(g.x - m.xmin as f32 + m.advance_width);

            if g.char_data.rasterize() && g.width > 0 && g.height > 0 {
                glyphs.push(PlacedGlyph {
                    key: g.key,
                    x: g.x,
                    y: g.y,
                    width: g.width,
                    height: g.height,
                });
            }
        }

        TextLayout { glyphs, width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fs = FontSystem::new();
        assert!(fs.load_font("bogus", b"not a font").is_err());
        assert!(!fs.contains("bogus"));
    }

    #[test]
    fn empty_system_resolves_nothing() {
        let fs = FontSystem::new();
        assert_eq!(fs.resolve(DEFAULT_FONT), None);
        assert!(fs.layout_line(FontId(0), "hi", 12.0).glyphs.is_empty());
    }

    #[test]
    fn system_font_lays_out_left_to_right() {
        let mut fs = FontSystem::new();
        // Headless CI images often ship no fonts at all.
        if !fs.load_system_default() {
            return;
        }
        let id = fs.resolve("anything").unwrap();
        let layout = fs.layout_line(id, "AB", 20.0);
        assert_eq!(layout.glyphs.len(), 2);
        assert!(layout.glyphs[0].x < layout.glyphs[1].x);
        assert!(layout.width > 0.0 && layout.height > 0.0);
    }
}
