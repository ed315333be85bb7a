//! Glyph atlas and text quad generation.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::GlyphRasterConfig;

use crate::coords::Vec2;
use crate::scene::{HorizontalAnchor, TextCmd};
use crate::text::{FontId, FontSystem, PlacedGlyph};

use super::RenderCtx;

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── vertex ────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GlyphVertex {
    pos: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4], // premultiplied
}

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side glyph quads, indexed.
#[derive(Default)]
pub(super) struct GlyphMesh {
    pub vertices: Vec<GlyphVertex>,
    pub indices: Vec<u32>,
}

impl GlyphMesh {
    pub(super) fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }
}

// ── atlas ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// 2048 × 2048 R8Unorm coverage atlas with shelf packing.
///
/// Glyphs are rasterized on first use and cached for the atlas lifetime. The
/// cache key encodes font identity, glyph index and pixel size.
pub(super) struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,

    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,

    cache: HashMap<GlyphRasterConfig, CachedGlyph>,
}

impl GlyphAtlas {
    pub(super) fn new(ctx: &RenderCtx<'_>) -> Self {
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("penndraw glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("penndraw glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
            cache: HashMap::new(),
        }
    }

    pub(super) fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub(super) fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    fn glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        fonts: &FontSystem,
        font: FontId,
        key: GlyphRasterConfig,
    ) -> Option<CachedGlyph> {
        if let Some(cached) = self.cache.get(&key) {
            return Some(*cached);
        }

        let (metrics, bitmap) = fonts.rasterize(font, key)?;
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }

        let entry = self.place(ctx, &bitmap, metrics.width as u32, metrics.height as u32)?;
        self.cache.insert(key, entry);
        Some(entry)
    }

    fn place(&mut self, ctx: &RenderCtx<'_>, bitmap: &[u8], w: u32, h: u32) -> Option<CachedGlyph> {
        if self.full {
            return None;
        }

        // New shelf row when the glyph doesn't fit horizontally.
        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE {
            log::warn!("glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); some glyphs will not be drawn");
            self.full = true;
            return None;
        }

        let gx = self.cursor_x;
        let gy = self.cursor_y;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }
}

// ── quads ─────────────────────────────────────────────────────────────────

/// Device-space corners of one glyph, in the order top-left, top-right,
/// bottom-right, bottom-left (before rotation).
///
/// The line box is `block_w × block_h`, aligned horizontally by `h_anchor`,
/// centered vertically on `anchor`, then rotated around `anchor`.
pub(super) fn glyph_corners(
    anchor: Vec2,
    rotation_deg: f32,
    h_anchor: HorizontalAnchor,
    block_w: f32,
    block_h: f32,
    glyph: &PlacedGlyph,
) -> [Vec2; 4] {
    let x0 = glyph.x - block_w * h_anchor.offset_fraction();
    let x1 = x0 + glyph.width as f32;
    // Layout is +Y down from the top of the line box; device space is +Y up.
    let top = block_h * 0.5 - glyph.y;
    let bottom = top - glyph.height as f32;

    let rad = rotation_deg.to_radians();
    [
        Vec2::new(x0, top),
        Vec2::new(x1, top),
        Vec2::new(x1, bottom),
        Vec2::new(x0, bottom),
    ]
    .map(|p| anchor + p.rotated(rad))
}

/// Appends the glyph quads of `cmd`. Returns `false` if no font resolves.
pub(super) fn append_text(
    mesh: &mut GlyphMesh,
    atlas: &mut GlyphAtlas,
    ctx: &RenderCtx<'_>,
    fonts: &FontSystem,
    cmd: &TextCmd,
) -> bool {
    let Some(font) = fonts.resolve(&cmd.font_name) else {
        log::warn!("text {:?}: no font available for {:?}, skipping", cmd.text, cmd.font_name);
        return false;
    };

    let color = cmd.color.to_premul().to_array();
    let layout = fonts.layout_line(font, &cmd.text, cmd.font_size);

    for glyph in &layout.glyphs {
        let Some(cached) = atlas.glyph(ctx, fonts, font, glyph.key) else { continue };

        let corners = glyph_corners(cmd.anchor, cmd.rotation, cmd.h_anchor, layout.width, layout.height, glyph);
        let [u0, v0] = cached.uv_min;
        let [u1, v1] = cached.uv_max;
        let uvs = [[u0, v0], [u1, v0], [u1, v1], [u0, v1]];

        let base = mesh.vertices.len() as u32;
        for (p, uv) in corners.iter().zip(uvs) {
            mesh.vertices.push(GlyphVertex { pos: p.to_array(), uv, color });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(x: f32, y: f32, w: usize, h: usize) -> PlacedGlyph {
        PlacedGlyph {
            key: GlyphRasterConfig { glyph_index: 0, px: 10.0, font_hash: 0 },
            x,
            y,
            width: w,
            height: h,
        }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn left_anchor_starts_at_anchor_x() {
        let c = glyph_corners(Vec2::new(100.0, 50.0), 0.0, HorizontalAnchor::Left, 40.0, 20.0, &glyph(0.0, 0.0, 10, 20));
        assert!(close(c[0], Vec2::new(100.0, 60.0)));
        assert!(close(c[2], Vec2::new(110.0, 40.0)));
    }

    #[test]
    fn right_anchor_ends_block_at_anchor() {
        let c = glyph_corners(Vec2::new(100.0, 50.0), 0.0, HorizontalAnchor::Right, 40.0, 20.0, &glyph(30.0, 0.0, 10, 20));
        assert!(close(c[1], Vec2::new(100.0, 60.0)));
    }

    #[test]
    fn center_anchor_splits_block() {
        let c = glyph_corners(Vec2::zero(), 0.0, HorizontalAnchor::Center, 40.0, 20.0, &glyph(0.0, 0.0, 40, 20));
        assert!(close(c[0], Vec2::new(-20.0, 10.0)));
        assert!(close(c[2], Vec2::new(20.0, -10.0)));
    }

    #[test]
    fn quarter_turn_rotates_around_anchor() {
        let c = glyph_corners(Vec2::new(5.0, 5.0), 90.0, HorizontalAnchor::Left, 10.0, 0.0, &glyph(0.0, 0.0, 10, 0));
        // top-left stays at the anchor, top-right swings up.
        assert!(close(c[0], Vec2::new(5.0, 5.0)));
        assert!(close(c[1], Vec2::new(5.0, 15.0)));
    }
}
