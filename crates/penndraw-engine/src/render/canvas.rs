use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{create_triangle_pipeline, create_viewport_ubo, viewport_ubo_layout_entry, ViewportUniform};
use super::tessellate::{tessellate, Mesh, MeshVertex};
use super::text::{append_text, GlyphAtlas, GlyphMesh, GlyphVertex};

/// Contiguous run of same-kind primitives, drawn with one pipeline.
#[derive(Debug, Clone, PartialEq)]
enum Batch {
    Mesh(Range<u32>),
    Text(Range<u32>),
}

/// Draws a whole [`DrawList`] in paint order.
///
/// Shapes go through the CPU tessellator into one colored mesh; text goes
/// through the glyph atlas into one textured mesh. Consecutive primitives of
/// the same kind share a draw call, so ordering across kinds is preserved.
///
/// Tessellation is cached against [`DrawList::generation`].
#[derive(Default)]
pub struct CanvasRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    mesh_pipeline: Option<wgpu::RenderPipeline>,
    text_pipeline: Option<wgpu::RenderPipeline>,
    mesh_bgl: Option<wgpu::BindGroupLayout>,
    text_bgl: Option<wgpu::BindGroupLayout>,

    viewport_ubo: Option<wgpu::Buffer>,
    mesh_bind_group: Option<wgpu::BindGroup>,
    text_bind_group: Option<wgpu::BindGroup>,
    atlas: Option<GlyphAtlas>,

    // CPU geometry, rebuilt when the draw list changes
    built_generation: Option<u64>,
    mesh: Mesh,
    glyphs: GlyphMesh,
    batches: Vec<Batch>,

    // GPU geometry
    mesh_vbo: Option<wgpu::Buffer>,
    mesh_ibo: Option<wgpu::Buffer>,
    text_vbo: Option<wgpu::Buffer>,
    text_ibo: Option<wgpu::Buffer>,
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);

        if self.built_generation != Some(draw_list.generation()) {
            self.rebuild_geometry(ctx, draw_list, fonts);
            self.upload_geometry(ctx);
            self.built_generation = Some(draw_list.generation());
        }

        if self.batches.is_empty() {
            return;
        }

        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.canvas)));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("penndraw canvas pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            match batch {
                Batch::Mesh(range) => {
                    let (Some(pipeline), Some(bg), Some(vbo), Some(ibo)) = (
                        self.mesh_pipeline.as_ref(),
                        self.mesh_bind_group.as_ref(),
                        self.mesh_vbo.as_ref(),
                        self.mesh_ibo.as_ref(),
                    ) else {
                        continue;
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, bg, &[]);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(range.clone(), 0, 0..1);
                }
                Batch::Text(range) => {
                    let (Some(pipeline), Some(bg), Some(vbo), Some(ibo)) = (
                        self.text_pipeline.as_ref(),
                        self.text_bind_group.as_ref(),
                        self.text_vbo.as_ref(),
                        self.text_ibo.as_ref(),
                    ) else {
                        continue;
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, bg, &[]);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(range.clone(), 0, 0..1);
                }
            }
        }
    }

    // ── geometry ───────────────────────────────────────────────────────────

    fn rebuild_geometry(&mut self, ctx: &RenderCtx<'_>, draw_list: &mut DrawList, fonts: &FontSystem) {
        self.mesh.clear();
        self.glyphs.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Text(text) => {
                    let Some(atlas) = self.atlas.as_mut() else { continue };
                    let start = self.glyphs.indices.len() as u32;
                    append_text(&mut self.glyphs, atlas, ctx, fonts, text);
                    let end = self.glyphs.indices.len() as u32;
                    extend_batches(&mut self.batches, Batch::Text(start..end));
                }
                cmd => {
                    let start = self.mesh.indices.len() as u32;
                    tessellate(&mut self.mesh, cmd);
                    let end = self.mesh.indices.len() as u32;
                    extend_batches(&mut self.batches, Batch::Mesh(start..end));
                }
            }
        }

        log::debug!(
            "canvas: {} primitives -> {} triangles, {} glyph quads, {} batches",
            draw_list.len(),
            self.mesh.triangle_count(),
            self.glyphs.indices.len() / 6,
            self.batches.len()
        );
    }

    fn upload_geometry(&mut self, ctx: &RenderCtx<'_>) {
        self.mesh_vbo = upload(ctx, "penndraw mesh vbo", &self.mesh.vertices, wgpu::BufferUsages::VERTEX);
        self.mesh_ibo = upload(ctx, "penndraw mesh ibo", &self.mesh.indices, wgpu::BufferUsages::INDEX);
        self.text_vbo = upload(ctx, "penndraw text vbo", &self.glyphs.vertices, wgpu::BufferUsages::VERTEX);
        self.text_ibo = upload(ctx, "penndraw text ibo", &self.glyphs.indices, wgpu::BufferUsages::INDEX);
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.mesh_pipeline.is_some() {
            return;
        }

        let mesh_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("penndraw mesh bgl"),
            entries: &[viewport_ubo_layout_entry()],
        });

        let text_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("penndraw text bgl"),
            entries: &[
                viewport_ubo_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        self.mesh_pipeline = Some(create_triangle_pipeline(
            ctx,
            "penndraw mesh pipeline",
            include_str!("shaders/mesh.wgsl"),
            &mesh_bgl,
            MeshVertex::layout(),
        ));
        self.text_pipeline = Some(create_triangle_pipeline(
            ctx,
            "penndraw text pipeline",
            include_str!("shaders/text.wgsl"),
            &text_bgl,
            GlyphVertex::layout(),
        ));

        self.pipeline_format = Some(ctx.surface_format);
        self.mesh_bgl = Some(mesh_bgl);
        self.text_bgl = Some(text_bgl);
        self.mesh_bind_group = None;
        self.text_bind_group = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.mesh_bind_group.is_some() && self.text_bind_group.is_some() {
            return;
        }
        let (Some(mesh_bgl), Some(text_bgl)) = (self.mesh_bgl.as_ref(), self.text_bgl.as_ref()) else {
            return;
        };

        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx));
        let ubo = self
            .viewport_ubo
            .get_or_insert_with(|| create_viewport_ubo(ctx, "penndraw viewport ubo"));

        self.mesh_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("penndraw mesh bind group"),
            layout: mesh_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }));

        self.text_bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("penndraw text bind group"),
            layout: text_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(atlas.sampler()),
                },
            ],
        }));
    }
}

/// Merges `next` into the last batch when both are the same kind and adjacent.
fn extend_batches(batches: &mut Vec<Batch>, next: Batch) {
    let merged = match (batches.last_mut(), &next) {
        (_, Batch::Mesh(r) | Batch::Text(r)) if r.is_empty() => return,
        (Some(Batch::Mesh(last)), Batch::Mesh(r)) | (Some(Batch::Text(last)), Batch::Text(r))
            if last.end == r.start =>
        {
            last.end = r.end;
            true
        }
        _ => false,
    };
    if !merged {
        batches.push(next);
    }
}

fn upload<T: bytemuck::Pod>(
    ctx: &RenderCtx<'_>,
    label: &str,
    data: &[T],
    usage: wgpu::BufferUsages,
) -> Option<wgpu::Buffer> {
    if data.is_empty() {
        return None;
    }
    Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_same_kind_runs_merge() {
        let mut b = Vec::new();
        extend_batches(&mut b, Batch::Mesh(0..6));
        extend_batches(&mut b, Batch::Mesh(6..12));
        assert_eq!(b, vec![Batch::Mesh(0..12)]);
    }

    #[test]
    fn kind_switch_starts_new_batch() {
        let mut b = Vec::new();
        extend_batches(&mut b, Batch::Mesh(0..6));
        extend_batches(&mut b, Batch::Text(0..6));
        extend_batches(&mut b, Batch::Mesh(6..9));
        assert_eq!(b, vec![Batch::Mesh(0..6), Batch::Text(0..6), Batch::Mesh(6..9)]);
    }

    #[test]
    fn empty_runs_are_dropped() {
        let mut b = Vec::new();
        extend_batches(&mut b, Batch::Text(0..0));
        assert!(b.is_empty());
    }
}
