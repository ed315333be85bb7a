use crate::coords::Viewport;

/// Everything a renderer needs from the GPU for one frame of the canvas.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Device-pixel canvas that vertex positions are expressed in.
    pub canvas: Viewport,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        canvas: Viewport,
    ) -> Self {
        Self { device, queue, surface_format, canvas }
    }
}

/// Frame encoder plus the surface view the canvas pass loads and stores.
///
/// The view already holds the cleared background when a renderer sees it.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, view: &'a wgpu::TextureView) -> Self {
        Self { encoder, view }
    }
}
