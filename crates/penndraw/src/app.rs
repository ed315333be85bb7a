use anyhow::Result;

use penndraw_engine::core::{App as EngineApp, AppControl, FrameCtx};
use penndraw_engine::device::GpuInit;
use penndraw_engine::paint::Color;
use penndraw_engine::render::CanvasRenderer;
use penndraw_engine::scene::DrawList;
use penndraw_engine::text::FontSystem;
use penndraw_engine::window::{Runtime, RuntimeConfig};

use crate::context::DrawingContext;

impl DrawingContext<DrawList> {
    /// Opens a window showing the drawing and blocks until it is closed.
    ///
    /// The window's inner size is the canvas size in physical pixels.
    pub fn run(self) -> Result<()> {
        let canvas = self.space.canvas();
        let config = RuntimeConfig {
            title: self.title,
            canvas_width: canvas.width,
            canvas_height: canvas.height,
        };

        let mut fonts = self.fonts;
        fonts.load_system_default();

        log::debug!(
            "showing {} primitives on a {}x{} canvas",
            self.registry.len(),
            canvas.width,
            canvas.height
        );

        let app = CanvasApp {
            draw_list: self.renderer,
            fonts,
            canvas_renderer: CanvasRenderer::new(),
        };
        Runtime::run(config, GpuInit::default(), app)
    }
}

// ── CanvasApp ─────────────────────────────────────────────────────────────

/// Engine-side state for a finished drawing. The draw list never changes
/// once the window is open.
struct CanvasApp {
    draw_list: DrawList,
    fonts: FontSystem,
    canvas_renderer: CanvasRenderer,
}

impl EngineApp for CanvasApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let dl = &mut self.draw_list;
        let fs = &self.fonts;
        let canvas = &mut self.canvas_renderer;

        ctx.render(Color::black(), |rctx, target| {
            canvas.render(rctx, target, dl, fs);
        })
    }
}
