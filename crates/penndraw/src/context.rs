use penndraw_engine::coords::Vec2;
use penndraw_engine::paint::Rgba8;
use penndraw_engine::scene::{DrawList, HorizontalAnchor, Renderer, TextCmd};
use penndraw_engine::text::{FontSystem, DEFAULT_FONT};

use crate::color::ColorSpec;
use crate::config::DrawingConfig;
use crate::error::{DrawError, DrawResult};
use crate::geometry::{check_min_size, ellipse_ring, polygon_points, rectangle_outline, rectangle_ring};
use crate::pen::{FontState, PenState};
use crate::registry::SceneRegistry;
use crate::shape::ShapeRequest;
use crate::space::{CanvasSize, CoordinateSpace, LogicalExtent, ScaleFactors};

/// One drawing: coordinate space, pen, the primitives drawn so far and the
/// renderer they were submitted to.
///
/// All mutators take `&mut self`. Each call either succeeds completely or
/// returns an error without changing anything.
pub struct DrawingContext<R: Renderer = DrawList> {
    pub(crate) space: CoordinateSpace,
    pub(crate) pen: PenState,
    pub(crate) registry: SceneRegistry,
    pub(crate) renderer: R,
    pub(crate) fonts: FontSystem,
    pub(crate) title: String,
}

impl DrawingContext<DrawList> {
    /// A 512x512 canvas over `[0, 1] x [0, 1]` with a white pen.
    pub fn new() -> Self {
        Self::with_renderer(DrawList::new())
    }
}

impl Default for DrawingContext<DrawList> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer + Default> DrawingContext<R> {
    /// Builds a context and applies `config` through the regular setters.
    pub fn with_config(config: DrawingConfig) -> DrawResult<Self> {
        let mut ctx = Self::with_renderer(R::default());
        ctx.set_canvas_size(config.canvas_width, config.canvas_height)?;
        ctx.set_border(config.border)?;
        ctx.set_scale(config.scale.0, config.scale.1)?;
        ctx.set_pen_color(config.pen_color)?;
        ctx.set_pen_radius(config.pen_radius)?;
        if let Some(font) = &config.font {
            ctx.set_font(font)?;
        }
        ctx.set_font_size(config.font_size)?;
        ctx.title = config.title;
        Ok(ctx)
    }
}

impl<R: Renderer> DrawingContext<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            space: CoordinateSpace::new(),
            pen: PenState::default(),
            registry: SceneRegistry::new(),
            renderer,
            fonts: FontSystem::new(),
            title: "penndraw".to_string(),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.space.canvas()
    }

    pub fn extent(&self) -> LogicalExtent {
        self.space.extent()
    }

    pub fn scale(&self) -> ScaleFactors {
        self.space.scale()
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn pen_color(&self) -> Rgba8 {
        self.pen.color()
    }

    pub fn pen_radius(&self) -> f64 {
        self.pen.radius()
    }

    pub fn font(&self) -> &str {
        &self.pen.font().name
    }

    pub fn font_size(&self) -> f32 {
        self.pen.font().size
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // ── coordinate space ──────────────────────────────────────────────────

    pub fn set_canvas_size(&mut self, width: i64, height: i64) -> DrawResult<()> {
        self.space.set_canvas_size(width, height)
    }

    pub fn set_scale(&mut self, min: f64, max: f64) -> DrawResult<()> {
        self.space.set_scale(min, max)
    }

    pub fn set_border(&mut self, fraction: f64) -> DrawResult<()> {
        self.space.set_border(fraction)
    }

    // ── pen ───────────────────────────────────────────────────────────────

    pub fn set_pen_color(&mut self, color: impl Into<ColorSpec>) -> DrawResult<()> {
        self.pen.set_color(color)
    }

    pub fn set_pen_radius(&mut self, radius: f64) -> DrawResult<()> {
        self.pen.set_radius(radius)
    }

    /// Selects the default font or one registered with [`load_font`](Self::load_font).
    pub fn set_font(&mut self, name: &str) -> DrawResult<()> {
        if name != DEFAULT_FONT && !self.fonts.contains(name) {
            return Err(DrawError::InvalidFont(format!("unknown font {name:?}")));
        }
        self.pen.set_font_name(name);
        Ok(())
    }

    /// Registers TrueType/OpenType data under `name` for later [`set_font`](Self::set_font).
    pub fn load_font(&mut self, name: &str, bytes: &[u8]) -> DrawResult<()> {
        self.fonts
            .load_font(name, bytes)
            .map(|_| ())
            .map_err(|e| DrawError::InvalidFont(format!("cannot load font {name:?}: {e}")))
    }

    pub fn set_font_size(&mut self, size: f32) -> DrawResult<()> {
        self.pen.set_font_size(size)
    }

    /// Font enumeration is not available.
    pub fn list_fonts(&self) -> DrawResult<Vec<String>> {
        Err(DrawError::Unsupported("listing fonts is not implemented".into()))
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn circle(&mut self, x: f64, y: f64, radius: f64) -> DrawResult<()> {
        self.draw_ellipse("circle", x, y, radius, radius, false)
    }

    pub fn filled_circle(&mut self, x: f64, y: f64, radius: f64) -> DrawResult<()> {
        self.draw_ellipse("circle", x, y, radius, radius, true)
    }

    /// Ellipse centered on `(x, y)` with logical semi-axes `a` (horizontal)
    /// and `b` (vertical).
    pub fn ellipse(&mut self, x: f64, y: f64, a: f64, b: f64) -> DrawResult<()> {
        self.draw_ellipse("ellipse", x, y, a, b, false)
    }

    pub fn filled_ellipse(&mut self, x: f64, y: f64, a: f64, b: f64) -> DrawResult<()> {
        self.draw_ellipse("ellipse", x, y, a, b, true)
    }

    /// Rectangle centered on `(x, y)` with logical half extents.
    pub fn rectangle(&mut self, x: f64, y: f64, half_width: f64, half_height: f64) -> DrawResult<()> {
        self.draw_rectangle("rectangle", x, y, half_width, half_height, false)
    }

    pub fn filled_rectangle(&mut self, x: f64, y: f64, half_width: f64, half_height: f64) -> DrawResult<()> {
        self.draw_rectangle("rectangle", x, y, half_width, half_height, true)
    }

    pub fn square(&mut self, x: f64, y: f64, half_length: f64) -> DrawResult<()> {
        self.draw_rectangle("square", x, y, half_length, half_length, false)
    }

    pub fn filled_square(&mut self, x: f64, y: f64, half_length: f64) -> DrawResult<()> {
        self.draw_rectangle("square", x, y, half_length, half_length, true)
    }

    /// Outlined polygon from a flat `x0, y0, x1, y1, ...` list.
    pub fn polygon(&mut self, coords: &[f64]) -> DrawResult<()> {
        self.draw_polygon(coords, false)
    }

    pub fn filled_polygon(&mut self, coords: &[f64]) -> DrawResult<()> {
        self.draw_polygon(coords, true)
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> DrawResult<()> {
        let (ax, ay) = self.space.scale_point(x1, y1);
        let (bx, by) = self.space.scale_point(x2, y2);
        let width = self.stroke_width();
        let handle = self.renderer.submit_line_segment(
            Vec2::from_f64(ax, ay),
            Vec2::from_f64(bx, by),
            width,
            self.pen.color(),
        );
        log::trace!("line ({ax:.1}, {ay:.1}) -> ({bx:.1}, {by:.1}) width {width:.2}");
        self.registry.register(handle);
        Ok(())
    }

    /// Horizontal, centered text.
    pub fn text(&mut self, x: f64, y: f64, text: &str) -> DrawResult<()> {
        self.text_with(x, y, text, 0.0, HorizontalAnchor::Center)
    }

    /// Text rotated `angle` degrees counter-clockwise around `(x, y)`, which
    /// sits at the vertical center of the line and at the `anchor` side.
    pub fn text_with(&mut self, x: f64, y: f64, text: &str, angle: f64, anchor: HorizontalAnchor) -> DrawResult<()> {
        if !angle.is_finite() {
            return Err(DrawError::invalid_argument(format!("text angle must be finite, got {angle}")));
        }
        let (dx, dy) = self.space.scale_point(x, y);
        let FontState { name, size } = self.pen.font().clone();
        let handle = self.renderer.submit_text(TextCmd {
            anchor: Vec2::from_f64(dx, dy),
            text: text.to_string(),
            font_name: name,
            font_size: size,
            rotation: angle as f32,
            h_anchor: anchor,
            color: self.pen.color(),
        });
        log::trace!("text {text:?} at ({dx:.1}, {dy:.1})");
        self.registry.register(handle);
        Ok(())
    }

    /// Dispatches a request to the matching drawing method.
    pub fn draw(&mut self, request: &ShapeRequest) -> DrawResult<()> {
        match request {
            &ShapeRequest::Circle { x, y, radius, filled } => {
                self.draw_ellipse("circle", x, y, radius, radius, filled)
            }
            &ShapeRequest::Ellipse { x, y, a, b, filled } => {
                self.draw_ellipse("ellipse", x, y, a, b, filled)
            }
            &ShapeRequest::Rectangle { x, y, half_width, half_height, filled } => {
                self.draw_rectangle("rectangle", x, y, half_width, half_height, filled)
            }
            &ShapeRequest::Square { x, y, half_length, filled } => {
                self.draw_rectangle("square", x, y, half_length, half_length, filled)
            }
            ShapeRequest::Polygon { coords, filled } => self.draw_polygon(coords, *filled),
            &ShapeRequest::Line { x1, y1, x2, y2 } => self.line(x1, y1, x2, y2),
            ShapeRequest::Text { x, y, text, angle, anchor } => self.text_with(*x, *y, text, *angle, *anchor),
        }
    }

    /// Releases everything drawn so far and paints the whole extent white.
    pub fn clear(&mut self) -> DrawResult<()> {
        self.clear_with(Rgba8::WHITE)
    }

    /// Releases everything drawn so far and paints the whole extent `color`.
    ///
    /// Afterwards the registry holds exactly the background primitive. The
    /// pen color is unchanged.
    pub fn clear_with(&mut self, color: impl Into<ColorSpec>) -> DrawResult<()> {
        let background = color.into().to_rgba8()?;

        let extent = self.space.extent();
        let (cx, cy) = extent.center();
        let (dcx, dcy) = self.space.scale_point(cx, cy);
        let (dw, dh) = self.space.scale_length(extent.x_range() / 2.0, extent.y_range() / 2.0);
        let ring = rectangle_ring(dcx - dw, dcy - dh, 2.0 * dw, 2.0 * dh);

        let released = self.registry.len();
        self.registry.release_all(&mut self.renderer);

        let pen_color = self.pen.color();
        self.pen.set_rgba(background);
        let handle = self.renderer.submit_filled_polygon(ring, self.pen.color());
        self.registry.register(handle);
        self.pen.set_rgba(pen_color);

        log::debug!("cleared {released} primitives to {background:?}");
        Ok(())
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn stroke_width(&self) -> f32 {
        self.space.scale_pen_radius(self.pen.radius()) as f32
    }

    fn draw_ellipse(&mut self, what: &str, x: f64, y: f64, a: f64, b: f64, filled: bool) -> DrawResult<()> {
        let center = self.space.scale_point(x, y);
        let (da, db) = self.space.scale_length(a, b);
        check_min_size(what, da, db)?;

        let ring = ellipse_ring(center, da, db)?;
        log::trace!("{what} at {center:?} axes ({da:.1}, {db:.1}), {} samples", ring.len());
        let handle = if filled {
            self.renderer.submit_filled_polygon(ring, self.pen.color())
        } else {
            let width = self.stroke_width();
            self.renderer.submit_stroked_loop(ring, width, self.pen.color(), true)
        };
        self.registry.register(handle);
        Ok(())
    }

    fn draw_rectangle(
        &mut self,
        what: &str,
        x: f64,
        y: f64,
        half_width: f64,
        half_height: f64,
        filled: bool,
    ) -> DrawResult<()> {
        let (dw, dh) = self.space.scale_length(half_width, half_height);
        check_min_size(what, dw, dh)?;
        let (cx, cy) = self.space.scale_point(x, y);
        let ring = rectangle_ring(cx - dw, cy - dh, 2.0 * dw, 2.0 * dh);

        log::trace!("{what} at ({:.1}, {:.1}) size ({:.1}, {:.1})", cx - dw, cy - dh, 2.0 * dw, 2.0 * dh);
        let handle = if filled {
            self.renderer.submit_filled_polygon(ring, self.pen.color())
        } else {
            let width = self.stroke_width();
            self.renderer
                .submit_stroked_loop(rectangle_outline(&ring), width, self.pen.color(), true)
        };
        self.registry.register(handle);
        Ok(())
    }

    fn draw_polygon(&mut self, coords: &[f64], filled: bool) -> DrawResult<()> {
        let points = polygon_points(&self.space, coords)?;
        log::trace!("polygon with {} vertices, filled: {filled}", points.len());
        let handle = if filled {
            self.renderer.submit_filled_polygon(points, self.pen.color())
        } else {
            let width = self.stroke_width();
            self.renderer.submit_stroked_loop(points, width, self.pen.color(), true)
        };
        self.registry.register(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use penndraw_engine::scene::{DrawCmd, PrimitiveHandle};

    use super::*;

    fn cmd<'a>(ctx: &'a DrawingContext, handle: &PrimitiveHandle) -> &'a DrawCmd {
        ctx.renderer().get(handle).expect("registered handle is live")
    }

    fn last_cmd(ctx: &DrawingContext) -> &DrawCmd {
        cmd(ctx, ctx.registry().last().expect("something was drawn"))
    }

    /// Bounding box of a vertex list as (min, max).
    fn bounds(vs: &[Vec2]) -> (Vec2, Vec2) {
        vs.iter().fold(
            (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
            |(lo, hi), v| (Vec2::new(lo.x.min(v.x), lo.y.min(v.y)), Vec2::new(hi.x.max(v.x), hi.y.max(v.y))),
        )
    }

    // ── state ──

    #[test]
    fn defaults() {
        let ctx = DrawingContext::new();
        assert_eq!(ctx.canvas_size(), CanvasSize { width: 512, height: 512 });
        assert_eq!(ctx.extent(), LogicalExtent::default());
        assert_eq!(ctx.pen_color(), Rgba8::WHITE);
        assert_eq!(ctx.pen_radius(), 0.002);
        assert_eq!(ctx.font(), "sans-serif");
        assert_eq!(ctx.font_size(), 16.0);
        assert_eq!(ctx.title(), "penndraw");
        assert!(ctx.registry().is_empty());
    }

    #[test]
    fn pen_color_scenarios() {
        let mut ctx = DrawingContext::new();
        assert!(matches!(ctx.set_pen_color((300, 0, 0)), Err(DrawError::InvalidColor(_))));
        assert_eq!(ctx.pen_color(), Rgba8::WHITE);
        ctx.set_pen_color((10, 20, 30)).unwrap();
        assert_eq!(ctx.pen_color(), Rgba8::new(10, 20, 30, 255));
    }

    #[test]
    fn config_is_validated() {
        let ctx = DrawingContext::<DrawList>::with_config(DrawingConfig {
            canvas_width: 500,
            canvas_height: 300,
            pen_color: ColorSpec::Rgb(1, 2, 3),
            title: "demo".into(),
            ..DrawingConfig::default()
        })
        .unwrap();
        assert_eq!(ctx.canvas_size(), CanvasSize { width: 500, height: 300 });
        assert_eq!(ctx.pen_color(), Rgba8::new(1, 2, 3, 255));
        assert_eq!(ctx.title(), "demo");

        let bad = DrawingContext::<DrawList>::with_config(DrawingConfig {
            canvas_width: 0,
            ..DrawingConfig::default()
        });
        assert!(matches!(bad, Err(DrawError::InvalidSize(_))));

        let bad = DrawingContext::<DrawList>::with_config(DrawingConfig {
            font: Some("Comic Nonexistent".into()),
            ..DrawingConfig::default()
        });
        assert!(matches!(bad, Err(DrawError::InvalidFont(_))));
    }

    // ── fonts ──

    #[test]
    fn font_selection() {
        let mut ctx = DrawingContext::new();
        assert!(matches!(ctx.set_font("Nope"), Err(DrawError::InvalidFont(_))));
        assert_eq!(ctx.font(), "sans-serif");
        ctx.set_font("sans-serif").unwrap();
        assert!(matches!(ctx.load_font("Broken", b"not a font"), Err(DrawError::InvalidFont(_))));
        assert!(matches!(ctx.set_font("Broken"), Err(DrawError::InvalidFont(_))));
        assert!(matches!(ctx.set_font_size(-1.0), Err(DrawError::InvalidArgument(_))));
        assert!(matches!(ctx.list_fonts(), Err(DrawError::Unsupported(_))));
    }

    // ── shapes ──

    #[test]
    fn circle_in_top_left_corner() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(500, 500).unwrap();
        ctx.circle(0.1, 0.9, 0.1).unwrap();

        let DrawCmd::StrokedLoop(s) = last_cmd(&ctx) else {
            panic!("expected a stroked loop");
        };
        assert!(s.closed);
        assert_eq!(s.vertices.len(), 50);
        assert!((s.thickness - 1.0).abs() < 1e-6);

        let (lo, hi) = bounds(&s.vertices);
        let center = Vec2::new((lo.x + hi.x) / 2.0, (lo.y + hi.y) / 2.0);
        assert!((center.x - 50.0).abs() < 1.0 && (center.y - 450.0).abs() < 1.0);
        assert!(((hi.x - lo.x) / 2.0 - 50.0).abs() < 1.0);
        // Left and top edges touch the canvas border.
        assert!(lo.x.abs() < 1.0);
        assert!((hi.y - 500.0).abs() < 1.0);
    }

    #[test]
    fn filled_circle_submits_polygon() {
        let mut ctx = DrawingContext::new();
        ctx.filled_circle(0.5, 0.5, 0.25).unwrap();
        let DrawCmd::FilledPolygon(f) = last_cmd(&ctx) else {
            panic!("expected a filled polygon");
        };
        // 128 px radius / 1.25 = 102.4 -> 102 samples
        assert_eq!(f.vertices.len(), 102);
        assert_eq!(f.color, Rgba8::WHITE);
    }

    #[test]
    fn sub_pixel_shapes_rejected() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(100, 100).unwrap();
        assert!(matches!(ctx.circle(0.5, 0.5, 0.005), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ctx.ellipse(0.5, 0.5, 0.2, 0.001), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ctx.filled_square(0.5, 0.5, 0.0), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ctx.rectangle(0.5, 0.5, f64::NAN, 0.2), Err(DrawError::InvalidSize(_))));
        assert!(ctx.registry().is_empty());
        assert!(ctx.renderer().is_empty());
    }

    #[test]
    fn oversized_shapes_rejected() {
        let mut ctx = DrawingContext::new();
        assert!(matches!(ctx.circle(0.5, 0.5, f64::INFINITY), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ctx.filled_ellipse(0.5, 0.5, 1e30, 0.1), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ctx.filled_rectangle(0.5, 0.5, f64::INFINITY, 0.1), Err(DrawError::InvalidSize(_))));
        assert!(ctx.registry().is_empty());
        assert!(ctx.renderer().is_empty());
    }

    #[test]
    fn filled_rectangle_spans_twice_the_half_extents() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(200, 100).unwrap();
        ctx.filled_rectangle(0.5, 0.5, 0.25, 0.1).unwrap();
        let DrawCmd::FilledPolygon(f) = last_cmd(&ctx) else {
            panic!("expected a filled polygon");
        };
        assert_eq!(
            f.vertices,
            vec![Vec2::new(50.0, 40.0), Vec2::new(150.0, 40.0), Vec2::new(150.0, 60.0), Vec2::new(50.0, 60.0)]
        );
    }

    #[test]
    fn rectangle_outline_repeats_corners() {
        let mut ctx = DrawingContext::new();
        ctx.square(0.5, 0.5, 0.25).unwrap();
        let DrawCmd::StrokedLoop(s) = last_cmd(&ctx) else {
            panic!("expected a stroked loop");
        };
        assert!(s.closed);
        assert_eq!(s.vertices.len(), 6);
        assert_eq!(s.vertices[4], s.vertices[0]);
        assert_eq!(s.vertices[5], s.vertices[1]);
    }

    #[test]
    fn polygon_validation() {
        let mut ctx = DrawingContext::new();
        assert!(matches!(ctx.polygon(&[1.0, 2.0, 3.0]), Err(DrawError::InvalidArgument(_))));
        assert!(ctx.registry().is_empty());
        ctx.filled_polygon(&[0.1, 0.1, 0.9, 0.1, 0.5, 0.9]).unwrap();
        assert!(matches!(last_cmd(&ctx), DrawCmd::FilledPolygon(f) if f.vertices.len() == 3));
    }

    #[test]
    fn outlined_polygon_is_closed_loop_in_input_order() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(400, 200).unwrap();
        ctx.set_pen_radius(0.005).unwrap();
        let coords = [0.25, 0.5, 0.75, 0.25, 1.0, 1.0, 0.0, 0.75];
        ctx.polygon(&coords).unwrap();

        let DrawCmd::StrokedLoop(s) = last_cmd(&ctx) else {
            panic!("expected a stroked loop");
        };
        assert!(s.closed);
        let expected: Vec<_> = coords
            .chunks_exact(2)
            .map(|xy| {
                let (dx, dy) = ctx.space().scale_point(xy[0], xy[1]);
                Vec2::from_f64(dx, dy)
            })
            .collect();
        assert_eq!(s.vertices, expected);
        assert_eq!(s.vertices[1], Vec2::new(300.0, 50.0));
        assert!((s.thickness - 2.0).abs() < 1e-6);
    }

    #[test]
    fn line_width_follows_pen_radius() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(400, 200).unwrap();
        ctx.set_pen_radius(0.01).unwrap();
        ctx.line(0.0, 0.0, 1.0, 1.0).unwrap();
        let DrawCmd::LineSegment(l) = last_cmd(&ctx) else {
            panic!("expected a line segment");
        };
        assert_eq!(l.p1, Vec2::new(0.0, 0.0));
        assert_eq!(l.p2, Vec2::new(400.0, 200.0));
        assert!((l.width - 4.0).abs() < 1e-6);
    }

    #[test]
    fn text_carries_pen_font_and_color() {
        let mut ctx = DrawingContext::new();
        ctx.set_pen_color((0, 0, 255)).unwrap();
        ctx.set_font_size(24.0).unwrap();
        ctx.text_with(0.5, 0.25, "hi", 45.0, HorizontalAnchor::Left).unwrap();
        let DrawCmd::Text(t) = last_cmd(&ctx) else {
            panic!("expected text");
        };
        assert_eq!(t.anchor, Vec2::new(256.0, 128.0));
        assert_eq!(t.text, "hi");
        assert_eq!(t.font_name, "sans-serif");
        assert_eq!(t.font_size, 24.0);
        assert_eq!(t.rotation, 45.0);
        assert_eq!(t.h_anchor, HorizontalAnchor::Left);
        assert_eq!(t.color, Rgba8::opaque(0, 0, 255));

        assert!(matches!(
            ctx.text_with(0.5, 0.5, "x", f64::INFINITY, HorizontalAnchor::Center),
            Err(DrawError::InvalidArgument(_))
        ));
    }

    #[test]
    fn draw_dispatches_requests() {
        let mut ctx = DrawingContext::new();
        let requests = [
            ShapeRequest::Circle { x: 0.5, y: 0.5, radius: 0.1, filled: true },
            ShapeRequest::Square { x: 0.5, y: 0.5, half_length: 0.1, filled: false },
            ShapeRequest::Line { x1: 0.0, y1: 0.0, x2: 1.0, y2: 0.0 },
            ShapeRequest::Polygon { coords: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0], filled: false },
        ];
        for r in &requests {
            ctx.draw(r).unwrap();
        }
        let kinds: Vec<_> = ctx.registry().iter().map(|h| cmd(&ctx, h).kind()).collect();
        assert_eq!(kinds, vec!["filled polygon", "stroked loop", "line segment", "stroked loop"]);
    }

    // ── clear ──

    #[test]
    fn clear_leaves_only_the_background() {
        let mut ctx = DrawingContext::new();
        ctx.set_pen_color((255, 0, 0)).unwrap();
        ctx.ellipse(0.25, 0.25, 0.25, 0.25).unwrap();
        ctx.ellipse(0.5, 0.5, 0.15, 0.25).unwrap();
        ctx.ellipse(0.75, 0.75, 0.25, 0.15).unwrap();
        let old: Vec<_> = ctx.registry().iter().map(|h| h.key()).collect();
        assert_eq!(old.len(), 3);

        ctx.clear().unwrap();

        assert_eq!(ctx.registry().len(), 1);
        assert_eq!(ctx.renderer().len(), 1);
        assert!(old.iter().all(|k| !ctx.renderer().contains_key(*k)));

        let DrawCmd::FilledPolygon(bg) = last_cmd(&ctx) else {
            panic!("expected the background rectangle");
        };
        assert_eq!(bg.color, Rgba8::WHITE);
        let (lo, hi) = bounds(&bg.vertices);
        assert_eq!((lo, hi), (Vec2::new(0.0, 0.0), Vec2::new(512.0, 512.0)));
        assert_eq!(ctx.pen_color(), Rgba8::opaque(255, 0, 0));
    }

    #[test]
    fn clear_spans_custom_extent() {
        let mut ctx = DrawingContext::new();
        ctx.set_canvas_size(300, 200).unwrap();
        ctx.set_scale(-5.0, 5.0).unwrap();
        ctx.clear_with((0, 0, 0)).unwrap();
        let DrawCmd::FilledPolygon(bg) = last_cmd(&ctx) else {
            panic!("expected the background rectangle");
        };
        let (lo, hi) = bounds(&bg.vertices);
        assert!(lo.x.abs() < 1e-3 && lo.y.abs() < 1e-3);
        assert!((hi.x - 300.0).abs() < 1e-3 && (hi.y - 200.0).abs() < 1e-3);
        assert_eq!(bg.color, Rgba8::BLACK);
    }

    #[test]
    fn clear_with_bad_color_changes_nothing() {
        let mut ctx = DrawingContext::new();
        ctx.filled_circle(0.5, 0.5, 0.1).unwrap();
        assert!(matches!(ctx.clear_with((0, 0, 999)), Err(DrawError::InvalidColor(_))));
        assert_eq!(ctx.registry().len(), 1);
        assert!(matches!(last_cmd(&ctx), DrawCmd::FilledPolygon(f) if f.vertices.len() == 50));
    }
}
