//! CPU tessellation of retained primitives into colored triangles.
//!
//! Output is device pixels; the mesh shader maps it to NDC.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Rgba8;
use crate::scene::{DrawCmd, FillCmd, LineCmd, StrokeCmd};

/// Strokes thinner than this still cover one pixel column.
const MIN_STROKE_WIDTH: f32 = 1.0;

/// Joins are only visible once the half-width exceeds a pixel.
const MIN_JOIN_RADIUS: f32 = 1.0;

const DEGENERATE_LEN: f32 = 1e-6;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4], // premultiplied
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, p: Vec2, color: [f32; 4]) -> u32 {
        let i = self.vertices.len() as u32;
        self.vertices.push(MeshVertex { pos: p.to_array(), color });
        i
    }

    fn push_quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
        let ia = self.push_vertex(a, color);
        let ib = self.push_vertex(b, color);
        let ic = self.push_vertex(c, color);
        let id = self.push_vertex(d, color);
        self.indices.extend_from_slice(&[ia, ib, ic, ia, ic, id]);
    }

    fn push_disc(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let segments = ((radius * 2.0).ceil() as usize).clamp(8, 32);
        let c = self.push_vertex(center, color);
        let first = self.vertices.len() as u32;
        for i in 0..segments {
            let theta = i as f32 * core::f32::consts::TAU / segments as f32;
            self.push_vertex(center + Vec2::new(radius, 0.0).rotated(theta), color);
        }
        for i in 0..segments as u32 {
            let next = (i + 1) % segments as u32;
            self.indices.extend_from_slice(&[c, first + i, first + next]);
        }
    }
}

/// Appends `cmd` to `mesh`. Returns `false` for commands that are not drawn as
/// plain triangles (text).
pub fn tessellate(mesh: &mut Mesh, cmd: &DrawCmd) -> bool {
    match cmd {
        DrawCmd::FilledPolygon(fill) => fill_polygon(mesh, fill),
        DrawCmd::StrokedLoop(stroke) => stroke_polyline(mesh, stroke),
        DrawCmd::LineSegment(line) => line_segment(mesh, line),
        DrawCmd::Text(_) => return false,
    }
    true
}

pub fn fill_polygon(mesh: &mut Mesh, cmd: &FillCmd) {
    let color = premul(cmd.color);
    let base = mesh.vertices.len() as u32;
    for &v in &cmd.vertices {
        mesh.push_vertex(v, color);
    }
    for [a, b, c] in triangulate(&cmd.vertices) {
        mesh.indices.extend_from_slice(&[base + a as u32, base + b as u32, base + c as u32]);
    }
}

/// One quad per segment, plus round joins once the stroke is wide enough for
/// the notches between quads to show.
pub fn stroke_polyline(mesh: &mut Mesh, cmd: &StrokeCmd) {
    let color = premul(cmd.color);
    let half = cmd.thickness.max(MIN_STROKE_WIDTH) * 0.5;

    let mut drawn = 0usize;
    for (a, b) in cmd.segments() {
        if segment_quad(mesh, a, b, half, color) {
            drawn += 1;
        }
    }

    if drawn == 0 || half < MIN_JOIN_RADIUS {
        return;
    }

    let n = cmd.vertices.len();
    let joints = if cmd.closed { 0..n } else { 1..n.saturating_sub(1) };
    for i in joints {
        mesh.push_disc(cmd.vertices[i], half, color);
    }
}

pub fn line_segment(mesh: &mut Mesh, cmd: &LineCmd) {
    let half = cmd.width.max(MIN_STROKE_WIDTH) * 0.5;
    segment_quad(mesh, cmd.p1, cmd.p2, half, premul(cmd.color));
}

fn segment_quad(mesh: &mut Mesh, a: Vec2, b: Vec2, half: f32, color: [f32; 4]) -> bool {
    let d = b - a;
    let len = d.length();
    if len < DEGENERATE_LEN {
        return false;
    }
    let n = d.perp() * (half / len);
    mesh.push_quad(a + n, a - n, b - n, b + n, color);
    true
}

#[inline]
fn premul(c: Rgba8) -> [f32; 4] {
    c.to_premul().to_array()
}

// ── triangulation ─────────────────────────────────────────────────────────

/// Twice the signed area; positive for counter-clockwise rings.
fn signed_area2(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n).map(|i| points[i].cross(points[(i + 1) % n])).sum()
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    (b - a).cross(p - a) >= 0.0 && (c - b).cross(p - b) >= 0.0 && (a - c).cross(p - c) >= 0.0
}

fn is_ear(points: &[Vec2], ring: &[usize], prev: usize, cur: usize, next: usize) -> bool {
    let (a, b, c) = (points[prev], points[cur], points[next]);
    if (b - a).cross(c - b) <= 0.0 {
        return false;
    }
    ring.iter()
        .filter(|&&j| j != prev && j != cur && j != next)
        .map(|&j| points[j])
        .filter(|&p| p != a && p != b && p != c)
        .all(|p| !in_triangle(p, a, b, c))
}

/// Ear-clipping triangulation of a simple polygon in either winding.
///
/// Returns index triples into `points`. Input that is not simple still yields
/// triangles (the leftover ring is fanned), just not a faithful fill.
pub fn triangulate(points: &[Vec2]) -> Vec<[usize; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut ring: Vec<usize> = (0..n).collect();
    if signed_area2(points) < 0.0 {
        ring.reverse();
    }

    let mut tris = Vec::with_capacity(n - 2);
    let mut i = 0usize;
    let mut misses = 0usize;

    while ring.len() > 3 {
        let m = ring.len();
        let prev = ring[(i + m - 1) % m];
        let cur = ring[i];
        let next = ring[(i + 1) % m];

        if is_ear(points, &ring, prev, cur, next) {
            tris.push([prev, cur, next]);
            ring.remove(i);
            misses = 0;
            if i >= ring.len() {
                i = 0;
            }
        } else {
            misses += 1;
            if misses >= m {
                log::debug!("triangulate: no ear among {m} vertices; fanning remainder");
                break;
            }
            i = (i + 1) % m;
        }
    }

    for k in 1..ring.len() - 1 {
        tris.push([ring[0], ring[k], ring[k + 1]]);
    }
    tris
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    fn area_of(points: &[Vec2], tris: &[[usize; 3]]) -> f32 {
        tris.iter()
            .map(|&[a, b, c]| ((points[b] - points[a]).cross(points[c] - points[a]) * 0.5).abs())
            .sum()
    }

    // ── triangulate ───────────────────────────────────────────────────────

    #[test]
    fn square_is_two_triangles() {
        let sq = [v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)];
        let tris = triangulate(&sq);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&sq, &tris) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn clockwise_input_triangulates_too() {
        let sq = [v(0.0, 0.0), v(0.0, 2.0), v(2.0, 2.0), v(2.0, 0.0)];
        let tris = triangulate(&sq);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&sq, &tris) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn concave_l_shape_covers_exact_area() {
        // 3×3 square with the top-right 2×2 removed: area 5.
        let l = [
            v(0.0, 0.0),
            v(3.0, 0.0),
            v(3.0, 1.0),
            v(1.0, 1.0),
            v(1.0, 3.0),
            v(0.0, 3.0),
        ];
        let tris = triangulate(&l);
        assert_eq!(tris.len(), l.len() - 2);
        assert!((area_of(&l, &tris) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn fewer_than_three_points_is_empty() {
        assert!(triangulate(&[v(0.0, 0.0), v(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn collinear_points_do_not_hang() {
        let line = [v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)];
        assert_eq!(triangulate(&line).len(), 2);
    }

    // ── strokes ───────────────────────────────────────────────────────────

    #[test]
    fn thin_closed_loop_is_one_quad_per_segment() {
        let ring = vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(0.0, 10.0)];
        let mut mesh = Mesh::new();
        stroke_polyline(&mut mesh, &StrokeCmd::new(ring, 1.0, Rgba8::WHITE, true));
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn repeated_vertex_adds_no_quad() {
        let ring = vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)];
        let mut mesh = Mesh::new();
        stroke_polyline(&mut mesh, &StrokeCmd::new(ring, 1.0, Rgba8::WHITE, false));
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn wide_stroke_gets_round_joins() {
        let ring = vec![v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0)];
        let mut thin = Mesh::new();
        let mut wide = Mesh::new();
        stroke_polyline(&mut thin, &StrokeCmd::new(ring.clone(), 1.0, Rgba8::WHITE, false));
        stroke_polyline(&mut wide, &StrokeCmd::new(ring, 6.0, Rgba8::WHITE, false));
        assert!(wide.triangle_count() > thin.triangle_count());
    }

    #[test]
    fn line_quad_is_offset_by_half_width() {
        let mut mesh = Mesh::new();
        line_segment(
            &mut mesh,
            &LineCmd { p1: v(0.0, 0.0), p2: v(10.0, 0.0), width: 4.0, color: Rgba8::WHITE },
        );
        assert_eq!(mesh.triangle_count(), 2);
        let ys: Vec<f32> = mesh.vertices.iter().map(|mv| mv.pos[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 2.0).abs() < 1e-6));
    }

    #[test]
    fn text_is_not_tessellated() {
        let mut mesh = Mesh::new();
        let cmd = DrawCmd::Text(crate::scene::TextCmd {
            anchor: v(0.0, 0.0),
            text: "hi".into(),
            font_name: "sans-serif".into(),
            font_size: 12.0,
            rotation: 0.0,
            h_anchor: Default::default(),
            color: Rgba8::WHITE,
        });
        assert!(!tessellate(&mut mesh, &cmd));
        assert_eq!(mesh.triangle_count(), 0);
    }
}
