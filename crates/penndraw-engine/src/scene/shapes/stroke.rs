use crate::coords::Vec2;
use crate::paint::Rgba8;
use crate::scene::{DrawCmd, DrawList, PrimitiveHandle};

/// Stroked polyline payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCmd {
    pub vertices: Vec<Vec2>,
    /// Full stroke width in device pixels.
    pub thickness: f32,
    pub color: Rgba8,
    pub closed: bool,
}

impl StrokeCmd {
    #[inline]
    pub fn new(vertices: Vec<Vec2>, thickness: f32, color: Rgba8, closed: bool) -> Self {
        Self { vertices, thickness, color, closed }
    }

    /// Segments in drawing order, including the closing one when `closed`.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        let count = match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

impl DrawList {
    /// Records a stroked polyline.
    #[inline]
    pub fn push_stroked_loop(
        &mut self,
        vertices: Vec<Vec2>,
        thickness: f32,
        color: Rgba8,
        closed: bool,
    ) -> PrimitiveHandle {
        self.push(DrawCmd::StrokedLoop(StrokeCmd::new(vertices, thickness, color, closed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(closed: bool) -> StrokeCmd {
        let v = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        StrokeCmd::new(v, 1.0, Rgba8::WHITE, closed)
    }

    #[test]
    fn closed_loop_wraps_to_first_vertex() {
        let segs: Vec<_> = tri(true).segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], (Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn open_polyline_has_one_fewer_segment() {
        assert_eq!(tri(false).segments().count(), 2);
    }

    #[test]
    fn single_vertex_has_no_segments() {
        let s = StrokeCmd::new(vec![Vec2::zero()], 1.0, Rgba8::WHITE, true);
        assert_eq!(s.segments().count(), 0);
    }
}
