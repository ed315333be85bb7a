//! Device-space vertex rings for each shape kind.
//!
//! Filled and outlined shapes consume the same ring; they only differ in how
//! the ring is submitted.

use std::f64::consts::TAU;

use penndraw_engine::coords::Vec2;

use crate::error::{DrawError, DrawResult};
use crate::space::CoordinateSpace;

/// Fewest samples an ellipse ring ever gets.
pub const MIN_ELLIPSE_SEGMENTS: usize = 50;
/// Device pixels of the larger semi-axis per extra ellipse sample.
pub const PIXELS_PER_SEGMENT: f64 = 1.25;
/// Most samples an ellipse ring may have. A stroked ring expands to several
/// mesh vertices per sample, all addressed with `u32` indices.
pub const MAX_ELLIPSE_SEGMENTS: usize = 1 << 20;

/// Sample count for an ellipse with device semi-axes `da`, `db`.
///
/// Fails with `InvalidSize` when the ring would exceed
/// [`MAX_ELLIPSE_SEGMENTS`] or an axis is not finite.
pub fn ellipse_segments(da: f64, db: f64) -> DrawResult<usize> {
    let n = (da.max(db) / PIXELS_PER_SEGMENT).round_ties_even();
    if !n.is_finite() || n > MAX_ELLIPSE_SEGMENTS as f64 {
        return Err(DrawError::invalid_size(format!(
            "ellipse with semi-axes ({da:.3e}, {db:.3e}) device px is too large to tessellate"
        )));
    }
    Ok((n as usize).max(MIN_ELLIPSE_SEGMENTS))
}

/// Open ring sampled counter-clockwise from angle 0; the last point wraps to
/// the first.
pub fn ellipse_ring(center: (f64, f64), da: f64, db: f64) -> DrawResult<Vec<Vec2>> {
    let segments = ellipse_segments(da, db)?;
    let step = TAU / segments as f64;
    Ok((0..segments)
        .map(|i| {
            let theta = i as f64 * step;
            Vec2::from_f64(center.0 + da * theta.cos(), center.1 + db * theta.sin())
        })
        .collect())
}

/// Corners counter-clockwise from the bottom-left `(x, y)`.
pub fn rectangle_ring(x: f64, y: f64, width: f64, height: f64) -> Vec<Vec2> {
    vec![
        Vec2::from_f64(x, y),
        Vec2::from_f64(x + width, y),
        Vec2::from_f64(x + width, y + height),
        Vec2::from_f64(x, y + height),
    ]
}

/// Outline ring: closed back to the first corner, then the second corner
/// repeated so the closing corner gets a join.
pub fn rectangle_outline(ring: &[Vec2]) -> Vec<Vec2> {
    let mut out = ring.to_vec();
    if let (Some(&first), Some(&second)) = (ring.first(), ring.get(1)) {
        out.push(first);
        out.push(second);
    }
    out
}

/// Pairs a flat coordinate list and maps it to device space.
pub fn polygon_points(space: &CoordinateSpace, coords: &[f64]) -> DrawResult<Vec<Vec2>> {
    if coords.len() % 2 != 0 {
        return Err(DrawError::invalid_argument("must provide an even number of points"));
    }
    if coords.len() < 6 {
        return Err(DrawError::invalid_argument(format!(
            "a polygon needs at least 3 vertices, got {}",
            coords.len() / 2
        )));
    }
    Ok(coords
        .chunks_exact(2)
        .map(|xy| {
            let (dx, dy) = space.scale_point(xy[0], xy[1]);
            Vec2::from_f64(dx, dy)
        })
        .collect())
}

/// Rejects shapes under one device pixel on either axis, and shapes whose
/// size does not fit device coordinates.
pub(crate) fn check_min_size(what: &str, dw: f64, dh: f64) -> DrawResult<()> {
    if !(dw >= 1.0 && dh >= 1.0) {
        return Err(DrawError::invalid_size(format!(
            "{what} is smaller than one pixel ({dw:.3} x {dh:.3} device px)"
        )));
    }
    if !((dw as f32).is_finite() && (dh as f32).is_finite()) {
        return Err(DrawError::invalid_size(format!(
            "{what} is too large for device coordinates ({dw:.3e} x {dh:.3e} device px)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    // ── ellipse ──

    #[test]
    fn segment_count_has_floor() {
        assert_eq!(ellipse_segments(1.0, 1.0), Ok(50));
        assert_eq!(ellipse_segments(62.5, 10.0), Ok(50));
        assert_eq!(ellipse_segments(100.0, 10.0), Ok(80));
        assert_eq!(ellipse_segments(10.0, 250.0), Ok(200));
    }

    #[test]
    fn segment_count_rounds_half_to_even() {
        // 63.125 / 1.25 = 50.5 -> 50, 64.375 / 1.25 = 51.5 -> 52
        assert_eq!(ellipse_segments(63.125, 0.0), Ok(50));
        assert_eq!(ellipse_segments(64.375, 0.0), Ok(52));
    }

    #[test]
    fn oversized_ellipse_is_invalid_size() {
        assert!(matches!(ellipse_segments(f64::INFINITY, 1.0), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ellipse_segments(1e30, 0.1), Err(DrawError::InvalidSize(_))));
        assert!(matches!(ellipse_ring((0.0, 0.0), f64::INFINITY, f64::INFINITY), Err(DrawError::InvalidSize(_))));
        let at_cap = MAX_ELLIPSE_SEGMENTS as f64 * PIXELS_PER_SEGMENT;
        assert_eq!(ellipse_segments(at_cap, 1.0), Ok(MAX_ELLIPSE_SEGMENTS));
        assert!(ellipse_segments(at_cap + PIXELS_PER_SEGMENT, 1.0).is_err());
    }

    #[test]
    fn ring_has_segment_count_points_on_the_ellipse() {
        let ring = ellipse_ring((100.0, 50.0), 80.0, 40.0).unwrap();
        assert_eq!(Ok(ring.len()), ellipse_segments(80.0, 40.0));
        assert!((ring[0].x - 180.0).abs() < EPS && (ring[0].y - 50.0).abs() < EPS);
        for p in &ring {
            let u = (p.x - 100.0) / 80.0;
            let v = (p.y - 50.0) / 40.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-3);
        }
        // Ring is open; the wrap from last to first is one step like the rest.
        let last = *ring.last().unwrap();
        assert!((last - ring[0]).length() < (ring[1] - ring[0]).length() * 1.01);
    }

    // ── rectangle ──

    #[test]
    fn rectangle_corners_ccw() {
        let r = rectangle_ring(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r[0], Vec2::new(10.0, 20.0));
        assert_eq!(r[1], Vec2::new(40.0, 20.0));
        assert_eq!(r[2], Vec2::new(40.0, 60.0));
        assert_eq!(r[3], Vec2::new(10.0, 60.0));
    }

    #[test]
    fn outline_repeats_first_two_corners() {
        let r = rectangle_ring(0.0, 0.0, 1.0, 1.0);
        let o = rectangle_outline(&r);
        assert_eq!(o.len(), 6);
        assert_eq!(o[4], r[0]);
        assert_eq!(o[5], r[1]);
    }

    // ── polygon ──

    #[test]
    fn odd_coordinates_rejected() {
        let s = CoordinateSpace::new();
        let err = polygon_points(&s, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, DrawError::InvalidArgument("must provide an even number of points".into()));
    }

    #[test]
    fn too_few_vertices_rejected() {
        let s = CoordinateSpace::new();
        assert!(matches!(polygon_points(&s, &[0.0, 0.0, 1.0, 1.0]), Err(DrawError::InvalidArgument(_))));
    }

    #[test]
    fn polygon_maps_each_pair() {
        let mut s = CoordinateSpace::new();
        s.set_canvas_size(100, 200).unwrap();
        let pts = polygon_points(&s, &[0.0, 0.0, 1.0, 0.0, 0.5, 1.0]).unwrap();
        assert_eq!(pts, vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(50.0, 200.0)]);
    }

    #[test]
    fn min_size() {
        assert!(check_min_size("circle", 1.0, 1.0).is_ok());
        assert!(matches!(check_min_size("circle", 0.99, 5.0), Err(DrawError::InvalidSize(_))));
        assert!(matches!(check_min_size("circle", f64::NAN, 5.0), Err(DrawError::InvalidSize(_))));
        assert!(matches!(check_min_size("circle", f64::INFINITY, 5.0), Err(DrawError::InvalidSize(_))));
        assert!(matches!(check_min_size("rectangle", 5.0, 1e300), Err(DrawError::InvalidSize(_))));
    }
}
