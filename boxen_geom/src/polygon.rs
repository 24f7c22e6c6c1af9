//! Closed-polyline operations: winding, signed area, containment, and the
//! dedup pass that keeps outline synthesis numerically sane.

use kurbo::Point;

use crate::EPS;

/// Orientation of a closed polyline, by sign of its [`signed_area`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Twice the signed area of the closed polygon `points` (shoelace formula).
/// Positive for counter-clockwise winding, negative for clockwise, under a
/// standard screen/math y-up convention.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Winding direction of `points`. Degenerate (near-zero area) polygons are
/// reported as counter-clockwise; callers that care should check
/// [`signed_area`] directly.
pub fn winding_of(points: &[Point]) -> Winding {
    if signed_area(points) < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// Reverse `points` in place if needed so its winding matches `desired`.
pub fn ensure_winding(points: &mut Vec<Point>, desired: Winding) {
    if winding_of(points) != desired {
        points.reverse();
    }
}

/// Ray-casting point-in-polygon test. Points on the boundary are treated as
/// inside.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = polygon.len();
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];

        if on_segment(point, pi, pj) {
            return true;
        }

        let intersects = (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x);
    if cross.abs() > EPS {
        return false;
    }
    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    dot >= -EPS && dot <= len_sq + EPS
}

/// Axis-aligned bounds of `points`, as `(min, max)`. Returns `None` for an
/// empty slice.
pub fn bounds_of(points: &[Point]) -> Option<(Point, Point)> {
    let mut iter = points.iter();
    let first = *iter.next()?;
    let mut min = first;
    let mut max = first;
    for &p in iter {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    Some((min, max))
}

/// Drop consecutive vertices closer than `eps` to one another, including the
/// wrap-around pair (last, first). Leaves at least the first point if every
/// vertex collapses together.
pub fn dedupe_close(points: &[Point], eps: f64) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match out.last() {
            Some(&last) if last.distance(p) < eps => continue,
            _ => out.push(p),
        }
    }
    if out.len() > 1 && out[0].distance(*out.last().unwrap()) < eps {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ]
    }

    #[test]
    fn signed_area_of_unit_square_is_one() {
        let sq = square(1.0);
        assert!((signed_area(&sq).abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn winding_flips_on_reverse() {
        let mut sq = square(10.0);
        let original = winding_of(&sq);
        sq.reverse();
        assert_ne!(original, winding_of(&sq));
    }

    #[test]
    fn ensure_winding_normalizes_direction() {
        let mut sq = square(10.0);
        ensure_winding(&mut sq, Winding::Clockwise);
        assert_eq!(winding_of(&sq), Winding::Clockwise);
        ensure_winding(&mut sq, Winding::Clockwise);
        assert_eq!(winding_of(&sq), Winding::Clockwise);
    }

    #[test]
    fn point_in_polygon_center_and_outside() {
        let sq = square(10.0);
        assert!(point_in_polygon(Point::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &sq));
    }

    #[test]
    fn point_in_polygon_on_boundary_counts_as_inside() {
        let sq = square(10.0);
        assert!(point_in_polygon(Point::new(0.0, 5.0), &sq));
    }

    #[test]
    fn dedupe_close_collapses_near_duplicates() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0001, 0.0001),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let deduped = dedupe_close(&pts, 0.001);
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn dedupe_close_checks_wraparound_pair() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0001, 0.0001),
        ];
        let deduped = dedupe_close(&pts, 0.001);
        assert_eq!(deduped.len(), 3);
    }

    #[test]
    fn bounds_of_empty_is_none() {
        assert_eq!(bounds_of(&[]), None);
    }
}
