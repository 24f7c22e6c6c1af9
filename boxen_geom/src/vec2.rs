//! Small free functions over [`kurbo::Vec2`] that the joint generator and
//! outline synthesizer both lean on.

use kurbo::Vec2;

/// Euclidean distance between two vectors treated as points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (a - b).hypot()
}

/// Dot product.
#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Perpendicular (90-degree counter-clockwise rotation) of `v`.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unit vector in the direction of `v`, or `Vec2::ZERO` if `v` is (near) zero.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len <= f64::EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perp_rotates_ccw() {
        let v = Vec2::new(1.0, 0.0);
        assert_eq!(perp(v), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn normalize_scales_to_unit_length() {
        let v = Vec2::new(3.0, 4.0);
        let n = normalize(v);
        assert!((n.hypot() - 1.0).abs() < 1e-12);
    }
}
