//! Finger-joint tooth pattern: shared axis anchors and per-edge polyline
//! synthesis from those anchors.

use boxen_geom::{Point, Vec2};

/// Gender of an edge at the moment it is rendered as a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Straight,
}

/// Material constants a finger-joint pattern is computed from.
#[derive(Copy, Clone, Debug)]
pub struct FingerParams {
    /// Material thickness.
    pub mt: f64,
    /// Nominal finger/tab width.
    pub fw: f64,
    /// Corner-gap multiplier (gap at each end of the edge is `fg * mt`).
    pub fg: f64,
}

/// Compute the shared breakpoints of a finger pattern along an axis of the
/// given `length`, per the "corner gap, alternating tab/gap" rule.
///
/// The returned vector always starts at `0.0` and ends at `length`. Segment
/// `i` (between `anchors[i]` and `anchors[i + 1]`) is a gap when `i` is even
/// and a tab when `i` is odd — index `0` is always the leading corner gap.
///
/// If the edge is too short to fit even one tab between its corner gaps, the
/// pattern collapses to the two endpoints only (a straight, corner-only
/// edge).
pub fn axis_anchor_points(length: f64, p: FingerParams) -> Vec<f64> {
    let corner = p.fg * p.mt;
    if length < 2.0 * corner + p.fw || length <= 0.0 {
        return vec![0.0, length.max(0.0)];
    }

    let interior = length - 2.0 * corner;
    let n_units = (interior / p.fw).round().max(1.0) as usize;
    let unit = interior / n_units as f64;

    let mut anchors = Vec::with_capacity(n_units + 3);
    anchors.push(0.0);
    anchors.push(corner);
    for i in 1..n_units {
        anchors.push(corner + i as f64 * unit);
    }
    anchors.push(length - corner);
    anchors.push(length);
    anchors
}

fn segment_is_tab(segment_index: usize) -> bool {
    segment_index % 2 == 1
}

/// Offset applied to a segment of the given gender/parity, perpendicular to
/// the edge (positive is outward, matching [`boxen_geom::EdgePathPoint`]'s
/// convention).
fn segment_offset(gender: Gender, is_tab: bool, mt: f64) -> f64 {
    match (gender, is_tab) {
        (Gender::Straight, _) => 0.0,
        (Gender::Male, true) => mt,
        (Gender::Male, false) => 0.0,
        (Gender::Female, true) => -mt,
        (Gender::Female, false) => 0.0,
    }
}

/// Synthesize the axis-aligned step polyline for one edge of a finger joint.
///
/// `start`/`end` are this edge's endpoints in panel-local coordinates.
/// `edge_axis_range` is the `(lo, hi)` absolute position of this edge along
/// the shared assembly axis (`lo < hi`); `anchors` is the *full* shared
/// breakpoint list for that axis, from [`axis_anchor_points`] — it may cover
/// a longer span than this edge alone, which is how two mating panels of
/// different lengths still produce aligned teeth. `outward` is the unit
/// normal pointing away from the panel body.
///
/// Returns `[start, end]` directly for [`Gender::Straight`].
pub fn finger_joint_path(
    start: Point,
    end: Point,
    edge_axis_range: (f64, f64),
    anchors: &[f64],
    gender: Gender,
    mt: f64,
    outward: Vec2,
) -> Vec<Point> {
    if gender == Gender::Straight || anchors.len() < 2 {
        return vec![start, end];
    }

    let (lo, hi) = edge_axis_range;
    let span = hi - lo;
    if span <= 0.0 {
        return vec![start, end];
    }
    let dir = (end - start) / span;

    let point_at = |abs_pos: f64, offset: f64| -> Point {
        let t = (abs_pos - lo).clamp(0.0, span);
        start + dir * t + outward * offset
    };

    let mut path = Vec::new();
    let mut prev_offset: Option<f64> = None;

    for i in 0..anchors.len() - 1 {
        let seg_lo = anchors[i];
        let seg_hi = anchors[i + 1];
        if seg_hi <= lo || seg_lo >= hi {
            continue;
        }
        let clipped_lo = seg_lo.max(lo);
        let clipped_hi = seg_hi.min(hi);
        let offset = segment_offset(gender, segment_is_tab(i), mt);

        if prev_offset.is_none() {
            path.push(point_at(clipped_lo, offset));
        } else if let Some(prev) = prev_offset {
            if (prev - offset).abs() > f64::EPSILON {
                path.push(point_at(clipped_lo, offset));
            }
        }
        prev_offset = Some(offset);
        path.push(point_at(clipped_hi, offset));
    }

    if path.is_empty() {
        return vec![start, end];
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FingerParams {
        FingerParams { mt: 3.0, fw: 10.0, fg: 1.0 }
    }

    #[test]
    fn short_edge_collapses_to_corner_only() {
        let anchors = axis_anchor_points(5.0, params());
        assert_eq!(anchors, vec![0.0, 5.0]);
    }

    #[test]
    fn anchors_span_full_length() {
        let anchors = axis_anchor_points(100.0, params());
        assert_eq!(*anchors.first().unwrap(), 0.0);
        assert_eq!(*anchors.last().unwrap(), 100.0);
        assert!(anchors.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn straight_gender_returns_endpoints_only() {
        let anchors = axis_anchor_points(100.0, params());
        let path = finger_joint_path(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            (0.0, 100.0),
            &anchors,
            Gender::Straight,
            3.0,
            Vec2::new(0.0, -1.0),
        );
        assert_eq!(path, vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
    }

    #[test]
    fn male_and_female_are_mirror_images_at_shared_anchors() {
        let p = params();
        let anchors = axis_anchor_points(100.0, p);
        let outward = Vec2::new(0.0, -1.0);
        let male = finger_joint_path(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            (0.0, 100.0),
            &anchors,
            Gender::Male,
            p.mt,
            outward,
        );
        let female = finger_joint_path(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            (0.0, 100.0),
            &anchors,
            Gender::Female,
            p.mt,
            outward,
        );
        assert_eq!(male.len(), female.len());
        for (m, f) in male.iter().zip(female.iter()) {
            assert!((m.x - f.x).abs() < 1e-9);
            assert!((m.y + f.y).abs() < 1e-9 || (m.y - f.y).abs() < 1e-9);
        }
        let male_max_y = male.iter().fold(f64::MIN, |acc, p| acc.max(p.y.abs()));
        assert!((male_max_y - p.mt).abs() < 1e-9);
    }

    #[test]
    fn all_segments_are_axis_aligned_steps() {
        let p = params();
        let anchors = axis_anchor_points(100.0, p);
        let path = finger_joint_path(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            (0.0, 100.0),
            &anchors,
            Gender::Male,
            p.mt,
            Vec2::new(0.0, -1.0),
        );
        for w in path.windows(2) {
            let dx = (w[1].x - w[0].x).abs();
            let dy = (w[1].y - w[0].y).abs();
            assert!(dx < 1e-9 || dy < 1e-9, "segment is diagonal: {:?} -> {:?}", w[0], w[1]);
        }
    }
}
