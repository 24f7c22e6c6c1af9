//! Safe area computation: the region of a panel body where a user cutout may
//! be placed without weakening a joint, and classification of a drawn
//! cutout polygon against it.

use boxen_geom::{polygon, Point};
use boxen_joints::EdgeStatus;

use crate::overlay::Edge;

/// An axis-aligned rectangle, used for the cheap-containment representation
/// of a safe area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    fn contains_rect(&self, other: Rect) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}

/// Classification of a drawn shape against the current safe area, per the
/// path-analysis rule.
#[derive(Clone, Debug, PartialEq)]
pub enum PathClass {
    /// Strictly inside: becomes a subtractive hole.
    SubtractiveCutout,
    /// Touches the border of a joint edge's exclusion strip: rejected.
    RejectedTouchesJoint,
    /// Touches an open body edge: becomes a notch in the outline.
    OpenEdgeNotch(Edge),
    /// Extends past an open body edge in additive mode: grows the outline.
    AdditiveExtend(Edge),
}

/// Compute the safe area of a panel body as a set of axis-aligned rectangles:
/// the body rectangle, shrunk by a `2*mt` strip along every joint edge and by
/// `mt` clearance around every hole already present.
pub fn compute_safe_area(width: f64, height: f64, mt: f64, edge_status: [(Edge, EdgeStatus); 4], holes: &[Vec<Point>]) -> Vec<Rect> {
    let strip = |edge: Edge| -> f64 {
        let status = edge_status.iter().find(|(e, _)| *e == edge).map(|(_, s)| *s);
        match status {
            Some(EdgeStatus::Open) => 0.0,
            _ => 2.0 * mt,
        }
    };

    let inset_left = strip(Edge::Left);
    let inset_right = strip(Edge::Right);
    let inset_bottom = strip(Edge::Bottom);
    let inset_top = strip(Edge::Top);

    let body = Rect {
        x0: inset_left,
        y0: inset_bottom,
        x1: width - inset_right,
        y1: height - inset_top,
    };
    if body.x1 <= body.x0 || body.y1 <= body.y0 {
        return Vec::new();
    }

    // Subtract an `mt`-clearance margin around every existing hole by
    // splitting the body rectangle into the (up to four) strips surrounding
    // each hole's expanded bounding box. This is a conservative
    // approximation (it can under-cover concave hole layouts) rather than a
    // full rectilinear polygon difference.
    let mut rects = vec![body];
    for hole in holes {
        let Some((min, max)) = polygon::bounds_of(hole) else {
            continue;
        };
        let excluded = Rect {
            x0: min.x - mt,
            y0: min.y - mt,
            x1: max.x + mt,
            y1: max.y + mt,
        };
        rects = rects.into_iter().flat_map(|r| subtract_rect(r, excluded)).collect();
    }
    rects
}

fn subtract_rect(r: Rect, hole: Rect) -> Vec<Rect> {
    if hole.x1 <= r.x0 || hole.x0 >= r.x1 || hole.y1 <= r.y0 || hole.y0 >= r.y1 {
        return vec![r];
    }
    let mut out = Vec::new();
    if hole.y0 > r.y0 {
        out.push(Rect { x0: r.x0, y0: r.y0, x1: r.x1, y1: hole.y0 });
    }
    if hole.y1 < r.y1 {
        out.push(Rect { x0: r.x0, y0: hole.y1, x1: r.x1, y1: r.y1 });
    }
    let mid_y0 = hole.y0.max(r.y0);
    let mid_y1 = hole.y1.min(r.y1);
    if hole.x0 > r.x0 {
        out.push(Rect { x0: r.x0, y0: mid_y0, x1: hole.x0, y1: mid_y1 });
    }
    if hole.x1 < r.x1 {
        out.push(Rect { x0: hole.x1, y0: mid_y0, x1: r.x1, y1: mid_y1 });
    }
    out
}

/// Whether `point` lies in any rectangle of `safe_area`.
pub fn point_in_safe_area(safe_area: &[Rect], point: Point) -> bool {
    safe_area.iter().any(|r| r.contains_point(point))
}

/// Whether every vertex of `shape` lies strictly inside one rectangle of
/// `safe_area` and the shape's bounding box is fully covered by it.
pub fn shape_strictly_inside(safe_area: &[Rect], shape: &[Point]) -> bool {
    let Some((min, max)) = polygon::bounds_of(shape) else {
        return false;
    };
    let bbox = Rect { x0: min.x, y0: min.y, x1: max.x, y1: max.y };
    safe_area.iter().any(|r| r.contains_rect(bbox)) && shape.iter().all(|p| point_in_safe_area(safe_area, *p))
}

/// Classify a drawn shape against the panel's current outline and safe area.
///
/// `body` is `(width, height)`; `additive_mode` is the caller-set flag that
/// distinguishes an "extend the outline" drawing from a plain out-of-bounds
/// one on an open edge.
pub fn classify_path(
    width: f64,
    height: f64,
    edge_status: [(Edge, EdgeStatus); 4],
    safe_area: &[Rect],
    shape: &[Point],
    additive_mode: bool,
) -> PathClass {
    if shape_strictly_inside(safe_area, shape) {
        return PathClass::SubtractiveCutout;
    }

    for &(edge, status) in &edge_status {
        if status == EdgeStatus::Open && touches_edge(width, height, edge, shape) {
            return if additive_mode && crosses_edge(width, height, edge, shape) {
                PathClass::AdditiveExtend(edge)
            } else {
                PathClass::OpenEdgeNotch(edge)
            };
        }
    }
    PathClass::RejectedTouchesJoint
}

fn touches_edge(width: f64, height: f64, edge: Edge, shape: &[Point]) -> bool {
    shape.iter().any(|p| match edge {
        Edge::Bottom => p.y <= boxen_geom::EPS,
        Edge::Top => p.y >= height - boxen_geom::EPS,
        Edge::Left => p.x <= boxen_geom::EPS,
        Edge::Right => p.x >= width - boxen_geom::EPS,
    })
}

fn crosses_edge(width: f64, height: f64, edge: Edge, shape: &[Point]) -> bool {
    shape.iter().any(|p| match edge {
        Edge::Bottom => p.y < -boxen_geom::EPS,
        Edge::Top => p.y > height + boxen_geom::EPS,
        Edge::Left => p.x < -boxen_geom::EPS,
        Edge::Right => p.x > width + boxen_geom::EPS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_joint(status: EdgeStatus) -> [(Edge, EdgeStatus); 4] {
        [
            (Edge::Top, status),
            (Edge::Right, status),
            (Edge::Bottom, status),
            (Edge::Left, status),
        ]
    }

    #[test]
    fn safe_area_shrinks_by_two_mt_on_every_joint_edge() {
        let rects = compute_safe_area(100.0, 80.0, 3.0, all_joint(EdgeStatus::MaleJoint), &[]);
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert_eq!(r.x0, 6.0);
        assert_eq!(r.y0, 6.0);
        assert_eq!(r.x1, 94.0);
        assert_eq!(r.y1, 74.0);
    }

    #[test]
    fn open_edge_contributes_no_inset() {
        let mut statuses = all_joint(EdgeStatus::MaleJoint);
        statuses[2] = (Edge::Bottom, EdgeStatus::Open);
        let rects = compute_safe_area(100.0, 80.0, 3.0, statuses, &[]);
        assert_eq!(rects[0].y0, 0.0);
    }

    #[test]
    fn centered_small_rect_is_subtractive() {
        let rects = compute_safe_area(100.0, 80.0, 3.0, all_joint(EdgeStatus::MaleJoint), &[]);
        let shape = vec![
            Point::new(40.0, 30.0),
            Point::new(60.0, 30.0),
            Point::new(60.0, 50.0),
            Point::new(40.0, 50.0),
        ];
        let class = classify_path(100.0, 80.0, all_joint(EdgeStatus::MaleJoint), &rects, &shape, false);
        assert_eq!(class, PathClass::SubtractiveCutout);
    }

    #[test]
    fn shape_touching_joint_edge_border_is_rejected() {
        let rects = compute_safe_area(100.0, 80.0, 3.0, all_joint(EdgeStatus::MaleJoint), &[]);
        let shape = vec![
            Point::new(0.0, 30.0),
            Point::new(10.0, 30.0),
            Point::new(10.0, 50.0),
            Point::new(0.0, 50.0),
        ];
        let class = classify_path(100.0, 80.0, all_joint(EdgeStatus::MaleJoint), &rects, &shape, false);
        assert_eq!(class, PathClass::RejectedTouchesJoint);
    }

    #[test]
    fn shape_touching_open_edge_is_a_notch() {
        let mut statuses = all_joint(EdgeStatus::MaleJoint);
        statuses[2] = (Edge::Bottom, EdgeStatus::Open);
        let rects = compute_safe_area(100.0, 80.0, 3.0, statuses, &[]);
        let shape = vec![
            Point::new(40.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(60.0, 10.0),
            Point::new(40.0, 10.0),
        ];
        let class = classify_path(100.0, 80.0, statuses, &rects, &shape, false);
        assert_eq!(class, PathClass::OpenEdgeNotch(Edge::Bottom));
    }
}
