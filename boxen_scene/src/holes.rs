//! Hole generator: cross-lap slots, sub-assembly wall slots, and user
//! cutouts, each reduced to a simple closed polygon in panel-local
//! coordinates with winding opposite the outline.

use std::f64::consts::TAU;

use boxen_boolean::{boolean_op, BooleanError, ClipOp};
use boxen_geom::polygon::Winding;
use boxen_geom::{polygon, Point};

use crate::overlay::{Cutout, CutoutEntry};
use crate::safe_area::{classify_path, PathClass, Rect};

/// A rectangular notch cut inward from one long edge of a panel, the shape
/// shared by both cross-lap slots and sub-assembly wall slots.
///
/// `length`/`span` describe the panel's extent along its own length axis and
/// the perpendicular (depth) axis; `center`/`width` place the notch along
/// the length axis; `depth` is how far it cuts in from whichever edge
/// `from_far_side` selects.
pub fn edge_notch(length: f64, span: f64, center: f64, width: f64, depth: f64, from_far_side: bool) -> Vec<Point> {
    let half = width / 2.0;
    let x0 = (center - half).clamp(0.0, length);
    let x1 = (center + half).clamp(0.0, length);
    let (y0, y1) = if from_far_side {
        (span - depth, span)
    } else {
        (0.0, depth)
    };
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

/// Cross-lap slot for a divider panel at one of its crossings: half-depth of
/// the shorter of the two crossing dividers' spans, width `mt`, centered on
/// the shared anchor position along the divider's length.
///
/// `alternate` implements the "cross-laps alternate so neither dominates"
/// rule: the caller toggles it per crossing so consecutive crossings on the
/// same divider don't all notch from the same side.
pub fn cross_lap_slot(divider_length: f64, divider_span: f64, position: f64, crossing_depth: f64, mt: f64, alternate: bool) -> Vec<Point> {
    edge_notch(divider_length, divider_span, position, mt, crossing_depth / 2.0, alternate)
}

/// Slot cut into a face panel where a sub-assembly's outer wall passes
/// through it: `mt` wide, the wall's full extent deep.
pub fn sub_assembly_wall_slot(face_length: f64, face_span: f64, position: f64, wall_extent: f64, mt: f64, from_far_side: bool) -> Vec<Point> {
    edge_notch(face_length, face_span, position, mt, wall_extent, from_far_side)
}

fn cutout_to_polygon(cutout: &Cutout) -> Vec<Point> {
    match cutout {
        Cutout::Rect { x, y, w, h } => vec![
            Point::new(*x, *y),
            Point::new(x + w, *y),
            Point::new(x + w, y + h),
            Point::new(*x, y + h),
        ],
        Cutout::Circle { cx, cy, r, segments } => {
            let n = (*segments).max(3);
            (0..n)
                .map(|i| {
                    let a = TAU * (i as f64) / (n as f64);
                    Point::new(cx + r * a.cos(), cy + r * a.sin())
                })
                .collect()
        }
        Cutout::Polygon { points } => points.clone(),
    }
}

/// Classify and apply every cutout on a panel: a `SubtractiveCutout`
/// becomes a hole, `OpenEdgeNotch`/`AdditiveExtend` instead modify `outline`
/// itself in place (a difference or a union against the cutout shape,
/// respectively), and `RejectedTouchesJoint` is dropped with a warning since
/// it names a drawing the caller should not have been able to produce.
///
/// `outline`'s winding is re-normalized after every boolean op, so callers
/// should re-derive their own `winding_of` from it rather than reuse a value
/// captured before this call. The second return value is whether any cutout
/// actually changed `outline` (a `SubtractiveCutout`-only panel leaves it
/// untouched), which callers use to decide whether to refresh their
/// modified-outline cache for this panel.
pub fn apply_cutouts(
    cutouts: &[CutoutEntry],
    outline: &mut Vec<Point>,
    width: f64,
    height: f64,
    edge_status: [(crate::overlay::Edge, boxen_joints::EdgeStatus); 4],
    safe_area: &[Rect],
    outline_winding: Winding,
) -> (Vec<Vec<Point>>, bool) {
    let mut holes = Vec::new();
    let mut modified = false;
    for entry in cutouts {
        let shape = cutout_to_polygon(&entry.shape);
        let class = classify_path(width, height, edge_status, safe_area, &shape, entry.additive);
        match class {
            PathClass::SubtractiveCutout => holes.push(finalize_hole(shape, outline_winding)),
            PathClass::RejectedTouchesJoint => {
                log::warn!("cutout touches a joint edge's exclusion strip; dropping it");
            }
            PathClass::OpenEdgeNotch(edge) => match boolean_op(outline, &shape, ClipOp::Difference) {
                Ok(result) => {
                    apply_boolean_result(outline, result);
                    modified = true;
                }
                Err(err) => warn_boolean_failure(edge, "notch", err),
            },
            PathClass::AdditiveExtend(edge) => match boolean_op(outline, &shape, ClipOp::Union) {
                Ok(result) => {
                    apply_boolean_result(outline, result);
                    modified = true;
                }
                Err(err) => warn_boolean_failure(edge, "additive extend", err),
            },
        }
    }
    (holes, modified)
}

fn apply_boolean_result(outline: &mut Vec<Point>, mut result: Vec<Point>) {
    polygon::ensure_winding(&mut result, polygon::winding_of(outline));
    *outline = polygon::dedupe_close(&result, boxen_geom::EPS);
}

fn warn_boolean_failure(edge: crate::overlay::Edge, kind: &str, err: BooleanError) {
    log::warn!("{kind} cutout on {edge:?} edge produced no usable outline ({err}); leaving outline unchanged");
}

/// Normalize a raw hole polygon: dedupe near-duplicate vertices and force
/// winding opposite the outline's, per the engine's hole-emission rule.
pub fn finalize_hole(mut points: Vec<Point>, outline_winding: Winding) -> Vec<Point> {
    points = polygon::dedupe_close(&points, boxen_geom::EPS);
    let opposite = match outline_winding {
        Winding::Clockwise => Winding::CounterClockwise,
        Winding::CounterClockwise => Winding::Clockwise,
    };
    polygon::ensure_winding(&mut points, opposite);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_notch_cuts_from_requested_side() {
        let notch = edge_notch(100.0, 20.0, 50.0, 3.0, 8.0, false);
        assert!(notch.iter().all(|p| p.y <= 8.0));
        let notch = edge_notch(100.0, 20.0, 50.0, 3.0, 8.0, true);
        assert!(notch.iter().all(|p| p.y >= 12.0));
    }

    #[test]
    fn edge_notch_is_centered_and_mt_wide() {
        let notch = edge_notch(100.0, 20.0, 50.0, 3.0, 8.0, false);
        let xs: Vec<f64> = notch.iter().map(|p| p.x).collect();
        assert!((xs.iter().cloned().fold(f64::MIN, f64::max) - xs.iter().cloned().fold(f64::MAX, f64::min) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn finalize_hole_winds_opposite_the_outline() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let hole = finalize_hole(square.clone(), Winding::CounterClockwise);
        assert_eq!(polygon::winding_of(&hole), Winding::Clockwise);
    }

    #[test]
    fn circle_cutout_has_requested_segment_count() {
        let poly = cutout_to_polygon(&Cutout::Circle { cx: 0.0, cy: 0.0, r: 5.0, segments: 24 });
        assert_eq!(poly.len(), 24);
    }

    fn square_outline(width: f64, height: f64) -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ]
    }

    fn all_joint(status: boxen_joints::EdgeStatus) -> [(crate::overlay::Edge, boxen_joints::EdgeStatus); 4] {
        use crate::overlay::Edge;
        [(Edge::Top, status), (Edge::Right, status), (Edge::Bottom, status), (Edge::Left, status)]
    }

    #[test]
    fn centered_cutout_becomes_a_subtractive_hole_and_leaves_outline_alone() {
        let mut outline = square_outline(100.0, 80.0);
        let edge_status = all_joint(boxen_joints::EdgeStatus::MaleJoint);
        let safe_area = crate::safe_area::compute_safe_area(100.0, 80.0, 3.0, edge_status, &[]);
        let entries = vec![CutoutEntry { shape: Cutout::Rect { x: 40.0, y: 30.0, w: 20.0, h: 20.0 }, additive: false }];

        let (holes, modified) = apply_cutouts(&entries, &mut outline, 100.0, 80.0, edge_status, &safe_area, Winding::CounterClockwise);

        assert_eq!(holes.len(), 1);
        assert!(!modified);
        assert_eq!(outline, square_outline(100.0, 80.0));
    }

    #[test]
    fn cutout_touching_a_joint_edge_is_rejected_without_changing_outline() {
        let mut outline = square_outline(100.0, 80.0);
        let edge_status = all_joint(boxen_joints::EdgeStatus::MaleJoint);
        let safe_area = crate::safe_area::compute_safe_area(100.0, 80.0, 3.0, edge_status, &[]);
        let entries = vec![CutoutEntry { shape: Cutout::Rect { x: 0.0, y: 30.0, w: 10.0, h: 20.0 }, additive: false }];

        let (holes, modified) = apply_cutouts(&entries, &mut outline, 100.0, 80.0, edge_status, &safe_area, Winding::CounterClockwise);

        assert!(holes.is_empty());
        assert!(!modified);
        assert_eq!(outline, square_outline(100.0, 80.0));
    }

    #[test]
    fn cutout_on_open_edge_notches_the_outline() {
        let mut outline = square_outline(100.0, 80.0);
        let mut edge_status = all_joint(boxen_joints::EdgeStatus::MaleJoint);
        edge_status[2] = (crate::overlay::Edge::Bottom, boxen_joints::EdgeStatus::Open);
        let safe_area = crate::safe_area::compute_safe_area(100.0, 80.0, 3.0, edge_status, &[]);
        let entries = vec![CutoutEntry { shape: Cutout::Rect { x: 40.0, y: 0.0, w: 20.0, h: 10.0 }, additive: false }];

        let (holes, modified) = apply_cutouts(&entries, &mut outline, 100.0, 80.0, edge_status, &safe_area, Winding::CounterClockwise);

        assert!(holes.is_empty());
        assert!(modified);
        assert!(outline.iter().any(|p| p.y > boxen_geom::EPS && p.y < 10.0 + boxen_geom::EPS));
    }
}
