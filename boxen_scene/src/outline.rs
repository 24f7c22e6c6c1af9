//! Panel outline synthesis: edge extension, custom edge paths, finger joints,
//! and corner fillets composed into one closed polyline per panel.
//!
//! Each of a panel's four sides is handled independently and in local
//! panel-plane coordinates (`(0, 0)` at one corner, `width` along the first
//! axis, `height` along the second); the caller is responsible for handing
//! each side the `(anchors, axis_range)` pair that lines it up with whatever
//! panel it mates with in 3D — this module only guarantees that, given
//! matching inputs, the two sides produce coincident teeth.

use std::f64::consts::{FRAC_PI_2, PI};

use boxen_geom::{normalize, polygon, EdgePathPoint, Point, Vec2, EPS};
use boxen_joints::{finger_joint_path, EdgeStatus, Gender};

use crate::assembly::{CornerFinish, FeetConfig};
use crate::overlay::{CustomEdgePath, Edge};
use crate::panel::CornerEligibility;

/// One side's full input: its resolved status, requested extension, and
/// (for a joint edge) the shared anchor array and absolute axis range that
/// line its teeth up with whatever panel sits across the 3D edge.
#[derive(Clone, Debug)]
pub struct EdgeInput {
    pub status: EdgeStatus,
    pub extension: f64,
    pub custom_path: Option<CustomEdgePath>,
    pub anchors: Vec<f64>,
    pub axis_range: (f64, f64),
}

impl EdgeInput {
    fn gender(&self) -> Gender {
        match self.status {
            EdgeStatus::Open => Gender::Straight,
            EdgeStatus::MaleJoint => Gender::Male,
            EdgeStatus::FemaleJoint => Gender::Female,
        }
    }

    /// A male edge's tabs always project a fixed `mt`; an extension request
    /// on one only makes sense for open or female edges.
    fn clamped_extension(&self) -> f64 {
        if self.status == EdgeStatus::MaleJoint {
            0.0
        } else {
            self.extension
        }
    }
}

/// Trace order around the panel, starting bottom-left and going
/// counter-clockwise. Index `i`'s edge starts at the corner shared with
/// edge `i - 1` and ends at the corner shared with edge `i + 1`.
const TRACE_ORDER: [Edge; 4] = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left];

struct EdgeGeometry {
    start: Point,
    end: Point,
    outward: Vec2,
}

fn edge_geometry(edge: Edge, width: f64, height: f64) -> EdgeGeometry {
    match edge {
        Edge::Bottom => EdgeGeometry {
            start: Point::new(0.0, 0.0),
            end: Point::new(width, 0.0),
            outward: Vec2::new(0.0, -1.0),
        },
        Edge::Right => EdgeGeometry {
            start: Point::new(width, 0.0),
            end: Point::new(width, height),
            outward: Vec2::new(1.0, 0.0),
        },
        Edge::Top => EdgeGeometry {
            start: Point::new(width, height),
            end: Point::new(0.0, height),
            outward: Vec2::new(0.0, 1.0),
        },
        Edge::Left => EdgeGeometry {
            start: Point::new(0.0, height),
            end: Point::new(0.0, 0.0),
            outward: Vec2::new(-1.0, 0.0),
        },
    }
}

fn edge_length(edge: Edge, width: f64, height: f64) -> f64 {
    match edge {
        Edge::Bottom | Edge::Top => width,
        Edge::Left | Edge::Right => height,
    }
}

/// Full input to synthesize one panel's outline.
#[derive(Clone, Debug)]
pub struct OutlineInput {
    pub width: f64,
    pub height: f64,
    pub mt: f64,
    /// Indexed by [`TRACE_ORDER`]: `[Bottom, Right, Top, Left]`.
    pub edges: [EdgeInput; 4],
    /// Per-corner override, indexed by the edge that *follows* the corner in
    /// trace order (so index 0 is the corner between Left and Bottom).
    pub corner_fillet: [Option<f64>; 4],
    /// Fallback radius applied to every eligible corner with no override.
    pub uniform_fillet: Option<f64>,
}

fn base_edge_path(width: f64, height: f64, mt: f64, edge: Edge, spec: &EdgeInput, geom: &EdgeGeometry) -> Vec<Point> {
    if let Some(custom) = &spec.custom_path {
        let len = edge_length(edge, width, height);
        let dir = (geom.end - geom.start) / len;
        let points: Vec<_> = if custom.mirrored {
            custom.points.iter().map(|p| p.mirrored()).collect()
        } else {
            custom.points.clone()
        };
        return points
            .iter()
            .map(|p| geom.start + dir * (p.t * len) + geom.outward * p.offset)
            .collect();
    }

    if spec.status == EdgeStatus::Open {
        return vec![geom.start, geom.end];
    }

    finger_joint_path(
        geom.start,
        geom.end,
        spec.axis_range,
        &spec.anchors,
        spec.gender(),
        mt,
        geom.outward,
    )
}

/// When both edges meeting at a corner extend outward, the female one of
/// the pair yields by `mt` right at that corner so its material doesn't
/// overlap the other edge's extension.
fn extension_yield(mt: f64, at_status: EdgeStatus, at_ext: f64, other_status: EdgeStatus, other_ext: f64) -> f64 {
    if at_ext > 0.0 && other_ext > 0.0 && at_status == EdgeStatus::FemaleJoint {
        (at_ext - mt).max(0.0)
    } else {
        at_ext
    }
}

/// Lower a feet preset into the mirrored custom edge path it stands for:
/// flat from the corner out to `inset`, stepped down by `height` across
/// `width`, flat again to the midpoint, then its mirror image for the
/// second half. `slope_angle` (radians) replaces the vertical step with a
/// sloped one; a `Rounded` `corner_finish` takes precedence over a slope
/// and fillets the step's inner corners instead.
pub fn feet_edge_path(feet: &FeetConfig, length: f64) -> CustomEdgePath {
    let half = feet_half_points(feet, length.max(EPS));
    let mut points = half.clone();
    for p in half.iter().rev().skip(1) {
        points.push(EdgePathPoint::new(1.0 - p.t, p.offset));
    }
    CustomEdgePath { points, mirrored: false }
}

fn feet_half_points(feet: &FeetConfig, length: f64) -> Vec<EdgePathPoint> {
    let height = feet.height.max(0.0);
    let width = feet.width.max(0.0);
    let inset = feet.inset.max(0.0);
    let t_in = (inset / length).clamp(0.0, 0.5);
    let t_out = ((inset + width) / length).clamp(t_in, 0.5);

    let mut points = vec![EdgePathPoint::new(0.0, 0.0), EdgePathPoint::new(t_in, 0.0)];

    let radius = match feet.corner_finish {
        Some(CornerFinish::Rounded(r)) => r.max(0.0).min(height).min((t_out - t_in) * length / 2.0),
        _ => 0.0,
    };

    const ARC_SEGMENTS: usize = 3;
    if radius > EPS {
        let dt = radius / length;
        points.push(EdgePathPoint::new(t_in, height - radius));
        for i in 1..=ARC_SEGMENTS {
            let a = FRAC_PI_2 * (i as f64 / ARC_SEGMENTS as f64);
            points.push(EdgePathPoint::new(t_in + dt * (1.0 - a.cos()), height - radius * (1.0 - a.sin())));
        }
        points.push(EdgePathPoint::new(t_out - dt, height));
        for i in 1..=ARC_SEGMENTS {
            let a = FRAC_PI_2 * (i as f64 / ARC_SEGMENTS as f64);
            points.push(EdgePathPoint::new(t_out - dt * (1.0 - a.sin()), height - radius * (1.0 - a.cos())));
        }
    } else {
        let run = match feet.slope_angle {
            Some(angle) if angle > EPS && angle < FRAC_PI_2 => (height / angle.tan() / length).min((t_out - t_in) / 2.0).max(0.0),
            _ => 0.0,
        };
        points.push(EdgePathPoint::new(t_in + run, height));
        points.push(EdgePathPoint::new(t_out - run, height));
    }

    points.push(EdgePathPoint::new(t_out, 0.0));
    points.push(EdgePathPoint::new(0.5, 0.0));
    points
}

/// Synthesize a panel's outline and report which of its vertices are
/// eligible for a corner fillet (and the largest radius that would not
/// encroach on the adjacent joints).
pub fn synthesize_outline(input: &OutlineInput) -> (Vec<Point>, Vec<CornerEligibility>) {
    let mut raw: Vec<Vec<Point>> = TRACE_ORDER
        .iter()
        .enumerate()
        .map(|(i, &edge)| {
            let geom = edge_geometry(edge, input.width, input.height);
            let mut path = base_edge_path(input.width, input.height, input.mt, edge, &input.edges[i], &geom);
            if path.len() < 2 {
                path = vec![geom.start, geom.end];
            }
            path
        })
        .collect();

    let mut nominal_corners = [Point::ORIGIN; 4];
    for i in 0..4 {
        let edge = TRACE_ORDER[i];
        let prev_edge = TRACE_ORDER[(i + 3) % 4];
        let next_edge = TRACE_ORDER[(i + 1) % 4];
        let own_outward = edge_geometry(edge, input.width, input.height).outward;
        let prev_outward = edge_geometry(prev_edge, input.width, input.height).outward;
        let next_outward = edge_geometry(next_edge, input.width, input.height).outward;
        let own_status = input.edges[i].status;
        let prev_status = input.edges[(i + 3) % 4].status;
        let next_status = input.edges[(i + 1) % 4].status;
        let own_ext = input.edges[i].clamped_extension();
        let prev_ext = input.edges[(i + 3) % 4].clamped_extension();
        let next_ext = input.edges[(i + 1) % 4].clamped_extension();

        // Corner yielding: at each corner where both meeting edges extend,
        // the female one steps back by `mt` so the two extensions don't
        // overlap. Only the corner point moves; the rest of the edge keeps
        // its full extension.
        let own_at_prev_corner = extension_yield(input.mt, own_status, own_ext, prev_status, prev_ext);
        let prev_at_corner = extension_yield(input.mt, prev_status, prev_ext, own_status, own_ext);
        let own_at_next_corner = extension_yield(input.mt, own_status, own_ext, next_status, next_ext);
        let next_at_corner = extension_yield(input.mt, next_status, next_ext, own_status, own_ext);

        let path = &mut raw[i];
        let last = path.len() - 1;
        for (idx, p) in path.iter_mut().enumerate() {
            if idx == 0 {
                *p += own_outward * own_at_prev_corner;
                *p += prev_outward * prev_at_corner;
            } else if idx == last {
                *p += own_outward * own_at_next_corner;
                *p += next_outward * next_at_corner;
            } else {
                *p += own_outward * own_ext;
            }
        }
        nominal_corners[i] = path[0];
    }

    let mut assembled = Vec::new();
    for path in &raw {
        assembled.extend_from_slice(path);
    }
    let mut outline = polygon::dedupe_close(&assembled, EPS);
    polygon::ensure_winding(&mut outline, polygon::Winding::CounterClockwise);

    // A nominal corner is eligible for a fillet only if neither edge meeting
    // there is a male joint (its tabs own that corner).
    let mut eligible_corner = [true; 4];
    for i in 0..4 {
        let prev_status = input.edges[(i + 3) % 4].status;
        let own_status = input.edges[i].status;
        eligible_corner[i] = prev_status != EdgeStatus::MaleJoint && own_status != EdgeStatus::MaleJoint;
    }

    apply_corner_fillets(outline, nominal_corners, eligible_corner, input.corner_fillet, input.uniform_fillet)
}

fn angle_of(center: Point, p: Point) -> f64 {
    (p.y - center.y).atan2(p.x - center.x)
}

fn arc_points(center: Point, radius: f64, from: Point, to: Point, segments: usize) -> Vec<Point> {
    let a0 = angle_of(center, from);
    let a1 = angle_of(center, to);
    let mut delta = a1 - a0;
    while delta > PI {
        delta -= 2.0 * PI;
    }
    while delta < -PI {
        delta += 2.0 * PI;
    }
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let a = a0 + delta * t;
            Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

fn apply_corner_fillets(
    outline: Vec<Point>,
    nominal_corners: [Point; 4],
    eligible_corner: [bool; 4],
    overrides: [Option<f64>; 4],
    uniform: Option<f64>,
) -> (Vec<Point>, Vec<CornerEligibility>) {
    let n = outline.len();
    let corner_at = |p: Point| -> Option<usize> {
        nominal_corners.iter().position(|nc| p.distance(*nc) < EPS * 10.0)
    };

    let mut result = Vec::with_capacity(n + 32);
    let mut eligibility = Vec::new();

    for i in 0..n {
        let v = outline[i];
        let prev = outline[(i + n - 1) % n];
        let next = outline[(i + 1) % n];

        let Some(k) = corner_at(v) else {
            result.push(v);
            continue;
        };
        // The adjacent joint geometry bounds how far a fillet may eat into
        // either side of the corner without overlapping a tooth.
        let max_radius = v.distance(prev).min(v.distance(next));
        eligibility.push(CornerEligibility {
            vertex_index: result.len(),
            eligible: eligible_corner[k],
            max_radius,
        });

        if !eligible_corner[k] {
            result.push(v);
            continue;
        }
        let requested = overrides[k].or(uniform);
        let Some(mut radius) = requested else {
            result.push(v);
            continue;
        };
        if radius > max_radius {
            log::warn!(
                "corner fillet radius {radius} exceeds the {max_radius} bound near the joint; clamping"
            );
            radius = max_radius;
        }
        if radius <= EPS {
            result.push(v);
            continue;
        }

        let d_in = normalize(v - prev);
        let d_out = normalize(next - v);
        let p1 = v - d_in * radius;
        let p2 = v + d_out * radius;
        let center = p1 + d_out * radius;
        result.extend(arc_points(center, radius, p1, p2, 8));
    }

    (polygon::dedupe_close(&result, EPS), eligibility)
}
