//! Greiner-Hormann polygon clipping over integer-scaled coordinates.
//!
//! Scope: both input polygons must be simple (non-self-intersecting) and
//! must actually cross each other — this module backs panel outline/safe-area
//! modification, where a user shape always crosses the current boundary
//! (see the safe-area path classification that routes here). Disjoint or
//! fully-nested inputs, and collinear-overlapping edges, are not handled and
//! surface as [`BooleanError`] rather than guessed at.

use boxen_geom::polygon::point_in_polygon;
use boxen_geom::Point;

use crate::int_point::IntPoint;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipOp {
    Union,
    Difference,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BooleanError {
    /// The two polygons never cross, so there is no boundary to trace.
    NoIntersection,
    /// Tracing produced zero or more than one closed contour.
    NonSimpleResult { contours: usize },
    /// The traced contour has fewer than 3 vertices.
    DegenerateResult,
}

impl core::fmt::Display for BooleanError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoIntersection => write!(f, "polygons do not intersect"),
            Self::NonSimpleResult { contours } => {
                write!(f, "expected exactly one result contour, got {contours}")
            }
            Self::DegenerateResult => write!(f, "result contour has fewer than 3 vertices"),
        }
    }
}

impl std::error::Error for BooleanError {}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum ListId {
    Subject,
    Clip,
}

#[derive(Clone, Debug)]
struct Vertex {
    p: IntPoint,
    is_intersection: bool,
    neighbor: Option<usize>,
    entry: bool,
    visited: bool,
    next: usize,
    prev: usize,
}

fn build_initial(points: &[IntPoint]) -> Vec<Vertex> {
    let n = points.len();
    (0..n)
        .map(|i| Vertex {
            p: points[i],
            is_intersection: false,
            neighbor: None,
            entry: false,
            visited: false,
            next: (i + 1) % n,
            prev: (i + n - 1) % n,
        })
        .collect()
}

/// Cross product of `(a - o)` and `(b - o)`, using `i128` so products of
/// coordinate differences never overflow.
fn cross(o: IntPoint, a: IntPoint, b: IntPoint) -> i128 {
    let ax = (a.x - o.x) as i128;
    let ay = (a.y - o.y) as i128;
    let bx = (b.x - o.x) as i128;
    let by = (b.y - o.y) as i128;
    ax * by - ay * bx
}

/// Strict (open-interval) intersection of segments `a1->a2` and `b1->b2`.
/// Returns the parameter along each segment and the intersection point.
/// Collinear/parallel segments are reported as no intersection — overlapping
/// edges are outside this module's scope.
fn segment_intersection(
    a1: IntPoint,
    a2: IntPoint,
    b1: IntPoint,
    b2: IntPoint,
) -> Option<(f64, f64, IntPoint)> {
    let d1x = (a2.x - a1.x) as i128;
    let d1y = (a2.y - a1.y) as i128;
    let d2x = (b2.x - b1.x) as i128;
    let d2y = (b2.y - b1.y) as i128;
    let denom = d1x * d2y - d1y * d2x;
    if denom == 0 {
        return None;
    }
    let ex = (b1.x - a1.x) as i128;
    let ey = (b1.y - a1.y) as i128;
    let t_num = ex * d2y - ey * d2x;
    let u_num = ex * d1y - ey * d1x;
    let t = t_num as f64 / denom as f64;
    let u = u_num as f64 / denom as f64;
    if t <= 0.0 || t >= 1.0 || u <= 0.0 || u >= 1.0 {
        return None;
    }
    let x = a1.x as f64 + t * d1x as f64;
    let y = a1.y as f64 + t * d1y as f64;
    Some((t, u, IntPoint::new(x.round() as i64, y.round() as i64)))
}

struct Record {
    subject_edge: usize,
    subject_t: f64,
    clip_edge: usize,
    clip_t: f64,
    point: IntPoint,
}

fn find_intersections(subject: &[IntPoint], clip: &[IntPoint]) -> Vec<Record> {
    let mut records = Vec::new();
    let ns = subject.len();
    let nc = clip.len();
    for i in 0..ns {
        let a1 = subject[i];
        let a2 = subject[(i + 1) % ns];
        for (j, &b1) in clip.iter().enumerate() {
            let b2 = clip[(j + 1) % nc];
            if let Some((t, u, point)) = segment_intersection(a1, a2, b1, b2) {
                records.push(Record {
                    subject_edge: i,
                    subject_t: t,
                    clip_edge: j,
                    clip_t: u,
                    point,
                });
            }
        }
    }
    records
}

/// Splice intersection points into `verts` (whose first `n_original`
/// vertices are the polygon's own, linked circularly), grouped by edge and
/// ordered by parameter along the edge. Returns, for each record (by its
/// index in `records`), the new vertex index created for it.
fn splice(verts: &mut Vec<Vertex>, n_original: usize, records: &[Record], edge_of: impl Fn(&Record) -> usize, t_of: impl Fn(&Record) -> f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        edge_of(&records[a])
            .cmp(&edge_of(&records[b]))
            .then(t_of(&records[a]).partial_cmp(&t_of(&records[b])).unwrap())
    });

    let mut new_index = vec![0usize; records.len()];
    let mut cursor_by_edge: Vec<usize> = (0..n_original).collect();

    for &ri in &order {
        let rec = &records[ri];
        let edge = edge_of(rec);
        let cursor = cursor_by_edge[edge];
        let tail = verts[cursor].next;
        let idx = verts.len();
        verts.push(Vertex {
            p: rec.point,
            is_intersection: true,
            neighbor: None,
            entry: false,
            visited: false,
            next: tail,
            prev: cursor,
        });
        verts[cursor].next = idx;
        verts[tail].prev = idx;
        cursor_by_edge[edge] = idx;
        new_index[ri] = idx;
    }
    new_index
}

fn midpoint(a: IntPoint, b: IntPoint) -> Point {
    Point::new(
        (a.x as f64 + b.x as f64) / 2.0 / crate::int_point::SCALE,
        (a.y as f64 + b.y as f64) / 2.0 / crate::int_point::SCALE,
    )
}

fn mark_entries(verts: &mut [Vertex], other_polygon: &[Point]) {
    for i in 0..verts.len() {
        if !verts[i].is_intersection {
            continue;
        }
        let next = verts[i].next;
        let probe = midpoint(verts[i].p, verts[next].p);
        verts[i].entry = point_in_polygon(probe, other_polygon);
    }
}

fn point_of(cur: (ListId, usize), subj: &[Vertex], clip: &[Vertex]) -> IntPoint {
    match cur.0 {
        ListId::Subject => subj[cur.1].p,
        ListId::Clip => clip[cur.1].p,
    }
}

fn is_intersection(cur: (ListId, usize), subj: &[Vertex], clip: &[Vertex]) -> bool {
    match cur.0 {
        ListId::Subject => subj[cur.1].is_intersection,
        ListId::Clip => clip[cur.1].is_intersection,
    }
}

fn set_visited(cur: (ListId, usize), subj: &mut [Vertex], clip: &mut [Vertex]) {
    match cur.0 {
        ListId::Subject => subj[cur.1].visited = true,
        ListId::Clip => clip[cur.1].visited = true,
    }
}

fn entry_of(cur: (ListId, usize), subj: &[Vertex], clip: &[Vertex], invert_subject: bool, invert_clip: bool) -> bool {
    match cur.0 {
        ListId::Subject => subj[cur.1].entry ^ invert_subject,
        ListId::Clip => clip[cur.1].entry ^ invert_clip,
    }
}

fn neighbor_of(cur: (ListId, usize), subj: &[Vertex], clip: &[Vertex]) -> (ListId, usize) {
    match cur.0 {
        ListId::Subject => (ListId::Clip, subj[cur.1].neighbor.expect("intersection vertex must have a neighbor")),
        ListId::Clip => (ListId::Subject, clip[cur.1].neighbor.expect("intersection vertex must have a neighbor")),
    }
}

fn step(cur: (ListId, usize), forward: bool, subj: &[Vertex], clip: &[Vertex]) -> (ListId, usize) {
    let idx = match cur.0 {
        ListId::Subject => if forward { subj[cur.1].next } else { subj[cur.1].prev },
        ListId::Clip => if forward { clip[cur.1].next } else { clip[cur.1].prev },
    };
    (cur.0, idx)
}

fn trace_from(
    start: (ListId, usize),
    subj: &mut [Vertex],
    clip: &mut [Vertex],
    invert_subject: bool,
    invert_clip: bool,
) -> Vec<IntPoint> {
    let mut contour = vec![point_of(start, subj, clip)];
    set_visited(start, subj, clip);

    let mut forward = entry_of(start, subj, clip, invert_subject, invert_clip);
    let mut cur = start;
    loop {
        cur = step(cur, forward, subj, clip);
        contour.push(point_of(cur, subj, clip));
        if is_intersection(cur, subj, clip) {
            set_visited(cur, subj, clip);
            if cur == start {
                break;
            }
            let nb = neighbor_of(cur, subj, clip);
            set_visited(nb, subj, clip);
            if nb == start {
                break;
            }
            forward = entry_of(nb, subj, clip, invert_subject, invert_clip);
            cur = nb;
        }
    }
    contour
}

/// Run `op` between `subject` and `clip`, two simple closed polygons in
/// panel-local millimeters. Returns the single resulting contour.
pub fn boolean_op(subject: &[Point], clip: &[Point], op: ClipOp) -> Result<Vec<Point>, BooleanError> {
    let subject_i = crate::int_point::scale_polygon(subject);
    let clip_i = crate::int_point::scale_polygon(clip);

    let records = find_intersections(&subject_i, &clip_i);
    if records.is_empty() {
        return Err(BooleanError::NoIntersection);
    }

    let mut subj_verts = build_initial(&subject_i);
    let mut clip_verts = build_initial(&clip_i);

    let subj_new = splice(&mut subj_verts, subject_i.len(), &records, |r| r.subject_edge, |r| r.subject_t);
    let clip_new = splice(&mut clip_verts, clip_i.len(), &records, |r| r.clip_edge, |r| r.clip_t);

    for i in 0..records.len() {
        subj_verts[subj_new[i]].neighbor = Some(clip_new[i]);
        clip_verts[clip_new[i]].neighbor = Some(subj_new[i]);
    }

    mark_entries(&mut subj_verts, clip);
    mark_entries(&mut clip_verts, subject);

    let (invert_subject, invert_clip) = match op {
        ClipOp::Union => (true, true),
        ClipOp::Difference => (false, true),
    };

    let mut contours: Vec<Vec<IntPoint>> = Vec::new();
    for i in 0..subj_verts.len() {
        if subj_verts[i].is_intersection && !subj_verts[i].visited {
            let contour = trace_from((ListId::Subject, i), &mut subj_verts, &mut clip_verts, invert_subject, invert_clip);
            contours.push(contour);
        }
    }

    if contours.len() != 1 {
        return Err(BooleanError::NonSimpleResult { contours: contours.len() });
    }

    let result_i = contours.into_iter().next().unwrap();
    let result = crate::int_point::unscale_polygon(&result_i);
    let result = boxen_geom::polygon::dedupe_close(&result, boxen_geom::EPS);
    if result.len() < 3 {
        return Err(BooleanError::DegenerateResult);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f64, cy: f64, side: f64) -> Vec<Point> {
        let h = side / 2.0;
        vec![
            Point::new(cx - h, cy - h),
            Point::new(cx + h, cy - h),
            Point::new(cx + h, cy + h),
            Point::new(cx - h, cy + h),
        ]
    }

    #[test]
    fn union_of_overlapping_squares_has_more_area_than_either() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let result = boolean_op(&a, &b, ClipOp::Union).expect("squares overlap");
        let area = boxen_geom::polygon::signed_area(&result).abs();
        assert!(area > 100.0 - 1e-6);
        assert!(area < 200.0);
    }

    #[test]
    fn difference_of_overlapping_squares_is_smaller_than_subject() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let result = boolean_op(&a, &b, ClipOp::Difference).expect("squares overlap");
        let area = boxen_geom::polygon::signed_area(&result).abs();
        assert!(area > 0.0);
        assert!(area < 100.0);
    }

    #[test]
    fn disjoint_squares_decline_the_operation() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(100.0, 100.0, 10.0);
        let err = boolean_op(&a, &b, ClipOp::Union).unwrap_err();
        assert_eq!(err, BooleanError::NoIntersection);
    }
}
