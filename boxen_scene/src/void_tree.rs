//! Void tree: axis-aligned subdivision of an assembly's interior.

use boxen_arena::{Arena, NodeId};
use boxen_joints::Axis;

use crate::error::ActionError;
use crate::ids::{Id, IdGen};
use crate::Assembly;

pub type VoidId = NodeId;

/// Axis-aligned bounds in assembly-interior coordinates, shared by the whole
/// void tree of one assembly (and so directly comparable without
/// reprojection, even across sibling subtrees).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3 {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

impl Bounds3 {
    pub fn new(w: f64, h: f64, d: f64) -> Self {
        Self {
            x: (0.0, w),
            y: (0.0, h),
            z: (0.0, d),
        }
    }

    pub fn on_axis(self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn with_axis(mut self, axis: Axis, range: (f64, f64)) -> Self {
        match axis {
            Axis::X => self.x = range,
            Axis::Y => self.y = range,
            Axis::Z => self.z = range,
        }
        self
    }

    fn other_axes(axis: Axis) -> (Axis, Axis) {
        match axis {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Whether `self` and `other` overlap on the two axes perpendicular to
    /// `axis` (used to tell whether a divider plane in `self` could ever
    /// meet a divider plane recorded against `other`).
    pub fn overlaps_excluding(self, other: Self, axis: Axis) -> bool {
        let (a, b) = Self::other_axes(axis);
        ranges_overlap(self.on_axis(a), other.on_axis(a))
            && ranges_overlap(self.on_axis(b), other.on_axis(b))
    }
}

fn ranges_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 <= b.1 + boxen_geom::EPS && a.1 >= b.0 - boxen_geom::EPS
}

#[derive(Clone, Debug, PartialEq)]
pub enum Subdivision {
    Leaf,
    Linear {
        axis: Axis,
        positions: Vec<f64>,
        percentage_mode: Vec<bool>,
    },
    Grid {
        axis_a: Axis,
        positions_a: Vec<f64>,
        percentage_mode_a: Vec<bool>,
        axis_b: Axis,
        positions_b: Vec<f64>,
        percentage_mode_b: Vec<bool>,
    },
}

#[derive(Clone, Debug)]
pub struct VoidPayload {
    pub id: Id,
    pub bounds: Bounds3,
    pub subdivision: Subdivision,
    pub sub_assembly: Option<Box<Assembly>>,
}

impl VoidPayload {
    pub fn leaf(id: Id, bounds: Bounds3) -> Self {
        Self {
            id,
            bounds,
            subdivision: Subdivision::Leaf,
            sub_assembly: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.subdivision, Subdivision::Leaf) && self.sub_assembly.is_none()
    }
}

/// A recorded crossing-divider intersection, used to reject later
/// subdivisions that would place a conflicting slot nearby.
#[derive(Clone, Copy, Debug)]
pub struct CrossLapSlot {
    pub bounds: Bounds3,
    pub axis_a: Axis,
    pub position_a: f64,
    pub axis_b: Axis,
    pub position_b: f64,
}

fn validate_linear_positions(bounds: Bounds3, axis: Axis, positions: &[f64], mt: f64) -> Result<(), ActionError> {
    if positions.is_empty() {
        return Err(ActionError::InvalidArgument("subdivision requires at least one position"));
    }
    if !positions.windows(2).all(|w| w[0] < w[1]) {
        return Err(ActionError::InvalidArgument("positions must be strictly sorted"));
    }
    let (lo, hi) = bounds.on_axis(axis);
    if positions[0] <= lo + mt / 2.0 || *positions.last().unwrap() >= hi - mt / 2.0 {
        return Err(ActionError::InvalidArgument("positions must be strictly inside the void"));
    }
    if !positions.windows(2).all(|w| w[1] - w[0] > mt) {
        return Err(ActionError::InvalidArgument("positions violate minimum mt separation"));
    }
    Ok(())
}

fn linear_child_bounds(bounds: Bounds3, axis: Axis, positions: &[f64], mt: f64) -> Vec<Bounds3> {
    let (lo, hi) = bounds.on_axis(axis);
    let n = positions.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let start = if i == 0 { lo } else { positions[i - 1] + mt / 2.0 };
        let end = if i == n { hi } else { positions[i] - mt / 2.0 };
        out.push(bounds.with_axis(axis, (start, end)));
    }
    out
}

fn conflicts_with_existing_cross_laps(
    slots: &[CrossLapSlot],
    bounds: Bounds3,
    axis: Axis,
    positions: &[f64],
    mt: f64,
) -> bool {
    for slot in slots {
        if !bounds.overlaps_excluding(slot.bounds, axis) {
            continue;
        }
        let existing = if slot.axis_a == axis {
            Some(slot.position_a)
        } else if slot.axis_b == axis {
            Some(slot.position_b)
        } else {
            None
        };
        let Some(existing) = existing else { continue };
        for &p in positions {
            let delta = (p - existing).abs();
            if delta > boxen_geom::EPS && delta < 2.0 * mt {
                return true;
            }
        }
    }
    false
}

pub fn add_linear_subdivision(
    arena: &mut Arena<VoidPayload>,
    cross_laps: &[CrossLapSlot],
    void: VoidId,
    axis: Axis,
    positions: Vec<f64>,
    mt: f64,
    id_gen: &mut IdGen,
) -> Result<(), ActionError> {
    let Some(payload) = arena.get(void) else {
        return Err(ActionError::NotFound);
    };
    if !payload.is_leaf() {
        return Err(ActionError::InvalidArgument("void is not a leaf"));
    }
    let bounds = payload.bounds;
    validate_linear_positions(bounds, axis, &positions, mt)?;
    if conflicts_with_existing_cross_laps(cross_laps, bounds, axis, &positions, mt) {
        return Err(ActionError::ConflictingCrossLap);
    }

    let child_bounds = linear_child_bounds(bounds, axis, &positions, mt);
    for cb in child_bounds {
        let child = VoidPayload::leaf(id_gen.next(), cb);
        arena.insert(Some(void), child);
    }

    if let Some(payload) = arena.get_mut(void) {
        payload.subdivision = Subdivision::Linear {
            axis,
            percentage_mode: vec![false; positions.len()],
            positions,
        };
    }
    arena.mark_dirty(void);
    Ok(())
}

pub fn add_grid_subdivision(
    arena: &mut Arena<VoidPayload>,
    cross_laps: &mut Vec<CrossLapSlot>,
    void: VoidId,
    axis_a: Axis,
    positions_a: Vec<f64>,
    axis_b: Axis,
    positions_b: Vec<f64>,
    mt: f64,
    id_gen: &mut IdGen,
) -> Result<(), ActionError> {
    if axis_a == axis_b {
        return Err(ActionError::InvalidArgument("grid subdivision axes must be distinct"));
    }
    let Some(payload) = arena.get(void) else {
        return Err(ActionError::NotFound);
    };
    if !payload.is_leaf() {
        return Err(ActionError::InvalidArgument("void is not a leaf"));
    }
    let bounds = payload.bounds;
    validate_linear_positions(bounds, axis_a, &positions_a, mt)?;
    validate_linear_positions(bounds, axis_b, &positions_b, mt)?;
    if conflicts_with_existing_cross_laps(cross_laps, bounds, axis_a, &positions_a, mt)
        || conflicts_with_existing_cross_laps(cross_laps, bounds, axis_b, &positions_b, mt)
    {
        return Err(ActionError::ConflictingCrossLap);
    }

    let cells_a = linear_child_bounds(bounds, axis_a, &positions_a, mt);
    for cell_a in cells_a {
        let cells_b = linear_child_bounds(cell_a, axis_b, &positions_b, mt);
        for cell in cells_b {
            let child = VoidPayload::leaf(id_gen.next(), cell);
            arena.insert(Some(void), child);
        }
    }

    for &pa in &positions_a {
        for &pb in &positions_b {
            cross_laps.push(CrossLapSlot {
                bounds,
                axis_a,
                position_a: pa,
                axis_b,
                position_b: pb,
            });
        }
    }

    if let Some(payload) = arena.get_mut(void) {
        payload.subdivision = Subdivision::Grid {
            axis_a,
            percentage_mode_a: vec![false; positions_a.len()],
            positions_a,
            axis_b,
            percentage_mode_b: vec![false; positions_b.len()],
            positions_b,
        };
    }
    arena.mark_dirty(void);
    Ok(())
}

/// Adjust one child void for its parent divider moving: its bounds along
/// `axis` shift from `old_range` to `new_range`, unchanged on other axes. If
/// the child itself carries a further subdivision along `axis`, positions
/// marked `percentage_mode` rescale proportionally to the size change and
/// absolute positions are revalidated in place; a subdivision on any other
/// axis is untouched. Cascades no further than this one nested level.
fn rescale_child(arena: &mut Arena<VoidPayload>, id: VoidId, axis: Axis, old_range: (f64, f64), new_range: (f64, f64), mt: f64) -> Result<(), ActionError> {
    let Some(payload) = arena.get(id) else {
        return Ok(());
    };
    let bounds = payload.bounds.with_axis(axis, new_range);
    let old_len = old_range.1 - old_range.0;
    let new_len = new_range.1 - new_range.0;

    let rescale = |positions: &[f64], modes: &[bool]| -> Vec<f64> {
        positions
            .iter()
            .zip(modes.iter())
            .map(|(&p, &pct)| {
                if pct && old_len > boxen_geom::EPS {
                    new_range.0 + (p - old_range.0) * (new_len / old_len)
                } else {
                    p
                }
            })
            .collect()
    };

    let new_subdivision = match &payload.subdivision {
        Subdivision::Leaf => None,
        Subdivision::Linear { axis: a, positions, percentage_mode } if *a == axis => {
            let rescaled = rescale(positions, percentage_mode);
            validate_linear_positions(bounds, axis, &rescaled, mt)?;
            Some(Subdivision::Linear { axis: *a, positions: rescaled, percentage_mode: percentage_mode.clone() })
        }
        Subdivision::Grid { axis_a, positions_a, percentage_mode_a, axis_b, positions_b, percentage_mode_b } => {
            let mut ra = positions_a.clone();
            let mut rb = positions_b.clone();
            if *axis_a == axis {
                ra = rescale(positions_a, percentage_mode_a);
                validate_linear_positions(bounds, *axis_a, &ra, mt)?;
            }
            if *axis_b == axis {
                rb = rescale(positions_b, percentage_mode_b);
                validate_linear_positions(bounds, *axis_b, &rb, mt)?;
            }
            (*axis_a == axis || *axis_b == axis).then(|| Subdivision::Grid {
                axis_a: *axis_a,
                positions_a: ra,
                percentage_mode_a: percentage_mode_a.clone(),
                axis_b: *axis_b,
                positions_b: rb,
                percentage_mode_b: percentage_mode_b.clone(),
            })
        }
        _ => None,
    };

    if let Some(p) = arena.get_mut(id) {
        p.bounds = bounds;
        if let Some(sub) = new_subdivision {
            p.subdivision = sub;
        }
    }
    arena.mark_dirty(id);
    Ok(())
}

/// Move one position of a linear subdivision. Neighbor `mt` separation and
/// in-bounds constraints are revalidated against the new position; children
/// are re-bounded and, where their own subdivisions mark a position
/// `percentage_mode`, rescaled to preserve their fraction of the new child
/// span.
pub fn move_linear_divider(
    arena: &mut Arena<VoidPayload>,
    cross_laps: &[CrossLapSlot],
    void: VoidId,
    index: usize,
    new_position: f64,
    percentage_mode: bool,
    mt: f64,
) -> Result<(), ActionError> {
    let Some(payload) = arena.get(void) else {
        return Err(ActionError::NotFound);
    };
    let Subdivision::Linear { axis, positions, percentage_mode: modes } = payload.subdivision.clone() else {
        return Err(ActionError::InvalidArgument("void has no linear subdivision"));
    };
    if index >= positions.len() {
        return Err(ActionError::InvalidArgument("position index out of range"));
    }
    let bounds = payload.bounds;
    let mut new_positions = positions.clone();
    new_positions[index] = new_position;
    validate_linear_positions(bounds, axis, &new_positions, mt)?;
    if conflicts_with_existing_cross_laps(cross_laps, bounds, axis, &new_positions, mt) {
        return Err(ActionError::ConflictingCrossLap);
    }

    let old_children = linear_child_bounds(bounds, axis, &positions, mt);
    let new_children = linear_child_bounds(bounds, axis, &new_positions, mt);
    let child_ids = arena.children_of(void).to_vec();
    for (i, &child_id) in child_ids.iter().enumerate() {
        rescale_child(arena, child_id, axis, old_children[i].on_axis(axis), new_children[i].on_axis(axis), mt)?;
    }

    let mut new_modes = modes;
    new_modes[index] = percentage_mode;
    if let Some(payload) = arena.get_mut(void) {
        payload.subdivision = Subdivision::Linear { axis, positions: new_positions, percentage_mode: new_modes };
    }
    arena.mark_dirty(void);
    Ok(())
}

/// Move one position of a grid subdivision's `axis` divider array. Same
/// revalidation and child-rescale treatment as [`move_linear_divider`],
/// applied to every cell sharing that divider's index along `axis`; any
/// recorded cross-lap slot at the old position on this void's bounds is
/// relocated to the new one.
pub fn move_grid_divider(
    arena: &mut Arena<VoidPayload>,
    cross_laps: &mut [CrossLapSlot],
    void: VoidId,
    axis: Axis,
    index: usize,
    new_position: f64,
    percentage_mode: bool,
    mt: f64,
) -> Result<(), ActionError> {
    let Some(payload) = arena.get(void) else {
        return Err(ActionError::NotFound);
    };
    let Subdivision::Grid { axis_a, positions_a, percentage_mode_a, axis_b, positions_b, percentage_mode_b } = payload.subdivision.clone() else {
        return Err(ActionError::InvalidArgument("void has no grid subdivision"));
    };
    let moving_a = axis == axis_a;
    if !moving_a && axis != axis_b {
        return Err(ActionError::InvalidArgument("axis does not match this grid subdivision"));
    }
    let bounds = payload.bounds;
    let mut positions = if moving_a { positions_a.clone() } else { positions_b.clone() };
    if index >= positions.len() {
        return Err(ActionError::InvalidArgument("position index out of range"));
    }
    let old_positions = positions.clone();
    positions[index] = new_position;
    validate_linear_positions(bounds, axis, &positions, mt)?;
    if conflicts_with_existing_cross_laps(cross_laps, bounds, axis, &positions, mt) {
        return Err(ActionError::ConflictingCrossLap);
    }

    let old_cells = linear_child_bounds(bounds, axis, &old_positions, mt);
    let new_cells = linear_child_bounds(bounds, axis, &positions, mt);
    let b_stride = positions_b.len() + 1;
    let other_count = if moving_a { b_stride } else { positions_a.len() + 1 };
    let child_ids = arena.children_of(void).to_vec();
    for (i, old_cell) in old_cells.iter().enumerate() {
        let new_cell = new_cells[i];
        for j in 0..other_count {
            let id = if moving_a { child_ids[i * b_stride + j] } else { child_ids[j * b_stride + i] };
            rescale_child(arena, id, axis, old_cell.on_axis(axis), new_cell.on_axis(axis), mt)?;
        }
    }

    let old_value = old_positions[index];
    for slot in cross_laps.iter_mut() {
        if slot.bounds != bounds {
            continue;
        }
        if moving_a && slot.axis_a == axis_a && (slot.position_a - old_value).abs() < boxen_geom::EPS {
            slot.position_a = new_position;
        } else if !moving_a && slot.axis_b == axis_b && (slot.position_b - old_value).abs() < boxen_geom::EPS {
            slot.position_b = new_position;
        }
    }

    let (new_positions_a, new_modes_a, new_positions_b, new_modes_b) = if moving_a {
        let mut ma = percentage_mode_a.clone();
        ma[index] = percentage_mode;
        (positions, ma, positions_b.clone(), percentage_mode_b.clone())
    } else {
        let mut mb = percentage_mode_b.clone();
        mb[index] = percentage_mode;
        (positions_a.clone(), percentage_mode_a.clone(), positions, mb)
    };

    if let Some(payload) = arena.get_mut(void) {
        payload.subdivision = Subdivision::Grid {
            axis_a,
            positions_a: new_positions_a,
            percentage_mode_a: new_modes_a,
            axis_b,
            positions_b: new_positions_b,
            percentage_mode_b: new_modes_b,
        };
    }
    arena.mark_dirty(void);
    Ok(())
}

pub fn remove_subdivision(
    arena: &mut Arena<VoidPayload>,
    cross_laps: &mut Vec<CrossLapSlot>,
    void: VoidId,
) -> Result<(), ActionError> {
    if !arena.is_alive(void) {
        return Err(ActionError::NotFound);
    }
    let children: Vec<VoidId> = arena.children_of(void).to_vec();
    for c in children {
        arena.remove(c);
    }
    let bounds = arena.get(void).map(|p| p.bounds);
    if let Some(bounds) = bounds {
        cross_laps.retain(|s| s.bounds != bounds);
    }
    if let Some(payload) = arena.get_mut(void) {
        payload.subdivision = Subdivision::Leaf;
        payload.sub_assembly = None;
    }
    arena.mark_dirty(void);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_subdivision_children_cover_parent_minus_dividers() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let bounds = Bounds3::new(100.0, 80.0, 60.0);
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), bounds));

        add_linear_subdivision(&mut arena, &[], root, Axis::X, vec![40.0], 3.0, &mut id_gen).unwrap();

        let children = arena.children_of(root).to_vec();
        assert_eq!(children.len(), 2);
        let a = arena.get(children[0]).unwrap().bounds.x;
        let b = arena.get(children[1]).unwrap().bounds.x;
        assert_eq!(a, (0.0, 38.5));
        assert_eq!(b, (41.5, 100.0));
        let total = (a.1 - a.0) + (b.1 - b.0) + 3.0;
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unsorted_positions_are_rejected() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        let err = add_linear_subdivision(&mut arena, &[], root, Axis::X, vec![50.0, 20.0], 3.0, &mut id_gen).unwrap_err();
        assert_eq!(err, ActionError::InvalidArgument("positions must be strictly sorted"));
    }

    #[test]
    fn grid_subdivision_produces_cartesian_cells_and_cross_lap_record() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let mut cross_laps = Vec::new();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));

        add_grid_subdivision(&mut arena, &mut cross_laps, root, Axis::X, vec![50.0], Axis::Z, vec![30.0], 3.0, &mut id_gen).unwrap();

        assert_eq!(arena.children_of(root).len(), 4);
        assert_eq!(cross_laps.len(), 1);
    }

    #[test]
    fn nearby_subdivision_on_crossing_axis_is_rejected() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let mut cross_laps = Vec::new();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        add_grid_subdivision(&mut arena, &mut cross_laps, root, Axis::X, vec![50.0], Axis::Z, vec![30.0], 3.0, &mut id_gen).unwrap();

        let cell = arena.children_of(root)[0];
        let err = add_linear_subdivision(&mut arena, &cross_laps, cell, Axis::X, vec![47.0], 3.0, &mut id_gen).unwrap_err();
        assert_eq!(err, ActionError::ConflictingCrossLap);
    }

    #[test]
    fn move_linear_divider_recomputes_child_bounds() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        add_linear_subdivision(&mut arena, &[], root, Axis::X, vec![40.0], 3.0, &mut id_gen).unwrap();

        move_linear_divider(&mut arena, &[], root, 0, 60.0, false, 3.0).unwrap();

        let children = arena.children_of(root).to_vec();
        let a = arena.get(children[0]).unwrap().bounds.x;
        let b = arena.get(children[1]).unwrap().bounds.x;
        assert_eq!(a, (0.0, 58.5));
        assert_eq!(b, (61.5, 100.0));
    }

    #[test]
    fn move_linear_divider_rejects_separation_violation() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        add_linear_subdivision(&mut arena, &[], root, Axis::X, vec![30.0, 70.0], 3.0, &mut id_gen).unwrap();

        let err = move_linear_divider(&mut arena, &[], root, 0, 69.0, false, 3.0).unwrap_err();
        assert_eq!(err, ActionError::InvalidArgument("positions violate minimum mt separation"));
    }

    #[test]
    fn move_linear_divider_rescales_percentage_mode_nested_position() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        add_linear_subdivision(&mut arena, &[], root, Axis::X, vec![50.0], 3.0, &mut id_gen).unwrap();
        let first_child = arena.children_of(root)[0];
        // first_child spans x (0.0, 48.5); put a nested divider at its midpoint,
        // in percentage mode, then move the parent divider and check it rescales.
        add_linear_subdivision(&mut arena, &[], first_child, Axis::X, vec![24.25], 3.0, &mut id_gen).unwrap();
        if let Subdivision::Linear { percentage_mode, .. } = &mut arena.get_mut(first_child).unwrap().subdivision {
            percentage_mode[0] = true;
        }

        move_linear_divider(&mut arena, &[], root, 0, 70.0, false, 3.0).unwrap();

        let Subdivision::Linear { positions, .. } = &arena.get(first_child).unwrap().subdivision else {
            panic!("expected linear subdivision");
        };
        // new first_child spans (0.0, 68.5); the percentage-mode position should
        // still sit at its midpoint.
        assert!((positions[0] - 34.25).abs() < 1e-9);
    }

    #[test]
    fn move_grid_divider_relocates_matching_cross_lap() {
        let mut arena: Arena<VoidPayload> = Arena::new();
        let mut id_gen = IdGen::default();
        let mut cross_laps = Vec::new();
        let root = arena.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(100.0, 80.0, 60.0)));
        add_grid_subdivision(&mut arena, &mut cross_laps, root, Axis::X, vec![50.0], Axis::Z, vec![30.0], 3.0, &mut id_gen).unwrap();

        move_grid_divider(&mut arena, &mut cross_laps, root, Axis::X, 0, 60.0, false, 3.0).unwrap();

        assert_eq!(cross_laps.len(), 1);
        assert_eq!(cross_laps[0].position_a, 60.0);
    }
}
