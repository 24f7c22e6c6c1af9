//! The scene: an ordered set of assemblies, the action-catalog mutators that
//! operate on them, and panel generation tying the outline/hole/safe-area
//! modules together.

use std::f64::consts::FRAC_PI_2;

use hashbrown::{HashMap, HashSet};

use boxen_geom::Point;
use boxen_joints::{axis_anchor_points, Axis, EdgeStatus, Face, LidTabDirection};
use ultraviolet::{Rotor3, Vec3};

use crate::assembly::{Assembly, FeetConfig};
use crate::error::ActionError;
use crate::holes::{apply_cutouts, cross_lap_slot, finalize_hole, sub_assembly_wall_slot};
use crate::ids::{Id, IdGen, PanelId};
use crate::material::{Dimensions, Material};
use crate::outline::{feet_edge_path, synthesize_outline, EdgeInput, OutlineInput};
use crate::overlay::{CustomEdgePath, Cutout, CutoutEntry, Edge};
use crate::panel::{Panel, PanelSource, PanelTransform};
use crate::safe_area::compute_safe_area;
use crate::void_tree::{Bounds3, Subdivision, VoidId, VoidPayload};

/// An ordered, non-empty-in-practice set of assemblies. Usually one
/// (`primary`), but a scene is a plain container and does not enforce that.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub assemblies: Vec<Assembly>,
    pub id_gen: IdGen,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_assembly(&mut self, dimensions: Dimensions, material: Material, axis: Axis) -> Id {
        let assembly = Assembly::new(&mut self.id_gen, dimensions, material, axis);
        let id = assembly.id;
        self.assemblies.push(assembly);
        id
    }

    pub fn remove_assembly(&mut self, id: Id) -> Result<(), ActionError> {
        let before = self.assemblies.len();
        self.assemblies.retain(|a| a.id != id);
        if self.assemblies.len() == before {
            return Err(ActionError::NotFound);
        }
        Ok(())
    }

    pub fn find_assembly(&self, id: Id) -> Option<&Assembly> {
        self.assemblies.iter().find_map(|top| find_assembly_in(top, id))
    }

    pub fn find_assembly_mut(&mut self, id: Id) -> Option<&mut Assembly> {
        self.assemblies.iter_mut().find_map(|top| find_assembly_in_mut(top, id))
    }

    /// Depth-first search for a void by its stable [`Id`], across every
    /// assembly and nested sub-assembly in the scene.
    pub fn find_void(&self, id: Id) -> Option<(&Assembly, VoidId)> {
        self.assemblies.iter().find_map(|top| find_void_in(top, id))
    }
}

fn find_assembly_in(assembly: &Assembly, id: Id) -> Option<&Assembly> {
    if assembly.id == id {
        return Some(assembly);
    }
    for node in void_ids(assembly) {
        if let Some(sub) = assembly.voids.get(node).and_then(|p| p.sub_assembly.as_deref()) {
            if let Some(found) = find_assembly_in(sub, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_assembly_in_mut(assembly: &mut Assembly, id: Id) -> Option<&mut Assembly> {
    if assembly.id == id {
        return Some(assembly);
    }
    let nodes = void_ids(assembly);
    for node in nodes {
        if let Some(payload) = assembly.voids.get_mut(node) {
            if let Some(sub) = &mut payload.sub_assembly {
                if let Some(found) = find_assembly_in_mut(sub, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn find_void_in(assembly: &Assembly, id: Id) -> Option<(&Assembly, VoidId)> {
    for node in void_ids(assembly) {
        let Some(payload) = assembly.voids.get(node) else { continue };
        if payload.id == id {
            return Some((assembly, node));
        }
        if let Some(sub) = &payload.sub_assembly {
            if let Some(found) = find_void_in(sub, id) {
                return Some(found);
            }
        }
    }
    None
}

/// All void ids reachable from `assembly`'s root, in DFS order. [`boxen_arena::Arena`]
/// only exposes roots/children/parent, not a flat id list, so the scene walks
/// the tree itself whenever it needs every node.
fn void_ids(assembly: &Assembly) -> Vec<VoidId> {
    let mut out = vec![assembly.root_void];
    out.extend(descendants(assembly, assembly.root_void));
    out
}

fn descendants(assembly: &Assembly, node: VoidId) -> Vec<VoidId> {
    let mut out = Vec::new();
    for &child in assembly.voids.children_of(node) {
        out.push(child);
        out.extend(descendants(assembly, child));
    }
    out
}

fn clear_dirty_subtree(assembly: &mut Assembly, node: VoidId) {
    assembly.voids.clear_dirty(node);
    let children = assembly.voids.children_of(node).to_vec();
    for child in children {
        clear_dirty_subtree(assembly, child);
    }
}

// ---- Assembly-level mutators -------------------------------------------

pub fn set_dimensions(assembly: &mut Assembly, dimensions: Dimensions) -> Result<(), ActionError> {
    if dimensions.w <= 0.0 || dimensions.h <= 0.0 || dimensions.d <= 0.0 {
        return Err(ActionError::InvalidArgument("dimensions must be positive"));
    }
    assembly.dimensions = dimensions;
    // The root void's bounds must stay in sync; deeper subdivisions keep
    // their existing absolute positions (outside percentage mode, a resize
    // does not automatically rescale them).
    if let Some(root) = assembly.voids.get_mut(assembly.root_void) {
        root.bounds = Bounds3::new(dimensions.w, dimensions.h, dimensions.d);
    }
    assembly.mark_dirty();
    Ok(())
}

pub fn set_material(assembly: &mut Assembly, material: Material) -> Result<(), ActionError> {
    if material.thickness <= 0.0 || material.finger_width <= 0.0 || material.finger_gap < 1.0 {
        return Err(ActionError::InvalidArgument("material constants out of range"));
    }
    assembly.material = material;
    assembly.mark_dirty();
    Ok(())
}

pub fn set_face_solid(assembly: &mut Assembly, face: Face, solid: bool) -> Result<(), ActionError> {
    assembly.faces.entry(face).or_default().solid = solid;
    assembly.mark_dirty();
    Ok(())
}

pub fn toggle_face(assembly: &mut Assembly, face: Face) -> Result<(), ActionError> {
    let state = assembly.faces.entry(face).or_default();
    state.solid = !state.solid;
    assembly.mark_dirty();
    Ok(())
}

pub fn set_lid_tab_direction(assembly: &mut Assembly, face: Face, direction: Option<LidTabDirection>) -> Result<(), ActionError> {
    let (lid_a, lid_b) = assembly.axis.lid_pair();
    if face != lid_a && face != lid_b {
        return Err(ActionError::InvalidArgument("lidTabDirection only applies to the assembly's lid pair"));
    }
    assembly.faces.entry(face).or_default().lid_tab_direction = direction;
    assembly.mark_dirty();
    Ok(())
}

pub fn set_assembly_axis(assembly: &mut Assembly, axis: Axis) -> Result<(), ActionError> {
    assembly.axis = axis;
    assembly.mark_dirty();
    Ok(())
}

pub fn set_feet_config(assembly: &mut Assembly, feet: Option<FeetConfig>) -> Result<(), ActionError> {
    if let Some(f) = feet {
        if f.height < 0.0 || f.width <= 0.0 {
            return Err(ActionError::InvalidArgument("feet height/width out of range"));
        }
    }
    assembly.feet = feet;
    assembly.mark_dirty();
    Ok(())
}

pub fn set_clearance(assembly: &mut Assembly, clearance: f64) -> Result<(), ActionError> {
    if clearance < 0.0 {
        return Err(ActionError::InvalidArgument("clearance must be non-negative"));
    }
    assembly.clearance = clearance;
    assembly.mark_dirty();
    Ok(())
}

// ---- Sub-assemblies ------------------------------------------------------

pub fn create_sub_assembly(assembly: &mut Assembly, id_gen: &mut IdGen, void: VoidId, axis: Axis) -> Result<Id, ActionError> {
    let Some(payload) = assembly.voids.get(void) else {
        return Err(ActionError::NotFound);
    };
    if !payload.is_leaf() {
        return Err(ActionError::InvalidArgument("void already has a subdivision or sub-assembly"));
    }
    let clearance = assembly.clearance;
    let bounds = payload.bounds;
    let dims = Dimensions::new(
        (bounds.x.1 - bounds.x.0 - 2.0 * clearance).max(0.0),
        (bounds.y.1 - bounds.y.0 - 2.0 * clearance).max(0.0),
        (bounds.z.1 - bounds.z.0 - 2.0 * clearance).max(0.0),
    );
    if dims.w <= 0.0 || dims.h <= 0.0 || dims.d <= 0.0 {
        return Err(ActionError::InvalidArgument("void too small for a sub-assembly at this clearance"));
    }
    let sub = Assembly::new(id_gen, dims, assembly.material, axis);
    let sub_id = sub.id;
    if let Some(payload) = assembly.voids.get_mut(void) {
        payload.sub_assembly = Some(Box::new(sub));
    }
    assembly.voids.mark_dirty(void);
    Ok(sub_id)
}

pub fn remove_sub_assembly(assembly: &mut Assembly, void: VoidId) -> Result<(), ActionError> {
    let Some(payload) = assembly.voids.get_mut(void) else {
        return Err(ActionError::NotFound);
    };
    if payload.sub_assembly.take().is_none() {
        return Err(ActionError::InvalidArgument("void hosts no sub-assembly"));
    }
    assembly.voids.mark_dirty(void);
    Ok(())
}

// ---- Overlay mutators ----------------------------------------------------

pub fn set_edge_extension(assembly: &mut Assembly, panel: PanelId, edge: Edge, status: EdgeStatus, value: f64) -> Result<(), ActionError> {
    let clamped = match status {
        EdgeStatus::MaleJoint => {
            if value != 0.0 {
                return Err(ActionError::InvalidArgument("male-joint edges cannot be extended"));
            }
            0.0
        }
        EdgeStatus::FemaleJoint => {
            if value < 0.0 {
                return Err(ActionError::InvalidArgument("female-joint extension must be >= 0"));
            }
            value
        }
        EdgeStatus::Open => {
            if value < -assembly.material.thickness {
                return Err(ActionError::InvalidArgument("open-edge extension cannot inset past the material thickness"));
            }
            value
        }
    };
    assembly.overlays.edge_extensions.insert((panel, edge), clamped);
    assembly.mark_dirty();
    Ok(())
}

pub fn set_custom_edge_path(assembly: &mut Assembly, panel: PanelId, edge: Edge, status: EdgeStatus, path: CustomEdgePath) -> Result<(), ActionError> {
    if status == EdgeStatus::MaleJoint {
        return Err(ActionError::InvalidArgument("a custom edge path cannot coexist with a male-joint edge"));
    }
    if status == EdgeStatus::FemaleJoint {
        let mt = assembly.material.thickness;
        let breaches = path.points.iter().any(|p| p.offset > -mt && p.offset < mt && p.offset != 0.0);
        if breaches {
            return Err(ActionError::InvalidArgument("custom edge path offsets must stay clear of the joint region"));
        }
    }
    assembly.overlays.custom_edge_paths.insert((panel, edge), path);
    assembly.mark_dirty();
    Ok(())
}

pub fn clear_custom_edge_path(assembly: &mut Assembly, panel: PanelId, edge: Edge) -> Result<(), ActionError> {
    assembly.overlays.custom_edge_paths.remove(&(panel, edge));
    assembly.mark_dirty();
    Ok(())
}

pub fn set_corner_fillet(assembly: &mut Assembly, panel: PanelId, edge: Edge, radius: f64) -> Result<(), ActionError> {
    if radius < 0.0 {
        return Err(ActionError::InvalidArgument("fillet radius must be non-negative"));
    }
    assembly.overlays.corner_fillets.insert((panel, edge), crate::overlay::CornerFillet { radius });
    assembly.mark_dirty();
    Ok(())
}

pub fn set_all_corner_fillet(assembly: &mut Assembly, panel: PanelId, radius: f64) -> Result<(), ActionError> {
    if radius < 0.0 {
        return Err(ActionError::InvalidArgument("fillet radius must be non-negative"));
    }
    assembly.overlays.all_corner_fillet.insert(panel, radius);
    assembly.mark_dirty();
    Ok(())
}

pub fn add_cutout(assembly: &mut Assembly, panel: PanelId, cutout: Cutout, additive: bool) -> Result<(), ActionError> {
    assembly.overlays.cutouts.entry(panel).or_default().push(CutoutEntry { shape: cutout, additive });
    assembly.mark_dirty();
    Ok(())
}

pub fn delete_cutout(assembly: &mut Assembly, panel: PanelId, index: usize) -> Result<(), ActionError> {
    let Some(list) = assembly.overlays.cutouts.get_mut(&panel) else {
        return Err(ActionError::NotFound);
    };
    if index >= list.len() {
        return Err(ActionError::NotFound);
    }
    list.remove(index);
    assembly.mark_dirty();
    Ok(())
}

pub fn clear_modified_safe_area(assembly: &mut Assembly, panel: PanelId) -> Result<(), ActionError> {
    assembly.overlays.modified_safe_area.remove(&panel);
    assembly.mark_dirty();
    Ok(())
}

// ---- Panel generation -----------------------------------------------------

fn face_frame(face: Face, dims: Dimensions) -> (Axis, f64, Axis, f64) {
    match face {
        Face::Front | Face::Back => (Axis::X, dims.w, Axis::Y, dims.h),
        Face::Left | Face::Right => (Axis::Z, dims.d, Axis::Y, dims.h),
        Face::Top | Face::Bottom => (Axis::X, dims.w, Axis::Z, dims.d),
    }
}

/// Placement of each face's panel in the assembly's interior frame. Exact 3D
/// orientation is outside what the engine promises; this picks one
/// consistent convention (panel plane normal pointing outward, local X/Y
/// matching its width/height axes) good enough to place a panel in space.
fn face_transform(face: Face, dims: Dimensions) -> PanelTransform {
    let (origin, rotation) = match face {
        Face::Front => (Vec3::new(0.0, 0.0, 0.0), Rotor3::identity()),
        Face::Back => (Vec3::new(0.0, 0.0, dims.d as f32), Rotor3::identity()),
        Face::Bottom => (Vec3::new(0.0, 0.0, 0.0), Rotor3::from_rotation_yz(-FRAC_PI_2 as f32)),
        Face::Top => (Vec3::new(0.0, dims.h as f32, 0.0), Rotor3::from_rotation_yz(-FRAC_PI_2 as f32)),
        Face::Left => (Vec3::new(0.0, 0.0, 0.0), Rotor3::from_rotation_xz(FRAC_PI_2 as f32)),
        Face::Right => (Vec3::new(dims.w as f32, 0.0, 0.0), Rotor3::from_rotation_xz(FRAC_PI_2 as f32)),
    };
    PanelTransform { origin, rotation }
}

struct AxisAnchors {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

fn compute_axis_anchors(dims: Dimensions, material: Material) -> AxisAnchors {
    let fp = material.finger_params();
    AxisAnchors {
        x: axis_anchor_points(dims.w, fp),
        y: axis_anchor_points(dims.h, fp),
        z: axis_anchor_points(dims.d, fp),
    }
}

impl AxisAnchors {
    fn on(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

fn generate_face_panel(assembly: &Assembly, face: Face, anchors: &AxisAnchors, wall_slots: &HashMap<PanelId, Vec<Vec<Point>>>) -> (Panel, bool) {
    let mt = assembly.material.thickness;
    let (width_axis, width, height_axis, height) = face_frame(face, assembly.dimensions);
    let panel_id = PanelId::Face { assembly: assembly.id, face };

    const TRACE: [Edge; 4] = [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left];
    let mut edge_status = [(Edge::Bottom, EdgeStatus::Open); 4];
    let edges: Vec<EdgeInput> = TRACE
        .iter()
        .enumerate()
        .map(|(i, &edge)| {
            let neighbor = crate::overlay::face_neighbor(face, edge);
            let status = boxen_joints::resolve_face_edge(face, neighbor, assembly.axis, |f| assembly.face_state(f));
            edge_status[i] = (edge, status);

            let (axis, range) = match edge {
                Edge::Bottom | Edge::Top => (width_axis, (0.0, width)),
                Edge::Left | Edge::Right => (height_axis, (0.0, height)),
            };
            let extension = assembly.overlays.edge_extensions.get(&(panel_id.clone(), edge)).copied().unwrap_or(0.0);
            let custom_path = assembly.overlays.custom_edge_paths.get(&(panel_id.clone(), edge)).cloned().or_else(|| {
                if neighbor != Face::Bottom {
                    return None;
                }
                assembly.feet.filter(|f| f.enabled).map(|f| feet_edge_path(&f, range.1 - range.0))
            });

            EdgeInput {
                status,
                extension,
                custom_path,
                anchors: anchors.on(axis).to_vec(),
                axis_range: range,
            }
        })
        .collect();

    let corner_fillet = [
        assembly.overlays.corner_fillets.get(&(panel_id.clone(), Edge::Bottom)).map(|f| f.radius),
        assembly.overlays.corner_fillets.get(&(panel_id.clone(), Edge::Right)).map(|f| f.radius),
        assembly.overlays.corner_fillets.get(&(panel_id.clone(), Edge::Top)).map(|f| f.radius),
        assembly.overlays.corner_fillets.get(&(panel_id.clone(), Edge::Left)).map(|f| f.radius),
    ];
    let uniform_fillet = assembly.overlays.all_corner_fillet.get(&panel_id).copied();

    let mut edges_iter = edges.into_iter();
    let outline_input = OutlineInput {
        width,
        height,
        mt,
        edges: [
            edges_iter.next().expect("four edges"),
            edges_iter.next().expect("four edges"),
            edges_iter.next().expect("four edges"),
            edges_iter.next().expect("four edges"),
        ],
        corner_fillet,
        uniform_fillet,
    };
    let (mut outline, corner_eligibility) = synthesize_outline(&outline_input);
    let winding = boxen_geom::polygon::winding_of(&outline);

    let safe_area = compute_safe_area(width, height, mt, edge_status, &[]);
    let cutouts = assembly.overlays.cutouts.get(&panel_id).cloned().unwrap_or_default();
    let (mut holes, outline_modified) = apply_cutouts(&cutouts, &mut outline, width, height, edge_status, &safe_area, winding);
    if let Some(extra) = wall_slots.get(&panel_id) {
        holes.extend(extra.iter().cloned());
    }
    let (bounding_width, bounding_height) = outline_bounds(&outline, width, height);

    let panel = Panel {
        id: panel_id,
        source: PanelSource::Face { face },
        width: bounding_width,
        height: bounding_height,
        transform: face_transform(face, assembly.dimensions),
        outline,
        holes,
        corner_eligibility,
        edge_status,
    };
    (panel, outline_modified)
}

/// A panel's reported width/height is its outline's bounding extent, not
/// the nominal face size: an edge extension on an open edge grows the
/// outline past the face's base dimensions, and downstream consumers
/// (nesting, export) need the real footprint.
fn outline_bounds(outline: &[boxen_geom::Point], fallback_width: f64, fallback_height: f64) -> (f64, f64) {
    match boxen_geom::polygon::bounds_of(outline) {
        Some((min, max)) => (max.x - min.x, max.y - min.y),
        None => (fallback_width, fallback_height),
    }
}

fn perpendicular_axes(axis: Axis) -> (Axis, Axis) {
    match axis {
        Axis::X => (Axis::Z, Axis::Y),
        Axis::Y => (Axis::X, Axis::Z),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

fn face_for_normal(axis: Axis, low_side: bool) -> Face {
    match (axis, low_side) {
        (Axis::Z, true) => Face::Front,
        (Axis::Z, false) => Face::Back,
        (Axis::X, true) => Face::Left,
        (Axis::X, false) => Face::Right,
        (Axis::Y, true) => Face::Bottom,
        (Axis::Y, false) => Face::Top,
    }
}

/// The panel whose plane a divider's edge terminates against: either an
/// outer face, or (for a divider nested inside an already-subdivided void)
/// the ancestor divider that created this void's boundary.
enum WallTarget {
    Face(Face),
    Divider { void: VoidId, axis: Axis, position: f64 },
}

fn divider_positions(subdivision: &Subdivision) -> Vec<(Axis, f64)> {
    match subdivision {
        Subdivision::Leaf => Vec::new(),
        Subdivision::Linear { axis, positions, .. } => positions.iter().map(|&p| (*axis, p)).collect(),
        Subdivision::Grid { axis_a, positions_a, axis_b, positions_b, .. } => positions_a
            .iter()
            .map(|&p| (*axis_a, p))
            .chain(positions_b.iter().map(|&p| (*axis_b, p)))
            .collect(),
    }
}

/// Whether `subdivision` places a divider along `axis` whose mt-thick slab
/// has a face at `n_pos`, and if so, that divider's position.
fn divider_at_boundary(subdivision: &Subdivision, axis: Axis, n_pos: f64, mt: f64) -> Option<f64> {
    let check = |a: Axis, positions: &[f64]| -> Option<f64> {
        if a != axis {
            return None;
        }
        positions
            .iter()
            .copied()
            .find(|&p| (n_pos - (p - mt / 2.0)).abs() < boxen_geom::EPS || (n_pos - (p + mt / 2.0)).abs() < boxen_geom::EPS)
    };
    match subdivision {
        Subdivision::Leaf => None,
        Subdivision::Linear { axis: a, positions, .. } => check(*a, positions),
        Subdivision::Grid { axis_a, positions_a, axis_b, positions_b, .. } => {
            check(*axis_a, positions_a).or_else(|| check(*axis_b, positions_b))
        }
    }
}

/// Walk up from `start`'s boundary on `axis` (low or high side) to find
/// whatever panel occupies that plane: the outer face if the boundary
/// reaches the assembly's own extent, otherwise the first ancestor divider
/// whose slab produced it.
fn resolve_wall(assembly: &Assembly, start: VoidId, axis: Axis, low_side: bool) -> Option<WallTarget> {
    let mt = assembly.material.thickness;
    let mut cur = start;
    loop {
        let bounds = assembly.voids.get(cur)?.bounds;
        let n_pos = if low_side { bounds.on_axis(axis).0 } else { bounds.on_axis(axis).1 };
        let Some(parent) = assembly.voids.parent_of(cur) else {
            let full = assembly.dimensions.on_axis(axis);
            let at_boundary = if low_side { n_pos.abs() < boxen_geom::EPS } else { (n_pos - full).abs() < boxen_geom::EPS };
            return at_boundary.then(|| WallTarget::Face(face_for_normal(axis, low_side)));
        };
        let parent_payload = assembly.voids.get(parent)?;
        if let Some(position) = divider_at_boundary(&parent_payload.subdivision, axis, n_pos, mt) {
            return Some(WallTarget::Divider { void: parent, axis, position });
        }
        cur = parent;
    }
}

/// A wall's own 2D panel-local frame: which axis maps to its local x/y and
/// where that axis's origin sits, so a divider's 3D position can be
/// projected into the wall's coordinates.
struct WallFrame {
    panel_id: PanelId,
    x_axis: Axis,
    x_len: f64,
    x_origin: f64,
    y_axis: Axis,
    y_len: f64,
    y_origin: f64,
}

fn wall_frame(assembly: &Assembly, target: &WallTarget) -> Option<WallFrame> {
    match target {
        WallTarget::Face(face) => {
            let (width_axis, width, height_axis, height) = face_frame(*face, assembly.dimensions);
            Some(WallFrame {
                panel_id: PanelId::Face { assembly: assembly.id, face: *face },
                x_axis: width_axis,
                x_len: width,
                x_origin: 0.0,
                y_axis: height_axis,
                y_len: height,
                y_origin: 0.0,
            })
        }
        WallTarget::Divider { void, axis, position } => {
            let payload = assembly.voids.get(*void)?;
            let (axis_a, axis_b) = perpendicular_axes(*axis);
            let (lo_a, hi_a) = payload.bounds.on_axis(axis_a);
            let (lo_b, hi_b) = payload.bounds.on_axis(axis_b);
            Some(WallFrame {
                panel_id: PanelId::Divider { parent_void: payload.id, axis: *axis, position_micro: crate::ids::micro(*position) },
                x_axis: axis_a,
                x_len: hi_a - lo_a,
                x_origin: lo_a,
                y_axis: axis_b,
                y_len: hi_b - lo_b,
                y_origin: lo_b,
            })
        }
    }
}

/// Project one divider edge (its own axis `d` and position, plus the extent
/// `[free_lo, free_hi]` it occupies along the axis shared with the wall)
/// into a hole in the wall's local frame. `None` if the divider's footprint
/// on the shared axis touches neither of the wall's own edges (a divider
/// buried in the interior of a larger wall, which this pass does not cover).
fn wall_notch_hole(frame: &WallFrame, d: Axis, position: f64, free_lo: f64, free_hi: f64, mt: f64) -> Option<Vec<Point>> {
    let swap = d == frame.y_axis;
    let (length, length_origin, span, span_origin) = if swap {
        (frame.y_len, frame.y_origin, frame.x_len, frame.x_origin)
    } else {
        (frame.x_len, frame.x_origin, frame.y_len, frame.y_origin)
    };
    let center = position - length_origin;
    let lo = free_lo - span_origin;
    let hi = free_hi - span_origin;
    let from_far_side = if lo <= boxen_geom::EPS {
        false
    } else if hi >= span - boxen_geom::EPS {
        true
    } else {
        return None;
    };
    let raw = sub_assembly_wall_slot(length, span, center, hi - lo, mt, from_far_side);
    Some(if swap { raw.iter().map(|q| Point::new(q.y, q.x)).collect() } else { raw })
}

/// Every hole a divider's edges punch into the walls (outer faces or
/// ancestor dividers) they terminate against, keyed by the wall panel's id
/// so `generate_face_panel`/`divider_panel` can fold them into their own
/// hole list.
fn collect_wall_slot_holes(assembly: &Assembly) -> HashMap<PanelId, Vec<Vec<Point>>> {
    let mt = assembly.material.thickness;
    let mut out: HashMap<PanelId, Vec<Vec<Point>>> = HashMap::new();
    for void in void_ids(assembly) {
        let Some(payload) = assembly.voids.get(void) else { continue };
        for (d, position) in divider_positions(&payload.subdivision) {
            let (axis_p, axis_q) = perpendicular_axes(d);
            for n in [axis_p, axis_q] {
                let f = if n == axis_p { axis_q } else { axis_p };
                let (lo_free, hi_free) = payload.bounds.on_axis(f);
                for low_side in [true, false] {
                    let Some(target) = resolve_wall(assembly, void, n, low_side) else { continue };
                    let Some(frame) = wall_frame(assembly, &target) else { continue };
                    let Some(raw) = wall_notch_hole(&frame, d, position, lo_free, hi_free, mt) else { continue };
                    out.entry(frame.panel_id).or_default().push(finalize_hole(raw, boxen_geom::polygon::Winding::CounterClockwise));
                }
            }
        }
    }
    out
}

/// One divider panel, square to `axis` at `position`, optionally notched with
/// cross-lap slots at `crossings` (positions of dividers along the other grid
/// axis, `crossing_axis`).
fn divider_panel(
    assembly: &Assembly,
    payload: &VoidPayload,
    axis: Axis,
    position: f64,
    anchors: &AxisAnchors,
    crossing_axis: Option<Axis>,
    crossings: &[f64],
    wall_slots: &HashMap<PanelId, Vec<Vec<Point>>>,
) -> (Panel, bool) {
    let mt = assembly.material.thickness;
    let bounds = payload.bounds;
    let (axis_a, axis_b) = perpendicular_axes(axis);
    let (lo_a, hi_a) = bounds.on_axis(axis_a);
    let (lo_b, hi_b) = bounds.on_axis(axis_b);
    let length_a = hi_a - lo_a;
    let length_b = hi_b - lo_b;

    let panel_id = PanelId::Divider {
        parent_void: payload.id,
        axis,
        position_micro: crate::ids::micro(position),
    };
    let edge_status = [
        (Edge::Top, EdgeStatus::MaleJoint),
        (Edge::Right, EdgeStatus::MaleJoint),
        (Edge::Bottom, EdgeStatus::MaleJoint),
        (Edge::Left, EdgeStatus::MaleJoint),
    ];
    let edge_for = |axis: Axis, range: (f64, f64)| EdgeInput {
        status: EdgeStatus::MaleJoint,
        extension: 0.0,
        custom_path: None,
        anchors: anchors.on(axis).to_vec(),
        axis_range: range,
    };
    let edges = [
        edge_for(axis_a, (0.0, length_a)),
        edge_for(axis_b, (0.0, length_b)),
        edge_for(axis_a, (0.0, length_a)),
        edge_for(axis_b, (0.0, length_b)),
    ];
    let outline_input = OutlineInput {
        width: length_a,
        height: length_b,
        mt,
        edges,
        corner_fillet: [None; 4],
        uniform_fillet: None,
    };
    let (mut outline, corner_eligibility) = synthesize_outline(&outline_input);
    let winding = boxen_geom::polygon::winding_of(&outline);

    let mut holes = Vec::new();
    if let Some(caxis) = crossing_axis {
        let along_a = caxis == axis_a;
        let (notch_length, notch_span) = if along_a { (length_a, length_b) } else { (length_b, length_a) };
        for (i, &cpos) in crossings.iter().enumerate() {
            let local_pos = cpos - if along_a { lo_a } else { lo_b };
            let raw = cross_lap_slot(notch_length, notch_span, local_pos, notch_span, mt, i % 2 == 1);
            let mapped: Vec<boxen_geom::Point> = raw
                .iter()
                .map(|p| if along_a { boxen_geom::Point::new(p.x, p.y) } else { boxen_geom::Point::new(p.y, p.x) })
                .collect();
            holes.push(finalize_hole(mapped, winding));
        }
    }

    // Every edge of a divider panel is a male joint, so a cutout here can
    // only ever land as a subtractive hole or get rejected for touching a
    // joint strip. There is no open edge for a notch or additive extend
    // to attach to.
    let safe_area = compute_safe_area(length_a, length_b, mt, edge_status, &holes);
    let cutouts = assembly.overlays.cutouts.get(&panel_id).cloned().unwrap_or_default();
    let (extra_holes, outline_modified) = apply_cutouts(&cutouts, &mut outline, length_a, length_b, edge_status, &safe_area, winding);
    holes.extend(extra_holes);
    if let Some(extra) = wall_slots.get(&panel_id) {
        holes.extend(extra.iter().cloned());
    }

    let panel = Panel {
        id: panel_id,
        source: PanelSource::Divider { parent_void: payload.id, axis, position },
        width: length_a,
        height: length_b,
        transform: PanelTransform::identity(),
        outline,
        holes,
        corner_eligibility,
        edge_status,
    };
    (panel, outline_modified)
}

fn generate_dividers(assembly: &Assembly, void: VoidId, anchors: &AxisAnchors, wall_slots: &HashMap<PanelId, Vec<Vec<Point>>>) -> Vec<(Panel, bool)> {
    let Some(payload) = assembly.voids.get(void) else {
        return Vec::new();
    };
    match &payload.subdivision {
        Subdivision::Leaf => Vec::new(),
        Subdivision::Linear { axis, positions, .. } => positions
            .iter()
            .map(|&position| divider_panel(assembly, payload, *axis, position, anchors, None, &[], wall_slots))
            .collect(),
        Subdivision::Grid { axis_a, positions_a, axis_b, positions_b, .. } => {
            let mut panels = Vec::new();
            for &pa in positions_a {
                panels.push(divider_panel(assembly, payload, *axis_a, pa, anchors, Some(*axis_b), positions_b, wall_slots));
            }
            for &pb in positions_b {
                panels.push(divider_panel(assembly, payload, *axis_b, pb, anchors, Some(*axis_a), positions_a, wall_slots));
            }
            panels
        }
    }
}

/// (Re)compute every panel of `assembly`, honoring the dirty-flag memoization
/// rule: if nothing in the assembly's own state or void tree is dirty, the
/// cached list is returned unchanged.
pub fn generate_panels(assembly: &mut Assembly) -> &[Panel] {
    if assembly.is_dirty() || assembly.cached_panels.is_none() {
        let anchors = compute_axis_anchors(assembly.dimensions, assembly.material);
        let wall_slots = collect_wall_slot_holes(assembly);
        let mut generated: Vec<(Panel, bool)> = Face::ALL
            .iter()
            .filter(|f| assembly.face_state(**f).solid)
            .map(|&f| generate_face_panel(assembly, f, &anchors, &wall_slots))
            .collect();

        for void in void_ids(assembly) {
            generated.extend(generate_dividers(assembly, void, &anchors, &wall_slots));
        }

        let live: HashSet<PanelId> = generated.iter().map(|(p, _)| p.id.clone()).collect();
        assembly.overlays.garbage_collect(&live);

        for (panel, modified) in &generated {
            if *modified {
                assembly.overlays.modified_safe_area.insert(panel.id.clone(), panel.outline.clone());
            } else {
                assembly.overlays.modified_safe_area.remove(&panel.id);
            }
        }

        let panels: Vec<Panel> = generated.into_iter().map(|(p, _)| p).collect();
        assembly.cached_panels = Some(panels);
        assembly.dirty = false;
        clear_dirty_subtree(assembly, assembly.root_void);
    }
    assembly.cached_panels.as_deref().unwrap_or(&[])
}
