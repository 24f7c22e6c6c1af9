use indexmap::IndexMap;
use serde::Serialize;

use boxen_joints::{Axis, Face, FaceState, LidTabDirection};
use boxen_scene::{Assembly, CornerFinish, FeetConfig, Scene, Subdivision, VoidId, VoidPayload};

use crate::float::round6;
use crate::panel_id::panel_id_key;

fn axis_str(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "x",
        Axis::Y => "y",
        Axis::Z => "z",
    }
}

fn face_str(face: Face) -> &'static str {
    match face {
        Face::Front => "front",
        Face::Back => "back",
        Face::Left => "left",
        Face::Right => "right",
        Face::Top => "top",
        Face::Bottom => "bottom",
    }
}

fn lid_tab_direction_str(direction: LidTabDirection) -> &'static str {
    match direction {
        LidTabDirection::TabsOut => "tabs_out",
        LidTabDirection::TabsIn => "tabs_in",
    }
}

#[derive(Debug, Serialize)]
pub struct DimensionsSnapshot {
    pub w: f64,
    pub h: f64,
    pub d: f64,
}

#[derive(Debug, Serialize)]
pub struct MaterialSnapshot {
    pub thickness: f64,
    pub finger_width: f64,
    pub finger_gap: f64,
}

#[derive(Debug, Serialize)]
pub struct FaceStateSnapshot {
    pub solid: bool,
    pub lid_tab_direction: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct FeetSnapshot {
    pub enabled: bool,
    pub height: f64,
    pub width: f64,
    pub inset: f64,
    pub slope_angle: Option<f64>,
    pub corner_finish: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BoundsSnapshot {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub z: (f64, f64),
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubdivisionSnapshot {
    Leaf,
    Linear { axis: &'static str, positions: Vec<f64>, percentage_mode: Vec<bool> },
    Grid {
        axis_a: &'static str,
        positions_a: Vec<f64>,
        percentage_mode_a: Vec<bool>,
        axis_b: &'static str,
        positions_b: Vec<f64>,
        percentage_mode_b: Vec<bool>,
    },
}

#[derive(Debug, Serialize)]
pub struct CrossLapSnapshot {
    pub axis_a: &'static str,
    pub position_a: f64,
    pub axis_b: &'static str,
    pub position_b: f64,
}

#[derive(Debug, Serialize)]
pub struct EdgeExtensionSnapshot {
    pub panel: String,
    pub edge: &'static str,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct CornerFilletSnapshot {
    pub panel: String,
    pub edge: &'static str,
    pub radius: f64,
}

#[derive(Debug, Serialize)]
pub struct AllCornerFilletSnapshot {
    pub panel: String,
    pub radius: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomEdgePathSnapshot {
    pub panel: String,
    pub edge: &'static str,
    pub points: Vec<(f64, f64)>,
    pub mirrored: bool,
}

#[derive(Debug, Serialize)]
pub struct CutoutsSnapshot {
    pub panel: String,
    pub cutouts: Vec<CutoutSnapshot>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CutoutSnapshot {
    Rect { x: f64, y: f64, w: f64, h: f64, additive: bool },
    Circle { cx: f64, cy: f64, r: f64, segments: u32, additive: bool },
    Polygon { points: Vec<(f64, f64)>, additive: bool },
}

#[derive(Debug, Serialize)]
pub struct ModifiedSafeAreaSnapshot {
    pub panel: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Serialize, Default)]
pub struct OverlaysSnapshot {
    pub edge_extensions: Vec<EdgeExtensionSnapshot>,
    pub corner_fillets: Vec<CornerFilletSnapshot>,
    pub all_corner_fillet: Vec<AllCornerFilletSnapshot>,
    pub custom_edge_paths: Vec<CustomEdgePathSnapshot>,
    pub cutouts: Vec<CutoutsSnapshot>,
    pub modified_safe_area: Vec<ModifiedSafeAreaSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct VoidSnapshot {
    pub id: u64,
    pub bounds: BoundsSnapshot,
    pub subdivision: SubdivisionSnapshot,
    pub sub_assembly: Option<Box<AssemblySnapshot>>,
    pub children: Vec<VoidSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct AssemblySnapshot {
    pub id: u64,
    pub dimensions: DimensionsSnapshot,
    pub material: MaterialSnapshot,
    pub axis: &'static str,
    pub faces: IndexMap<&'static str, FaceStateSnapshot>,
    pub feet: Option<FeetSnapshot>,
    pub clearance: f64,
    pub void_tree: VoidSnapshot,
    pub cross_laps: Vec<CrossLapSnapshot>,
    pub overlays: OverlaysSnapshot,
}

#[derive(Debug, Serialize)]
pub struct SceneSnapshot {
    pub assemblies: Vec<AssemblySnapshot>,
}

/// Build the canonical, deterministic snapshot of `scene`. See the crate
/// docs: key order is fixed and floats are rounded to 6 fractional digits,
/// so byte-identical scenes always produce byte-identical JSON.
pub fn scene_snapshot(scene: &Scene) -> SceneSnapshot {
    SceneSnapshot { assemblies: scene.assemblies.iter().map(assembly_snapshot).collect() }
}

fn assembly_snapshot(assembly: &Assembly) -> AssemblySnapshot {
    let mut faces = IndexMap::new();
    for face in Face::ALL {
        let state: FaceState = assembly.face_state(face);
        faces.insert(
            face_str(face),
            FaceStateSnapshot { solid: state.solid, lid_tab_direction: state.lid_tab_direction.map(lid_tab_direction_str) },
        );
    }

    AssemblySnapshot {
        id: assembly.id.get(),
        dimensions: DimensionsSnapshot {
            w: round6(assembly.dimensions.w),
            h: round6(assembly.dimensions.h),
            d: round6(assembly.dimensions.d),
        },
        material: MaterialSnapshot {
            thickness: round6(assembly.material.thickness),
            finger_width: round6(assembly.material.finger_width),
            finger_gap: round6(assembly.material.finger_gap),
        },
        axis: axis_str(assembly.axis),
        faces,
        feet: assembly.feet.map(feet_snapshot),
        clearance: round6(assembly.clearance),
        void_tree: void_snapshot(assembly, assembly.root_void),
        cross_laps: assembly
            .cross_laps
            .iter()
            .map(|c| CrossLapSnapshot {
                axis_a: axis_str(c.axis_a),
                position_a: round6(c.position_a),
                axis_b: axis_str(c.axis_b),
                position_b: round6(c.position_b),
            })
            .collect(),
        overlays: overlays_snapshot(assembly),
    }
}

fn feet_snapshot(feet: FeetConfig) -> FeetSnapshot {
    FeetSnapshot {
        enabled: feet.enabled,
        height: round6(feet.height),
        width: round6(feet.width),
        inset: round6(feet.inset),
        slope_angle: feet.slope_angle.map(round6),
        corner_finish: feet.corner_finish.map(|finish| match finish {
            CornerFinish::Square => "square".to_string(),
            CornerFinish::Rounded(r) => format!("rounded:{}", round6(r)),
        }),
    }
}

fn void_snapshot(assembly: &Assembly, void: VoidId) -> VoidSnapshot {
    let payload: &VoidPayload = assembly.voids.get(void).expect("void id from assembly's own tree");
    let subdivision = match &payload.subdivision {
        Subdivision::Leaf => SubdivisionSnapshot::Leaf,
        Subdivision::Linear { axis, positions, percentage_mode } => SubdivisionSnapshot::Linear {
            axis: axis_str(*axis),
            positions: positions.iter().copied().map(round6).collect(),
            percentage_mode: percentage_mode.clone(),
        },
        Subdivision::Grid { axis_a, positions_a, percentage_mode_a, axis_b, positions_b, percentage_mode_b } => {
            SubdivisionSnapshot::Grid {
                axis_a: axis_str(*axis_a),
                positions_a: positions_a.iter().copied().map(round6).collect(),
                percentage_mode_a: percentage_mode_a.clone(),
                axis_b: axis_str(*axis_b),
                positions_b: positions_b.iter().copied().map(round6).collect(),
                percentage_mode_b: percentage_mode_b.clone(),
            }
        }
    };

    VoidSnapshot {
        id: payload.id.get(),
        bounds: BoundsSnapshot {
            x: (round6(payload.bounds.x.0), round6(payload.bounds.x.1)),
            y: (round6(payload.bounds.y.0), round6(payload.bounds.y.1)),
            z: (round6(payload.bounds.z.0), round6(payload.bounds.z.1)),
        },
        subdivision,
        sub_assembly: payload.sub_assembly.as_ref().map(|sub| Box::new(assembly_snapshot(sub))),
        children: assembly.voids.children_of(void).iter().map(|&child| void_snapshot(assembly, child)).collect(),
    }
}

fn overlays_snapshot(assembly: &Assembly) -> OverlaysSnapshot {
    let overlays = &assembly.overlays;

    let mut edge_extensions: Vec<_> = overlays
        .edge_extensions
        .iter()
        .map(|((panel, edge), value)| EdgeExtensionSnapshot { panel: panel_id_key(panel), edge: edge_str(*edge), value: round6(*value) })
        .collect();
    edge_extensions.sort_by(|a, b| (&a.panel, a.edge).cmp(&(&b.panel, b.edge)));

    let mut corner_fillets: Vec<_> = overlays
        .corner_fillets
        .iter()
        .map(|((panel, edge), fillet)| CornerFilletSnapshot { panel: panel_id_key(panel), edge: edge_str(*edge), radius: round6(fillet.radius) })
        .collect();
    corner_fillets.sort_by(|a, b| (&a.panel, a.edge).cmp(&(&b.panel, b.edge)));

    let mut all_corner_fillet: Vec<_> = overlays
        .all_corner_fillet
        .iter()
        .map(|(panel, radius)| AllCornerFilletSnapshot { panel: panel_id_key(panel), radius: round6(*radius) })
        .collect();
    all_corner_fillet.sort_by(|a, b| a.panel.cmp(&b.panel));

    let mut custom_edge_paths: Vec<_> = overlays
        .custom_edge_paths
        .iter()
        .map(|((panel, edge), path)| CustomEdgePathSnapshot {
            panel: panel_id_key(panel),
            edge: edge_str(*edge),
            points: path.points.iter().map(|p| (round6(p.t), round6(p.offset))).collect(),
            mirrored: path.mirrored,
        })
        .collect();
    custom_edge_paths.sort_by(|a, b| (&a.panel, a.edge).cmp(&(&b.panel, b.edge)));

    let mut cutouts: Vec<_> = overlays
        .cutouts
        .iter()
        .map(|(panel, list)| CutoutsSnapshot { panel: panel_id_key(panel), cutouts: list.iter().map(cutout_snapshot).collect() })
        .collect();
    cutouts.sort_by(|a, b| a.panel.cmp(&b.panel));

    let mut modified_safe_area: Vec<_> = overlays
        .modified_safe_area
        .iter()
        .map(|(panel, points)| ModifiedSafeAreaSnapshot {
            panel: panel_id_key(panel),
            points: points.iter().map(|p| (round6(p.x), round6(p.y))).collect(),
        })
        .collect();
    modified_safe_area.sort_by(|a, b| a.panel.cmp(&b.panel));

    OverlaysSnapshot { edge_extensions, corner_fillets, all_corner_fillet, custom_edge_paths, cutouts, modified_safe_area }
}

fn edge_str(edge: boxen_scene::Edge) -> &'static str {
    match edge {
        boxen_scene::Edge::Top => "top",
        boxen_scene::Edge::Right => "right",
        boxen_scene::Edge::Bottom => "bottom",
        boxen_scene::Edge::Left => "left",
    }
}

fn cutout_snapshot(entry: &boxen_scene::CutoutEntry) -> CutoutSnapshot {
    let additive = entry.additive;
    match &entry.shape {
        boxen_scene::Cutout::Rect { x, y, w, h } => {
            CutoutSnapshot::Rect { x: round6(*x), y: round6(*y), w: round6(*w), h: round6(*h), additive }
        }
        boxen_scene::Cutout::Circle { cx, cy, r, segments } => {
            CutoutSnapshot::Circle { cx: round6(*cx), cy: round6(*cy), r: round6(*r), segments: *segments, additive }
        }
        boxen_scene::Cutout::Polygon { points } => {
            CutoutSnapshot::Polygon { points: points.iter().map(|p| (round6(p.x), round6(p.y))).collect(), additive }
        }
    }
}
