//! The action catalog: every mutation a caller can ask of a [`Scene`], and
//! the dispatcher that applies one to it.

use boxen_joints::{Axis, EdgeStatus, Face, LidTabDirection};
use boxen_scene::{
    self, ActionError, CustomEdgePath, Cutout, Dimensions, Edge, FeetConfig, Id, Material, PanelId, Scene, VoidId,
};

/// One requested mutation. Every variant is a no-op on `Err`: dispatching a
/// rejected action leaves the scene exactly as it was.
#[derive(Clone, Debug)]
pub enum Action {
    CreateAssembly { dimensions: Dimensions, material: Material, axis: Axis },
    RemoveAssembly { assembly: Id },
    SetDimensions { assembly: Id, dimensions: Dimensions },
    SetMaterial { assembly: Id, material: Material },
    SetFaceSolid { assembly: Id, face: Face, solid: bool },
    ToggleFace { assembly: Id, face: Face },
    SetLidTabDirection { assembly: Id, face: Face, direction: Option<LidTabDirection> },
    SetAssemblyAxis { assembly: Id, axis: Axis },
    SetFeetConfig { assembly: Id, feet: Option<FeetConfig> },
    SetClearance { assembly: Id, clearance: f64 },

    CreateSubAssembly { assembly: Id, void: VoidId, axis: Axis },
    RemoveSubAssembly { assembly: Id, void: VoidId },

    AddLinearSubdivision { assembly: Id, void: VoidId, axis: Axis, positions: Vec<f64> },
    AddGridSubdivision { assembly: Id, void: VoidId, axis_a: Axis, positions_a: Vec<f64>, axis_b: Axis, positions_b: Vec<f64> },
    RemoveSubdivision { assembly: Id, void: VoidId },
    MoveSubdivision { assembly: Id, void: VoidId, index: usize, position: f64, percentage_mode: bool },
    MoveGridDivider { assembly: Id, void: VoidId, axis: Axis, index: usize, position: f64, percentage_mode: bool },

    SetEdgeExtension { assembly: Id, panel: PanelId, edge: Edge, status: EdgeStatus, value: f64 },
    SetCustomEdgePath { assembly: Id, panel: PanelId, edge: Edge, status: EdgeStatus, path: CustomEdgePath },
    ClearCustomEdgePath { assembly: Id, panel: PanelId, edge: Edge },
    SetCornerFillet { assembly: Id, panel: PanelId, edge: Edge, radius: f64 },
    SetAllCornerFillet { assembly: Id, panel: PanelId, radius: f64 },
    AddCutout { assembly: Id, panel: PanelId, cutout: Cutout, additive: bool },
    DeleteCutout { assembly: Id, panel: PanelId, index: usize },
    ClearModifiedSafeArea { assembly: Id, panel: PanelId },
}

/// Apply `action` to `scene`. Looks the target assembly up once, then
/// delegates to the matching `boxen_scene::scene` mutator.
pub fn dispatch(scene: &mut Scene, action: Action) -> Result<(), ActionError> {
    match action {
        Action::CreateAssembly { dimensions, material, axis } => {
            scene.create_assembly(dimensions, material, axis);
            Ok(())
        }
        Action::RemoveAssembly { assembly } => scene.remove_assembly(assembly),

        Action::SetDimensions { assembly, dimensions } => with_assembly(scene, assembly, |a| boxen_scene::set_dimensions(a, dimensions)),
        Action::SetMaterial { assembly, material } => with_assembly(scene, assembly, |a| boxen_scene::set_material(a, material)),
        Action::SetFaceSolid { assembly, face, solid } => with_assembly(scene, assembly, |a| boxen_scene::set_face_solid(a, face, solid)),
        Action::ToggleFace { assembly, face } => with_assembly(scene, assembly, |a| boxen_scene::toggle_face(a, face)),
        Action::SetLidTabDirection { assembly, face, direction } => {
            with_assembly(scene, assembly, |a| boxen_scene::set_lid_tab_direction(a, face, direction))
        }
        Action::SetAssemblyAxis { assembly, axis } => with_assembly(scene, assembly, |a| boxen_scene::set_assembly_axis(a, axis)),
        Action::SetFeetConfig { assembly, feet } => with_assembly(scene, assembly, |a| boxen_scene::set_feet_config(a, feet)),
        Action::SetClearance { assembly, clearance } => with_assembly(scene, assembly, |a| boxen_scene::set_clearance(a, clearance)),

        Action::CreateSubAssembly { assembly, void, axis } => {
            let mut id_gen = scene.id_gen;
            let result = with_assembly(scene, assembly, |a| boxen_scene::create_sub_assembly(a, &mut id_gen, void, axis).map(|_| ()));
            scene.id_gen = id_gen;
            result
        }
        Action::RemoveSubAssembly { assembly, void } => with_assembly(scene, assembly, |a| boxen_scene::remove_sub_assembly(a, void)),

        Action::AddLinearSubdivision { assembly, void, axis, positions } => {
            let mut id_gen = scene.id_gen;
            let result = with_assembly(scene, assembly, |a| {
                let mt = a.material.thickness;
                boxen_scene::add_linear_subdivision(&mut a.voids, &a.cross_laps, void, axis, positions, mt, &mut id_gen)
            });
            scene.id_gen = id_gen;
            if result.is_ok() {
                if let Some(a) = scene.find_assembly_mut(assembly) {
                    a.mark_dirty();
                }
            }
            result
        }
        Action::AddGridSubdivision { assembly, void, axis_a, positions_a, axis_b, positions_b } => {
            let mut id_gen = scene.id_gen;
            let result = with_assembly(scene, assembly, |a| {
                let mt = a.material.thickness;
                let mut cross_laps = a.cross_laps.clone();
                let r = boxen_scene::add_grid_subdivision(&mut a.voids, &mut cross_laps, void, axis_a, positions_a, axis_b, positions_b, mt, &mut id_gen);
                a.cross_laps = cross_laps;
                r
            });
            scene.id_gen = id_gen;
            if result.is_ok() {
                if let Some(a) = scene.find_assembly_mut(assembly) {
                    a.mark_dirty();
                }
            }
            result
        }
        Action::RemoveSubdivision { assembly, void } => with_assembly(scene, assembly, |a| {
            let mut cross_laps = a.cross_laps.clone();
            let r = boxen_scene::remove_subdivision(&mut a.voids, &mut cross_laps, void);
            a.cross_laps = cross_laps;
            r
        }),
        Action::MoveSubdivision { assembly, void, index, position, percentage_mode } => {
            let result = with_assembly(scene, assembly, |a| {
                let mt = a.material.thickness;
                boxen_scene::move_linear_divider(&mut a.voids, &a.cross_laps, void, index, position, percentage_mode, mt)
            });
            if result.is_ok() {
                if let Some(a) = scene.find_assembly_mut(assembly) {
                    a.mark_dirty();
                }
            }
            result
        }
        Action::MoveGridDivider { assembly, void, axis, index, position, percentage_mode } => {
            let result = with_assembly(scene, assembly, |a| {
                let mt = a.material.thickness;
                let mut cross_laps = a.cross_laps.clone();
                let r = boxen_scene::move_grid_divider(&mut a.voids, &mut cross_laps, void, axis, index, position, percentage_mode, mt);
                a.cross_laps = cross_laps;
                r
            });
            if result.is_ok() {
                if let Some(a) = scene.find_assembly_mut(assembly) {
                    a.mark_dirty();
                }
            }
            result
        }

        Action::SetEdgeExtension { assembly, panel, edge, status, value } => {
            with_assembly(scene, assembly, |a| boxen_scene::set_edge_extension(a, panel, edge, status, value))
        }
        Action::SetCustomEdgePath { assembly, panel, edge, status, path } => {
            with_assembly(scene, assembly, |a| boxen_scene::set_custom_edge_path(a, panel, edge, status, path))
        }
        Action::ClearCustomEdgePath { assembly, panel, edge } => with_assembly(scene, assembly, |a| boxen_scene::clear_custom_edge_path(a, panel, edge)),
        Action::SetCornerFillet { assembly, panel, edge, radius } => with_assembly(scene, assembly, |a| boxen_scene::set_corner_fillet(a, panel, edge, radius)),
        Action::SetAllCornerFillet { assembly, panel, radius } => with_assembly(scene, assembly, |a| boxen_scene::set_all_corner_fillet(a, panel, radius)),
        Action::AddCutout { assembly, panel, cutout, additive } => with_assembly(scene, assembly, |a| boxen_scene::add_cutout(a, panel, cutout, additive)),
        Action::DeleteCutout { assembly, panel, index } => with_assembly(scene, assembly, |a| boxen_scene::delete_cutout(a, panel, index)),
        Action::ClearModifiedSafeArea { assembly, panel } => with_assembly(scene, assembly, |a| boxen_scene::clear_modified_safe_area(a, panel)),
    }
}

fn with_assembly(
    scene: &mut Scene,
    assembly: Id,
    f: impl FnOnce(&mut boxen_scene::Assembly) -> Result<(), ActionError>,
) -> Result<(), ActionError> {
    let Some(a) = scene.find_assembly_mut(assembly) else {
        return Err(ActionError::NotFound);
    };
    f(a)
}

