//! Concrete input/output scenarios, each grounded on a specific documented
//! behavior: enclosed-box joint assignment, open-face corner eligibility,
//! grid subdivision cross-laps, and edge-extension clamping.

use boxen::{Action, Engine};
use boxen_joints::{Axis, EdgeStatus, Face};
use boxen_scene::{Dimensions, Edge, FeetConfig, Material, PanelId};

fn box_assembly(engine: &mut Engine, w: f64, h: f64, d: f64) -> boxen_scene::Id {
    assert!(engine.dispatch(Action::CreateAssembly { dimensions: Dimensions::new(w, h, d), material: Material::default(), axis: Axis::Y }));
    engine.assembly_ids()[0]
}

fn front_panel<'a>(panels: &'a boxen_snapshot::PanelList) -> &'a boxen_snapshot::PanelSnapshot {
    panels.panels.iter().find(|p| p.id.starts_with("face:") && p.id.ends_with(":front")).expect("front panel present")
}

fn edge_status<'a>(panel: &'a boxen_snapshot::PanelSnapshot, edge: &str) -> &'a str {
    panel.edge_status.iter().find(|(e, _)| *e == edge).map(|(_, status)| *status).expect("edge present")
}

#[test]
fn s1_enclosed_box_has_six_jointed_panels_with_no_eligible_corners() {
    let mut engine = Engine::new();
    box_assembly(&mut engine, 100.0, 80.0, 60.0);

    let panels = engine.generate_panels();
    assert_eq!(panels.panels.len(), 6);

    let front = front_panel(&panels);
    assert_eq!((front.width, front.height), (100.0, 80.0));
    for (_, status) in &front.edge_status {
        assert_ne!(*status, "open");
    }
    for panel in &panels.panels {
        assert!(panel.corner_eligibility.iter().all(|c| !c.eligible), "panel {} has an eligible corner in an enclosed box", panel.id);
    }
}

#[test]
fn s2_removing_the_top_opens_one_edge_and_still_has_no_eligible_corners() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 100.0, 80.0, 60.0);
    assert!(engine.dispatch(Action::SetFaceSolid { assembly, face: Face::Top, solid: false }));

    let panels = engine.generate_panels();
    let front = front_panel(&panels);
    assert_eq!(edge_status(front, "top"), "open");
    assert!(front.corner_eligibility.iter().all(|c| !c.eligible));
}

#[test]
fn s3_removing_top_and_left_makes_exactly_one_corner_eligible() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 100.0, 80.0, 60.0);
    assert!(engine.dispatch(Action::SetFaceSolid { assembly, face: Face::Top, solid: false }));
    assert!(engine.dispatch(Action::SetFaceSolid { assembly, face: Face::Left, solid: false }));

    let panels = engine.generate_panels();
    let front = front_panel(&panels);
    let eligible = front.corner_eligibility.iter().filter(|c| c.eligible).count();
    assert_eq!(eligible, 1);
    assert_eq!(edge_status(front, "left"), "open");
    assert_eq!(edge_status(front, "top"), "open");
}

#[test]
fn s6_grid_subdivision_produces_four_cells_and_one_cross_lap() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 100.0, 80.0, 60.0);

    let root_void_id = {
        let a = engine.find_assembly(assembly).unwrap();
        a.voids.get(a.root_void).unwrap().id
    };
    let (_, root_handle) = engine.find_void(root_void_id).expect("root void resolves");

    assert!(engine.dispatch(Action::AddGridSubdivision {
        assembly,
        void: root_handle,
        axis_a: Axis::X,
        positions_a: vec![50.0],
        axis_b: Axis::Z,
        positions_b: vec![30.0],
    }));

    let snapshot = engine.get_scene_snapshot();
    let root = &snapshot.assemblies[0].void_tree;
    assert_eq!(root.children.len(), 4);
    assert_eq!(snapshot.assemblies[0].cross_laps.len(), 1);
    let cross_lap = &snapshot.assemblies[0].cross_laps[0];
    assert_eq!((cross_lap.position_a, cross_lap.position_b), (50.0, 30.0));
}

#[test]
fn s7_extending_a_male_edge_is_rejected_and_leaves_the_scene_unchanged() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 100.0, 100.0, 100.0);
    let before = engine.get_scene_snapshot();

    let panel = PanelId::Face { assembly, face: Face::Front };
    let accepted =
        engine.dispatch(Action::SetEdgeExtension { assembly, panel, edge: Edge::Left, status: EdgeStatus::MaleJoint, value: 5.0 });
    assert!(!accepted);

    let after = engine.get_scene_snapshot();
    assert!(after.assemblies[0].overlays.edge_extensions.is_empty());
    assert_eq!(before.assemblies[0].overlays.edge_extensions.len(), after.assemblies[0].overlays.edge_extensions.len());
}

#[test]
fn s8_extending_an_open_top_edge_grows_the_front_panel_height() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 100.0, 80.0, 60.0);
    assert!(engine.dispatch(Action::SetFaceSolid { assembly, face: Face::Top, solid: false }));

    let panel = PanelId::Face { assembly, face: Face::Front };
    assert!(engine.dispatch(Action::SetEdgeExtension { assembly, panel, edge: Edge::Top, status: EdgeStatus::Open, value: 10.0 }));

    let panels = engine.generate_panels();
    let front = front_panel(&panels);
    assert_eq!(front.height, 90.0);
}

#[test]
fn s4_feet_preset_lowers_to_a_mirrored_bottom_edge_notch() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 200.0, 100.0, 150.0);
    assert!(engine.dispatch(Action::SetFeetConfig {
        assembly,
        feet: Some(FeetConfig { enabled: true, height: 15.0, width: 20.0, inset: 10.0, slope_angle: None, corner_finish: None }),
    }));

    let panels = engine.generate_panels();
    let front = front_panel(&panels);

    let has_point = |x: f64, y: f64| front.outline.iter().any(|p| (p[0] - x).abs() < 1e-6 && (p[1] - y).abs() < 1e-6);
    assert!(has_point(10.0, -15.0), "missing left foot's near corner in {:?}", front.outline);
    assert!(has_point(30.0, -15.0), "missing left foot's far corner in {:?}", front.outline);
    assert!(has_point(170.0, -15.0), "missing mirrored right foot's far corner in {:?}", front.outline);
    assert!(has_point(190.0, -15.0), "missing mirrored right foot's near corner in {:?}", front.outline);
}

#[test]
fn s4_explicit_custom_edge_path_overrides_the_feet_preset() {
    let mut engine = Engine::new();
    let assembly = box_assembly(&mut engine, 200.0, 100.0, 150.0);
    assert!(engine.dispatch(Action::SetFeetConfig {
        assembly,
        feet: Some(FeetConfig { enabled: true, height: 15.0, width: 20.0, inset: 10.0, slope_angle: None, corner_finish: None }),
    }));

    let panel = PanelId::Face { assembly, face: Face::Front };
    let path = boxen_scene::CustomEdgePath {
        points: vec![boxen_geom::EdgePathPoint::new(0.0, 0.0), boxen_geom::EdgePathPoint::new(1.0, 0.0)],
        mirrored: false,
    };
    assert!(engine.dispatch(Action::SetCustomEdgePath { assembly, panel, edge: Edge::Bottom, status: EdgeStatus::Open, path }));

    let panels = engine.generate_panels();
    let front = front_panel(&panels);
    assert!(!front.outline.iter().any(|p| (p[1] - (-15.0)).abs() < 1e-6), "user's flat path should have suppressed the feet notch");
}
