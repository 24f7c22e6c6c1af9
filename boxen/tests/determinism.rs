//! Two universal invariants that don't fit naturally as proptest
//! strategies: repeated snapshots of the same sequence are byte-identical,
//! and committing a preview produces the same scene as applying the same
//! actions directly.

use boxen::{Action, Engine};
use boxen_joints::{Axis, Face};
use boxen_scene::{Dimensions, Material};

fn build(engine: &mut Engine) -> boxen_scene::Id {
    assert!(engine.dispatch(Action::CreateAssembly {
        dimensions: Dimensions::new(120.0, 80.0, 50.0),
        material: Material::default(),
        axis: Axis::Y,
    }));
    let assembly = engine.assembly_ids()[0];
    assert!(engine.dispatch(Action::SetFaceSolid { assembly, face: Face::Top, solid: false }));
    assembly
}

#[test]
fn identical_action_sequences_produce_byte_identical_snapshots() {
    let mut a = Engine::new();
    build(&mut a);
    let mut b = Engine::new();
    build(&mut b);

    let json_a = serde_json::to_string(&a.get_scene_snapshot()).expect("snapshot serializes");
    let json_b = serde_json::to_string(&b.get_scene_snapshot()).expect("snapshot serializes");
    assert_eq!(json_a, json_b);
}

#[test]
fn committing_a_preview_matches_applying_directly() {
    let mut direct = Engine::new();
    build(&mut direct);
    let direct_json = serde_json::to_string(&direct.get_scene_snapshot()).expect("snapshot serializes");

    let mut previewed = Engine::new();
    previewed.start_preview();
    build(&mut previewed);
    assert!(previewed.has_preview());
    previewed.commit_preview();
    assert!(!previewed.has_preview());
    let committed_json = serde_json::to_string(&previewed.get_scene_snapshot()).expect("snapshot serializes");

    assert_eq!(direct_json, committed_json);
}

#[test]
fn discarding_a_preview_leaves_the_live_scene_untouched() {
    let mut engine = Engine::new();
    let before = serde_json::to_string(&engine.get_scene_snapshot()).expect("snapshot serializes");

    engine.start_preview();
    build(&mut engine);
    engine.discard_preview();

    let after = serde_json::to_string(&engine.get_scene_snapshot()).expect("snapshot serializes");
    assert_eq!(before, after);
}
