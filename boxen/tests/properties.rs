//! Property-based tests for the universal invariants asserted over any valid
//! action sequence: outline winding, hole containment, and the subdivision
//! dimension identity.

use proptest::prelude::*;

use boxen::{Action, Engine};
use boxen_geom::polygon::{point_in_polygon, signed_area};
use boxen_joints::Axis;
use boxen_scene::{Dimensions, Material};

fn dims() -> impl Strategy<Value = (f64, f64, f64)> {
    (40.0..400.0f64, 40.0..400.0f64, 40.0..400.0f64)
}

proptest! {
    /// Every emitted outline winds counter-clockwise, and every hole winds
    /// the opposite way, regardless of box dimensions.
    #[test]
    fn outline_and_hole_windings_are_canonical((w, h, d) in dims()) {
        let mut engine = Engine::new();
        engine.dispatch(Action::CreateAssembly { dimensions: Dimensions::new(w, h, d), material: Material::default(), axis: Axis::Y });
        let panels = engine.generate_panels();

        for panel in &panels.panels {
            let outline: Vec<_> = panel.outline.iter().map(|[x, y]| boxen_geom::Point::new(*x, *y)).collect();
            prop_assert!(signed_area(&outline) > 0.0, "panel {} outline should wind counter-clockwise", panel.id);

            for hole in &panel.holes {
                let hole: Vec<_> = hole.iter().map(|[x, y]| boxen_geom::Point::new(*x, *y)).collect();
                prop_assert!(signed_area(&hole) < 0.0, "panel {} hole should wind clockwise", panel.id);
            }
        }
    }

    /// Every hole sits strictly inside its panel's outline.
    #[test]
    fn holes_are_strictly_inside_their_outline((w, h, d) in dims()) {
        let mut engine = Engine::new();
        engine.dispatch(Action::CreateAssembly { dimensions: Dimensions::new(w, h, d), material: Material::default(), axis: Axis::Y });
        let panels = engine.generate_panels();

        for panel in &panels.panels {
            let outline: Vec<_> = panel.outline.iter().map(|[x, y]| boxen_geom::Point::new(*x, *y)).collect();
            for hole in &panel.holes {
                for [x, y] in hole {
                    prop_assert!(point_in_polygon(boxen_geom::Point::new(*x, *y), &outline), "hole vertex ({x}, {y}) escapes panel {} outline", panel.id);
                }
            }
        }
    }

    /// A linear subdivision's child spans plus the divider material always
    /// reconstruct the parent void's size on that axis.
    #[test]
    fn linear_subdivision_preserves_total_span(
        (w, h, d) in dims(),
        position_fraction in 0.2f64..0.8,
    ) {
        let mut engine = Engine::new();
        engine.dispatch(Action::CreateAssembly { dimensions: Dimensions::new(w, h, d), material: Material::default(), axis: Axis::Y });
        let assembly = engine.assembly_ids()[0];

        let root_void_id = {
            let a = engine.find_assembly(assembly).unwrap();
            a.voids.get(a.root_void).unwrap().id
        };
        let (_, root_handle) = engine.find_void(root_void_id).unwrap();
        let position = w * position_fraction;
        let mt = Material::default().thickness;

        if engine.dispatch(Action::AddLinearSubdivision { assembly, void: root_handle, axis: Axis::X, positions: vec![position] }) {
            let snapshot = engine.get_scene_snapshot();
            let root = &snapshot.assemblies[0].void_tree;
            prop_assert_eq!(root.children.len(), 2);
            let span: f64 = root.children.iter().map(|c| c.bounds.x.1 - c.bounds.x.0).sum();
            prop_assert!((span + mt - w).abs() < 1e-6);
        }
    }
}
