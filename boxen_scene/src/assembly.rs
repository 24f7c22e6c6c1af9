use hashbrown::HashMap;

use boxen_arena::Arena;
use boxen_joints::{Axis, Face, FaceState};

use crate::ids::{Id, IdGen};
use crate::material::{Dimensions, Material};
use crate::overlay::Overlays;
use crate::panel::Panel;
use crate::void_tree::{Bounds3, CrossLapSlot, VoidId, VoidPayload};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CornerFinish {
    Square,
    Rounded(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeetConfig {
    pub enabled: bool,
    pub height: f64,
    pub width: f64,
    pub inset: f64,
    pub slope_angle: Option<f64>,
    pub corner_finish: Option<CornerFinish>,
}

/// An assembly: a box (or a sub-box hosted in a void) with its own
/// dimensions, material, face solidity, lid axis, and void tree.
///
/// Panels are derived, never stored persistently — but a generation is
/// cached here and only recomputed when [`Assembly::dirty`] is set, per the
/// engine's memoization rule.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub id: Id,
    pub dimensions: Dimensions,
    pub material: Material,
    pub faces: HashMap<Face, FaceState>,
    pub axis: Axis,
    pub feet: Option<FeetConfig>,
    /// Per-face clearance between this assembly and the void hosting it.
    /// Only meaningful for sub-assemblies.
    pub clearance: f64,
    pub voids: Arena<VoidPayload>,
    pub root_void: VoidId,
    pub cross_laps: Vec<CrossLapSlot>,
    pub overlays: Overlays,
    pub dirty: bool,
    pub(crate) cached_panels: Option<Vec<Panel>>,
}

impl Assembly {
    pub fn new(id_gen: &mut IdGen, dimensions: Dimensions, material: Material, axis: Axis) -> Self {
        let mut voids = Arena::new();
        let root_void = voids.insert(None, VoidPayload::leaf(id_gen.next(), Bounds3::new(dimensions.w, dimensions.h, dimensions.d)));
        let mut faces = HashMap::new();
        for f in Face::ALL {
            faces.insert(f, FaceState::default());
        }
        Self {
            id: id_gen.next(),
            dimensions,
            material,
            faces,
            axis,
            feet: None,
            clearance: 1.0,
            voids,
            root_void,
            cross_laps: Vec::new(),
            overlays: Overlays::default(),
            dirty: true,
            cached_panels: None,
        }
    }

    pub fn face_state(&self, face: Face) -> FaceState {
        self.faces.get(&face).copied().unwrap_or_default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.voids.mark_dirty(self.root_void);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty || self.voids.is_dirty(self.root_void)
    }
}
