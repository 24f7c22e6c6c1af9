//! A generated panel: a flat piece cut from one sheet, with its outline,
//! holes, 3D placement, and the per-edge bookkeeping the outline
//! synthesizer and hole generator leave behind for downstream consumers
//! (safe-area computation, snapshot emission).

use boxen_geom::Point;
use boxen_joints::{Axis, EdgeStatus, Face};
use ultraviolet::{Rotor3, Vec3};

use crate::ids::{PanelId, VoidId};
use crate::overlay::Edge;

/// Where a panel came from: one of an assembly's six faces, or a divider
/// panel splitting a void.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelSource {
    Face { face: Face },
    Divider { parent_void: VoidId, axis: Axis, position: f64 },
}

/// Placement of a panel's local 2D frame in the assembly's 3D interior
/// space. `origin` is where the panel's local `(0, 0)` sits; `rotation`
/// carries the local X/Y axes into the 3D frame.
#[derive(Clone, Copy, Debug)]
pub struct PanelTransform {
    pub origin: Vec3,
    pub rotation: Rotor3,
}

impl PanelTransform {
    pub fn identity() -> Self {
        Self {
            origin: Vec3::zero(),
            rotation: Rotor3::identity(),
        }
    }

    pub fn to_world(&self, local: Point) -> Vec3 {
        let mut v = Vec3::new(local.x as f32, local.y as f32, 0.0);
        self.rotation.rotate_vec(&mut v);
        self.origin + v
    }
}

/// One vertex of a synthesized outline and whether a corner fillet may be
/// applied there, with the material-derived bound on how large it may be.
#[derive(Clone, Copy, Debug)]
pub struct CornerEligibility {
    pub vertex_index: usize,
    pub eligible: bool,
    pub max_radius: f64,
}

/// One generated panel.
#[derive(Clone, Debug)]
pub struct Panel {
    pub id: PanelId,
    pub source: PanelSource,
    pub width: f64,
    pub height: f64,
    pub transform: PanelTransform,
    pub outline: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
    pub corner_eligibility: Vec<CornerEligibility>,
    pub edge_status: [(Edge, EdgeStatus); 4],
}

impl Panel {
    pub fn edge_status_of(&self, edge: Edge) -> EdgeStatus {
        self.edge_status
            .iter()
            .find(|(e, _)| *e == edge)
            .map(|(_, s)| *s)
            .expect("edge_status always covers all four edges")
    }
}
