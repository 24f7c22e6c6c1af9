//! Boxen Scene: the assembly/void tree, panel outline and hole synthesis,
//! and the mutators that make up the action catalog.
//!
//! [`Scene`] owns an ordered set of [`Assembly`] values; each assembly owns a
//! [`void_tree`] describing how its interior is subdivided, and carries an
//! [`overlay::Overlays`] of per-panel extensions, fillets, custom edge paths
//! and cutouts on top of its geometric definition. [`scene::generate_panels`]
//! is where [`outline`], [`holes`], and [`safe_area`] come together to turn
//! that state into a concrete list of [`panel::Panel`]s, memoized against the
//! assembly's (and void tree's) dirty bit.

mod assembly;
mod error;
mod holes;
mod ids;
mod material;
mod outline;
mod overlay;
mod panel;
mod safe_area;
mod scene;
mod void_tree;

pub use assembly::{Assembly, CornerFinish, FeetConfig};
pub use error::ActionError;
pub use holes::{apply_cutouts, cross_lap_slot, edge_notch, finalize_hole, sub_assembly_wall_slot};
pub use ids::{AssemblyId, Id, IdGen, PanelId};
pub use material::{Dimensions, Material};
pub use outline::{feet_edge_path, synthesize_outline, EdgeInput, OutlineInput};
pub use overlay::{face_neighbor, CornerFillet, CustomEdgePath, Cutout, CutoutEntry, Edge, Overlays, EDGES};
pub use panel::{CornerEligibility, Panel, PanelSource, PanelTransform};
pub use safe_area::{classify_path, compute_safe_area, point_in_safe_area, shape_strictly_inside, PathClass, Rect};
pub use scene::*;
pub use void_tree::{
    add_grid_subdivision, add_linear_subdivision, move_grid_divider, move_linear_divider, remove_subdivision, Bounds3,
    CrossLapSlot, Subdivision, VoidId, VoidPayload,
};
