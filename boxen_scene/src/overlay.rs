//! Per-panel overlay state an assembly carries on top of its geometric
//! definition: extensions, fillets, custom edge paths, cutouts, and boolean
//! modifications. All keyed by [`PanelId`] so regenerating panels re-derives
//! the same keys rather than drifting from whatever produced them.

use hashbrown::HashMap;

use boxen_geom::{EdgePathPoint, Point};
use boxen_joints::Face;

use crate::ids::PanelId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

pub const EDGES: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerFillet {
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomEdgePath {
    pub points: Vec<EdgePathPoint>,
    pub mirrored: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cutout {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64, segments: u32 },
    Polygon { points: Vec<Point> },
}

/// One user-drawn cutout as stored on a panel: the shape plus whether it is
/// additive (grows the outline past an open edge) or the default
/// subtractive/notching behavior. The path-analysis rule picks the exact
/// treatment from this flag and the shape's position.
#[derive(Clone, Debug, PartialEq)]
pub struct CutoutEntry {
    pub shape: Cutout,
    pub additive: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Overlays {
    pub edge_extensions: HashMap<(PanelId, Edge), f64>,
    /// Per-corner fillet override on one of the four nominal corners, keyed
    /// by the edge that follows the corner when tracing counter-clockwise
    /// (e.g. `Edge::Right` names the corner between the bottom and right
    /// edges).
    pub corner_fillets: HashMap<(PanelId, Edge), CornerFillet>,
    /// A single radius applied uniformly to every *eligible* vertex of the
    /// outline, nominal corners and custom-path/fillet-created vertices
    /// alike.
    pub all_corner_fillet: HashMap<PanelId, f64>,
    pub custom_edge_paths: HashMap<(PanelId, Edge), CustomEdgePath>,
    pub cutouts: HashMap<PanelId, Vec<CutoutEntry>>,
    /// The panel's outline after folding in every `OpenEdgeNotch`/
    /// `AdditiveExtend` cutout's boolean-op result, refreshed each time
    /// panels regenerate. Absent for a panel with no such cutout (its
    /// outline is just the outline synthesizer's output).
    pub modified_safe_area: HashMap<PanelId, Vec<Point>>,
}

impl Overlays {
    /// Drop every overlay entry whose `PanelId` is not in `live`. Called at
    /// commit time so overlays for panels that no longer exist (a removed
    /// face, a dropped subdivision) don't linger forever.
    pub fn garbage_collect(&mut self, live: &hashbrown::HashSet<PanelId>) {
        self.edge_extensions.retain(|(id, _), _| live.contains(id));
        self.corner_fillets.retain(|(id, _), _| live.contains(id));
        self.all_corner_fillet.retain(|id, _| live.contains(id));
        self.custom_edge_paths.retain(|(id, _), _| live.contains(id));
        self.cutouts.retain(|id, _| live.contains(id));
        self.modified_safe_area.retain(|id, _| live.contains(id));
    }
}

/// Maps a face's logical edge to which of its neighbor faces sits across
/// that edge, for a standard box topology (faces ring Front-Right-Back-Left
/// around the vertical axis; Top/Bottom close off each end). Reciprocal by
/// construction: `face_neighbor(a, e) == b` always has a matching edge `e'`
/// on `b` with `face_neighbor(b, e') == a`. Used to resolve gender and to
/// pick the outward direction for the finger generator.
pub fn face_neighbor(face: Face, edge: Edge) -> Face {
    use Edge::*;
    use Face::*;
    match (face, edge) {
        (Front, Top) | (Back, Top) | (Right, Top) | (Left, Top) => Top,
        (Front, Bottom) | (Back, Bottom) | (Right, Bottom) | (Left, Bottom) => Bottom,
        (Front, Left) => Left,
        (Front, Right) => Right,
        (Back, Left) => Right,
        (Back, Right) => Left,
        (Right, Left) => Front,
        (Right, Right) => Back,
        (Left, Left) => Back,
        (Left, Right) => Front,
        (Top, Top) => Back,
        (Top, Bottom) => Front,
        (Top, Left) => Left,
        (Top, Right) => Right,
        (Bottom, Top) => Front,
        (Bottom, Bottom) => Back,
        (Bottom, Left) => Left,
        (Bottom, Right) => Right,
    }
}
