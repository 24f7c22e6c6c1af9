//! Gender and ownership resolution: who is male, who is female, and which
//! edges are open, at every face-to-face boundary.

use core::fmt;

/// One of the six faces of an assembly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    /// Base priority: lower wins (is male) against a higher-priority face,
    /// absent any override.
    pub fn base_priority(self) -> u8 {
        match self {
            Face::Front => 1,
            Face::Back => 2,
            Face::Left => 3,
            Face::Right => 4,
            Face::Top => 5,
            Face::Bottom => 6,
        }
    }

    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Left => "left",
            Face::Right => "right",
            Face::Top => "top",
            Face::Bottom => "bottom",
        };
        f.write_str(s)
    }
}

/// World/assembly axis. Selects which face pair is the lid pair: `Y` ->
/// top/bottom, `Z` -> front/back, `X` -> left/right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn lid_pair(self) -> (Face, Face) {
        match self {
            Axis::Y => (Face::Top, Face::Bottom),
            Axis::Z => (Face::Front, Face::Back),
            Axis::X => (Face::Left, Face::Right),
        }
    }
}

/// Tab direction override for a lid face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LidTabDirection {
    TabsOut,
    TabsIn,
}

/// Final gender/openness of one edge, after overrides are applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EdgeStatus {
    Open,
    MaleJoint,
    FemaleJoint,
}

/// Per-face solidity and lid-direction state, as stored on an assembly.
#[derive(Copy, Clone, Debug)]
pub struct FaceState {
    pub solid: bool,
    pub lid_tab_direction: Option<LidTabDirection>,
}

impl Default for FaceState {
    fn default() -> Self {
        Self {
            solid: true,
            lid_tab_direction: None,
        }
    }
}

/// Resolve the edge status between two adjacent faces of the same assembly,
/// applying the open-face rule, then the lid override, in that order.
///
/// `axis` is the assembly's axis (selects the lid pair); `faces` must be
/// indexable by [`Face`] for every face of the assembly.
pub fn resolve_face_edge(
    a: Face,
    b: Face,
    axis: Axis,
    faces: impl Fn(Face) -> FaceState,
) -> EdgeStatus {
    let state_a = faces(a);
    let state_b = faces(b);

    match (state_a.solid, state_b.solid) {
        (false, false) => return EdgeStatus::Open,
        (false, true) | (true, false) => return EdgeStatus::Open,
        (true, true) => {}
    }

    let (lid_a, lid_b) = axis.lid_pair();
    if a == lid_a || a == lid_b {
        if let Some(dir) = state_a.lid_tab_direction {
            return match dir {
                LidTabDirection::TabsOut => EdgeStatus::MaleJoint,
                LidTabDirection::TabsIn => EdgeStatus::FemaleJoint,
            };
        }
    }
    if b == lid_a || b == lid_b {
        if let Some(dir) = state_b.lid_tab_direction {
            return match dir {
                LidTabDirection::TabsOut => EdgeStatus::FemaleJoint,
                LidTabDirection::TabsIn => EdgeStatus::MaleJoint,
            };
        }
    }

    if a.base_priority() < b.base_priority() {
        EdgeStatus::MaleJoint
    } else {
        EdgeStatus::FemaleJoint
    }
}

/// Status of a sub-assembly wall edge where it meets the hosting face, per
/// the sub-assembly ownership rule: always male on its outer surfaces,
/// unless the hosting face is itself open.
pub fn resolve_sub_assembly_edge(hosting_face_open: bool) -> EdgeStatus {
    if hosting_face_open {
        EdgeStatus::Open
    } else {
        EdgeStatus::MaleJoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_solid(_: Face) -> FaceState {
        FaceState::default()
    }

    #[test]
    fn lower_priority_face_is_male() {
        let status = resolve_face_edge(Face::Front, Face::Left, Axis::Y, all_solid);
        assert_eq!(status, EdgeStatus::MaleJoint);
        let status = resolve_face_edge(Face::Left, Face::Front, Axis::Y, all_solid);
        assert_eq!(status, EdgeStatus::FemaleJoint);
    }

    #[test]
    fn missing_face_makes_survivor_open() {
        let faces = |f: Face| FaceState {
            solid: f != Face::Top,
            lid_tab_direction: None,
        };
        let status = resolve_face_edge(Face::Top, Face::Front, Axis::Y, faces);
        assert_eq!(status, EdgeStatus::Open);
    }

    #[test]
    fn lid_tabs_out_overrides_priority() {
        let faces = |f: Face| FaceState {
            solid: true,
            lid_tab_direction: if f == Face::Top {
                Some(LidTabDirection::TabsOut)
            } else {
                None
            },
        };
        let status = resolve_face_edge(Face::Top, Face::Front, Axis::Y, faces);
        assert_eq!(status, EdgeStatus::MaleJoint);
        let status = resolve_face_edge(Face::Front, Face::Top, Axis::Y, faces);
        assert_eq!(status, EdgeStatus::FemaleJoint);
    }

    #[test]
    fn lid_tabs_in_makes_lid_female_even_though_it_would_win_priority() {
        let faces = |f: Face| FaceState {
            solid: true,
            lid_tab_direction: if f == Face::Front {
                Some(LidTabDirection::TabsIn)
            } else {
                None
            },
        };
        let status = resolve_face_edge(Face::Front, Face::Back, Axis::Z, faces);
        assert_eq!(status, EdgeStatus::FemaleJoint);
    }

    #[test]
    fn sub_assembly_is_male_unless_host_open() {
        assert_eq!(resolve_sub_assembly_edge(false), EdgeStatus::MaleJoint);
        assert_eq!(resolve_sub_assembly_edge(true), EdgeStatus::Open);
    }
}
