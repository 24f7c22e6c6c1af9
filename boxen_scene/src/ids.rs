use core::fmt;

/// An opaque, stable handle to an assembly, void, or sub-assembly.
///
/// Unlike [`boxen_arena::NodeId`] (which is scoped to one tree and reused
/// once a slot is freed), an `Id` is a monotonically increasing counter value
/// that is never reused for the lifetime of a [`crate::Scene`] — including
/// its preview clone. It is what `findAssembly`/`findVoid`/`findById` hand
/// back to callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

impl Id {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues fresh [`Id`]s. Cloning a [`crate::Scene`] clones its generator too,
/// so a preview and its parent never mint colliding ids.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdGen(u64);

impl IdGen {
    pub fn next(&mut self) -> Id {
        self.0 += 1;
        Id(self.0)
    }
}

pub type AssemblyId = Id;
pub type VoidId = Id;

/// Deterministic derivation of a panel's identity from where it comes from,
/// per the "panel ids are deterministic derivations of void/face/axis/
/// position" design note. Stringification (for snapshot keys) happens in
/// `boxen_snapshot`, which also owns float formatting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanelId {
    Face {
        assembly: AssemblyId,
        face: boxen_joints::Face,
    },
    Divider {
        parent_void: VoidId,
        axis: boxen_joints::Axis,
        /// Position along `axis`, rounded to the nearest micrometer so the
        /// id can be hashed/compared exactly.
        position_micro: i64,
    },
}

pub fn micro(position_mm: f64) -> i64 {
    (position_mm * 1000.0).round() as i64
}
