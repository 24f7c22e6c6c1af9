//! The public facade: one [`Engine`] per document, wrapping dispatch,
//! preview, snapshot emission and the alignment-error log behind the
//! surface the consuming tools (viewport, exporter, test harness) build on.

use boxen_dispatch::{dispatch, Action, PreviewSession};
use boxen_scene::{Assembly, Id, VoidId};
use boxen_snapshot::{generate_panel_list, scene_snapshot, PanelList, SceneSnapshot};

use crate::alignment::AlignmentError;

/// An opaque handle resolved by [`Engine::find_by_id`]: callers don't need
/// to know in advance whether an id names an assembly or a void.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Handle {
    Assembly(Id),
    Void { assembly: Id, void: VoidId },
}

/// One document: a live scene, an optional preview clone, and the
/// accumulated alignment-error log from the last commit (or direct
/// dispatch, if no preview was ever started).
#[derive(Debug, Default)]
pub struct Engine {
    session: PreviewSession,
    alignment_errors: Vec<AlignmentError>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` to the active scene (the preview, if one is open,
    /// otherwise the main scene). Returns whether it took effect; per the
    /// engine's error taxonomy there is no error value exposed to callers,
    /// only a log line and this boolean.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match self.session.apply(action) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("action rejected: {err}");
                false
            }
        }
    }

    pub fn start_preview(&mut self) {
        self.session.start_preview();
    }

    pub fn commit_preview(&mut self) {
        self.session.commit_preview();
    }

    pub fn discard_preview(&mut self) {
        self.session.discard_preview();
    }

    pub fn has_preview(&self) -> bool {
        self.session.has_preview()
    }

    pub fn get_scene_snapshot(&self) -> SceneSnapshot {
        scene_snapshot(self.session.scene())
    }

    pub fn generate_panels(&mut self) -> PanelList {
        let (panels, mut alignment_errors) = generate_panel_list(self.session.scene_mut());
        self.alignment_errors.clear();
        for message in alignment_errors.drain(..) {
            log::warn!("{message}");
            self.alignment_errors.push(AlignmentError(message));
        }
        panels
    }

    /// Every top-level assembly id currently in the active scene, in scene
    /// order. `CreateAssembly` reports only success/failure (see
    /// `dispatch`), so this is how a caller recovers the id it just minted.
    pub fn assembly_ids(&self) -> Vec<Id> {
        self.session.scene().assemblies.iter().map(|a| a.id).collect()
    }

    pub fn find_assembly(&self, id: Id) -> Option<&Assembly> {
        self.session.scene().find_assembly(id)
    }

    pub fn find_void(&self, id: Id) -> Option<(&Assembly, VoidId)> {
        self.session.scene().find_void(id)
    }

    pub fn find_by_id(&self, id: Id) -> Option<Handle> {
        if self.find_assembly(id).is_some() {
            return Some(Handle::Assembly(id));
        }
        self.find_void(id).map(|(assembly, void)| Handle::Void { assembly: assembly.id, void })
    }

    /// Joint/invariant violations accumulated from the last commit (or from
    /// direct dispatch, outside of a preview). Read-only: the engine never
    /// branches on these, it only reports them.
    pub fn alignment_errors(&self) -> &[AlignmentError] {
        &self.alignment_errors
    }
}
