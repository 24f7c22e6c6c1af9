//! Preview lifecycle: try a batch of actions against a throwaway clone of the
//! live scene, then either fold it back in or drop it.
//!
//! [`Scene`] clones its [`boxen_scene::IdGen`] along with its assemblies (see
//! that type's own doc comment), so a preview started from one generator and
//! a parent scene kept mutating independently never mint colliding ids even
//! if the preview is later discarded and a fresh one started.

use boxen_scene::Scene;

use crate::action::{dispatch, Action};

/// A scene with an optional in-flight preview clone.
#[derive(Clone, Debug, Default)]
pub struct PreviewSession {
    live: Scene,
    preview: Option<Scene>,
}

impl PreviewSession {
    pub fn new(live: Scene) -> Self {
        Self { live, preview: None }
    }

    pub fn scene(&self) -> &Scene {
        self.preview.as_ref().unwrap_or(&self.live)
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.preview.as_mut().unwrap_or(&mut self.live)
    }

    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Start a preview (a full clone of the live scene). A second call before
    /// `commit_preview`/`discard_preview` replaces the in-flight one.
    pub fn start_preview(&mut self) {
        self.preview = Some(self.live.clone());
    }

    /// Apply `action` to the preview if one is active, otherwise directly to
    /// the live scene.
    pub fn apply(&mut self, action: Action) -> Result<(), boxen_scene::ActionError> {
        let target = self.preview.as_mut().unwrap_or(&mut self.live);
        dispatch(target, action)
    }

    /// Fold the preview into the live scene, replacing it outright.
    pub fn commit_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.live = preview;
        }
    }

    /// Drop the preview; the live scene is untouched.
    pub fn discard_preview(&mut self) {
        self.preview = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxen_joints::Axis;
    use boxen_scene::{Dimensions, Material};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.create_assembly(Dimensions::new(100.0, 80.0, 60.0), Material::default(), Axis::Y);
        scene
    }

    #[test]
    fn discarding_a_preview_leaves_the_live_scene_untouched() {
        let mut session = PreviewSession::new(sample_scene());
        let assembly = session.scene().assemblies[0].id;
        session.start_preview();
        session
            .apply(Action::SetDimensions { assembly, dimensions: Dimensions::new(200.0, 80.0, 60.0) })
            .unwrap();
        assert_eq!(session.scene().assemblies[0].dimensions.w, 200.0);
        session.discard_preview();
        assert_eq!(session.scene().assemblies[0].dimensions.w, 100.0);
    }

    #[test]
    fn committing_a_preview_replaces_the_live_scene() {
        let mut session = PreviewSession::new(sample_scene());
        let assembly = session.scene().assemblies[0].id;
        session.start_preview();
        session
            .apply(Action::SetDimensions { assembly, dimensions: Dimensions::new(200.0, 80.0, 60.0) })
            .unwrap();
        session.commit_preview();
        assert!(!session.has_preview());
        assert_eq!(session.scene().assemblies[0].dimensions.w, 200.0);
    }

    #[test]
    fn apply_without_a_preview_mutates_the_live_scene_directly() {
        let mut session = PreviewSession::new(sample_scene());
        let assembly = session.scene().assemblies[0].id;
        session
            .apply(Action::SetDimensions { assembly, dimensions: Dimensions::new(50.0, 80.0, 60.0) })
            .unwrap();
        assert_eq!(session.live.assemblies[0].dimensions.w, 50.0);
    }
}
