//! Boxen Dispatch: the action catalog that mutates a [`boxen_scene::Scene`],
//! and the preview/commit/discard session that lets a caller try a batch of
//! actions before deciding whether to keep them.

mod action;
mod preview;

pub use action::{dispatch, Action};
pub use preview::PreviewSession;
