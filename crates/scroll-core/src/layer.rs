//! Seam between the synchronization core and whatever renders the scene.
//!
//! A [`SceneLayer`] runs last in every frame, after the camera and act are
//! settled. Pointer input is routed to it between frames.

use serde::{Deserialize, Serialize};

use cinescroll_story_model::act::ActId;
use cinescroll_story_model::scroll::Progress;

use crate::camera_rig::CameraTransform;

/// Everything a scene may read while animating one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub frame: u64,
    /// Wall-clock seconds since the mount's first frame.
    pub elapsed_secs: f64,
    pub delta_secs: f64,
    pub progress: Progress,
    pub act: ActId,
    pub camera: CameraTransform,
}

/// Pointer interaction with a named scene entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "snake_case")]
pub enum PointerEvent {
    Enter(String),
    Leave(String),
    Click(String),
}

impl PointerEvent {
    pub fn target(&self) -> &str {
        match self {
            PointerEvent::Enter(id) | PointerEvent::Leave(id) | PointerEvent::Click(id) => id,
        }
    }
}

/// The only outward side effect of pointer handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    #[default]
    Auto,
    Pointer,
}

impl CursorStyle {
    /// CSS `cursor` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorStyle::Auto => "auto",
            CursorStyle::Pointer => "pointer",
        }
    }
}

/// Procedurally animated scene content.
pub trait SceneLayer {
    /// Advance animation for one frame.
    fn animate(&mut self, ctx: &FrameContext);

    /// Route a pointer event; returns the cursor to show.
    fn pointer(&mut self, event: &PointerEvent) -> CursorStyle;

    /// Drop any hover state. Called on teardown.
    fn release_pointer(&mut self) -> CursorStyle {
        CursorStyle::Auto
    }
}
