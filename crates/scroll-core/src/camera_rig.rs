//! Camera motion controller.
//!
//! The rig owns the camera transform. Every frame it:
//! 1. scrubs the camera track with the current progress,
//! 2. layers any running shake on top of the position,
//! 3. re-targets the fixed look-at point,
//! 4. publishes the result to every [`CameraReader`].
//!
//! Nothing else writes the camera.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use cinescroll_story_model::scroll::Progress;
use cinescroll_story_model::story::{ShakeConfig, Story};
use cinescroll_story_model::vector::Vec3;

use crate::act_resolver::ActChange;
use crate::scrub::{ScrubTimeline, ScrubTrigger};

/// Camera state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CameraTransform {
    /// Final eye position (scrubbed position plus shake).
    pub position: Vec3,
    /// Euler offsets applied after looking at `look_at`.
    pub rotation: Vec3,
    /// Point the camera faces.
    pub look_at: Vec3,
    /// Shake contribution included in `position`.
    pub shake: Vec3,
}

impl CameraTransform {
    /// Unit vector from the eye towards the look-at point.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalized()
    }
}

/// Read-only view of the rig's transform.
#[derive(Debug, Clone)]
pub struct CameraReader {
    cell: Rc<Cell<CameraTransform>>,
}

impl CameraReader {
    pub fn get(&self) -> CameraTransform {
        self.cell.get()
    }

    pub fn position(&self) -> Vec3 {
        self.cell.get().position
    }
}

#[derive(Debug, Clone, Copy)]
struct Shake {
    config: ShakeConfig,
    started_secs: f64,
}

impl Shake {
    /// Offset at `now`, or `None` once finished.
    fn offset(&self, now_secs: f64) -> Option<Vec3> {
        let age = now_secs - self.started_secs;
        if age < 0.0 || age >= self.config.duration_secs {
            return None;
        }
        let decay = 1.0 - age / self.config.duration_secs;
        let phase = std::f64::consts::TAU * self.config.frequency_hz * age;
        let amplitude = self.config.amplitude * decay * decay;
        Some(Vec3::new(
            amplitude * phase.sin(),
            amplitude * 0.6 * (phase * 1.3).cos(),
            0.0,
        ))
    }
}

/// Owns and updates the camera transform.
pub struct CameraRig {
    timeline: ScrubTimeline,
    look_at: Vec3,
    shake_config: Option<ShakeConfig>,
    shake: Option<Shake>,
    transform: Rc<Cell<CameraTransform>>,
    torn_down: bool,
}

impl CameraRig {
    pub fn new(story: &Story, trigger: ScrubTrigger) -> Self {
        let timeline = ScrubTimeline::new(story.camera.clone(), story.initial_pose, trigger);
        let pose = timeline.query(Progress::ZERO);
        let transform = CameraTransform {
            position: pose.position,
            rotation: pose.rotation,
            look_at: story.look_at,
            shake: Vec3::ZERO,
        };
        Self {
            timeline,
            look_at: story.look_at,
            shake_config: story.shake,
            shake: None,
            transform: Rc::new(Cell::new(transform)),
            torn_down: false,
        }
    }

    /// Scrub to `progress` and publish the transform.
    pub fn update(&mut self, progress: Progress, delta_secs: f64, now_secs: f64) -> CameraTransform {
        let pose = self.timeline.update(progress, delta_secs);

        let shake = match self.shake.and_then(|s| s.offset(now_secs)) {
            Some(offset) => offset,
            None => {
                self.shake = None;
                Vec3::ZERO
            }
        };

        let transform = CameraTransform {
            position: pose.position + shake,
            rotation: pose.rotation,
            look_at: self.look_at,
            shake,
        };
        self.transform.set(transform);
        transform
    }

    /// Start the shake when the resolver enters the configured act.
    pub fn on_act_change(&mut self, change: &ActChange, now_secs: f64) {
        if self.torn_down {
            return;
        }
        if let Some(config) = self.shake_config {
            if change.to == config.act {
                tracing::debug!(act = %change.to, "Camera shake started");
                self.shake = Some(Shake {
                    config,
                    started_secs: now_secs,
                });
            }
        }
    }

    /// Accessor for components that need to read the camera.
    pub fn reader(&self) -> CameraReader {
        CameraReader {
            cell: Rc::clone(&self.transform),
        }
    }

    pub fn transform(&self) -> CameraTransform {
        self.transform.get()
    }

    pub fn timeline(&self) -> &ScrubTimeline {
        &self.timeline
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Kill the scrub timeline and any shake. Idempotent.
    pub fn teardown(&mut self) {
        self.timeline.kill();
        self.shake = None;
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinescroll_story_model::act::ActId;

    fn rig() -> CameraRig {
        CameraRig::new(&Story::five_act(), ScrubTrigger::default())
    }

    fn change(to: u8) -> ActChange {
        ActChange {
            from: ActId(to - 1),
            to: ActId(to),
            progress: Progress::new(0.2),
        }
    }

    #[test]
    fn test_initial_transform_is_story_start() {
        let rig = rig();
        let t = rig.reader().get();
        assert_eq!(t.position, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(t.look_at, Vec3::new(0.0, 7.0, 0.0));
    }

    #[test]
    fn test_reader_sees_updates() {
        let mut rig = rig();
        let reader = rig.reader();
        let t = rig.update(Progress::ONE, 0.016, 0.0);
        assert_eq!(reader.get(), t);
        assert_eq!(reader.position(), Vec3::new(0.0, 13.0, 13.0));
        assert!(reader.get().forward().y < 0.0);
    }

    #[test]
    fn test_look_at_fixed_every_frame() {
        let mut rig = rig();
        for p in [0.0, 0.3, 0.7, 1.0] {
            assert_eq!(rig.update(Progress::new(p), 0.016, p).look_at, Vec3::new(0.0, 7.0, 0.0));
        }
    }

    #[test]
    fn test_shake_on_configured_act_then_decays() {
        let mut rig = rig();
        rig.on_act_change(&change(3), 0.0);
        assert!(!rig.is_shaking());

        rig.on_act_change(&change(2), 10.0);
        assert!(rig.is_shaking());
        let shaken = rig.update(Progress::new(0.25), 0.016, 10.01);
        assert_ne!(shaken.shake, Vec3::ZERO);
        assert_eq!(shaken.position, rig.timeline().query(Progress::new(0.25)).position + shaken.shake);

        let settled = rig.update(Progress::new(0.25), 0.016, 11.0);
        assert_eq!(settled.shake, Vec3::ZERO);
        assert!(!rig.is_shaking());
    }

    #[test]
    fn test_teardown_kills_timeline_and_shake() {
        let mut rig = rig();
        rig.on_act_change(&change(2), 0.0);
        rig.teardown();
        rig.teardown();
        assert!(rig.timeline().is_killed());
        assert!(!rig.is_shaking());

        rig.on_act_change(&change(2), 1.0);
        assert!(!rig.is_shaking());
    }
}
