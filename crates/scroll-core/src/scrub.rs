//! Scroll-scrubbed camera timeline.
//!
//! A [`ScrubTimeline`] binds a [`CameraTrack`] to a trigger window
//! (`start`..`end` in page progress). Page progress inside the window maps
//! linearly onto track progress `[0, 1]`; outside it clamps.
//!
//! With [`Scrub::Immediate`] the playhead is the mapped progress. With
//! [`Scrub::Smoothed`] the playhead chases it over wall-clock time and
//! settles on the same value, so the resting pose is always the pure
//! function of progress.

use cinescroll_story_model::scroll::Progress;
use cinescroll_story_model::timeline::{CameraPose, CameraTrack};

/// How the playhead follows the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scrub {
    /// Playhead equals trigger progress every frame.
    #[default]
    Immediate,
    /// Playhead catches up with trigger progress in roughly `lag_secs`.
    Smoothed { lag_secs: f64 },
}

/// Page-progress window driving the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubTrigger {
    pub start: f64,
    pub end: f64,
    pub scrub: Scrub,
}

impl Default for ScrubTrigger {
    /// Whole page, immediate scrub.
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            scrub: Scrub::Immediate,
        }
    }
}

impl ScrubTrigger {
    /// Map page progress onto the trigger window.
    pub fn local(&self, progress: Progress) -> f64 {
        let span = self.end - self.start;
        if !(span > 0.0) {
            return if progress.value() >= self.end { 1.0 } else { 0.0 };
        }
        ((progress.value() - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Playhead gap below which a smoothed scrub snaps to its target.
const SNAP_EPSILON: f64 = 1e-6;

/// A camera track scrubbed by progress.
#[derive(Debug, Clone)]
pub struct ScrubTimeline {
    track: CameraTrack,
    fallback: CameraPose,
    trigger: ScrubTrigger,
    playhead: f64,
    killed: bool,
}

impl ScrubTimeline {
    /// `fallback` supplies values for axes the track leaves empty.
    pub fn new(track: CameraTrack, fallback: CameraPose, trigger: ScrubTrigger) -> Self {
        Self {
            track,
            fallback,
            trigger,
            playhead: 0.0,
            killed: false,
        }
    }

    /// Pose for page progress `progress`, ignoring smoothing.
    pub fn query(&self, progress: Progress) -> CameraPose {
        self.pose_at_local(self.trigger.local(progress))
    }

    /// Pose at track-local progress.
    pub fn pose_at_local(&self, local: f64) -> CameraPose {
        self.track.sample_or(local, &self.fallback)
    }

    /// Move the playhead towards `progress` and return the resulting pose.
    ///
    /// A killed timeline keeps returning the pose at its last playhead.
    pub fn update(&mut self, progress: Progress, delta_secs: f64) -> CameraPose {
        if !self.killed {
            let target = self.trigger.local(progress);
            self.playhead = match self.trigger.scrub {
                Scrub::Smoothed { lag_secs } if lag_secs > 0.0 => {
                    chase(self.playhead, target, delta_secs, lag_secs)
                }
                _ => target,
            };
        }
        self.pose_at_local(self.playhead)
    }

    /// Jump the playhead to `progress` regardless of smoothing.
    pub fn seek(&mut self, progress: Progress) {
        if !self.killed {
            self.playhead = self.trigger.local(progress);
        }
    }

    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn trigger(&self) -> ScrubTrigger {
        self.trigger
    }

    pub fn track(&self) -> &CameraTrack {
        &self.track
    }

    /// Stop following progress. Idempotent.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }
}

/// Exponential approach covering ~98% of the gap in `lag_secs`.
fn chase(current: f64, target: f64, delta_secs: f64, lag_secs: f64) -> f64 {
    let alpha = 1.0 - (-4.0 * delta_secs.max(0.0) / lag_secs).exp();
    let next = current + (target - current) * alpha;
    if (target - next).abs() < SNAP_EPSILON {
        target
    } else {
        next
    }
}
