//! Damped scrolling.
//!
//! Input moves a *target* offset; every tick eases the smoothed offset
//! towards it. A new target restarts the tween from wherever the smoothed
//! offset currently is, so rapid wheel input never jumps backwards.
//!
//! There is no internal timer. The offset only moves when the owner calls
//! [`SmoothScroll::tick`].

use cinescroll_common::config::SmoothScrollConfig;
use cinescroll_story_model::scroll::{ScrollEventKind, ScrollState};
use cinescroll_story_model::timeline::EasingFunction;

use crate::registry::{CallbackRegistry, Registration};

/// Driver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScrollOptions {
    /// Time for the smoothed offset to reach a new target (seconds).
    pub duration_secs: f64,
    pub easing: EasingFunction,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
    /// When false, wheel input jumps straight to the target.
    pub smooth_wheel: bool,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            easing: EasingFunction::ExpoOut,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_wheel: true,
        }
    }
}

impl From<&SmoothScrollConfig> for SmoothScrollOptions {
    fn from(config: &SmoothScrollConfig) -> Self {
        let easing = EasingFunction::from_name(&config.easing).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown smooth-scroll easing {:?}, using expo.out",
                config.easing
            );
            EasingFunction::ExpoOut
        });
        Self {
            duration_secs: config.duration_secs.max(0.0),
            easing,
            wheel_multiplier: config.wheel_multiplier,
            touch_multiplier: config.touch_multiplier,
            smooth_wheel: config.smooth_wheel,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f64,
    to: f64,
    elapsed_secs: f64,
}

/// Smooth-scroll driver owning the [`ScrollState`].
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    state: ScrollState,
    limit: f64,
    tween: Option<Tween>,
    running: bool,
    destroyed: bool,
    listeners: CallbackRegistry<ScrollState>,
}

impl SmoothScroll {
    /// Create a running driver scrolling within `[0, limit]`.
    pub fn new(options: SmoothScrollOptions, limit: f64) -> Self {
        Self {
            options,
            state: ScrollState::default(),
            limit: sanitize_limit(limit),
            tween: None,
            running: true,
            destroyed: false,
            listeners: CallbackRegistry::new(),
        }
    }

    /// Apply one input. Returns whether the target moved.
    ///
    /// Resize input is not handled here; the owner calls
    /// [`SmoothScroll::set_limit`] with the new extent.
    pub fn handle(&mut self, input: &ScrollEventKind) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match *input {
            ScrollEventKind::Wheel { delta } => {
                let target = self.state.raw_offset + delta * self.options.wheel_multiplier;
                if self.options.smooth_wheel {
                    self.retarget(target)
                } else {
                    self.jump(target)
                }
            }
            ScrollEventKind::Touch { delta } => {
                let target = self.state.raw_offset + delta * self.options.touch_multiplier;
                self.retarget(target)
            }
            ScrollEventKind::Programmatic { target, immediate } => {
                if immediate {
                    self.jump(target)
                } else {
                    self.retarget(target)
                }
            }
            ScrollEventKind::Resize { .. } => false,
        }
    }

    /// Tween towards an absolute offset.
    pub fn scroll_to(&mut self, target: f64) -> bool {
        self.accepts_input() && self.retarget(target)
    }

    /// Jump to an absolute offset without smoothing.
    pub fn jump_to(&mut self, target: f64) -> bool {
        self.accepts_input() && self.jump(target)
    }

    /// Advance the tween by `delta_ms`. Stopped or destroyed drivers hold
    /// their offset.
    pub fn tick(&mut self, delta_ms: f64) -> ScrollState {
        if !self.running || self.destroyed {
            self.state.velocity = 0.0;
            return self.state;
        }

        let before = self.state.smoothed_offset;
        if let Some(mut tween) = self.tween {
            tween.elapsed_secs += delta_ms.max(0.0) / 1000.0;
            let t = if self.options.duration_secs > 0.0 {
                tween.elapsed_secs / self.options.duration_secs
            } else {
                1.0
            };

            if t >= 1.0 {
                self.state.smoothed_offset = tween.to;
                self.tween = None;
            } else {
                let eased = self.options.easing.apply(t);
                self.state.smoothed_offset = tween.from + (tween.to - tween.from) * eased;
                self.tween = Some(tween);
            }
        }

        self.state.velocity = self.state.smoothed_offset - before;
        if self.state.smoothed_offset != before {
            self.listeners.emit(&self.state);
        }
        self.state
    }

    /// Update the scrollable extent, clamping target and offset.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = sanitize_limit(limit);
        let clamped_raw = self.clamp(self.state.raw_offset);
        let clamped_smooth = self.clamp(self.state.smoothed_offset);

        if let Some(mut tween) = self.tween.take() {
            tween.to = self.clamp(tween.to);
            tween.from = self.clamp(tween.from);
            self.tween = Some(tween);
        }
        self.state.raw_offset = clamped_raw;
        if clamped_smooth != self.state.smoothed_offset {
            self.state.smoothed_offset = clamped_smooth;
            self.listeners.emit(&self.state);
        }
        tracing::debug!(limit = self.limit, "Smooth scroll limit updated");
    }

    /// Resume accepting input and ticks. Idempotent.
    pub fn start(&mut self) {
        if !self.destroyed {
            self.running = true;
        }
    }

    /// Ignore input and freeze the offset. Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop permanently and drop every listener.
    pub fn destroy(&mut self) {
        self.running = false;
        self.destroyed = true;
        self.tween = None;
        self.listeners.clear();
    }

    /// Notified whenever the smoothed offset changes.
    pub fn on_scroll(&self, callback: impl FnMut(&ScrollState) + 'static) -> Registration {
        self.listeners.register(callback)
    }

    pub fn current_offset(&self) -> f64 {
        self.state.smoothed_offset
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a tween is still in flight.
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn accepts_input(&self) -> bool {
        self.running && !self.destroyed
    }

    fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.limit)
    }

    fn retarget(&mut self, target: f64) -> bool {
        let target = self.clamp(target);
        if target == self.state.raw_offset && self.tween.is_some() {
            return false;
        }
        self.state.raw_offset = target;
        if target == self.state.smoothed_offset {
            self.tween = None;
            return true;
        }
        self.tween = Some(Tween {
            from: self.state.smoothed_offset,
            to: target,
            elapsed_secs: 0.0,
        });
        true
    }

    fn jump(&mut self, target: f64) -> bool {
        let target = self.clamp(target);
        let before = self.state.smoothed_offset;
        self.state.raw_offset = target;
        self.state.smoothed_offset = target;
        self.state.velocity = target - before;
        self.tween = None;
        if target != before {
            self.listeners.emit(&self.state);
        }
        true
    }
}

fn sanitize_limit(limit: f64) -> f64 {
    if limit.is_finite() {
        limit.max(0.0)
    } else {
        0.0
    }
}
