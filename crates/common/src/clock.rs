//! Frame clock for the single render loop.
//!
//! The host (browser `requestAnimationFrame`, a native window loop, or a
//! test double) hands every frame a timestamp in milliseconds. This module
//! turns those timestamps into:
//! - per-frame deltas for the smooth-scroll driver
//! - elapsed wall-clock seconds for procedural scene animation
//!
//! There is no background timer: if the host stops calling
//! [`FrameClock::advance`], time stands still.

/// Timing information for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Zero-based frame index since the clock started.
    pub frame: u64,
    /// Host timestamp of this frame (ms).
    pub time_ms: f64,
    /// Milliseconds since the previous frame (0 on the first frame).
    pub delta_ms: f64,
    /// Seconds since the first frame.
    pub elapsed_secs: f64,
}

/// A frame clock anchored to the first frame it sees.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    first_ms: Option<f64>,
    last_ms: Option<f64>,
    frames: u64,
}

impl FrameClock {
    /// Create a new clock. The epoch is the first frame timestamp.
    pub fn start() -> Self {
        Self::default()
    }

    /// Advance to the frame stamped `time_ms`.
    ///
    /// Timestamps that go backwards produce a zero delta instead of a
    /// negative one.
    pub fn advance(&mut self, time_ms: f64) -> FrameTime {
        let first = *self.first_ms.get_or_insert(time_ms);
        let delta_ms = match self.last_ms {
            Some(last) => (time_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(time_ms.max(self.last_ms.unwrap_or(time_ms)));

        let frame = self.frames;
        self.frames += 1;

        FrameTime {
            frame,
            time_ms,
            delta_ms,
            elapsed_secs: ((time_ms - first) / 1000.0).max(0.0),
        }
    }

    /// Number of frames seen so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
