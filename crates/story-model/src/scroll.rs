//! Scroll input events, smoothed scroll state, and normalized progress.
//!
//! Scroll scripts are stored as JSONL (one event per line) so headless
//! runs can replay a reader's session. Lines starting with `#` are comments.

use serde::{Deserialize, Serialize};

/// Normalized scroll progress in `[0, 1]`.
///
/// Construction clamps; NaN becomes `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);
    pub const ONE: Progress = Progress(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// `offset / extent`, clamped. A non-positive extent yields zero.
    pub fn from_offset(offset: f64, extent: f64) -> Self {
        if !(extent > 0.0) {
            return Self::ZERO;
        }
        Self::new(offset / extent)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Scroll position owned by the smooth-scroll driver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollState {
    /// Target offset after clamping (px).
    pub raw_offset: f64,
    /// Damped offset converging on `raw_offset` (px).
    pub smoothed_offset: f64,
    /// Change of `smoothed_offset` during the last tick (px per tick).
    pub velocity: f64,
}

impl ScrollState {
    /// Whether the smoothed offset has caught up with the target.
    pub fn is_settled(&self) -> bool {
        (self.raw_offset - self.smoothed_offset).abs() < 0.5 && self.velocity.abs() < 1e-3
    }
}

/// Page geometry that determines the scrollable extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayout {
    /// Visible height (px).
    pub viewport_height: f64,
    /// Total document height (px).
    pub document_height: f64,
}

impl ScrollLayout {
    pub fn new(viewport_height: f64, document_height: f64) -> Self {
        Self {
            viewport_height,
            document_height,
        }
    }

    /// Distance between "top of document at top of viewport" and
    /// "bottom of document at bottom of viewport". Never negative.
    pub fn extent(&self) -> f64 {
        let extent = self.document_height - self.viewport_height;
        if extent.is_finite() {
            extent.max(0.0)
        } else {
            0.0
        }
    }
}

/// Host timestamp in milliseconds.
pub type TimestampMs = f64;

/// A single scroll input with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollEvent {
    /// Host time of the input (ms).
    #[serde(rename = "t")]
    pub timestamp_ms: TimestampMs,

    #[serde(flatten)]
    pub kind: ScrollEventKind,
}

/// Discriminated union of scroll inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScrollEventKind {
    /// Mouse wheel / trackpad delta (px, positive scrolls down).
    Wheel { delta: f64 },

    /// Touch drag delta (px, positive scrolls down).
    Touch { delta: f64 },

    /// Scroll to an absolute offset.
    Programmatic {
        target: f64,
        /// Skip smoothing and jump.
        #[serde(default)]
        immediate: bool,
    },

    /// Viewport or document size changed.
    Resize {
        viewport_height: f64,
        document_height: f64,
    },
}

impl ScrollEvent {
    pub fn wheel(timestamp_ms: TimestampMs, delta: f64) -> Self {
        Self {
            timestamp_ms,
            kind: ScrollEventKind::Wheel { delta },
        }
    }

    pub fn touch(timestamp_ms: TimestampMs, delta: f64) -> Self {
        Self {
            timestamp_ms,
            kind: ScrollEventKind::Touch { delta },
        }
    }

    pub fn scroll_to(timestamp_ms: TimestampMs, target: f64, immediate: bool) -> Self {
        Self {
            timestamp_ms,
            kind: ScrollEventKind::Programmatic { target, immediate },
        }
    }

    pub fn resize(timestamp_ms: TimestampMs, viewport_height: f64, document_height: f64) -> Self {
        Self {
            timestamp_ms,
            kind: ScrollEventKind::Resize {
                viewport_height,
                document_height,
            },
        }
    }
}

/// Parse scroll events from JSONL content (one JSON object per line).
pub fn parse_scroll_events(jsonl: &str) -> Result<Vec<ScrollEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize scroll events to JSONL format.
pub fn serialize_scroll_events(events: &[ScrollEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps_and_handles_nan() {
        assert_eq!(Progress::new(-0.2), Progress::ZERO);
        assert_eq!(Progress::new(1.7), Progress::ONE);
        assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
        assert_eq!(Progress::new(0.25).value(), 0.25);
    }

    #[test]
    fn test_zero_extent_is_zero_progress() {
        assert_eq!(Progress::from_offset(500.0, 0.0), Progress::ZERO);
        assert_eq!(Progress::from_offset(500.0, -100.0), Progress::ZERO);
        assert_eq!(Progress::from_offset(500.0, f64::NAN), Progress::ZERO);
        assert_eq!(Progress::from_offset(900.0, 3600.0).value(), 0.25);
    }

    #[test]
    fn test_layout_extent() {
        assert_eq!(ScrollLayout::new(900.0, 4500.0).extent(), 3600.0);
        assert_eq!(ScrollLayout::new(900.0, 600.0).extent(), 0.0);
    }

    #[test]
    fn test_event_json_format() {
        let event = ScrollEvent::wheel(16.5, 120.0);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"t\":16.5"));
        assert!(json.contains("\"type\":\"wheel\""));
        assert!(json.contains("\"delta\":120.0"));
    }

    #[test]
    fn test_programmatic_immediate_defaults_false() {
        let parsed: ScrollEvent =
            serde_json::from_str(r#"{"t":0,"type":"programmatic","target":400}"#).unwrap();
        assert_eq!(
            parsed.kind,
            ScrollEventKind::Programmatic {
                target: 400.0,
                immediate: false
            }
        );
    }

    #[test]
    fn test_jsonl_skips_comments() {
        let events = vec![
            ScrollEvent::wheel(0.0, 100.0),
            ScrollEvent::touch(50.0, -20.0),
            ScrollEvent::resize(100.0, 800.0, 4000.0),
        ];
        let mut jsonl = "# recorded session\n".to_string();
        jsonl.push_str(&serialize_scroll_events(&events).unwrap());
        let parsed = parse_scroll_events(&jsonl).unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_settled_state() {
        let state = ScrollState {
            raw_offset: 100.0,
            smoothed_offset: 99.8,
            velocity: 0.0,
        };
        assert!(state.is_settled());
        assert!(!ScrollState {
            velocity: 4.0,
            ..state
        }
        .is_settled());
    }
}
