//! Cinescroll Story Model
//!
//! Defines the core data contracts for a scroll-driven story:
//! - **Scroll:** Raw scroll events, smoothed scroll state, and the
//!   normalized [`Progress`] scalar
//! - **Acts:** Non-overlapping progress ranges and the act resolver
//! - **Timeline:** Easing curves, per-axis anchors, and camera tracks
//! - **Story:** Top-level authored experience and its on-disk format
//!
//! Progress is always normalized to `[0.0, 1.0]` relative to the total
//! scrollable distance, so stories survive viewport resizes.

pub mod act;
pub mod scroll;
pub mod story;
pub mod timeline;
pub mod vector;

pub use act::*;
pub use scroll::*;
pub use story::*;
pub use timeline::*;
pub use vector::*;
