//! Cinescroll Scroll Core
//!
//! Synchronizes one progress scalar with everything that depends on it:
//! - **Smooth scroll:** damped scroll offset driven by wheel/touch input
//! - **Progress:** offset normalized over the scrollable extent, with
//!   subscriptions and range watches
//! - **Scrub timeline:** camera track sampled by progress
//! - **Camera rig:** sole owner of the camera transform
//! - **Act resolver:** sole authority on the current act
//! - **Experience:** mounts the whole pipeline on a [`FrameLoop`] and a
//!   [`ScrollEventHub`], returning a [`Mount`] that tears it all down
//!
//! Everything runs on one thread, driven by the host's frame ticks.

pub mod act_resolver;
pub mod camera_rig;
pub mod experience;
pub mod frame_loop;
pub mod input;
pub mod layer;
pub mod progress;
pub mod registry;
pub mod scrub;
pub mod smooth_scroll;

pub use act_resolver::{ActChange, ActResolver};
pub use camera_rig::{CameraReader, CameraRig, CameraTransform};
pub use experience::{Experience, ExperienceOptions, FrameReport, Mount};
pub use frame_loop::FrameLoop;
pub use input::ScrollEventHub;
pub use layer::{CursorStyle, FrameContext, PointerEvent, SceneLayer};
pub use progress::{ProgressEngine, RangeEvent};
pub use registry::{CallbackRegistry, Registration};
pub use scrub::{Scrub, ScrubTimeline, ScrubTrigger};
pub use smooth_scroll::{SmoothScroll, SmoothScrollOptions};
