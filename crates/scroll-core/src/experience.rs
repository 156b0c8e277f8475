//! Mounting a story onto a frame loop and a scroll source.
//!
//! [`Experience::mount`] wires one pipeline:
//!
//! ```text
//! scroll input -> SmoothScroll -> ProgressEngine -> ActResolver -> CameraRig -> SceneLayer
//! ```
//!
//! It acquires exactly one frame callback and one scroll listener and hands
//! back a [`Mount`]. [`Mount::teardown`] (also run on drop) releases both and
//! tears down every component, so repeated mounts never accumulate
//! callbacks.
//!
//! Scroll input is queued and applied at the start of the next frame, so
//! every frame runs the stages in the same order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use cinescroll_common::clock::FrameTime;
use cinescroll_common::config::AppConfig;
use cinescroll_common::error::CinescrollResult;
use cinescroll_story_model::act::ActId;
use cinescroll_story_model::scroll::{Progress, ScrollEvent, ScrollEventKind, ScrollLayout, ScrollState};
use cinescroll_story_model::story::Story;

use crate::act_resolver::{ActChange, ActResolver};
use crate::camera_rig::{CameraReader, CameraRig, CameraTransform};
use crate::frame_loop::FrameLoop;
use crate::input::ScrollEventHub;
use crate::layer::{CursorStyle, FrameContext, PointerEvent, SceneLayer};
use crate::progress::{watch_range_on, ProgressEngine, RangeEvent};
use crate::registry::{CallbackRegistry, Registration};
use crate::scrub::ScrubTrigger;
use crate::smooth_scroll::{SmoothScroll, SmoothScrollOptions};

/// Tunables for one mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceOptions {
    pub smooth_scroll: SmoothScrollOptions,
    pub trigger: ScrubTrigger,
    /// Initial page geometry. Resize input replaces it.
    pub layout: ScrollLayout,
}

impl ExperienceOptions {
    /// Defaults for `story`: whole-page immediate scrub, story page geometry.
    pub fn for_story(story: &Story) -> Self {
        Self {
            smooth_scroll: SmoothScrollOptions::default(),
            trigger: ScrubTrigger::default(),
            layout: story.scroll.layout(),
        }
    }

    /// Smooth-scroll settings from `config`, page geometry from `story`.
    pub fn from_config(config: &AppConfig, story: &Story) -> Self {
        Self {
            smooth_scroll: SmoothScrollOptions::from(&config.smooth_scroll),
            ..Self::for_story(story)
        }
    }
}

/// What happened in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    /// Frame index since mount.
    pub frame: u64,
    pub time_ms: f64,
    /// Seconds since the mount's first frame.
    pub elapsed_secs: f64,
    pub scroll: ScrollState,
    pub progress: Progress,
    pub act: ActId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub act_change: Option<ActChange>,
    pub camera: CameraTransform,
}

/// A story ready to mount.
pub struct Experience {
    story: Story,
    options: ExperienceOptions,
    scene: Option<Box<dyn SceneLayer>>,
}

impl Experience {
    pub fn new(story: Story) -> Self {
        let options = ExperienceOptions::for_story(&story);
        Self {
            story,
            options,
            scene: None,
        }
    }

    pub fn with_options(mut self, options: ExperienceOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_scene(mut self, scene: impl SceneLayer + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    /// Validate the story and wire the pipeline.
    pub fn mount(self, frame_loop: &FrameLoop, hub: &ScrollEventHub) -> CinescrollResult<Mount> {
        self.story.camera.validate()?;
        self.story.check()?;

        let progress = ProgressEngine::new(self.options.layout);
        let smooth = SmoothScroll::new(self.options.smooth_scroll, progress.extent());
        let resolver = ActResolver::new(self.story.acts.clone());
        let rig = CameraRig::new(&self.story, self.options.trigger);

        let handles = Handles {
            progress: progress.progress_cell(),
            progress_listeners: progress.subscribers(),
            act: resolver.act_cell(),
            act_listeners: resolver.listeners(),
            camera: rig.reader(),
        };

        let shared = Rc::new(Shared {
            pipeline: RefCell::new(Pipeline {
                smooth,
                progress,
                resolver,
                rig,
                scene: self.scene,
                epoch_secs: None,
                frames: 0,
                torn_down: false,
            }),
            inbox: RefCell::new(VecDeque::new()),
            pending_teardown: Cell::new(false),
            cursor: Cell::new(CursorStyle::Auto),
            last_report: Cell::new(None),
        });

        let frame_registration = {
            let shared = Rc::clone(&shared);
            frame_loop.register(move |frame| shared.on_frame(frame))
        };
        let scroll_registration = {
            let shared = Rc::clone(&shared);
            hub.listen(move |event| shared.inbox.borrow_mut().push_back(event.clone()))
        };

        tracing::info!(
            story = %self.story.name,
            acts = self.story.acts.len(),
            extent = self.options.layout.extent(),
            "Experience mounted"
        );

        Ok(Mount {
            shared,
            handles,
            frame_registration: Some(frame_registration),
            scroll_registration: Some(scroll_registration),
            torn_down: false,
        })
    }
}

/// Read-side handles that stay valid without borrowing the pipeline.
struct Handles {
    progress: Rc<Cell<Progress>>,
    progress_listeners: CallbackRegistry<Progress>,
    act: Rc<Cell<ActId>>,
    act_listeners: CallbackRegistry<ActChange>,
    camera: CameraReader,
}

struct Shared {
    pipeline: RefCell<Pipeline>,
    inbox: RefCell<VecDeque<ScrollEvent>>,
    pending_teardown: Cell<bool>,
    cursor: Cell<CursorStyle>,
    last_report: Cell<Option<FrameReport>>,
}

impl Shared {
    fn on_frame(&self, frame: &FrameTime) {
        let report = match self.pipeline.try_borrow_mut() {
            Ok(mut pipeline) => {
                let events: Vec<ScrollEvent> = self.inbox.borrow_mut().drain(..).collect();
                pipeline.frame(frame, &events)
            }
            Err(_) => {
                tracing::warn!(frame = frame.frame, "Re-entrant frame skipped");
                None
            }
        };
        if report.is_some() {
            self.last_report.set(report);
        }
        if self.pending_teardown.get() {
            self.finish_teardown();
        }
    }

    fn finish_teardown(&self) {
        match self.pipeline.try_borrow_mut() {
            Ok(mut pipeline) => {
                self.pending_teardown.set(false);
                self.inbox.borrow_mut().clear();
                let cursor = pipeline.teardown();
                self.cursor.set(cursor);
            }
            // Still inside a frame; on_frame finishes once it unwinds.
            Err(_) => self.pending_teardown.set(true),
        }
    }
}

struct Pipeline {
    smooth: SmoothScroll,
    progress: ProgressEngine,
    resolver: ActResolver,
    rig: CameraRig,
    scene: Option<Box<dyn SceneLayer>>,
    /// Loop time of the first frame this pipeline saw.
    epoch_secs: Option<f64>,
    frames: u64,
    torn_down: bool,
}

impl Pipeline {
    fn frame(&mut self, frame: &FrameTime, events: &[ScrollEvent]) -> Option<FrameReport> {
        if self.torn_down {
            return None;
        }

        // A mount joining a running loop starts its own clock at zero.
        let delta_ms = if self.epoch_secs.is_some() {
            frame.delta_ms
        } else {
            0.0
        };
        let epoch = *self.epoch_secs.get_or_insert(frame.elapsed_secs);
        let elapsed_secs = (frame.elapsed_secs - epoch).max(0.0);

        for event in events {
            self.apply_input(event);
        }

        let scroll = self.smooth.tick(delta_ms);
        let progress = self.progress.update(scroll.smoothed_offset);
        let act_change = self.resolver.resolve(progress);
        if let Some(change) = &act_change {
            self.rig.on_act_change(change, elapsed_secs);
        }
        let camera = self.rig.update(progress, delta_ms / 1000.0, elapsed_secs);
        let act = self.resolver.current();

        let index = self.frames;
        self.frames += 1;

        if let Some(scene) = self.scene.as_mut() {
            scene.animate(&FrameContext {
                frame: index,
                elapsed_secs,
                delta_secs: delta_ms / 1000.0,
                progress,
                act,
                camera,
            });
        }

        tracing::trace!(frame = index, %progress, %act, "Frame");

        Some(FrameReport {
            frame: index,
            time_ms: frame.time_ms,
            elapsed_secs,
            scroll,
            progress,
            act,
            act_change,
            camera,
        })
    }

    fn apply_input(&mut self, event: &ScrollEvent) {
        match event.kind {
            ScrollEventKind::Resize {
                viewport_height,
                document_height,
            } => {
                self.progress.resize(viewport_height, document_height);
                self.smooth.set_limit(self.progress.extent());
            }
            ref kind => {
                self.smooth.handle(kind);
            }
        }
    }

    fn pointer(&mut self, event: &PointerEvent) -> CursorStyle {
        if self.torn_down {
            return CursorStyle::Auto;
        }
        match self.scene.as_mut() {
            Some(scene) => scene.pointer(event),
            None => CursorStyle::Auto,
        }
    }

    /// Release every component. Returns the cursor to leave behind.
    fn teardown(&mut self) -> CursorStyle {
        if self.torn_down {
            return CursorStyle::Auto;
        }
        self.torn_down = true;
        self.smooth.destroy();
        self.progress.clear();
        self.resolver.clear();
        self.rig.teardown();
        let cursor = match self.scene.take() {
            Some(mut scene) => scene.release_pointer(),
            None => CursorStyle::Auto,
        };
        tracing::info!(frames = self.frames, "Experience unmounted");
        cursor
    }
}

/// Handle for a mounted experience. Dropping it tears everything down.
pub struct Mount {
    shared: Rc<Shared>,
    handles: Handles,
    frame_registration: Option<Registration>,
    scroll_registration: Option<Registration>,
    torn_down: bool,
}

impl Mount {
    /// Latest progress.
    pub fn progress(&self) -> Progress {
        self.handles.progress.get()
    }

    /// Current act.
    pub fn act(&self) -> ActId {
        self.handles.act.get()
    }

    /// Read-only camera accessor.
    pub fn camera(&self) -> CameraReader {
        self.handles.camera.clone()
    }

    pub fn camera_transform(&self) -> CameraTransform {
        self.handles.camera.get()
    }

    /// Cursor requested by the last pointer event (or teardown).
    pub fn cursor(&self) -> CursorStyle {
        self.shared.cursor.get()
    }

    /// Report of the most recent frame.
    pub fn last_report(&self) -> Option<FrameReport> {
        self.shared.last_report.get()
    }

    /// Smooth-scroll state, if the pipeline is not mid-frame.
    pub fn scroll_state(&self) -> Option<ScrollState> {
        self.shared
            .pipeline
            .try_borrow()
            .ok()
            .map(|pipeline| pipeline.smooth.state())
    }

    /// Receive progress once per frame.
    pub fn subscribe_progress(&self, callback: impl FnMut(&Progress) + 'static) -> Registration {
        self.handles.progress_listeners.register(callback)
    }

    /// Receive crossing events for `[start, end]`.
    pub fn watch_range(
        &self,
        start: f64,
        end: f64,
        callback: impl FnMut(RangeEvent) + 'static,
    ) -> Registration {
        watch_range_on(
            &self.handles.progress_listeners,
            self.progress(),
            start,
            end,
            callback,
        )
    }

    /// Receive act changes.
    pub fn on_act_change(&self, callback: impl FnMut(&ActChange) + 'static) -> Registration {
        self.handles.act_listeners.register(callback)
    }

    /// Route a pointer event to the scene and return the cursor to show.
    pub fn pointer(&self, event: &PointerEvent) -> CursorStyle {
        let cursor = match self.shared.pipeline.try_borrow_mut() {
            Ok(mut pipeline) => pipeline.pointer(event),
            Err(_) => return self.cursor(),
        };
        self.shared.cursor.set(cursor);
        cursor
    }

    /// Pause or resume scroll input. Idempotent.
    pub fn set_scroll_enabled(&self, enabled: bool) {
        if let Ok(mut pipeline) = self.shared.pipeline.try_borrow_mut() {
            if enabled {
                pipeline.smooth.start();
            } else {
                pipeline.smooth.stop();
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.torn_down
    }

    /// Release the frame callback and scroll listener and tear down every
    /// component. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.frame_registration.take();
        self.scroll_registration.take();
        self.shared.finish_teardown();
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinescroll_common::error::CinescrollError;
    use cinescroll_story_model::story::StoryError;
    use cinescroll_story_model::timeline::{CameraPose, CameraTrack, TrackError};
    use cinescroll_story_model::vector::Vec3;

    fn mount(frame_loop: &FrameLoop, hub: &ScrollEventHub) -> Mount {
        Experience::new(Story::five_act())
            .mount(frame_loop, hub)
            .unwrap()
    }

    #[test]
    fn test_mount_acquires_one_callback_each() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mut mount = mount(&frame_loop, &hub);
        assert_eq!(frame_loop.callback_count(), 1);
        assert_eq!(hub.listener_count(), 1);

        mount.teardown();
        mount.teardown();
        assert_eq!(frame_loop.callback_count(), 0);
        assert_eq!(hub.listener_count(), 0);
        assert!(!mount.is_mounted());
    }

    #[test]
    fn test_input_applies_on_next_frame() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mount = mount(&frame_loop, &hub);

        hub.dispatch(ScrollEvent::scroll_to(0.0, 1800.0, true));
        assert_eq!(mount.progress(), Progress::ZERO);

        frame_loop.tick(0.0);
        assert_eq!(mount.progress().value(), 0.5);
        assert_eq!(mount.act(), ActId(3));
        let report = mount.last_report().unwrap();
        assert_eq!(report.act_change.map(|c| c.to), Some(ActId(3)));
    }

    #[test]
    fn test_resize_changes_extent() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mount = mount(&frame_loop, &hub);

        hub.dispatch(ScrollEvent::scroll_to(0.0, 1800.0, true));
        frame_loop.tick(0.0);
        hub.dispatch(ScrollEvent::resize(16.0, 900.0, 2700.0));
        frame_loop.tick(16.0);
        assert_eq!(mount.progress(), Progress::ONE);
        assert_eq!(mount.scroll_state().unwrap().smoothed_offset, 1800.0);
    }

    #[test]
    fn test_invalid_story_is_rejected() {
        let mut story = Story::five_act();
        story.scroll.pages = 0.0;
        let result = Experience::new(story).mount(&FrameLoop::new(), &ScrollEventHub::new());
        assert!(matches!(
            result,
            Err(CinescrollError::Story(StoryError::ValidationError { .. }))
        ));
    }

    #[test]
    fn test_broken_camera_track_is_rejected() {
        let mut story = Story::five_act();
        story.camera = CameraTrack::hold(CameraPose {
            position: Vec3::new(0.0, f64::NAN, 10.0),
            rotation: Vec3::ZERO,
        });
        let result = Experience::new(story).mount(&FrameLoop::new(), &ScrollEventHub::new());
        assert!(matches!(
            result,
            Err(CinescrollError::Track(TrackError::NonFinite { .. }))
        ));
    }

    #[test]
    fn test_late_mount_times_from_its_first_frame() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        frame_loop.tick(0.0);
        frame_loop.tick(1000.0);
        let mount = mount(&frame_loop, &hub);

        frame_loop.tick(1016.0);
        let first = mount.last_report().unwrap();
        assert_eq!(first.frame, 0);
        assert_eq!(first.elapsed_secs, 0.0);
        assert_eq!(first.scroll.smoothed_offset, 0.0);

        hub.dispatch(ScrollEvent::wheel(1016.0, 400.0));
        frame_loop.tick(1516.0);
        let report = mount.last_report().unwrap();
        assert_eq!(report.frame, 1);
        assert!((report.elapsed_secs - 0.5).abs() < 1e-9);
        assert!(report.scroll.smoothed_offset > 0.0);
    }

    #[test]
    fn test_teardown_from_progress_callback() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let slot: Rc<RefCell<Option<Mount>>> = Rc::new(RefCell::new(None));
        let mount = mount(&frame_loop, &hub);
        let _reg = {
            let slot = Rc::clone(&slot);
            mount.subscribe_progress(move |_| {
                if let Some(mut mount) = slot.borrow_mut().take() {
                    mount.teardown();
                }
            })
        };
        *slot.borrow_mut() = Some(mount);

        frame_loop.tick(0.0);
        assert_eq!(frame_loop.callback_count(), 0);
        assert_eq!(hub.listener_count(), 0);
    }
}
