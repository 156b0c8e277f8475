//! Browser bindings.
//!
//! The page owns the render loop and the DOM. It forwards wheel, touch and
//! resize input, calls [`ScrollExperience::frame`] from
//! `requestAnimationFrame`, then reads the camera and overlay back out.
//!
//! ```js
//! const exp = new ScrollExperience(null);
//! exp.resize(innerHeight, document.body.scrollHeight);
//! addEventListener("wheel", (e) => exp.wheel(e.deltaY), { passive: true });
//! const loop = (t) => { exp.frame(t); render(exp.camera_position()); requestAnimationFrame(loop); };
//! ```

use wasm_bindgen::prelude::*;

use cinescroll_common::{CinescrollError, CinescrollResult};
use cinescroll_scene::{MountedOverlay, Overlay, SceneGraph};
use cinescroll_scroll_core::experience::{Experience, Mount};
use cinescroll_scroll_core::frame_loop::FrameLoop;
use cinescroll_scroll_core::input::ScrollEventHub;
use cinescroll_scroll_core::layer::{CursorStyle, PointerEvent};
use cinescroll_scroll_core::registry::Registration;
use cinescroll_story_model::scroll::ScrollEvent;
use cinescroll_story_model::story::Story;

/// A story mounted on the page.
#[wasm_bindgen]
pub struct ScrollExperience {
    frame_loop: FrameLoop,
    hub: ScrollEventHub,
    overlay: MountedOverlay,
    mount: Mount,
    /// Host time of the latest frame; stamps incoming input.
    last_time_ms: f64,
    js_listeners: Vec<Registration>,
}

#[wasm_bindgen]
impl ScrollExperience {
    /// Mount `story_json`, or the built-in five-act story when `null`.
    #[wasm_bindgen(constructor)]
    pub fn new(story_json: Option<String>) -> Result<ScrollExperience, JsValue> {
        let story = match story_json {
            Some(json) => serde_json::from_str(&json).map_err(|e| to_js(CinescrollError::from(e)))?,
            None => Story::five_act(),
        };
        Self::mount(story).map_err(to_js)
    }

    pub fn wheel(&self, delta: f64) {
        self.hub.dispatch(ScrollEvent::wheel(self.last_time_ms, delta));
    }

    pub fn touch(&self, delta: f64) {
        self.hub.dispatch(ScrollEvent::touch(self.last_time_ms, delta));
    }

    pub fn scroll_to(&self, target: f64, immediate: bool) {
        self.hub
            .dispatch(ScrollEvent::scroll_to(self.last_time_ms, target, immediate));
    }

    pub fn resize(&self, viewport_height: f64, document_height: f64) {
        self.hub.dispatch(ScrollEvent::resize(
            self.last_time_ms,
            viewport_height,
            document_height,
        ));
    }

    /// Run one frame at host time `time_ms`. Returns the current act number.
    pub fn frame(&mut self, time_ms: f64) -> u8 {
        self.last_time_ms = time_ms;
        self.frame_loop.tick(time_ms);
        self.mount.act().0
    }

    pub fn progress(&self) -> f64 {
        self.mount.progress().value()
    }

    pub fn act(&self) -> u8 {
        self.mount.act().0
    }

    /// `[x, y, z]` eye position, shake included.
    pub fn camera_position(&self) -> Vec<f64> {
        self.mount.camera_transform().position.to_array().to_vec()
    }

    pub fn camera_rotation(&self) -> Vec<f64> {
        self.mount.camera_transform().rotation.to_array().to_vec()
    }

    pub fn camera_look_at(&self) -> Vec<f64> {
        self.mount.camera_transform().look_at.to_array().to_vec()
    }

    /// Smoothed scroll offset in pixels, for syncing the native scrollbar.
    pub fn scroll_offset(&self) -> f64 {
        self.mount
            .scroll_state()
            .map(|s| s.smoothed_offset)
            .unwrap_or(0.0)
    }

    /// Copy for the current act as a JSON string.
    pub fn overlay_json(&self) -> Option<String> {
        self.overlay
            .current()
            .and_then(|copy| serde_json::to_string(&copy).ok())
    }

    /// Report of the latest frame as a JSON string.
    pub fn frame_report_json(&self) -> Option<String> {
        self.mount
            .last_report()
            .and_then(|report| serde_json::to_string(&report).ok())
    }

    /// Headline lines for the current act as a JS array of strings.
    pub fn headlines(&self) -> js_sys::Array {
        self.overlay
            .current()
            .map(|copy| copy.headlines.iter().map(|h| JsValue::from_str(h)).collect())
            .unwrap_or_else(js_sys::Array::new)
    }

    /// Call `callback(from, to)` with act numbers whenever the act changes.
    pub fn on_act_change(&mut self, callback: js_sys::Function) {
        let registration = self.mount.on_act_change(move |change| {
            let from = JsValue::from(change.from.0);
            let to = JsValue::from(change.to.0);
            if let Err(e) = callback.call2(&JsValue::NULL, &from, &to) {
                tracing::warn!(?e, "Act change callback threw");
            }
        });
        self.js_listeners.push(registration);
    }

    /// Returns the CSS cursor to apply.
    pub fn pointer_enter(&self, id: &str) -> String {
        self.pointer(PointerEvent::Enter(id.to_string()))
    }

    pub fn pointer_leave(&self, id: &str) -> String {
        self.pointer(PointerEvent::Leave(id.to_string()))
    }

    pub fn pointer_click(&self, id: &str) -> String {
        self.pointer(PointerEvent::Click(id.to_string()))
    }

    pub fn cursor(&self) -> String {
        self.mount.cursor().as_css().to_string()
    }

    pub fn set_scroll_enabled(&self, enabled: bool) {
        self.mount.set_scroll_enabled(enabled);
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Tear everything down. Returns the cursor to restore.
    pub fn destroy(&mut self) -> String {
        self.js_listeners.clear();
        self.mount.teardown();
        self.mount.cursor().as_css().to_string()
    }
}

impl ScrollExperience {
    /// Mount `story` with its generated scene.
    pub fn mount(story: Story) -> CinescrollResult<Self> {
        let scene = SceneGraph::for_story(&story)?;
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mount = Experience::new(story)
            .with_scene(scene)
            .mount(&frame_loop, &hub)?;
        tracing::info!("Scroll experience mounted in page");

        let overlay = MountedOverlay::attach(Overlay::five_act(), &mount);
        Ok(Self {
            frame_loop,
            hub,
            overlay,
            mount,
            last_time_ms: 0.0,
            js_listeners: Vec::new(),
        })
    }

    pub fn frame_callbacks(&self) -> usize {
        self.frame_loop.callback_count()
    }

    pub fn scroll_listeners(&self) -> usize {
        self.hub.listener_count()
    }

    fn pointer(&self, event: PointerEvent) -> String {
        let cursor: CursorStyle = self.mount.pointer(&event);
        cursor.as_css().to_string()
    }
}

fn to_js(error: CinescrollError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(exp: &mut ScrollExperience, from_ms: f64, count: u32) -> f64 {
        let mut t = from_ms;
        for _ in 0..count {
            t += 1000.0 / 60.0;
            exp.frame(t);
        }
        t
    }

    #[test]
    fn test_scroll_to_end_reaches_last_act() {
        let mut exp = ScrollExperience::mount(Story::five_act()).unwrap();
        exp.frame(0.0);
        exp.scroll_to(f64::MAX, true);
        run_frames(&mut exp, 0.0, 2);

        assert_eq!(exp.act(), 5);
        assert_eq!(exp.progress(), 1.0);
        assert!(exp.overlay_json().unwrap().contains("The Choice"));
        assert_eq!(exp.camera_position().len(), 3);
    }

    #[test]
    fn test_wheel_moves_camera_smoothly() {
        let mut exp = ScrollExperience::mount(Story::five_act()).unwrap();
        exp.frame(0.0);
        let start = exp.camera_position();
        exp.wheel(400.0);
        let t = run_frames(&mut exp, 0.0, 5);
        let midway = exp.scroll_offset();
        run_frames(&mut exp, t, 120);

        assert!(midway > 0.0 && midway < 400.0);
        assert!((exp.scroll_offset() - 400.0).abs() < 0.5);
        assert_ne!(exp.camera_position(), start);
    }

    #[test]
    fn test_pointer_and_destroy_reset_cursor() {
        let mut exp = ScrollExperience::mount(Story::five_act()).unwrap();
        assert_eq!(exp.pointer_enter("ai"), "pointer");
        assert_eq!(exp.pointer_enter("nowhere"), "pointer");
        assert_eq!(exp.destroy(), "auto");
        assert!(!exp.is_mounted());
        assert_eq!(exp.frame_callbacks(), 0);
        assert_eq!(exp.scroll_listeners(), 0);
    }

    #[test]
    fn test_invalid_story_is_rejected() {
        let mut story = Story::five_act();
        story.scroll.pages = 0.0;
        assert!(ScrollExperience::mount(story).is_err());
    }
}
