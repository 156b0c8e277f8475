//! Text overlays shown over each act.
//!
//! The overlay never derives the act itself. It follows [`ActChange`]s from
//! the act resolver and exposes the copy for whichever act is current.
//! [`MountedOverlay`] is the one overlay a mount feeds.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use cinescroll_scroll_core::act_resolver::ActChange;
use cinescroll_scroll_core::experience::Mount;
use cinescroll_scroll_core::registry::Registration;
use cinescroll_story_model::act::ActId;

/// Where the copy block sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Centre,
    TopLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub label: String,
    pub href: String,
}

/// Copy for one act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActCopy {
    pub act: ActId,
    /// Small-caps label above the headline.
    pub caption: String,
    pub headlines: Vec<String>,
    pub body: Vec<String>,
    pub placement: Placement,
    /// Act II renders its headline with the accent glitch treatment.
    pub accent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
}

impl ActCopy {
    fn new(act: u8, placement: Placement, headlines: &[&str], body: &[&str]) -> Self {
        let act = ActId(act);
        Self {
            caption: format!("ACT {}", act.numeral()),
            act,
            headlines: headlines.iter().map(|s| s.to_string()).collect(),
            body: body.iter().map(|s| s.to_string()).collect(),
            placement,
            accent: false,
            call_to_action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    acts: Vec<ActCopy>,
    visible: ActId,
}

impl Overlay {
    pub fn new(acts: Vec<ActCopy>, initial: ActId) -> Self {
        Self {
            acts,
            visible: initial,
        }
    }

    pub fn five_act() -> Self {
        Self::new(five_act_copy(), ActId(1))
    }

    /// Follow a resolver transition. Returns the newly visible copy, if any.
    pub fn apply(&mut self, change: &ActChange) -> Option<&ActCopy> {
        tracing::debug!(from = %change.from, to = %change.to, "Overlay switched");
        self.visible = change.to;
        self.current()
    }

    pub fn visible_act(&self) -> ActId {
        self.visible
    }

    pub fn current(&self) -> Option<&ActCopy> {
        self.copy_for(self.visible)
    }

    pub fn copy_for(&self, act: ActId) -> Option<&ActCopy> {
        self.acts.iter().find(|c| c.act == act)
    }

    pub fn acts(&self) -> &[ActCopy] {
        &self.acts
    }
}

impl Default for Overlay {
    fn default() -> Self {
        Self::five_act()
    }
}

/// Copy for the five acts of the built-in story.
pub fn five_act_copy() -> Vec<ActCopy> {
    let mut catalyst = ActCopy::new(
        2,
        Placement::Centre,
        &["The Catalyst"],
        &["A moment of transformation."],
    );
    catalyst.accent = true;

    let mut choice = ActCopy::new(
        5,
        Placement::Centre,
        &["The Choice"],
        &["With great power comes great responsibility."],
    );
    choice.call_to_action = Some(CallToAction {
        label: "Let's Connect".to_string(),
        href: "mailto:hello@example.com".to_string(),
    });

    vec![
        ActCopy::new(
            1,
            Placement::Centre,
            &["Before the code.", "Before the chaos."],
            &["Scroll to begin the journey"],
        ),
        catalyst,
        ActCopy::new(
            3,
            Placement::TopLeft,
            &["Learning the Power"],
            &[
                "Skills are not isolated. They connect, interweave, and strengthen each other.",
                "Hover over the nodes to explore.",
            ],
        ),
        ActCopy::new(
            4,
            Placement::BottomRight,
            &["Responsibility"],
            &[
                "Every project is a solution. Every solution carries weight.",
                "Building with purpose, not just features.",
            ],
        ),
        choice,
    ]
}

/// An overlay fed by one mount's act changes.
///
/// Starts on the mount's current act. Once the mount is torn down the
/// overlay stays on the last act it saw.
pub struct MountedOverlay {
    overlay: Rc<RefCell<Overlay>>,
    _registration: Registration,
}

impl MountedOverlay {
    pub fn attach(mut overlay: Overlay, mount: &Mount) -> Self {
        overlay.visible = mount.act();
        let overlay = Rc::new(RefCell::new(overlay));
        let registration = {
            let overlay = Rc::clone(&overlay);
            mount.on_act_change(move |change| {
                overlay.borrow_mut().apply(change);
            })
        };
        Self {
            overlay,
            _registration: registration,
        }
    }

    pub fn visible_act(&self) -> ActId {
        self.overlay.borrow().visible_act()
    }

    /// Copy for the visible act.
    pub fn current(&self) -> Option<ActCopy> {
        self.overlay.borrow().current().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinescroll_scroll_core::experience::Experience;
    use cinescroll_scroll_core::frame_loop::FrameLoop;
    use cinescroll_scroll_core::input::ScrollEventHub;
    use cinescroll_story_model::scroll::{Progress, ScrollEvent};
    use cinescroll_story_model::story::Story;

    #[test]
    fn test_five_acts_have_copy() {
        let overlay = Overlay::five_act();
        for n in 1..=5 {
            let copy = overlay.copy_for(ActId(n)).unwrap();
            assert!(!copy.headlines.is_empty());
        }
        assert_eq!(overlay.current().unwrap().caption, "ACT I");
        assert!(overlay.copy_for(ActId(2)).unwrap().accent);
        assert_eq!(overlay.copy_for(ActId(4)).unwrap().placement, Placement::BottomRight);
    }

    #[test]
    fn test_follows_resolver_changes() {
        let mut overlay = Overlay::five_act();
        let change = ActChange {
            from: ActId(4),
            to: ActId(5),
            progress: Progress::new(0.9),
        };
        let copy = overlay.apply(&change).unwrap();
        assert_eq!(copy.headlines, vec!["The Choice".to_string()]);
        assert_eq!(
            copy.call_to_action.as_ref().map(|c| c.href.as_str()),
            Some("mailto:hello@example.com")
        );
        assert_eq!(overlay.visible_act(), ActId(5));
    }

    #[test]
    fn test_mounted_overlay_follows_mount() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mut mount = Experience::new(Story::five_act())
            .mount(&frame_loop, &hub)
            .unwrap();
        let overlay = MountedOverlay::attach(Overlay::five_act(), &mount);
        assert_eq!(overlay.visible_act(), ActId(1));

        hub.dispatch(ScrollEvent::scroll_to(0.0, f64::MAX, true));
        frame_loop.tick(0.0);
        assert_eq!(overlay.visible_act(), mount.act());
        assert_eq!(overlay.current().unwrap().headlines, vec!["The Choice"]);

        mount.teardown();
        hub.dispatch(ScrollEvent::scroll_to(16.0, 0.0, true));
        frame_loop.tick(16.0);
        assert_eq!(overlay.visible_act(), ActId(5));
    }

    #[test]
    fn test_mounted_overlay_starts_on_current_act() {
        let frame_loop = FrameLoop::new();
        let hub = ScrollEventHub::new();
        let mount = Experience::new(Story::five_act())
            .mount(&frame_loop, &hub)
            .unwrap();
        hub.dispatch(ScrollEvent::scroll_to(0.0, 1800.0, true));
        frame_loop.tick(0.0);

        let overlay = MountedOverlay::attach(Overlay::five_act(), &mount);
        assert_eq!(overlay.visible_act(), ActId(3));
        assert_eq!(overlay.current().unwrap().caption, "ACT III");
    }

    #[test]
    fn test_serializes_for_host() {
        let json = serde_json::to_value(Overlay::five_act().copy_for(ActId(3)).unwrap()).unwrap();
        assert_eq!(json["placement"], "top_left");
        assert_eq!(json["caption"], "ACT III");
        assert!(json.get("call_to_action").is_none());
    }
}
