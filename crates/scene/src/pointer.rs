//! Hover tracking for pointer-reactive entities.

use cinescroll_scroll_core::layer::{CursorStyle, PointerEvent};

/// Tracks which entity, if any, is under the pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<String>,
    last_clicked: Option<String>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `event`. Events for ids that `known` rejects are ignored.
    pub fn handle(&mut self, event: &PointerEvent, known: impl Fn(&str) -> bool) -> CursorStyle {
        let target = event.target();
        if !known(target) {
            tracing::debug!(entity = target, "Pointer event for unknown entity ignored");
            return self.cursor();
        }

        match event {
            PointerEvent::Enter(id) => self.hovered = Some(id.clone()),
            PointerEvent::Leave(id) => {
                if self.hovered.as_deref() == Some(id.as_str()) {
                    self.hovered = None;
                }
            }
            PointerEvent::Click(id) => self.last_clicked = Some(id.clone()),
        }
        self.cursor()
    }

    /// Forget the hovered entity.
    pub fn release(&mut self) -> CursorStyle {
        self.hovered = None;
        CursorStyle::Auto
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }

    pub fn last_clicked(&self) -> Option<&str> {
        self.last_clicked.as_deref()
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.hovered.is_some() {
            CursorStyle::Pointer
        } else {
            CursorStyle::Auto
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(id: &str) -> bool {
        matches!(id, "web" | "ai")
    }

    #[test]
    fn test_enter_leave_cursor() {
        let mut hover = HoverState::new();
        assert_eq!(
            hover.handle(&PointerEvent::Enter("web".into()), known),
            CursorStyle::Pointer
        );
        assert!(hover.is_hovered("web"));

        // Leaving a different node keeps the hover.
        assert_eq!(
            hover.handle(&PointerEvent::Leave("ai".into()), known),
            CursorStyle::Pointer
        );
        assert_eq!(
            hover.handle(&PointerEvent::Leave("web".into()), known),
            CursorStyle::Auto
        );
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_unknown_and_click() {
        let mut hover = HoverState::new();
        assert_eq!(
            hover.handle(&PointerEvent::Enter("ghost".into()), known),
            CursorStyle::Auto
        );
        hover.handle(&PointerEvent::Click("ai".into()), known);
        assert_eq!(hover.last_clicked(), Some("ai"));
        assert_eq!(hover.cursor(), CursorStyle::Auto);
    }

    #[test]
    fn test_release_resets_cursor() {
        let mut hover = HoverState::new();
        hover.handle(&PointerEvent::Enter("ai".into()), known);
        assert_eq!(hover.release(), CursorStyle::Auto);
        assert_eq!(hover.cursor(), CursorStyle::Auto);
    }
}
