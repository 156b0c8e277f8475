//! The complete five-act scene.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use cinescroll_scroll_core::layer::{CursorStyle, FrameContext, PointerEvent, SceneLayer};
use cinescroll_story_model::story::Story;

use crate::city::City;
use crate::error::SceneError;
use crate::finale::Finale;
use crate::rng::LayoutRng;
use crate::skill_web::SkillWeb;
use crate::web_moment::{WebMoment, WebShape};

/// Every scene element, animated as one [`SceneLayer`].
pub struct SceneGraph {
    seed: u64,
    pub city: City,
    pub web_moment: WebMoment,
    pub skill_web: SkillWeb,
    pub finale: Finale,
    effects: SmallRng,
    frames: u64,
}

impl SceneGraph {
    /// Lay out the scene from `seed`. The same seed yields the same layout.
    pub fn new(seed: u64) -> Result<Self, SceneError> {
        let layout = LayoutRng::new(seed);
        let graph = Self {
            seed,
            city: City::generate(&layout),
            web_moment: WebMoment::generate(WebShape::default(), &layout)?,
            skill_web: SkillWeb::with_defaults()?,
            finale: Finale::generate(&layout),
            effects: SmallRng::seed_from_u64(seed),
            frames: 0,
        };
        tracing::info!(
            seed,
            buildings = graph.city.building_count(),
            strands = graph.web_moment.strand_count(),
            skills = graph.skill_web.nodes.len(),
            "Scene generated"
        );
        Ok(graph)
    }

    pub fn for_story(story: &Story) -> Result<Self, SceneError> {
        Self::new(story.seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames animated so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl SceneLayer for SceneGraph {
    fn animate(&mut self, ctx: &FrameContext) {
        self.city.animate(ctx, &mut self.effects);
        self.web_moment.animate(ctx);
        self.skill_web.animate(ctx, &mut self.effects);
        self.finale.animate(ctx);
        self.frames += 1;
        tracing::trace!(frame = ctx.frame, act = %ctx.act, "Scene animated");
    }

    fn pointer(&mut self, event: &PointerEvent) -> CursorStyle {
        self.skill_web.pointer(event)
    }

    fn release_pointer(&mut self) -> CursorStyle {
        self.skill_web.release_pointer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use cinescroll_story_model::act::ActId;
    use proptest::prelude::*;

    #[test]
    fn test_animate_counts_frames() {
        let mut graph = SceneGraph::new(7).unwrap();
        let mut ctx = context(0.0);
        ctx.act = ActId(3);
        graph.animate(&ctx);
        graph.animate(&ctx);
        assert_eq!(graph.frames(), 2);
    }

    #[test]
    fn test_pointer_routes_to_skill_web() {
        let mut graph = SceneGraph::new(7).unwrap();
        assert_eq!(graph.pointer(&PointerEvent::Enter("flutter".into())), CursorStyle::Pointer);
        assert_eq!(graph.skill_web.hovered(), Some("flutter"));
        assert_eq!(graph.release_pointer(), CursorStyle::Auto);
        assert_eq!(graph.skill_web.hovered(), None);
    }

    #[test]
    fn test_for_story_uses_story_seed() {
        let story = Story::five_act();
        let graph = SceneGraph::for_story(&story).unwrap();
        assert_eq!(graph.seed(), story.seed);
    }

    proptest! {
        #[test]
        fn test_layout_depends_only_on_seed(seed in any::<u64>()) {
            let a = SceneGraph::new(seed).unwrap();
            let b = SceneGraph::new(seed).unwrap();
            prop_assert_eq!(&a.city, &b.city);
            prop_assert_eq!(&a.web_moment, &b.web_moment);
            prop_assert_eq!(&a.finale, &b.finale);
        }
    }
}
