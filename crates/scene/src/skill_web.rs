//! Act III skill web: hoverable nodes joined by sagging strands.
//!
//! Hovering a node lifts it, makes it jitter and brightens every strand that
//! touches it. The strand geometry is fixed at build time; only opacity
//! responds to hover.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use cinescroll_scroll_core::layer::{CursorStyle, FrameContext, PointerEvent};
use cinescroll_story_model::vector::Vec3;

use crate::entity::{Strand, Transform};
use crate::error::SceneError;
use crate::pointer::HoverState;

/// Points sampled along each connection curve.
pub const STRAND_POINTS: usize = 17;

const ACTIVE_SCALE: f64 = 1.2;
const ACTIVE_EMISSIVE: f64 = 0.6;
const IDLE_EMISSIVE: f64 = 0.1;
const ACTIVE_STRAND_OPACITY: f64 = 0.8;
const IDLE_STRAND_OPACITY: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub label: String,
    pub position: Vec3,
}

impl Skill {
    pub fn new(id: &str, label: &str, position: Vec3) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            position,
        }
    }
}

pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill::new("web", "Web Development", Vec3::new(0.0, 10.0, 0.0)),
        Skill::new("ai", "AI / ML", Vec3::new(4.0, 8.5, 1.5)),
        Skill::new("flutter", "Flutter", Vec3::new(-4.0, 8.5, 1.5)),
        Skill::new("iot", "IoT", Vec3::new(2.5, 6.5, -1.0)),
        Skill::new("system", "System Design", Vec3::new(-2.5, 6.5, -1.0)),
    ]
}

pub fn default_connections() -> Vec<(String, String)> {
    [
        ("web", "ai"),
        ("web", "flutter"),
        ("web", "iot"),
        ("web", "system"),
        ("ai", "iot"),
        ("ai", "system"),
        ("flutter", "iot"),
        ("flutter", "system"),
        ("system", "iot"),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}

/// Rendered state of one skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillNode {
    pub skill: Skill,
    pub transform: Transform,
    pub emissive: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub strand: Strand,
}

impl Connection {
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// Quadratic bezier from `a` to `b` whose midpoint sags by 12% of the span.
pub fn sagging_curve(a: Vec3, b: Vec3) -> Vec<Vec3> {
    let mut mid = Vec3::lerp(&a, &b, 0.5);
    mid.y -= a.distance_to(&b) * 0.12;
    (0..STRAND_POINTS)
        .map(|i| {
            let t = i as f64 / (STRAND_POINTS - 1) as f64;
            let u = 1.0 - t;
            a * (u * u) + mid * (2.0 * u * t) + b * (t * t)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillWeb {
    pub nodes: Vec<SkillNode>,
    pub connections: Vec<Connection>,
    pub transform: Transform,
    #[serde(skip)]
    hover: HoverState,
}

impl SkillWeb {
    /// Build the web, rejecting duplicate ids, self links and dangling links.
    pub fn new(skills: Vec<Skill>, connections: Vec<(String, String)>) -> Result<Self, SceneError> {
        let mut seen = HashSet::new();
        for skill in &skills {
            if !seen.insert(skill.id.as_str()) {
                return Err(SceneError::DuplicateSkill {
                    id: skill.id.clone(),
                });
            }
        }

        let position_of = |id: &str| skills.iter().find(|s| s.id == id).map(|s| s.position);
        let mut built = Vec::with_capacity(connections.len());
        for (from, to) in connections {
            if from == to {
                return Err(SceneError::SelfConnection { from, to });
            }
            let (a, b) = match (position_of(&from), position_of(&to)) {
                (Some(a), Some(b)) => (a, b),
                (None, _) => {
                    let missing = from.clone();
                    return Err(SceneError::UnknownSkill { from, to, missing });
                }
                (_, None) => {
                    let missing = to.clone();
                    return Err(SceneError::UnknownSkill { from, to, missing });
                }
            };
            built.push(Connection {
                from,
                to,
                strand: Strand {
                    points: sagging_curve(a, b),
                    base_opacity: IDLE_STRAND_OPACITY,
                    opacity: IDLE_STRAND_OPACITY,
                },
            });
        }

        let nodes = skills
            .into_iter()
            .map(|skill| SkillNode {
                transform: Transform::at(skill.position),
                emissive: IDLE_EMISSIVE,
                skill,
            })
            .collect();

        Ok(Self {
            nodes,
            connections: built,
            transform: Transform::default(),
            hover: HoverState::new(),
        })
    }

    pub fn with_defaults() -> Result<Self, SceneError> {
        Self::new(default_skills(), default_connections())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.skill.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&SkillNode> {
        self.nodes.iter().find(|n| n.skill.id == id)
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn last_clicked(&self) -> Option<&str> {
        self.hover.last_clicked()
    }

    pub fn pointer(&mut self, event: &PointerEvent) -> CursorStyle {
        let ids: Vec<&str> = self.nodes.iter().map(|n| n.skill.id.as_str()).collect();
        self.hover.handle(event, |id| ids.contains(&id))
    }

    pub fn release_pointer(&mut self) -> CursorStyle {
        self.hover.release()
    }

    pub fn animate(&mut self, ctx: &FrameContext, rng: &mut impl Rng) {
        let t = ctx.elapsed_secs;

        for node in &mut self.nodes {
            let base = node.skill.position;
            node.transform.position.y = base.y + (t * 1.5 + base.x).sin() * 0.05;
            if self.hover.is_hovered(&node.skill.id) {
                node.transform.position.x = base.x + (rng.random::<f64>() - 0.5) * 0.03;
                node.transform.scale = ACTIVE_SCALE;
                node.emissive = ACTIVE_EMISSIVE;
            } else {
                node.transform.position.x = base.x;
                node.transform.scale = 1.0;
                node.emissive = IDLE_EMISSIVE;
            }
        }

        let hovered = self.hover.hovered();
        for connection in &mut self.connections {
            let active = hovered.is_some_and(|id| connection.touches(id));
            connection.strand.opacity = if active {
                ACTIVE_STRAND_OPACITY
            } else {
                connection.strand.base_opacity
            };
        }

        self.transform.rotation.y = (t * 0.12).sin() * 0.1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_default_web() {
        let web = SkillWeb::with_defaults().unwrap();
        assert_eq!(web.nodes.len(), 5);
        assert_eq!(web.connections.len(), 9);
        assert!(web.contains("system"));
        assert_eq!(web.node("ai").unwrap().skill.label, "AI / ML");
    }

    #[test]
    fn test_rejects_bad_graphs() {
        let err = SkillWeb::new(default_skills(), vec![pair("web", "rust")]).unwrap_err();
        assert_eq!(
            err,
            SceneError::UnknownSkill {
                from: "web".into(),
                to: "rust".into(),
                missing: "rust".into()
            }
        );

        let err = SkillWeb::new(default_skills(), vec![pair("ai", "ai")]).unwrap_err();
        assert!(matches!(err, SceneError::SelfConnection { .. }));

        let mut skills = default_skills();
        skills.push(Skill::new("iot", "Again", Vec3::ZERO));
        let err = SkillWeb::new(skills, Vec::new()).unwrap_err();
        assert_eq!(err, SceneError::DuplicateSkill { id: "iot".into() });
    }

    #[test]
    fn test_curve_sags_between_endpoints() {
        let a = Vec3::new(0.0, 10.0, 0.0);
        let b = Vec3::new(4.0, 10.0, 0.0);
        let curve = sagging_curve(a, b);
        assert_eq!(curve.len(), STRAND_POINTS);
        assert_eq!(curve[0], a);
        assert!(curve[16].max_abs_diff(&b) < 1e-12);
        // Bezier midpoint is halfway to the control point: 10 - 0.48 / 2.
        assert!((curve[8].y - 9.76).abs() < 1e-12);
    }

    #[test]
    fn test_hover_highlights_node_and_strands() {
        let mut web = SkillWeb::with_defaults().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(web.pointer(&PointerEvent::Enter("web".into())), CursorStyle::Pointer);
        web.animate(&context(0.5), &mut rng);

        let node = web.node("web").unwrap();
        assert_eq!(node.transform.scale, ACTIVE_SCALE);
        assert_eq!(node.emissive, ACTIVE_EMISSIVE);
        assert!((node.transform.position.x).abs() <= 0.015);

        for connection in &web.connections {
            let expected = if connection.touches("web") {
                ACTIVE_STRAND_OPACITY
            } else {
                IDLE_STRAND_OPACITY
            };
            assert_eq!(connection.strand.opacity, expected);
        }

        assert_eq!(web.release_pointer(), CursorStyle::Auto);
        web.animate(&context(0.6), &mut rng);
        assert!(web.connections.iter().all(|c| c.strand.opacity == IDLE_STRAND_OPACITY));
        assert_eq!(web.node("web").unwrap().transform.scale, 1.0);
    }
}
