//! Act I skyline: three parallax layers of buildings with flickering windows.

use rand::Rng;
use serde::Serialize;

use cinescroll_scroll_core::layer::FrameContext;
use cinescroll_story_model::vector::Vec3;

use crate::entity::Transform;
use crate::rng::LayoutRng;

/// Chance per building per frame that its windows flicker.
pub const FLICKER_PROBABILITY: f64 = 0.005;

/// Depth band of a building layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Back,
    Mid,
    Fore,
}

/// Generation and styling parameters for one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSettings {
    pub x_spread: f64,
    pub height_min: f64,
    pub height_max: f64,
    pub width_min: f64,
    pub width_max: f64,
    /// Window glow at rest.
    pub window_intensity: f64,
    pub base_color: &'static str,
    pub window_color: &'static str,
}

impl LayerKind {
    pub fn settings(&self) -> LayerSettings {
        match self {
            LayerKind::Fore => LayerSettings {
                x_spread: 60.0,
                height_min: 3.0,
                height_max: 8.0,
                width_min: 0.8,
                width_max: 1.5,
                window_intensity: 0.15,
                base_color: "#0a0a0c",
                window_color: "#ffb347",
            },
            LayerKind::Mid => LayerSettings {
                x_spread: 80.0,
                height_min: 5.0,
                height_max: 14.0,
                width_min: 0.6,
                width_max: 1.2,
                window_intensity: 0.08,
                base_color: "#08080a",
                window_color: "#ffa500",
            },
            LayerKind::Back => LayerSettings {
                x_spread: 100.0,
                height_min: 8.0,
                height_max: 20.0,
                width_min: 0.4,
                width_max: 1.0,
                window_intensity: 0.04,
                base_color: "#060608",
                window_color: "#ff8c00",
            },
        }
    }

    fn stream(&self) -> u64 {
        match self {
            LayerKind::Back => 1,
            LayerKind::Mid => 2,
            LayerKind::Fore => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    /// Centre of the box, relative to its layer.
    pub position: Vec3,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    /// Window emissive intensity this frame.
    pub window_intensity: f64,
}

/// One depth band of the skyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingLayer {
    pub kind: LayerKind,
    pub z_offset: f64,
    pub parallax_multiplier: f64,
    pub buildings: Vec<Building>,
    pub transform: Transform,
}

impl BuildingLayer {
    /// Lay out `count` buildings spread evenly along x with seeded jitter.
    pub fn generate(
        kind: LayerKind,
        z_offset: f64,
        count: usize,
        parallax_multiplier: f64,
        rng: &LayoutRng,
    ) -> Self {
        let mut rng = rng.fork(kind.stream());
        let s = kind.settings();
        let buildings = (0..count)
            .map(|i| {
                let x = (i as f64 / count as f64 - 0.5) * s.x_spread + rng.centered(1.5);
                let height = rng.range(s.height_min, s.height_max);
                let width = rng.range(s.width_min, s.width_max);
                let depth = rng.range(0.5, 1.5);
                let z = z_offset + rng.centered(1.0);
                Building {
                    position: Vec3::new(x, height / 2.0 - 0.5, z),
                    width,
                    height,
                    depth,
                    window_intensity: s.window_intensity,
                }
            })
            .collect();

        Self {
            kind,
            z_offset,
            parallax_multiplier,
            buildings,
            transform: Transform::default(),
        }
    }

    /// Parallax, sway and window flicker for one frame.
    pub fn animate(&mut self, ctx: &FrameContext, rng: &mut impl Rng) {
        self.transform.position.x = ctx.camera.position.x * self.parallax_multiplier * 0.1;
        self.transform.position.y = (ctx.elapsed_secs * 0.3).sin() * 0.01;

        let rest = self.kind.settings().window_intensity;
        for building in &mut self.buildings {
            if rng.random::<f64>() < FLICKER_PROBABILITY {
                building.window_intensity = rest * rng.random_range(0.8..1.2);
            }
        }
    }
}

/// The full skyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub layers: Vec<BuildingLayer>,
    pub transform: Transform,
}

impl City {
    pub fn generate(rng: &LayoutRng) -> Self {
        Self {
            layers: vec![
                BuildingLayer::generate(LayerKind::Back, -35.0, 40, 0.3, rng),
                BuildingLayer::generate(LayerKind::Mid, -20.0, 35, 0.6, rng),
                BuildingLayer::generate(LayerKind::Fore, -8.0, 25, 1.0, rng),
            ],
            transform: Transform::at(Vec3::new(0.0, 0.0, -5.0)),
        }
    }

    pub fn animate(&mut self, ctx: &FrameContext, rng: &mut impl Rng) {
        // Slow breathing of the whole skyline.
        self.transform.position.y = (ctx.elapsed_secs * 0.2).sin() * 0.015;
        for layer in &mut self.layers {
            layer.animate(ctx, rng);
        }
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&BuildingLayer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn building_count(&self) -> usize {
        self.layers.iter().map(|l| l.buildings.len()).sum()
    }
}
