//! Act V: a slowly turning clarity shape inside a shell of drifting particles.

use std::f64::consts::TAU;

use serde::Serialize;

use cinescroll_scroll_core::layer::FrameContext;
use cinescroll_story_model::vector::Vec3;

use crate::entity::Transform;
use crate::rng::LayoutRng;

const PARTICLE_STREAM: u64 = 0xF1A1;
pub const PARTICLE_COUNT: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finale {
    pub clarity: Transform,
    pub ring_rotation: f64,
    pub ring_radius: f64,
    pub ring_opacity: f64,
    pub particles: Vec<Vec3>,
    pub shell_rotation: f64,
}

impl Finale {
    pub const CENTRE: Vec3 = Vec3::new(0.0, 12.0, 5.0);

    pub fn generate(rng: &LayoutRng) -> Self {
        let mut rng = rng.fork(PARTICLE_STREAM);
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let theta = rng.next_f64() * TAU;
                let phi = (2.0 * rng.next_f64() - 1.0).acos();
                let radius = 4.0 + rng.next_f64() * 8.0;
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    12.0 + radius * phi.sin() * theta.sin() * 0.5,
                    5.0 + radius * phi.cos() * 0.5,
                )
            })
            .collect();

        Self {
            clarity: Transform::at(Self::CENTRE),
            ring_rotation: 0.0,
            ring_radius: 1.5,
            ring_opacity: 0.4,
            particles,
            shell_rotation: 0.0,
        }
    }

    pub fn animate(&mut self, ctx: &FrameContext) {
        let t = ctx.elapsed_secs;
        self.clarity.rotation.y = t * 0.08;
        self.clarity.rotation.x = (t * 0.15).sin() * 0.1;
        self.clarity.position.y = Self::CENTRE.y + (t * 0.4).sin() * 0.1;
        self.ring_rotation = t * 0.08;
        self.shell_rotation = t * 0.015;
    }
}
