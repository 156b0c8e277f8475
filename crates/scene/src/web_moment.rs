//! Act II catalyst: an irregular web anchored to the skyline, with a pulsing core.

use std::f64::consts::TAU;

use serde::Serialize;

use cinescroll_scroll_core::layer::FrameContext;
use cinescroll_story_model::vector::Vec3;

use crate::entity::{Strand, Transform};
use crate::error::SceneError;
use crate::rng::LayoutRng;

const ANCHOR_STREAM: u64 = 0x3EB;

/// Shape parameters of the web.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WebShape {
    /// Height of the web centre.
    pub anchor_height: f64,
    pub radius: f64,
    pub radial_lines: usize,
    pub spiral_rings: usize,
}

impl Default for WebShape {
    fn default() -> Self {
        Self {
            anchor_height: 8.0,
            radius: 5.0,
            radial_lines: 20,
            spiral_rings: 12,
        }
    }
}

/// Pulsing centre of the web.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebCore {
    pub transform: Transform,
    /// Z rotation shared by the halo rings.
    pub ring_rotation: f64,
    /// (radius, opacity) of each halo ring.
    pub rings: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebMoment {
    pub shape: WebShape,
    pub radials: Vec<Strand>,
    pub spirals: Vec<Strand>,
    /// Long strands tying the web to distant buildings.
    pub anchors: Vec<Strand>,
    pub core: WebCore,
    /// Rotation and breathing scale of the web proper.
    pub web_transform: Transform,
    pub anchor_sway: f64,
    pub transform: Transform,
}

impl WebMoment {
    pub fn generate(shape: WebShape, rng: &LayoutRng) -> Result<Self, SceneError> {
        if shape.radius <= 0.0 || !shape.radius.is_finite() {
            return Err(SceneError::invalid("web radius", format!("{} is not positive", shape.radius)));
        }
        if shape.radial_lines < 3 {
            return Err(SceneError::invalid(
                "web radial lines",
                format!("need at least 3, got {}", shape.radial_lines),
            ));
        }

        let mut rng = rng.fork(ANCHOR_STREAM);
        let h = shape.anchor_height;
        let r = shape.radius;
        let centre = Vec3::new(0.0, h, 0.0);

        let radials = (0..shape.radial_lines)
            .map(|i| {
                let angle = i as f64 / shape.radial_lines as f64 * TAU;
                let end_r = r + (angle * 3.0).sin() * 0.5;
                let end = Vec3::new(
                    angle.cos() * end_r,
                    h + angle.cos() * 0.3 + rng.next_f64() * 0.2,
                    angle.sin() * end_r * 0.4 - r * 0.3,
                );
                Strand::line(centre, end, 0.6 + angle.sin().abs() * 0.3)
            })
            .collect();

        let rings = shape.spiral_rings as f64;
        let spirals = (2..=shape.spiral_rings)
            .map(|ring| {
                let ring_r = ring as f64 / rings * r;
                let ring_h = h + ring as f64 / rings * 0.3;
                let points = (0..=shape.radial_lines)
                    .map(|i| {
                        let angle = i as f64 / shape.radial_lines as f64 * TAU;
                        let k = (ring + i) as f64;
                        let radius = ring_r + k.sin() * 0.1 + (k + 1.0).cos() * 0.1;
                        Vec3::new(
                            angle.cos() * radius,
                            ring_h + angle.sin() * 0.2,
                            angle.sin() * r * 0.4,
                        )
                    })
                    .collect();
                let opacity = 0.3 + ring as f64 / rings * 0.4;
                Strand {
                    points,
                    base_opacity: opacity,
                    opacity,
                }
            })
            .collect();

        let anchors = [
            (Vec3::new(-15.0, 4.0, -12.0), 0.3),
            (Vec3::new(18.0, 6.0, -15.0), 0.25),
            (Vec3::new(-10.0, 5.0, -18.0), 0.2),
            (Vec3::new(12.0, 3.0, -10.0), 0.35),
            (Vec3::new(0.0, 10.0, -25.0), 0.15),
        ]
        .into_iter()
        .map(|(target, opacity)| Strand::line(centre, target, opacity))
        .collect();

        let core = WebCore {
            transform: Transform::at(centre),
            ring_rotation: 0.0,
            rings: (0..3).map(|i| (0.25 + i as f64 * 0.15, 0.6 - i as f64 * 0.15)).collect(),
        };

        Ok(Self {
            shape,
            radials,
            spirals,
            anchors,
            core,
            web_transform: Transform::default(),
            anchor_sway: 0.0,
            transform: Transform::default(),
        })
    }

    pub fn animate(&mut self, ctx: &FrameContext) {
        let t = ctx.elapsed_secs;

        for strand in self.radials.iter_mut().chain(self.spirals.iter_mut()) {
            let shimmer = 0.9 + 0.1 * (t * 3.0 + strand.start().x).sin();
            strand.opacity = strand.base_opacity * shimmer;
        }

        self.web_transform.rotation.y = (t * 0.3).sin() * 0.1;
        self.web_transform.scale = 1.0 + (t * 2.0).sin() * 0.01;

        self.core.transform.scale = 1.0 + (t * 3.0).sin() * 0.2;
        self.core.ring_rotation = t * 1.5;

        self.anchor_sway = (t * 0.5).sin() * 0.05;
        self.transform.rotation.y = (t * 0.2).sin() * 0.1;
    }

    pub fn strand_count(&self) -> usize {
        self.radials.len() + self.spirals.len() + self.anchors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::context;

    #[test]
    fn test_default_shape_counts() {
        let web = WebMoment::generate(WebShape::default(), &LayoutRng::new(1)).unwrap();
        assert_eq!(web.radials.len(), 20);
        // Rings 2 through 12 inclusive.
        assert_eq!(web.spirals.len(), 11);
        assert_eq!(web.anchors.len(), 5);
        assert_eq!(web.strand_count(), 36);
        assert!(web.spirals.iter().all(|s| s.points.len() == 21));
    }

    #[test]
    fn test_radials_start_at_centre() {
        let web = WebMoment::generate(WebShape::default(), &LayoutRng::new(2)).unwrap();
        for strand in &web.radials {
            assert_eq!(strand.start(), Vec3::new(0.0, 8.0, 0.0));
            let end = strand.end();
            assert!(end.y >= 8.0 - 0.3 && end.y < 8.0 + 0.5);
            assert!((0.6..=0.9 + 1e-12).contains(&strand.base_opacity));
        }
    }

    #[test]
    fn test_shimmer_stays_near_base() {
        let mut web = WebMoment::generate(WebShape::default(), &LayoutRng::new(3)).unwrap();
        web.animate(&context(1.7));
        for strand in web.radials.iter().chain(web.spirals.iter()) {
            assert!(strand.opacity <= strand.base_opacity + 1e-12);
            assert!(strand.opacity >= strand.base_opacity * 0.8 - 1e-12);
        }
        assert!((web.core.ring_rotation - 2.55).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_degenerate_shape() {
        let shape = WebShape {
            radius: 0.0,
            ..WebShape::default()
        };
        assert!(matches!(
            WebMoment::generate(shape, &LayoutRng::new(1)),
            Err(SceneError::InvalidParameter { what: "web radius", .. })
        ));
    }
}
