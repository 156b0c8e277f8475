//! Transform shared by every animated entity.

use serde::Serialize;

use cinescroll_story_model::vector::Vec3;

/// Position, Euler rotation (radians) and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// A polyline strand with animated opacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strand {
    pub points: Vec<Vec3>,
    /// Authored opacity.
    pub base_opacity: f64,
    /// Opacity this frame.
    pub opacity: f64,
}

impl Strand {
    pub fn line(start: Vec3, end: Vec3, opacity: f64) -> Self {
        Self {
            points: vec![start, end],
            base_opacity: opacity,
            opacity,
        }
    }

    pub fn start(&self) -> Vec3 {
        self.points.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> Vec3 {
        self.points.last().copied().unwrap_or_default()
    }
}
