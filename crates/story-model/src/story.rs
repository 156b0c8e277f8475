//! Story metadata and on-disk format.
//!
//! A story is the top-level authored experience: the act table, the camera
//! track scrubbed by scroll progress, the fixed look-at target, the page
//! geometry, and the layout seed for procedural scene content.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::act::{ActId, ActTable};
use crate::scroll::ScrollLayout;
use crate::timeline::{AxisAnchor, AxisSet, AxisTrack, CameraPose, CameraTrack, EasingFunction};
use crate::vector::Vec3;

/// Top-level story file (`story.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Schema version.
    pub version: String,

    /// Human-readable story name.
    pub name: String,

    /// Creation timestamp (ISO 8601).
    pub created_at: String,

    /// Seed for deterministic scene layout.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Page geometry.
    pub scroll: PageConfig,

    /// Act ranges partitioning progress.
    pub acts: ActTable,

    /// Scrubbed camera animation.
    pub camera: CameraTrack,

    /// Point the camera re-targets every frame.
    pub look_at: Vec3,

    /// Camera pose before any scroll (also used when a track axis is empty).
    #[serde(default)]
    pub initial_pose: CameraPose,

    /// Time-based camera shake fired on entering an act.
    #[serde(default)]
    pub shake: Option<ShakeConfig>,
}

/// Page geometry expressed relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Nominal viewport height (px).
    pub viewport_height: f64,
    /// Document height in viewport heights (the default story is 5).
    pub pages: f64,
}

impl PageConfig {
    pub fn layout(&self) -> ScrollLayout {
        ScrollLayout::new(
            self.viewport_height,
            self.viewport_height * self.pages.max(1.0),
        )
    }
}

/// Camera shake parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeConfig {
    /// Act whose entry triggers the shake.
    pub act: ActId,
    /// Peak offset (scene units).
    pub amplitude: f64,
    /// Oscillation frequency (Hz).
    pub frequency_hz: f64,
    /// Total duration (seconds).
    pub duration_secs: f64,
}

fn default_seed() -> u64 {
    0x5EED_2024
}

impl Story {
    /// The built-in five-act story.
    pub fn five_act() -> Self {
        let initial_pose = CameraPose {
            position: Vec3::new(0.0, 2.0, 10.0),
            rotation: Vec3::ZERO,
        };
        Self {
            version: "1.0".to_string(),
            name: "Five Acts".to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            seed: default_seed(),
            scroll: PageConfig {
                viewport_height: 900.0,
                pages: 5.0,
            },
            acts: ActTable::five_act(),
            camera: five_act_camera(),
            look_at: Vec3::new(0.0, 7.0, 0.0),
            initial_pose,
            shake: Some(ShakeConfig {
                act: ActId(2),
                amplitude: 0.08,
                frequency_hz: 18.0,
                duration_secs: 0.9,
            }),
        }
    }

    /// Load a story from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoryError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| StoryError::IoError {
            path: path.clone(),
            source: e,
        })?;
        let story: Story = serde_json::from_str(&json).map_err(|e| StoryError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        story.check()?;
        Ok(story)
    }

    /// Save the story as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoryError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| StoryError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| StoryError::IoError { path, source: e })
    }

    /// Check content consistency. Returns one message per issue.
    ///
    /// Act table partitioning is enforced on construction, so this covers
    /// the cross-references between sections.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = vec![];

        if let Err(e) = self.camera.validate() {
            issues.push(format!("Camera track: {e}"));
        }
        if self.camera.position.x.is_empty()
            && self.camera.position.y.is_empty()
            && self.camera.position.z.is_empty()
        {
            issues.push("Camera track has no position anchors".to_string());
        }

        let look_at = self.look_at.to_array();
        if look_at.iter().any(|v| !v.is_finite()) {
            issues.push("Look-at point is not finite".to_string());
        }

        if !(self.scroll.viewport_height > 0.0) {
            issues.push(format!(
                "Viewport height must be positive (got {})",
                self.scroll.viewport_height
            ));
        }
        if !(self.scroll.pages >= 1.0) {
            issues.push(format!(
                "Page count must be at least 1 (got {})",
                self.scroll.pages
            ));
        }

        if let Some(shake) = &self.shake {
            if !self.acts.contains_act(shake.act) {
                issues.push(format!("Shake references unknown {}", shake.act));
            }
            if !(shake.duration_secs > 0.0) || !(shake.frequency_hz > 0.0) {
                issues.push("Shake duration and frequency must be positive".to_string());
            }
        }

        issues
    }

    /// [`Story::validate`] folded into one error.
    pub fn check(&self) -> Result<(), StoryError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(StoryError::ValidationError {
                message: issues.join("; "),
            })
        }
    }

    /// Camera pose at `progress`, with empty track axes falling back to the
    /// initial pose.
    pub fn pose_at(&self, progress: f64) -> CameraPose {
        self.camera.sample_or(progress, &self.initial_pose)
    }
}

/// Camera path for the five-act story.
///
/// Act I pushes in on the skyline, Act II rises to rooftop height with a
/// short roll, Act III drifts right around the skill web, Act IV swings
/// left and up, Act V pulls back above the city.
fn five_act_camera() -> CameraTrack {
    use EasingFunction::*;

    let track = |anchors: &[(f64, f64, EasingFunction)]| {
        anchors
            .iter()
            .map(|&(at, value, easing)| AxisAnchor::new(at, value, easing))
            .collect::<Vec<_>>()
    };

    CameraTrack {
        position: AxisSet {
            x: AxisTrack::from_sorted(track(&[
                (0.0, 0.0, Linear),
                (0.35, 0.0, Linear),
                (0.5, 1.5, Power1InOut),
                (0.72, -2.0, Power2InOut),
                (0.9, 0.0, Power1Out),
            ])),
            y: AxisTrack::from_sorted(track(&[
                (0.0, 2.0, Linear),
                (0.2, 3.0, Power1InOut),
                (0.3, 8.5, Power2InOut),
                (0.45, 8.0, Power1Out),
                (0.6, 7.5, Linear),
                (0.8, 10.0, Power1InOut),
                (1.0, 13.0, Power2Out),
            ])),
            z: AxisTrack::from_sorted(track(&[
                (0.0, 10.0, Linear),
                (0.2, 6.0, Power1InOut),
                (0.35, 4.5, Power2Out),
                (0.6, 8.0, Power1InOut),
                (0.8, 9.0, Linear),
                (1.0, 13.0, SineInOut),
            ])),
        },
        rotation: AxisSet {
            x: AxisTrack::default(),
            y: AxisTrack::default(),
            z: AxisTrack::from_sorted(track(&[
                (0.0, 0.0, Linear),
                (0.22, 0.0, Linear),
                (0.28, 0.06, SineInOut),
                (0.34, 0.0, SineInOut),
            ])),
        },
    }
}

/// Errors that can occur when working with story files.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid story: {message}")]
    ValidationError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_act_story_is_valid() {
        let story = Story::five_act();
        assert!(story.validate().is_empty(), "{:?}", story.validate());
        assert_eq!(story.acts.len(), 5);
        assert!(story.camera.validate().is_ok());
    }

    #[test]
    fn test_five_act_camera_starts_at_initial_pose() {
        let story = Story::five_act();
        assert_eq!(story.pose_at(0.0).position, story.initial_pose.position);
        let end = story.pose_at(1.0).position;
        assert_eq!(end, Vec3::new(0.0, 13.0, 13.0));
    }

    #[test]
    fn test_empty_axes_fall_back_to_initial_pose() {
        let mut story = Story::five_act();
        story.camera.position.x = AxisTrack::default();
        story.initial_pose.position.x = 3.0;
        assert_eq!(story.pose_at(0.5).position.x, 3.0);
        assert_eq!(story.pose_at(0.5).rotation.x, 0.0);
    }

    #[test]
    fn test_story_serialization() {
        let story = Story::five_act();
        let json = serde_json::to_string_pretty(&story).unwrap();
        let parsed: Story = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "Five Acts");
        assert_eq!(parsed.acts, story.acts);
        assert_eq!(parsed.camera, story.camera);
        assert_eq!(parsed.shake, story.shake);
    }

    #[test]
    fn test_validate_reports_cross_reference_issues() {
        let mut story = Story::five_act();
        story.shake = Some(ShakeConfig {
            act: ActId(9),
            amplitude: 0.1,
            frequency_hz: 0.0,
            duration_secs: 1.0,
        });
        story.scroll.pages = 0.5;

        let issues = story.validate();
        assert!(issues.iter().any(|i| i.contains("unknown Act IX")));
        assert!(issues.iter().any(|i| i.contains("must be positive")));
        assert!(issues.iter().any(|i| i.contains("Page count")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join("cinescroll_test_story");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("story.json");

        Story::five_act().save(&path).unwrap();
        let loaded = Story::load(&path).unwrap();
        assert_eq!(loaded.acts.len(), 5);
        assert_eq!(loaded.look_at, Vec3::new(0.0, 7.0, 0.0));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_broken_act_table() {
        let dir = std::env::temp_dir().join("cinescroll_test_broken_story");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("story.json");

        let mut value = serde_json::to_value(Story::five_act()).unwrap();
        value["acts"][1]["start"] = serde_json::json!(0.25);
        std::fs::write(&path, value.to_string()).unwrap();

        let err = Story::load(&path).unwrap_err();
        assert!(matches!(err, StoryError::ParseError { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_page_layout() {
        let layout = Story::five_act().scroll.layout();
        assert_eq!(layout.document_height, 4500.0);
        assert_eq!(layout.extent(), 3600.0);
    }
}
