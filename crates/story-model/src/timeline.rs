//! Scrub timeline data: easing curves, per-axis anchors, and camera tracks.
//!
//! A camera track is a pure function of progress. Every axis of the camera
//! position and rotation owns its own ordered anchor list, so one axis can
//! move while another holds, and the same progress value always yields the
//! same pose no matter which direction the reader scrolled from.

use serde::{Deserialize, Serialize};

use crate::vector::{Axis, Vec3};

/// Named easing curves, using tween-engine names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EasingFunction {
    /// Linear.
    #[default]
    #[serde(rename = "none", alias = "linear")]
    Linear,
    #[serde(rename = "power1.in")]
    Power1In,
    #[serde(rename = "power1.out", alias = "power1")]
    Power1Out,
    #[serde(rename = "power1.inOut")]
    Power1InOut,
    #[serde(rename = "power2.in")]
    Power2In,
    #[serde(rename = "power2.out", alias = "power2")]
    Power2Out,
    #[serde(rename = "power2.inOut")]
    Power2InOut,
    #[serde(rename = "power3.in")]
    Power3In,
    #[serde(rename = "power3.out", alias = "power3")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
    /// Exponential ease-out used by the smooth-scroll driver:
    /// `min(1, 1.001 - 2^(-10 t))`.
    #[serde(rename = "expo.out")]
    ExpoOut,
}

impl EasingFunction {
    pub const ALL: [EasingFunction; 12] = [
        Self::Linear,
        Self::Power1In,
        Self::Power1Out,
        Self::Power1InOut,
        Self::Power2In,
        Self::Power2Out,
        Self::Power2InOut,
        Self::Power3In,
        Self::Power3Out,
        Self::Power3InOut,
        Self::SineInOut,
        Self::ExpoOut,
    ];

    /// Map a linear `t` in `[0, 1]` onto the curve. `t` is clamped first.
    pub fn apply(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Power1In => t * t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power1InOut => in_out(t, 2),
            Self::Power2In => t.powi(3),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => in_out(t, 3),
            Self::Power3In => t.powi(4),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
            Self::Power3InOut => in_out(t, 4),
            Self::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
            Self::ExpoOut => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }

    /// Wire name of this curve.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "none",
            Self::Power1In => "power1.in",
            Self::Power1Out => "power1.out",
            Self::Power1InOut => "power1.inOut",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power2InOut => "power2.inOut",
            Self::Power3In => "power3.in",
            Self::Power3Out => "power3.out",
            Self::Power3InOut => "power3.inOut",
            Self::SineInOut => "sine.inOut",
            Self::ExpoOut => "expo.out",
        }
    }

    /// Parse a curve by name. Accepts the wire names plus `linear` and the
    /// bare `powerN` shorthands (which mean `powerN.out`).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        match name {
            "linear" => return Some(Self::Linear),
            "power1" => return Some(Self::Power1Out),
            "power2" => return Some(Self::Power2Out),
            "power3" => return Some(Self::Power3Out),
            _ => {}
        }
        Self::ALL.into_iter().find(|e| e.name() == name)
    }
}

impl std::fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Symmetric in-out polynomial of the given power.
fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

/// A value pinned to a progress position on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAnchor {
    /// Progress position in `[0, 1]`.
    pub at: f64,
    /// Axis value at `at`.
    pub value: f64,
    /// Curve for the segment arriving at this anchor.
    #[serde(default)]
    pub easing: EasingFunction,
}

impl AxisAnchor {
    pub fn new(at: f64, value: f64, easing: EasingFunction) -> Self {
        Self { at, value, easing }
    }
}

/// Ordered anchors for a single axis. An empty track reads as `0.0`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisTrack {
    anchors: Vec<AxisAnchor>,
}

impl AxisTrack {
    /// Build a track, validating anchor order.
    pub fn new(anchors: Vec<AxisAnchor>) -> Result<Self, TrackError> {
        let track = Self { anchors };
        track.validate("track")?;
        Ok(track)
    }

    /// Wrap anchors already known to be ordered. Checked by `validate`.
    pub(crate) fn from_sorted(anchors: Vec<AxisAnchor>) -> Self {
        Self { anchors }
    }

    /// A track that holds one value for all progress.
    pub fn constant(value: f64) -> Self {
        Self {
            anchors: vec![AxisAnchor::new(0.0, value, EasingFunction::Linear)],
        }
    }

    pub fn anchors(&self) -> &[AxisAnchor] {
        &self.anchors
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Append an anchor after the current last one.
    pub fn push(&mut self, anchor: AxisAnchor) -> Result<(), TrackError> {
        check_anchor(&anchor, "track")?;
        if let Some(last) = self.anchors.last() {
            if anchor.at <= last.at {
                return Err(TrackError::NotIncreasing {
                    axis: "track".to_string(),
                    at: anchor.at,
                });
            }
        }
        self.anchors.push(anchor);
        Ok(())
    }

    /// Value at `progress`.
    ///
    /// Finds the bracketing pair `prev.at <= p < next.at`, normalizes the
    /// local `t`, applies the arriving anchor's easing, and interpolates.
    /// Progress before the first anchor reads the first value; progress at
    /// or after the last anchor reads the last value.
    pub fn value_at(&self, progress: f64) -> f64 {
        let (first, last) = match (self.anchors.first(), self.anchors.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        let p = if progress.is_nan() { 0.0 } else { progress };
        if p <= first.at {
            return first.value;
        }
        if p >= last.at {
            return last.value;
        }

        let idx = self.anchors.partition_point(|a| a.at <= p);
        let prev = &self.anchors[idx - 1];
        let next = &self.anchors[idx];

        let span = next.at - prev.at;
        let t = (p - prev.at) / span;
        prev.value + (next.value - prev.value) * next.easing.apply(t)
    }

    fn validate(&self, axis: &str) -> Result<(), TrackError> {
        let mut prev: Option<f64> = None;
        for anchor in &self.anchors {
            check_anchor(anchor, axis)?;
            if let Some(prev_at) = prev {
                if anchor.at <= prev_at {
                    return Err(TrackError::NotIncreasing {
                        axis: axis.to_string(),
                        at: anchor.at,
                    });
                }
            }
            prev = Some(anchor.at);
        }
        Ok(())
    }

    fn last_at(&self) -> Option<f64> {
        self.anchors.last().map(|a| a.at)
    }
}

fn check_anchor(anchor: &AxisAnchor, axis: &str) -> Result<(), TrackError> {
    if !anchor.at.is_finite() || !anchor.value.is_finite() {
        return Err(TrackError::NonFinite {
            axis: axis.to_string(),
        });
    }
    if !(0.0..=1.0).contains(&anchor.at) {
        return Err(TrackError::OutOfRange { at: anchor.at });
    }
    Ok(())
}

/// One track per axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSet {
    #[serde(default)]
    pub x: AxisTrack,
    #[serde(default)]
    pub y: AxisTrack,
    #[serde(default)]
    pub z: AxisTrack,
}

impl AxisSet {
    /// Every axis held at the components of `v`.
    pub fn constant(v: Vec3) -> Self {
        Self {
            x: AxisTrack::constant(v.x),
            y: AxisTrack::constant(v.y),
            z: AxisTrack::constant(v.z),
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisTrack {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisTrack {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    pub fn sample(&self, progress: f64) -> Vec3 {
        Vec3::new(
            self.x.value_at(progress),
            self.y.value_at(progress),
            self.z.value_at(progress),
        )
    }

    fn validate(&self, channel: Channel) -> Result<(), TrackError> {
        for axis in Axis::ALL {
            self.axis(axis).validate(&format!("{channel}.{axis}"))?;
        }
        Ok(())
    }
}

/// Which part of the camera transform a tween drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Position,
    Rotation,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Position => f.write_str("position"),
            Channel::Rotation => f.write_str("rotation"),
        }
    }
}

/// Scrubbed camera state at one progress value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    /// Euler angles (radians) layered on top of the look-at orientation.
    pub rotation: Vec3,
}

/// A full camera keyframe: every position axis anchored at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Progress position in `[0, 1]`.
    pub at_progress: f64,
    pub position: Vec3,
    /// Optional rotation; keyframes without one leave rotation untouched.
    #[serde(default)]
    pub rotation: Option<Vec3>,
    /// Curve for the segment arriving at this keyframe.
    #[serde(default)]
    pub easing: EasingFunction,
}

/// Per-axis camera animation keyed by progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraTrack {
    pub position: AxisSet,
    #[serde(default)]
    pub rotation: AxisSet,
}

impl CameraTrack {
    /// A track that never moves.
    pub fn hold(pose: CameraPose) -> Self {
        Self {
            position: AxisSet::constant(pose.position),
            rotation: AxisSet::constant(pose.rotation),
        }
    }

    /// Build a track from full keyframes.
    ///
    /// Keyframes must be non-empty with strictly increasing `at_progress`.
    pub fn from_keyframes(keyframes: &[CameraKeyframe]) -> Result<Self, TrackError> {
        if keyframes.is_empty() {
            return Err(TrackError::Empty);
        }

        let mut track = CameraTrack::default();
        for kf in keyframes {
            for axis in Axis::ALL {
                track
                    .position
                    .axis_mut(axis)
                    .push(AxisAnchor::new(kf.at_progress, kf.position.get(axis), kf.easing))
                    .map_err(|e| e.on_axis(Channel::Position, axis))?;
            }
            if let Some(rotation) = kf.rotation {
                for axis in Axis::ALL {
                    track
                        .rotation
                        .axis_mut(axis)
                        .push(AxisAnchor::new(kf.at_progress, rotation.get(axis), kf.easing))
                        .map_err(|e| e.on_axis(Channel::Rotation, axis))?;
                }
            }
        }
        Ok(track)
    }

    /// Camera pose at `progress`.
    pub fn sample(&self, progress: f64) -> CameraPose {
        CameraPose {
            position: self.position.sample(progress),
            rotation: self.rotation.sample(progress),
        }
    }

    /// Camera pose at `progress`; axes without anchors read from `fallback`.
    pub fn sample_or(&self, progress: f64, fallback: &CameraPose) -> CameraPose {
        let mut pose = self.sample(progress);
        for axis in Axis::ALL {
            if self.position.axis(axis).is_empty() {
                pose.position.set(axis, fallback.position.get(axis));
            }
            if self.rotation.axis(axis).is_empty() {
                pose.rotation.set(axis, fallback.rotation.get(axis));
            }
        }
        pose
    }

    pub fn channel(&self, channel: Channel) -> &AxisSet {
        match channel {
            Channel::Position => &self.position,
            Channel::Rotation => &self.rotation,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut AxisSet {
        match channel {
            Channel::Position => &mut self.position,
            Channel::Rotation => &mut self.rotation,
        }
    }

    /// Check every axis for ordering, range, and finiteness.
    pub fn validate(&self) -> Result<(), TrackError> {
        self.position.validate(Channel::Position)?;
        self.rotation.validate(Channel::Rotation)
    }

    /// Total number of anchors across all axes.
    pub fn anchor_count(&self) -> usize {
        [Channel::Position, Channel::Rotation]
            .iter()
            .flat_map(|c| Axis::ALL.map(|a| self.channel(*c).axis(a).anchors().len()))
            .sum()
    }
}

/// Builds a [`CameraTrack`] from tweens placed at explicit progress offsets.
///
/// Each tween names the axes it drives, a start offset, a duration, and an
/// easing curve. An axis that is idle before the tween holds its previous
/// value until the tween starts.
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    track: CameraTrack,
    error: Option<TrackError>,
}

impl TrackBuilder {
    /// Start from `initial`, anchored at progress 0.
    pub fn new(initial: CameraPose) -> Self {
        Self {
            track: CameraTrack::hold(initial),
            error: None,
        }
    }

    /// Tween position axes towards `targets` over `[at, at + duration]`.
    pub fn position(
        self,
        at: f64,
        duration: f64,
        targets: &[(Axis, f64)],
        easing: EasingFunction,
    ) -> Self {
        self.tween(Channel::Position, at, duration, targets, easing)
    }

    /// Tween rotation axes towards `targets` over `[at, at + duration]`.
    pub fn rotation(
        self,
        at: f64,
        duration: f64,
        targets: &[(Axis, f64)],
        easing: EasingFunction,
    ) -> Self {
        self.tween(Channel::Rotation, at, duration, targets, easing)
    }

    /// Add one tween segment. The first error is kept and reported by
    /// [`TrackBuilder::build`]; later tweens are ignored once one fails.
    pub fn tween(
        mut self,
        channel: Channel,
        at: f64,
        duration: f64,
        targets: &[(Axis, f64)],
        easing: EasingFunction,
    ) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.try_tween(channel, at, duration, targets, easing) {
                self.error = Some(e);
            }
        }
        self
    }

    fn try_tween(
        &mut self,
        channel: Channel,
        at: f64,
        duration: f64,
        targets: &[(Axis, f64)],
        easing: EasingFunction,
    ) -> Result<(), TrackError> {
        if !(duration > 0.0) {
            return Err(TrackError::ZeroDuration { at });
        }
        let end = at + duration;
        if !at.is_finite() || at < 0.0 || end > 1.0 + 1e-9 {
            return Err(TrackError::OutOfRange { at: end });
        }
        let end = end.min(1.0);

        for &(axis, target) in targets {
            let track = self.track.channel_mut(channel).axis_mut(axis);
            push_tween(track, at, end, target, easing).map_err(|e| e.on_axis(channel, axis))?;
        }
        Ok(())
    }

    pub fn build(self) -> Result<CameraTrack, TrackError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.track),
        }
    }
}

/// Hold the axis at its current value until `at`, then ease to `target`.
fn push_tween(
    track: &mut AxisTrack,
    at: f64,
    end: f64,
    target: f64,
    easing: EasingFunction,
) -> Result<(), TrackError> {
    match track.last_at() {
        Some(last) if at < last => {
            return Err(TrackError::Overlap {
                axis: String::new(),
                at,
            });
        }
        Some(last) if at > last => {
            let held = track.value_at(at);
            track.push(AxisAnchor::new(at, held, EasingFunction::Linear))?;
        }
        _ => {}
    }
    track.push(AxisAnchor::new(end, target, easing))
}

/// Errors raised while building or validating camera tracks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrackError {
    #[error("camera track has no keyframes")]
    Empty,

    #[error("anchors on {axis} must strictly increase (found {at})")]
    NotIncreasing { axis: String, at: f64 },

    #[error("anchor position {at} is outside [0, 1]")]
    OutOfRange { at: f64 },

    #[error("non-finite anchor on {axis}")]
    NonFinite { axis: String },

    #[error("tween at {at} has no duration")]
    ZeroDuration { at: f64 },

    #[error("tween on {axis} at {at} starts before the previous tween ends")]
    Overlap { axis: String, at: f64 },
}

impl TrackError {
    fn on_axis(self, channel: Channel, axis: Axis) -> Self {
        let name = format!("{channel}.{axis}");
        match self {
            Self::NotIncreasing { at, .. } => Self::NotIncreasing { axis: name, at },
            Self::NonFinite { .. } => Self::NonFinite { axis: name },
            Self::Overlap { at, .. } => Self::Overlap { axis: name, at },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(at: f64, position: Vec3, easing: EasingFunction) -> CameraKeyframe {
        CameraKeyframe {
            at_progress: at,
            position,
            rotation: None,
            easing,
        }
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in EasingFunction::ALL {
            assert!(easing.apply(0.0).abs() < 0.002, "{easing} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing} at 1");
        }
    }

    #[test]
    fn test_easing_golden_midpoints() {
        assert_eq!(EasingFunction::Linear.apply(0.5), 0.5);
        assert!((EasingFunction::Power1Out.apply(0.5) - 0.75).abs() < 1e-12);
        assert!((EasingFunction::Power1In.apply(0.5) - 0.25).abs() < 1e-12);
        assert!((EasingFunction::Power1InOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((EasingFunction::Power2Out.apply(0.5) - 0.875).abs() < 1e-12);
        assert!((EasingFunction::SineInOut.apply(0.5) - 0.5).abs() < 1e-12);
        let expo = 1.001 - 2f64.powf(-5.0);
        assert!((EasingFunction::ExpoOut.apply(0.5) - expo).abs() < 1e-12);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(EasingFunction::Power1Out.apply(-3.0), 0.0);
        assert_eq!(EasingFunction::Power1Out.apply(7.0), 1.0);
        assert_eq!(EasingFunction::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn test_easing_names_round_trip() {
        for easing in EasingFunction::ALL {
            assert_eq!(EasingFunction::from_name(easing.name()), Some(easing));
            let json = serde_json::to_string(&easing).unwrap();
            assert_eq!(json, format!("\"{}\"", easing.name()));
        }
        assert_eq!(
            EasingFunction::from_name("linear"),
            Some(EasingFunction::Linear)
        );
        assert_eq!(
            EasingFunction::from_name("power2"),
            Some(EasingFunction::Power2Out)
        );
        assert_eq!(EasingFunction::from_name("bounce.out"), None);
    }

    #[test]
    fn test_value_at_clamps_outside_anchors() {
        let track = AxisTrack::new(vec![
            AxisAnchor::new(0.2, 1.0, EasingFunction::Linear),
            AxisAnchor::new(0.6, 5.0, EasingFunction::Linear),
        ])
        .unwrap();
        assert_eq!(track.value_at(0.0), 1.0);
        assert_eq!(track.value_at(0.2), 1.0);
        assert_eq!(track.value_at(0.6), 5.0);
        assert_eq!(track.value_at(1.0), 5.0);
        assert!((track.value_at(0.4) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_track_reads_zero() {
        assert_eq!(AxisTrack::default().value_at(0.5), 0.0);
    }

    #[test]
    fn test_rejects_unordered_anchors() {
        let err = AxisTrack::new(vec![
            AxisAnchor::new(0.5, 0.0, EasingFunction::Linear),
            AxisAnchor::new(0.5, 1.0, EasingFunction::Linear),
        ])
        .unwrap_err();
        assert!(matches!(err, TrackError::NotIncreasing { .. }));

        let err = AxisTrack::new(vec![AxisAnchor::new(1.5, 0.0, EasingFunction::Linear)])
            .unwrap_err();
        assert_eq!(err, TrackError::OutOfRange { at: 1.5 });
    }

    #[test]
    fn test_keyframe_midpoint_linear_and_eased() {
        let a = Vec3::new(0.0, 2.0, 10.0);
        let b = Vec3::new(0.0, 4.0, 6.0);

        let linear = CameraTrack::from_keyframes(&[
            kf(0.2, a, EasingFunction::Linear),
            kf(0.35, b, EasingFunction::Linear),
        ])
        .unwrap();
        let mid = linear.sample(0.275).position;
        assert!(mid.max_abs_diff(&Vec3::new(0.0, 3.0, 8.0)) < 1e-9);

        let eased = CameraTrack::from_keyframes(&[
            kf(0.2, a, EasingFunction::Linear),
            kf(0.35, b, EasingFunction::Power1Out),
        ])
        .unwrap();
        let mid = eased.sample(0.275).position;
        // power1.out at t = 0.5 covers 75% of the segment.
        assert!(mid.max_abs_diff(&Vec3::new(0.0, 3.5, 7.0)) < 1e-9);
    }

    #[test]
    fn test_keyframes_must_increase() {
        let v = Vec3::ZERO;
        let err = CameraTrack::from_keyframes(&[
            kf(0.5, v, EasingFunction::Linear),
            kf(0.4, v, EasingFunction::Linear),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TrackError::NotIncreasing {
                axis: "position.x".to_string(),
                at: 0.4
            }
        );
        assert_eq!(CameraTrack::from_keyframes(&[]), Err(TrackError::Empty));
    }

    #[test]
    fn test_rotation_only_from_keyframes_that_have_it() {
        let track = CameraTrack::from_keyframes(&[
            kf(0.0, Vec3::ZERO, EasingFunction::Linear),
            CameraKeyframe {
                at_progress: 0.5,
                position: Vec3::new(1.0, 1.0, 1.0),
                rotation: Some(Vec3::new(0.0, 0.0, 0.2)),
                easing: EasingFunction::Linear,
            },
        ])
        .unwrap();
        assert_eq!(track.rotation.z.anchors().len(), 1);
        assert_eq!(track.sample(0.0).rotation.z, 0.2);
        assert_eq!(track.position.x.anchors().len(), 2);
    }

    #[test]
    fn test_builder_per_axis_timing() {
        let track = TrackBuilder::new(CameraPose {
            position: Vec3::new(0.0, 2.0, 10.0),
            rotation: Vec3::ZERO,
        })
        .position(0.0, 0.5, &[(Axis::Z, 6.0)], EasingFunction::Linear)
        .position(0.25, 0.5, &[(Axis::Y, 4.0)], EasingFunction::Linear)
        .build()
        .unwrap();

        // y holds until its tween starts at 0.25.
        assert_eq!(track.sample(0.2).position.y, 2.0);
        assert!((track.sample(0.5).position.y - 3.0).abs() < 1e-12);
        assert!((track.sample(0.25).position.z - 8.0).abs() < 1e-12);
        assert_eq!(track.sample(1.0).position, Vec3::new(0.0, 4.0, 6.0));
        assert!(track.validate().is_ok());
    }

    #[test]
    fn test_builder_reports_overlap_and_range() {
        let err = TrackBuilder::new(CameraPose::default())
            .position(0.0, 0.5, &[(Axis::X, 1.0)], EasingFunction::Linear)
            .position(0.3, 0.2, &[(Axis::X, 2.0)], EasingFunction::Linear)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TrackError::Overlap {
                axis: "position.x".to_string(),
                at: 0.3
            }
        );

        let err = TrackBuilder::new(CameraPose::default())
            .rotation(0.8, 0.5, &[(Axis::Z, 1.0)], EasingFunction::Linear)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrackError::OutOfRange { .. }));

        let err = TrackBuilder::new(CameraPose::default())
            .position(0.2, 0.0, &[(Axis::Y, 1.0)], EasingFunction::Linear)
            .build()
            .unwrap_err();
        assert_eq!(err, TrackError::ZeroDuration { at: 0.2 });
    }

    #[test]
    fn test_builder_names_axis_of_bad_hold() {
        let err = TrackBuilder::new(CameraPose {
            position: Vec3::new(0.0, f64::NAN, 10.0),
            rotation: Vec3::ZERO,
        })
        .position(0.2, 0.3, &[(Axis::Y, 4.0)], EasingFunction::Linear)
        .build()
        .unwrap_err();
        assert_eq!(
            err,
            TrackError::NonFinite {
                axis: "position.y".to_string()
            }
        );

        let err = TrackBuilder::new(CameraPose::default())
            .position(f64::NAN, 0.3, &[(Axis::X, 1.0)], EasingFunction::Linear)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrackError::OutOfRange { .. }));
    }

    #[test]
    fn test_track_json_shape() {
        let track = CameraTrack::hold(CameraPose {
            position: Vec3::new(0.0, 2.0, 10.0),
            rotation: Vec3::ZERO,
        });
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["position"]["y"][0]["value"], 2.0);
        assert_eq!(json["position"]["y"][0]["easing"], "none");
        let parsed: CameraTrack = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, track);
        assert_eq!(parsed.anchor_count(), 6);
    }
}
