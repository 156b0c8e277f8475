//! Sample the camera at a progress value.
//!
//! The target is approached twice, once scrolling down from 0 and once
//! scrolling up from 1. Both must land on the same pose.

use std::path::PathBuf;

use cinescroll_scene::five_act_copy;
use cinescroll_scroll_core::scrub::{Scrub, ScrubTimeline, ScrubTrigger};
use cinescroll_story_model::scroll::Progress;
use cinescroll_story_model::timeline::CameraPose;

use super::{describe_source, load_story};

const FRAME_SECS: f64 = 1.0 / 60.0;
/// Upper bound on frames spent settling a smoothed scrub.
const SETTLE_FRAMES: u32 = 60 * 30;

pub fn run(path: Option<PathBuf>, progress: f64, lag: Option<f64>, steps: u32) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&progress) {
        anyhow::bail!("Progress must be within [0, 1] (got {progress})");
    }
    let story = load_story(path.as_deref())?;
    let scrub = match lag {
        Some(lag_secs) if lag_secs > 0.0 => Scrub::Smoothed { lag_secs },
        Some(lag_secs) => anyhow::bail!("Scrub lag must be positive (got {lag_secs})"),
        None => Scrub::Immediate,
    };
    let trigger = ScrubTrigger {
        scrub,
        ..ScrubTrigger::default()
    };
    let mut timeline = ScrubTimeline::new(story.camera.clone(), story.initial_pose, trigger);

    let forward = approach(&mut timeline, 0.0, progress, steps.max(1));
    let backward = approach(&mut timeline, 1.0, progress, steps.max(1));
    let direct = story.pose_at(progress);

    let act = story.acts.resolve(progress);

    println!("Scrub of {} at progress {progress}", describe_source(&path));
    println!("  Act: {act}");
    if let Some(copy) = five_act_copy().into_iter().find(|c| c.act == act) {
        println!("  Overlay: {}", copy.headlines.join(" / "));
    }
    print_pose("Forward", &forward);
    print_pose("Backward", &backward);
    print_pose("Direct", &direct);

    let drift = forward
        .position
        .max_abs_diff(&backward.position)
        .max(forward.rotation.max_abs_diff(&backward.rotation));
    println!("  Direction drift: {drift:.3e}");
    if drift > 1e-6 {
        anyhow::bail!("Camera pose depends on scroll direction (drift {drift})");
    }

    Ok(())
}

/// Scroll linearly from `from` to `to`, then let a smoothed playhead settle.
fn approach(timeline: &mut ScrubTimeline, from: f64, to: f64, steps: u32) -> CameraPose {
    timeline.seek(Progress::new(from));
    let mut pose = timeline.query(Progress::new(from));
    for i in 1..=steps {
        let p = from + (to - from) * f64::from(i) / f64::from(steps);
        pose = timeline.update(Progress::new(p), FRAME_SECS);
    }

    let target = timeline.trigger().local(Progress::new(to));
    for _ in 0..SETTLE_FRAMES {
        if timeline.playhead() == target {
            break;
        }
        pose = timeline.update(Progress::new(to), FRAME_SECS);
    }
    tracing::debug!(from, to, playhead = timeline.playhead(), "Scrub approach settled");
    pose
}

fn print_pose(label: &str, pose: &CameraPose) {
    println!(
        "  {label:<9} position ({:>7.3}, {:>7.3}, {:>7.3})  rotation ({:>6.3}, {:>6.3}, {:>6.3})",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.rotation.x,
        pose.rotation.y,
        pose.rotation.z
    );
}
