//! Show story and scene information.

use std::path::PathBuf;

use cinescroll_scene::{five_act_copy, LayerKind, SceneGraph};
use cinescroll_story_model::timeline::Channel;
use cinescroll_story_model::vector::Axis;

use super::{describe_source, load_story};

pub fn run(path: Option<PathBuf>) -> anyhow::Result<()> {
    let story = load_story(path.as_deref())?;
    let scene = SceneGraph::for_story(&story)?;
    let layout = story.scroll.layout();

    println!("Story: {} ({})", story.name, describe_source(&path));
    println!("  Version: {}", story.version);
    println!("  Created: {}", story.created_at);
    println!("  Seed: {:#x}", story.seed);
    println!();

    println!("Scroll:");
    println!(
        "  Viewport: {}px, document: {}px, extent: {}px",
        layout.viewport_height,
        layout.document_height,
        layout.extent()
    );
    println!();

    println!("Acts:");
    let copy = five_act_copy();
    for range in story.acts.ranges() {
        let headline = copy
            .iter()
            .find(|c| c.act == range.act)
            .and_then(|c| c.headlines.first().cloned())
            .unwrap_or_default();
        println!(
            "  {:<8} [{:.2}, {:.2})  {}",
            range.act.to_string(),
            range.start,
            range.end,
            headline
        );
    }
    println!();

    println!("Camera:");
    for channel in [Channel::Position, Channel::Rotation] {
        let counts: Vec<String> = Axis::ALL
            .iter()
            .map(|a| format!("{a}={}", story.camera.channel(channel).axis(*a).anchors().len()))
            .collect();
        println!("  {channel}: {}", counts.join(" "));
    }
    println!("  Look-at: {:?}", story.look_at.to_array());
    if let Some(shake) = &story.shake {
        println!(
            "  Shake: on entering {} ({} amplitude, {}Hz, {}s)",
            shake.act, shake.amplitude, shake.frequency_hz, shake.duration_secs
        );
    }
    println!();

    println!("Scene:");
    for kind in [LayerKind::Back, LayerKind::Mid, LayerKind::Fore] {
        if let Some(layer) = scene.city.layer(kind) {
            println!(
                "  City {:?}: {} buildings at z={}",
                kind,
                layer.buildings.len(),
                layer.z_offset
            );
        }
    }
    println!("  Web moment: {} strands", scene.web_moment.strand_count());
    println!(
        "  Skill web: {} skills, {} connections",
        scene.skill_web.nodes.len(),
        scene.skill_web.connections.len()
    );
    println!("  Finale: {} particles", scene.finale.particles.len());

    Ok(())
}
