//! Write a new story file.

use std::path::PathBuf;

use cinescroll_common::config::AppConfig;
use cinescroll_story_model::story::Story;

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    name: Option<String>,
    seed: Option<u64>,
    viewport: Option<f64>,
    pages: Option<f64>,
) -> anyhow::Result<()> {
    let mut story = Story::five_act();
    if let Some(name) = name {
        story.name = name;
    }
    if let Some(seed) = seed {
        story.seed = seed;
    }
    story.scroll.viewport_height = viewport.unwrap_or(config.playback.viewport_height);
    story.scroll.pages = pages.unwrap_or(config.playback.pages);

    let issues = story.validate();
    if !issues.is_empty() {
        anyhow::bail!("Refusing to write invalid story: {}", issues.join("; "));
    }

    story
        .save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write story: {e}"))?;

    println!("Story '{}' written to {}", story.name, path.display());
    println!(
        "  Page: {}px viewport x {} pages",
        story.scroll.viewport_height, story.scroll.pages
    );
    println!("  Acts: {}", story.acts.len());
    println!("  Camera anchors: {}", story.camera.anchor_count());
    println!("  Seed: {:#x}", story.seed);

    Ok(())
}
