//! Validate a story file.

use std::path::PathBuf;

use cinescroll_scene::SceneGraph;
use cinescroll_story_model::story::Story;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating story at: {}", path.display());

    let story =
        Story::load(&path).map_err(|e| anyhow::anyhow!("Failed to load story: {e}"))?;

    println!("  Name: {}", story.name);
    println!("  Version: {}", story.version);
    println!("  Acts: {}", story.acts.len());
    println!("  Camera anchors: {}", story.camera.anchor_count());

    // Scene content is generated from the seed and must build too.
    match SceneGraph::for_story(&story) {
        Ok(_) => {
            println!("  Scene: OK");
            println!("\nStory is valid.");
            Ok(())
        }
        Err(e) => anyhow::bail!("Scene cannot be built: {e}"),
    }
}
