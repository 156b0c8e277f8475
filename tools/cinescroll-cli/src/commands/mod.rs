pub mod info;
pub mod init;
pub mod scrub;
pub mod simulate;
pub mod validate;

use std::path::{Path, PathBuf};

use cinescroll_story_model::story::Story;

/// Load `path`, or the built-in five-act story when no path is given.
pub fn load_story(path: Option<&Path>) -> anyhow::Result<Story> {
    match path {
        Some(path) => {
            Story::load(path).map_err(|e| anyhow::anyhow!("Failed to load story: {e}"))
        }
        None => Ok(Story::five_act()),
    }
}

pub fn describe_source(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in five-act story".to_string())
}
