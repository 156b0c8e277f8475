//! Error types shared across Cinescroll crates.

use cinescroll_story_model::act::ActError;
use cinescroll_story_model::story::StoryError;
use cinescroll_story_model::timeline::TrackError;

/// Top-level error type for Cinescroll operations.
#[derive(Debug, thiserror::Error)]
pub enum CinescrollError {
    #[error("Story error: {0}")]
    Story(#[from] StoryError),

    #[error("Act table error: {0}")]
    Act(#[from] ActError),

    #[error("Camera track error: {0}")]
    Track(#[from] TrackError),

    /// Scene construction failed. The scene crate provides the conversion.
    #[error("Scene error: {0}")]
    Scene(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using CinescrollError.
pub type CinescrollResult<T> = Result<T, CinescrollError>;
