//! Scene construction errors.

use cinescroll_common::error::CinescrollError;
use thiserror::Error;

/// Errors raised while building scene content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("connection {from} -> {to} references unknown skill '{missing}'")]
    UnknownSkill {
        from: String,
        to: String,
        missing: String,
    },

    #[error("skill '{id}' is defined more than once")]
    DuplicateSkill { id: String },

    #[error("connection {from} -> {to} links a skill to itself")]
    SelfConnection { from: String, to: String },

    #[error("invalid {what}: {reason}")]
    InvalidParameter { what: &'static str, reason: String },
}

impl SceneError {
    pub fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            what,
            reason: reason.into(),
        }
    }
}

impl From<SceneError> for CinescrollError {
    fn from(error: SceneError) -> Self {
        CinescrollError::Scene(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_into_shared_error() {
        let err: CinescrollError = SceneError::DuplicateSkill {
            id: "rust".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Scene error: skill 'rust' is defined more than once"
        );
        let CinescrollError::Scene(source) = err else {
            panic!("expected a scene error");
        };
        assert_eq!(
            source.downcast_ref::<SceneError>(),
            Some(&SceneError::DuplicateSkill {
                id: "rust".to_string()
            })
        );
    }
}
