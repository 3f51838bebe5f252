//! Error type shared by the path builder, the follower and model loading.

use std::fmt;

/// Failures raised while building the track or driving the tracked object.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// Too few control points to form a closed curve.
    InsufficientPoints { found: usize, required: usize },
    /// The path has no samples (sample count of zero).
    EmptyPath,
    /// The follower was stepped before its tracked object was available.
    ObjectNotReady,
    /// The model collaborator failed to load the tracked object's asset.
    AssetLoad { path: String, reason: String },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InsufficientPoints { found, required } => {
                write!(
                    f,
                    "closed path needs at least {} control points, got {}",
                    required, found
                )
            }
            TrackError::EmptyPath => write!(f, "path has no samples"),
            TrackError::ObjectNotReady => write!(f, "tracked object is not ready"),
            TrackError::AssetLoad { path, reason } => {
                write!(f, "failed to load model '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for TrackError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_counts() {
        let err = TrackError::InsufficientPoints {
            found: 2,
            required: 3,
        };
        let message = err.to_string();
        assert!(message.contains('2'));
        assert!(message.contains('3'));
    }
}
