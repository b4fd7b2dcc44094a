//! Error types for selection and insertion.

use catalog::VideoId;
use thiserror::Error;
use youtube_client::PlatformError;

/// Failures that end a selection run.
///
/// "Nothing suitable was found" is not an error; it is reported as
/// [`Selection::NoCandidate`](crate::Selection::NoCandidate).
#[derive(Debug, Error)]
pub enum SelectorError {
    /// A search, detail lookup or playlist listing failed
    #[error(transparent)]
    Sourcing(#[from] anyhow::Error),

    /// Insertion failed with something other than not-found or quota
    #[error("Inserting {video_id} failed: {source}")]
    Insertion {
        video_id: VideoId,
        #[source]
        source: PlatformError,
    },

    #[error("Invalid selection config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
