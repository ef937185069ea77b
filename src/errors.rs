use thiserror::Error;

use crate::video_id::InvalidUrl;

/// Enumerates high-level errors returned by this library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The submitted URL is not a usable YouTube watch URL.
    #[error("Invalid YouTube URL")]
    InvalidUrl {
        #[from]
        source: InvalidUrl,
    },

    /// A form field is missing or cannot be stored as given.
    #[error("Please check the data entered.")]
    InvalidSubmission { field: &'static str },

    /// Another video already has the same video ID.
    #[error("You already added that video.")]
    DuplicateVideo,

    /// No video has the given ID.
    #[error("no video with ID {0}")]
    NonExistentId(i64),

    /// Represents an SQL error.
    #[error("database error")]
    Sqlx { source: sqlx::Error },

    /// The in-memory store's lock was poisoned by a panicking writer.
    #[error("store unavailable")]
    StoreUnavailable,

    /// Represents an error building a URL for a response.
    #[error("failed to generate URL")]
    FailedToGenerateUrl { source: url::ParseError },
}
