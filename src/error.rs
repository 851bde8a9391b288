//! Error types shared by the gallery, media and events layers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading gallery content or event data.
///
/// None of these are fatal to the application: callers log them and fall
/// back to an empty season, the original image, or a fallback message.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reminder database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// The events feed parsed as JSON but does not have the expected shape
    #[error("Invalid events feed: {message}")]
    InvalidFeed {
        /// Description of what was wrong with the feed
        message: String,
    },

    /// Neither a cache nor a home directory could be determined
    #[error("Could not determine a cache directory")]
    NoCacheDir,

    /// Neither a data nor a home directory could be determined
    #[error("Could not determine a data directory")]
    NoDataDir,

    /// Image file not found at expected path
    #[error("Image not found: {path:?}")]
    ImageNotFound {
        /// Path where the image was expected
        path: PathBuf,
    },

    /// A background blocking task panicked or was cancelled
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for gallery operations.
pub type Result<T> = std::result::Result<T, GalleryError>;
