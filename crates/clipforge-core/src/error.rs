//! Error types for ClipForge.
//!
//! Build errors (`SourceCorrupt`, `TrackInsertFailed`) are returned
//! synchronously by the builders; export errors only travel through the
//! asynchronous completion channel. There is no retry logic anywhere in
//! this library - every failure is terminal for that build/export attempt.

use thiserror::Error;

/// Main error type for ClipForge operations.
#[derive(Error, Debug)]
pub enum ClipForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required media track is missing or unreadable from a source.
    #[error("source corrupt: {0}")]
    SourceCorrupt(String),

    /// Inserting a time range into a composition track failed.
    #[error("track insert failed: {0}")]
    TrackInsertFailed(String),

    /// The media engine could not construct an export session.
    #[error("export session unavailable: {0}")]
    ExportSessionUnavailable(String),

    /// The engine's asynchronous export terminated in a non-success state.
    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for ClipForge operations.
pub type Result<T> = std::result::Result<T, ClipForgeError>;
