//! Error types for playback control

use crate::renderer::RendererError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Renderer could not load or start the current track
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    /// Index out of bounds
    #[error("Index out of bounds: {index} (playlist length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Seek target is not a finite number
    #[error("Invalid seek target: {0}")]
    InvalidSeek(f64),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
