//! Error types shared across clipsync crates.
//!
//! Interaction handlers never surface these: a drag or a playback tick
//! degrades to a safe value instead. Errors only cross I/O seams such as
//! config files, caption files, and audio decoding.

use std::path::PathBuf;

/// Top-level error type for clipsync operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipsyncError {
    /// A duration or position fell outside its permitted bounds.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Waveform audio could not be fetched or decoded.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// An async result arrived after its request was superseded.
    #[error("Stale result from superseded request (generation {generation})")]
    StaleResult { generation: u64 },

    #[error("Caption data error: {message}")]
    Captions { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ClipsyncError.
pub type ClipsyncResult<T> = Result<T, ClipsyncError>;

impl ClipsyncError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn captions(msg: impl Into<String>) -> Self {
        Self::Captions {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }

    /// Whether the error only means a result was outdated on arrival.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResult { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClipsyncError::validation("Clip must be at least 5 seconds");
        assert_eq!(
            err.to_string(),
            "Validation error: Clip must be at least 5 seconds"
        );

        let stale = ClipsyncError::StaleResult { generation: 3 };
        assert!(stale.is_stale());
        assert!(!ClipsyncError::decode("bad header").is_stale());
    }
}
