//! Error handling for jcrev
//!
//! Configuration and lifecycle violations are reported synchronously by the
//! engine; audio file errors come from the WAV collaborator and pass through
//! unchanged.

use thiserror::Error;

/// Result type alias for jcrev operations
pub type Result<T> = std::result::Result<T, ReverbError>;

/// Main error type for jcrev operations
#[derive(Error, Debug)]
pub enum ReverbError {
    // Configuration Errors
    #[error("Invalid parameter {param}: {value} (expected {expected})")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    // State Errors
    #[error("Reverb engine is not initialized")]
    NotInitialized,

    #[error("Reverb engine is already initialized")]
    AlreadyInitialized,

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Audio Device Errors
    #[error("Playback failed: {reason}")]
    Playback { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReverbError {
    /// Shorthand for building an `InvalidParameter` error
    pub fn invalid_parameter(
        param: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        ReverbError::InvalidParameter {
            param: param.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ReverbError::InvalidParameter { .. } => "CONFIGURATION_ERROR",
            ReverbError::NotInitialized => "NOT_INITIALIZED",
            ReverbError::AlreadyInitialized => "ALREADY_INITIALIZED",
            ReverbError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ReverbError::InvalidAudio { .. } => "INVALID_AUDIO",
            ReverbError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ReverbError::Playback { .. } => "PLAYBACK_ERROR",
            ReverbError::Io(_) => "IO_ERROR",
            ReverbError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error comes from engine configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ReverbError::InvalidParameter { .. })
    }

    /// Whether this error is a lifecycle (state machine) violation
    pub fn is_state_error(&self) -> bool {
        matches!(
            self,
            ReverbError::NotInitialized | ReverbError::AlreadyInitialized
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ReverbError::InvalidParameter { .. } => vec![
                "Gains must lie in [0, 1) to keep the feedback loops stable",
                "Delays must be at least one sample, no longer than max_delay, and at most 32767",
            ],
            ReverbError::NotInitialized => vec!["Call init() before processing samples"],
            ReverbError::AlreadyInitialized => {
                vec!["Call deinit() before re-initializing with new parameters"]
            }
            ReverbError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            ReverbError::InvalidAudio { .. } => vec![
                "Check if the file plays in another application",
                "The file may be corrupted - try re-exporting from source",
            ],
            ReverbError::UnsupportedFormat { .. } => {
                vec!["Convert the source to 16-bit integer PCM WAV first"]
            }
            ReverbError::Playback { .. } => vec![
                "Check that an output device is connected and not in exclusive use",
                "Rendered files are written before playback; open them in another player",
            ],
            _ => vec![],
        }
    }
}
