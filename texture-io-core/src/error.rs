//! Error types for texture I/O

use std::io;
use thiserror::Error;

/// Result type alias for texture I/O operations
pub type Result<T> = std::result::Result<T, TextureIoError>;

/// Main error type for texture loading, saving and buffer allocation
///
/// Unmapped tags and channel layouts are not errors: they resolve to
/// [`PixelFormat::Unknown`](crate::PixelFormat::Unknown) and callers check for it.
#[derive(Error, Debug)]
pub enum TextureIoError {
    /// IO errors when reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No codec plugin registered for the key and no fallback loader available
    #[error("No plugin found for {domain}/{key}")]
    PluginNotFound { domain: String, key: String },

    /// A codec plugin reported a non-zero status
    #[error("Plugin {key} failed with status {code}")]
    PluginOperationFailed { key: String, code: i32 },

    /// The fallback image loader could not decode the file
    #[error("Fallback decode failed: {0}")]
    FallbackDecodeFailed(String),

    /// The fallback image loader could not encode the MipSet
    #[error("Fallback encode failed: {0}")]
    FallbackEncodeFailed(String),

    /// Width or height unusable for allocation
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Requested mip level or face/slice does not exist
    #[error("Mip level {level} (face/slice {face_or_slice}) out of range")]
    LevelOutOfRange { level: usize, face_or_slice: usize },

    /// Pixel source does not match the level's buffer layout
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Channel layout or pixel format the operation cannot handle
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TextureIoError {
    /// Create a plugin not found error
    pub fn plugin_not_found<S: Into<String>>(domain: S, key: S) -> Self {
        Self::PluginNotFound {
            domain: domain.into(),
            key: key.into(),
        }
    }

    /// Create a plugin operation failed error
    pub fn plugin_failed<S: Into<String>>(key: S, code: i32) -> Self {
        Self::PluginOperationFailed {
            key: key.into(),
            code,
        }
    }

    /// Create a fallback decode error
    pub fn fallback_decode<S: Into<String>>(msg: S) -> Self {
        Self::FallbackDecodeFailed(msg.into())
    }

    /// Create a fallback encode error
    pub fn fallback_encode<S: Into<String>>(msg: S) -> Self {
        Self::FallbackEncodeFailed(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create an unsupported layout error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a buffer size mismatch error
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferSizeMismatch { expected, actual }
    }

    /// True for errors raised because no codec could be found for a key
    pub fn is_plugin_not_found(&self) -> bool {
        matches!(self, Self::PluginNotFound { .. })
    }
}
