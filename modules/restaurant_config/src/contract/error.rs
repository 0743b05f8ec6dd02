//! Contract error types for restaurant config
//!
//! These errors are transport-agnostic and returned to in-process consumers.

/// Coarse classification of an [`AssetError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any remote call
    Validation,
    /// The remote store failed or refused the request
    Remote,
}

/// Asset upload/removal errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// No file (or an empty one) was provided
    MissingFile,
    /// Declared MIME type is not an accepted image type
    UnsupportedMediaType {
        /// Declared content type
        content_type: String,
    },
    /// Payload exceeds the upload size limit
    FileTooLarge {
        /// Payload size in bytes
        size: u64,
        /// Maximum accepted size in bytes
        max: u64,
    },
    /// Remote store failure
    Remote {
        /// Operation that failed (upload, remove)
        operation: &'static str,
        /// Error details
        message: String,
    },
}

impl AssetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile | Self::UnsupportedMediaType { .. } | Self::FileTooLarge { .. } => {
                ErrorKind::Validation
            }
            Self::Remote { .. } => ErrorKind::Remote,
        }
    }

    pub(crate) fn remote(operation: &'static str, error: &anyhow::Error) -> Self {
        Self::Remote {
            operation,
            message: format!("{:#}", error),
        }
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile => write!(f, "No file provided"),
            Self::UnsupportedMediaType { content_type } => {
                write!(
                    f,
                    "Unsupported file type '{}': only JPEG, PNG, WEBP and GIF images are allowed",
                    content_type
                )
            }
            Self::FileTooLarge { size, max } => {
                write!(f, "File is too large: {} bytes (maximum {} bytes)", size, max)
            }
            Self::Remote { operation, message } => {
                write!(f, "Remote {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for AssetError {}
