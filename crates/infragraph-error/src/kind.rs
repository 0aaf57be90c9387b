//! Error kinds for infragraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// This enum categorizes errors to help users write clear error handling logic.
/// Users can match on ErrorKind to decide how to handle specific error cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Diagram errors
    // =========================================================================
    /// Graph cannot be serialized to DOT (dangling edge, duplicate id)
    RenderFailed,

    /// Edge references a node id that is not part of the graph
    DanglingEdge,

    /// Layout engine failure or malformed DOT input
    RasterFailed,

    // =========================================================================
    // Codegen errors
    // =========================================================================
    /// Specification document cannot be parsed or fails validation
    SpecInvalid,

    /// Type manifest is missing entries or cannot be read
    ManifestInvalid,

    /// Source emission failed downstream of a valid specification
    GenerationFailed,

    // =========================================================================
    // External tool errors
    // =========================================================================
    /// External command could not be spawned or exited non-zero
    CommandFailed,

    /// External tool did not finish within the caller's deadline
    Timeout,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,

    // =========================================================================
    // Resource errors
    // =========================================================================
    /// Resource exhausted
    ResourceExhausted,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::ResourceExhausted | ErrorKind::IoFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::RenderFailed.to_string(), "RenderFailed");
        assert_eq!(ErrorKind::SpecInvalid.to_string(), "SpecInvalid");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::RenderFailed.is_retryable());
        assert!(!ErrorKind::GenerationFailed.is_retryable());
    }
}
