//! Error kinds for rmqgraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Every kind is fatal for the run that produced it.
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
    // Input document errors
    // =========================================================================
    /// The definitions document could not be deserialized
    DeserializationFailed,

    // =========================================================================
    // Model errors
    // =========================================================================
    /// A referenced queue or exchange does not exist
    EntityNotFound,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// The rendering engine failed to produce the artifact
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
