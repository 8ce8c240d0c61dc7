//! Error types for expandable input operations.

use thiserror::Error;

use crate::platform::PlatformError;

/// Errors surfaced to callers of the programmatic API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExpandableError {
    /// An operation name that does not exist.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The element is not a contenteditable element.
    #[error("element is not contenteditable")]
    NotEditable,

    /// A DOM call failed.
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Configuration rejected by validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
