//! Wire conversion error types

use thiserror::Error;

use super::render::RenderMode;
use crate::protocol::Role;

/// Result type for wire conversion
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while converting messages to the wire format
#[derive(Debug, Error)]
pub enum WireError {
    /// The renderer could not express a content part
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Serializing the converted payload failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Raised by a renderer for input it cannot express in its output mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{kind} parts are not supported in {role} messages ({mode} mode)")]
    UnsupportedPart {
        role: Role,
        kind: &'static str,
        mode: RenderMode,
    },
}
