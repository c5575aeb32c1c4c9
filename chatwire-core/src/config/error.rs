//! Errors raised while loading and checking a wire configuration

use thiserror::Error;

use crate::protocol::ImageDetail;
use crate::wire::RenderMode;

/// Errors raised while loading a wire configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config from '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("Unsupported config file extension: '{path}'")]
    UnsupportedFormat { path: String },
}

/// A loaded config value that the converter cannot use
#[derive(Debug, Error)]
#[error("invalid value at '{field_path}': {kind}")]
pub struct ValidationError {
    /// Dotted path of the rejected field (e.g. "render.image_detail")
    pub field_path: String,
    pub kind: ValidationErrorKind,
}

/// Why a config value was rejected
#[derive(Debug, Error)]
pub enum ValidationErrorKind {
    #[error("version '{actual}' is not supported (expected {expected})")]
    UnsupportedVersion {
        expected: &'static str,
        actual: String,
    },

    /// An environment value itself contained `${...}`; interpolation runs once
    #[error("placeholder '{placeholder}' is still present after interpolation")]
    UnresolvedPlaceholder { placeholder: String },

    #[error("image_detail '{detail:?}' has no effect in {mode} mode")]
    ImageDetailIgnored {
        mode: RenderMode,
        detail: ImageDetail,
    },
}

impl ValidationError {
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
        }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
