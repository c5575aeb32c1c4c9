//! Configuration schema structures with serde support

use serde::{Deserialize, Serialize};

use super::error::{ValidationError, ValidationErrorKind};
use crate::protocol::ImageDetail;
use crate::wire::RenderMode;

/// Schema version understood by this crate
pub const SUPPORTED_VERSION: &str = "0.1";

/// Root configuration for wire conversion
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WireConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Renderer selection and settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Output mode
    #[serde(default)]
    pub mode: RenderMode,

    /// Detail applied to image parts that do not set one (openai mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_detail: Option<ImageDetail>,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION.to_string(),
            render: RenderConfig::default(),
        }
    }
}

impl WireConfig {
    /// Built-in structural validation
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version != SUPPORTED_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::UnsupportedVersion {
                    expected: SUPPORTED_VERSION,
                    actual: self.version.clone(),
                },
            ));
        }
        Ok(())
    }
}
