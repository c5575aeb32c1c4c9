//! Configuration validation utilities

use super::env::PLACEHOLDER_PATTERN;
use super::error::{ValidationError, ValidationErrorKind};
use super::schema::WireConfig;
use crate::wire::RenderMode;

/// Checks a parsed configuration beyond what serde enforces
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a configuration with extended rules
    ///
    /// Leftover placeholders are reported before the version check so an
    /// unresolved `version: ${...}` names the real cause.
    pub fn validate(&self, config: &WireConfig) -> Result<(), ValidationError> {
        self.validate_no_placeholders(config)?;
        config.validate()?;
        self.validate_render_settings(config)?;

        Ok(())
    }

    /// Interpolation is a single pass, so a variable whose value contains
    /// `${...}` leaves that text in the parsed config.
    fn validate_no_placeholders(&self, config: &WireConfig) -> Result<(), ValidationError> {
        if let Some(found) = PLACEHOLDER_PATTERN.find(&config.version) {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::UnresolvedPlaceholder {
                    placeholder: found.as_str().to_string(),
                },
            ));
        }
        Ok(())
    }

    /// Image detail only has an effect in openai mode
    fn validate_render_settings(&self, config: &WireConfig) -> Result<(), ValidationError> {
        match (config.render.mode, config.render.image_detail) {
            (RenderMode::Passthrough, Some(detail)) => Err(ValidationError::new(
                "render.image_detail",
                ValidationErrorKind::ImageDetailIgnored {
                    mode: RenderMode::Passthrough,
                    detail,
                },
            )),
            _ => Ok(()),
        }
    }
}
