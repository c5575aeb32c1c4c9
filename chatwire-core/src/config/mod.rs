//! Configuration for wire conversion
//!
//! A small YAML or JSON document selects the render mode. `${VAR}`
//! references are resolved from the environment before parsing.

mod env;
mod error;
mod schema;
mod validator;

pub use error::{ConfigError, ConfigResult, ValidationError, ValidationErrorKind};
pub use schema::{RenderConfig, WireConfig, SUPPORTED_VERSION};
pub use validator::ConfigValidator;

use std::fs;
use std::path::Path;
use tracing::debug;

fn read_interpolated(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    env::interpolate_env_vars(&content)
}

fn finish(path: &Path, config: WireConfig) -> ConfigResult<WireConfig> {
    ConfigValidator::new().validate(&config)?;
    debug!(
        path = %path.display(),
        mode = %config.render.mode,
        "loaded wire config"
    );
    Ok(config)
}

/// Parse a configuration from YAML text, resolving `${VAR}` references
pub fn from_yaml_str(content: &str) -> ConfigResult<WireConfig> {
    let interpolated = env::interpolate_env_vars(content)?;
    let config = parse_yaml("<inline>", &interpolated)?;
    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

fn parse_yaml(path: &str, content: &str) -> ConfigResult<WireConfig> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_string(),
        line: e.location().map(|l| l.line()),
        column: e.location().map(|l| l.column()),
        message: e.to_string(),
    })
}

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<WireConfig> {
    let path = path.as_ref();
    let content = read_interpolated(path)?;
    let config = parse_yaml(&path.to_string_lossy(), &content)?;
    finish(path, config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<WireConfig> {
    let path = path.as_ref();
    let content = read_interpolated(path)?;
    let config: WireConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;
    finish(path, config)
}

/// Load a configuration, choosing the parser by file extension
pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<WireConfig> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => load_from_yaml(path),
        Some("json") => load_from_json(path),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_string_lossy().to_string(),
        }),
    }
}
