//! Environment variable interpolation for configuration

use regex::Regex;
use std::env;
use std::sync::LazyLock;

use super::error::ConfigError;

/// Matches a `${VAR}` reference; group 1 is the variable name
pub(super) static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
});

/// Replace `${VAR}` references with their environment values
///
/// Fails on the first variable that is not set. Runs a single pass:
/// substituted values are not interpolated again.
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();

    for cap in PLACEHOLDER_PATTERN.captures_iter(content) {
        let var_name = &cap[1];
        let value = env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound {
            var: var_name.to_string(),
        })?;
        result = result.replace(&cap[0], &value);
    }

    Ok(result)
}
