//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, KNOWN_BACKENDS};

/// Longest settle delay that does not draw a warning.
const MAX_REASONABLE_DELAY_SECS: f64 = 30.0;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_display(config, &mut result);
        Self::validate_screenshot(config, &mut result);
        Self::validate_execution(config, &mut result);

        Ok(result)
    }

    fn validate_display(config: &Config, result: &mut ValidationResult) {
        if config.display.width == 0 {
            result.add_error(ValidationError::new(
                "display.width",
                "width must be greater than 0",
            ));
        }
        if config.display.height == 0 {
            result.add_error(ValidationError::new(
                "display.height",
                "height must be greater than 0",
            ));
        }
    }

    fn validate_screenshot(config: &Config, result: &mut ValidationResult) {
        let delay = config.screenshot.delay_secs;
        if !delay.is_finite() || delay < 0.0 {
            result.add_error(ValidationError::new(
                "screenshot.delay_secs",
                "delay_secs must be a non-negative number",
            ));
        } else if delay > MAX_REASONABLE_DELAY_SECS {
            result.add_warning(ValidationWarning::new(
                "screenshot.delay_secs",
                format!(
                    "delay_secs is very high (>{}s), every action will block that long",
                    MAX_REASONABLE_DELAY_SECS
                ),
            ));
        }
    }

    fn validate_execution(config: &Config, result: &mut ValidationResult) {
        if config.execution.command_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "execution.command_timeout_secs",
                "command_timeout_secs must be greater than 0",
            ));
        }

        if let Some(ref backend) = config.execution.backend {
            if !KNOWN_BACKENDS.contains(&backend.as_str()) {
                result.add_error(ValidationError::new(
                    "execution.backend",
                    format!(
                        "Unknown backend '{}', valid values: {:?}",
                        backend, KNOWN_BACKENDS
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
