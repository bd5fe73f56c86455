//! Tool configuration, fixed at construction.

use std::path::PathBuf;
use std::time::Duration;

use deskpilot_config::{
    Config, DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_HEIGHT, DEFAULT_SCREENSHOT_DELAY_SECS,
    DEFAULT_WIDTH,
};
use deskpilot_protocols::error::ExtensionError;

use crate::backend::BackendKind;

/// Display geometry and execution settings for one [`ComputerTool`](crate::ComputerTool).
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Exported to child processes as `DISPLAY=:<n>`.
    pub display_number: Option<u32>,
    pub scaling_enabled: bool,
    pub screenshot_delay_secs: f64,
    pub command_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub backend: BackendKind,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl DisplayConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            display_number: None,
            scaling_enabled: true,
            screenshot_delay_secs: DEFAULT_SCREENSHOT_DELAY_SECS,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            output_dir: default_output_dir(),
            backend: BackendKind::default(),
        }
    }

    pub fn with_display_number(mut self, display_number: u32) -> Self {
        self.display_number = Some(display_number);
        self
    }

    pub fn with_scaling(mut self, enabled: bool) -> Self {
        self.scaling_enabled = enabled;
        self
    }

    pub fn with_screenshot_delay(mut self, secs: f64) -> Self {
        self.screenshot_delay_secs = secs;
        self
    }

    pub fn with_command_timeout(mut self, secs: u64) -> Self {
        self.command_timeout_secs = secs;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Settle time between an input action and its screenshot.
    pub fn screenshot_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.screenshot_delay_secs).unwrap_or_default()
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Reject values the tool cannot run with. The same rules are reported
    /// for the config file by `deskpilot_config::ConfigValidator`; this check
    /// also covers configs assembled through the builders.
    pub fn validate(&self) -> Result<(), ExtensionError> {
        if self.width == 0 || self.height == 0 {
            return Err(ExtensionError::InvalidConfig(format!(
                "display size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.screenshot_delay_secs.is_finite() || self.screenshot_delay_secs < 0.0 {
            return Err(ExtensionError::InvalidConfig(format!(
                "screenshot delay must be a non-negative number of seconds, got {}",
                self.screenshot_delay_secs
            )));
        }
        if self.command_timeout_secs == 0 {
            return Err(ExtensionError::InvalidConfig(
                "command timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    /// Build from the extension's JSON config, laid out like the TOML file:
    /// `{"display": {..}, "screenshot": {..}, "execution": {..}}`.
    ///
    /// Missing sections and fields take the defaults of [`deskpilot_config::Config`].
    pub fn from_extension_config(value: &serde_json::Value) -> Result<Self, ExtensionError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let file: Config = serde_json::from_value(value.clone())
            .map_err(|e| ExtensionError::InvalidConfig(e.to_string()))?;

        let mut config = Self::new(file.display.width, file.display.height)
            .with_scaling(file.display.scaling_enabled)
            .with_screenshot_delay(file.screenshot.delay_secs)
            .with_command_timeout(file.execution.command_timeout_secs);
        config.display_number = file.display.display_number;
        if let Some(dir) = file.screenshot.output_dir {
            config.output_dir = dir;
        }
        if let Some(backend) = file.execution.backend {
            config.backend = backend.parse().map_err(ExtensionError::InvalidConfig)?;
        }
        Ok(config)
    }
}

fn default_output_dir() -> PathBuf {
    std::env::temp_dir().join("outputs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (1400, 780));
        assert!(config.scaling_enabled);
        assert_eq!(config.display_number, None);
        assert_eq!(config.screenshot_delay(), Duration::from_secs(2));
        assert_eq!(config.command_timeout(), Duration::from_secs(30));
        assert!(config.output_dir.ends_with("outputs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_follow_config_file_schema() {
        let file = Config::default();
        let config = DisplayConfig::default();
        assert_eq!((config.width, config.height), (file.display.width, file.display.height));
        assert_eq!(config.scaling_enabled, file.display.scaling_enabled);
        assert_eq!(config.screenshot_delay_secs, file.screenshot.delay_secs);
        assert_eq!(config.command_timeout_secs, file.execution.command_timeout_secs);
    }

    #[test]
    fn test_from_null_config() {
        let config = DisplayConfig::from_extension_config(&serde_json::Value::Null).unwrap();
        assert_eq!(config, DisplayConfig::default());
    }

    #[test]
    fn test_from_extension_config() {
        let value = json!({
            "display": { "width": 1920, "height": 1080, "display_number": 1 },
            "screenshot": { "delay_secs": 0.5, "output_dir": "/var/tmp/shots" },
            "execution": { "command_timeout_secs": 10, "backend": "xdotool" },
            "logging": { "level": "debug" }
        });
        let config = DisplayConfig::from_extension_config(&value).unwrap();
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.display_number, Some(1));
        assert!(config.scaling_enabled);
        assert_eq!(config.screenshot_delay(), Duration::from_millis(500));
        assert_eq!(config.output_dir, PathBuf::from("/var/tmp/shots"));
        assert_eq!(config.command_timeout_secs, 10);
        assert_eq!(config.backend, BackendKind::Xdotool);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let value = json!({ "display": { "scaling_enabled": false } });
        let config = DisplayConfig::from_extension_config(&value).unwrap();
        assert!(!config.scaling_enabled);
        assert_eq!((config.width, config.height), (1400, 780));
        assert_eq!(config.command_timeout_secs, 30);
    }

    #[test]
    fn test_unknown_backend_is_invalid() {
        let value = json!({ "execution": { "backend": "ydotool" } });
        let err = DisplayConfig::from_extension_config(&value).unwrap_err();
        assert!(matches!(err, ExtensionError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DisplayConfig::new(0, 780).validate().is_err());
        assert!(DisplayConfig::new(1400, 0).validate().is_err());
        assert!(DisplayConfig::default().with_screenshot_delay(-1.0).validate().is_err());
        assert!(DisplayConfig::default().with_screenshot_delay(f64::NAN).validate().is_err());
        assert!(DisplayConfig::default().with_command_timeout(0).validate().is_err());
    }

    #[test]
    fn test_negative_delay_never_panics() {
        let config = DisplayConfig::default().with_screenshot_delay(-3.0);
        assert_eq!(config.screenshot_delay(), Duration::ZERO);
    }
}
