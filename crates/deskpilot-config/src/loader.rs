//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = config.screenshot.output_dir.take() {
            config.screenshot.output_dir =
                Some(PathBuf::from(Self::expand_path(&dir.to_string_lossy())));
        }
        Ok(config)
    }

    /// Apply `WIDTH`, `HEIGHT` and `DISPLAY_NUM` overrides.
    ///
    /// `lookup` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup("WIDTH") {
            config.display.width = parse_number("WIDTH", &width)?;
        }
        if let Some(height) = lookup("HEIGHT") {
            config.display.height = parse_number("HEIGHT", &height)?;
        }
        if let Some(display_num) = lookup("DISPLAY_NUM") {
            config.display.display_number = Some(parse_number("DISPLAY_NUM", &display_num)?);
        }
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/shots`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

fn parse_number(field: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            field: field.to_string(),
            message: e.to_string(),
        })
}
