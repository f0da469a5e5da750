#![allow(clippy::result_large_err)]

use super::{ChirpyConfig, ConfigValidator};
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "chirpy.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/chirpy.toml)
    /// Environment variables override config file values
    /// A missing file yields defaults plus env overrides
    pub fn load_from_workspace(workspace_path: &Path) -> Result<ChirpyConfig, AppError> {
        let config_path = workspace_path.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;

        let mut config = config_file.unwrap_or_default();

        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<ChirpyConfig>, AppError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: ChirpyConfig = toml::from_str(&content).map_err(|e| {
            let mut error = AppError::with_source(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}", path.display()),
                Box::new(e),
            );
            error.add_context("path", &path.display().to_string());
            error
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(config: &mut ChirpyConfig) {
        if let Ok(disabled) = env::var("CHIRPY_DISABLED_ENGINES") {
            config.engines.disabled = disabled
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Ok(max_operations) = env::var("CHIRPY_SCRIPT_MAX_OPERATIONS") {
            match max_operations.parse::<u64>() {
                Ok(value) => config.script.max_operations = value,
                Err(_) => tracing::warn!(
                    value = %max_operations,
                    "ignoring invalid CHIRPY_SCRIPT_MAX_OPERATIONS"
                ),
            }
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "CHIRPY_DISABLED_ENGINES - Comma-separated engine names to exclude",
            "CHIRPY_SCRIPT_MAX_OPERATIONS - Override the script operation limit (default: 100000)",
            "CHIRPY_LOG_LEVEL - Override the default tracing level (default: info)",
            "CHIRPY_LOG_DIR - Override the log directory (default: {workspace}/.chirpy/logs)",
            "CHIRPY_QUIET - Set to 1 to silence console logging",
        ]
    }
}
