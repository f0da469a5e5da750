#![allow(clippy::result_large_err)]

use super::ChirpyConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &ChirpyConfig) -> Result<(), AppError> {
        for (category, extension) in &config.extensions {
            if category.trim().is_empty() {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    "extensions: category names cannot be empty",
                ));
            }
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(AppError::new(
                    ErrorCategory::ValidationError,
                    format!(
                        "extensions.{}: extension must start with '.' and name a suffix, got '{}'",
                        category, extension
                    ),
                ));
            }
        }

        if config.script.max_operations == 0 {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "script.max_operations must be greater than 0",
            ));
        }

        Ok(())
    }
}
