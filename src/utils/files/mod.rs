#![allow(clippy::result_large_err)]

use crate::core::engine::EngineResult;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes engine outputs to disk, relative to an optional root directory.
pub struct OutputWriter {
    root_path: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(root_path: Option<PathBuf>) -> Self {
        OutputWriter { root_path }
    }

    /// Resolve where an output with the given filename lands.
    pub fn output_path(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        match &self.root_path {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Persist every result carrying contents, skipping results that would overwrite the source.
    pub fn write_results(
        &self,
        source: &Path,
        results: &[EngineResult],
    ) -> Result<Vec<PathBuf>, AppError> {
        let mut written = Vec::new();
        for result in results {
            let Some(contents) = result.contents.as_deref() else {
                continue;
            };
            let target = self.output_path(&result.filename);
            if target == source {
                tracing::warn!(
                    path = %target.display(),
                    "refusing to overwrite source file with engine output"
                );
                continue;
            }
            self.save_output(&target, contents)?;
            written.push(target);
        }
        Ok(written)
    }

    pub fn save_output(&self, path: &Path, contents: &str) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, contents).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to write output {}: {}", path.display(), e),
            )
        })?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote engine output");

        Ok(())
    }
}
