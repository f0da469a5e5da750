use super::{import_regex, import_targets};
use crate::core::engine::{Engine, EngineError, EngineResult};
use crate::core::error::AppError;
use regex::Regex;
use std::path::Path;

/// Reports `@import` dependencies of LESS files. Produces no outputs.
pub struct LessImportsEngine {
    imports: Regex,
}

impl LessImportsEngine {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            imports: import_regex()?,
        })
    }
}

impl Engine for LessImportsEngine {
    fn dependencies(
        &self,
        contents: &str,
        _filename: &str,
    ) -> Result<Vec<Option<String>>, EngineError> {
        // LESS resolves extensionless imports to `.less` files.
        Ok(import_targets(&self.imports, contents)
            .into_iter()
            .map(|target| {
                if Path::new(&target).extension().is_some() {
                    Some(target)
                } else {
                    Some(format!("{}.less", target))
                }
            })
            .collect())
    }

    fn process(&self, _contents: &str, _filename: &str) -> Result<Vec<EngineResult>, EngineError> {
        Ok(Vec::new())
    }
}
