#![allow(clippy::result_large_err)]

//! Built-in engines registered by the CLI.

pub mod css_lint;
pub mod css_minify;
pub mod less_imports;

use crate::core::engine::{EngineMetadata, EngineRegistryBuilder};
use crate::core::error::AppError;
use crate::core::script::{RhaiScriptRunner, ScriptRunner};
use regex::Regex;
use std::sync::Arc;

pub const CSS_LINT: &str = "CSS Lint";
pub const CSS_MINIFY: &str = "CSS Minify";
pub const LESS_IMPORTS: &str = "LESS Imports";

/// Matches `@import "x";`, `@import 'x';` and `@import url(x);`.
const IMPORT_PATTERN: &str = r#"@import\s+(?:url\(\s*)?["']?([^"'()\s;]+)["']?\s*\)?"#;

#[derive(Default)]
pub struct BuiltinEngineDeps {
    /// Script runtime for script-backed engines. Defaults to [`RhaiScriptRunner`] when None.
    pub script_runner: Option<Arc<dyn ScriptRunner>>,
}

/// Register built-in engines into the supplied builder.
pub fn register_builtins(builder: &mut EngineRegistryBuilder) -> Result<(), AppError> {
    register_builtins_with_deps(builder, BuiltinEngineDeps::default())
}

pub fn register_builtins_with_deps(
    builder: &mut EngineRegistryBuilder,
    deps: BuiltinEngineDeps,
) -> Result<(), AppError> {
    let script_runner = deps
        .script_runner
        .unwrap_or_else(|| Arc::new(RhaiScriptRunner::default()));

    builder
        .register(
            EngineMetadata::new(CSS_LINT, "css").with_internal(true),
            css_lint::CssLintEngine::new(script_runner),
        )
        .register(
            EngineMetadata::new(CSS_MINIFY, "css")
                .with_internal(true)
                .with_minifier(true),
            css_minify::CssMinifyEngine::new()?,
        )
        .register(
            EngineMetadata::new(LESS_IMPORTS, "less").with_internal(true),
            less_imports::LessImportsEngine::new()?,
        );
    Ok(())
}

fn import_regex() -> Result<Regex, AppError> {
    Ok(Regex::new(IMPORT_PATTERN)?)
}

/// Targets of every `@import` in the contents, in source order.
fn import_targets(pattern: &Regex, contents: &str) -> Vec<String> {
    pattern
        .captures_iter(contents)
        .filter_map(|captures| captures.get(1))
        .map(|target| target.as_str().to_string())
        .collect()
}
