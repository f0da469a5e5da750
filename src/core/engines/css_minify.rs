use super::{import_regex, import_targets};
use crate::core::engine::{Engine, EngineError, EngineResult};
use crate::core::error::AppError;
use regex::Regex;

const MINIFIED_EXTENSION: &str = ".min.css";

/// Strips comments and redundant whitespace from stylesheets.
pub struct CssMinifyEngine {
    comments: Regex,
    whitespace: Regex,
    punctuation: Regex,
    colon_space: Regex,
    declaration_colon: Regex,
    imports: Regex,
}

impl CssMinifyEngine {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            comments: Regex::new(r"(?s)/\*.*?\*/")?,
            whitespace: Regex::new(r"\s+")?,
            punctuation: Regex::new(r"\s*([{};,>])\s*")?,
            colon_space: Regex::new(r":\s+")?,
            // Only a declaration (`prop : value;`) may lose the space before its colon;
            // in a selector that space is a descendant combinator.
            declaration_colon: Regex::new(r"\s+:([^{};]*[;}])")?,
            imports: import_regex()?,
        })
    }

    pub fn minify(&self, contents: &str) -> String {
        let without_comments = self.comments.replace_all(contents, "");
        let collapsed = self.whitespace.replace_all(&without_comments, " ");
        let tight = self.punctuation.replace_all(&collapsed, "$1");
        let tight = self.colon_space.replace_all(&tight, ":");
        let tight = self.declaration_colon.replace_all(&tight, ":${1}");
        tight.replace(";}", "}").trim().to_string()
    }
}

/// `site.css` becomes `site.min.css`; other names get the suffix appended.
fn minified_filename(filename: &str) -> String {
    match filename.strip_suffix(".css") {
        Some(stem) => format!("{}{}", stem, MINIFIED_EXTENSION),
        None => format!("{}{}", filename, MINIFIED_EXTENSION),
    }
}

impl Engine for CssMinifyEngine {
    fn dependencies(
        &self,
        contents: &str,
        _filename: &str,
    ) -> Result<Vec<Option<String>>, EngineError> {
        Ok(import_targets(&self.imports, contents)
            .into_iter()
            .map(Some)
            .collect())
    }

    fn process(&self, contents: &str, filename: &str) -> Result<Vec<EngineResult>, EngineError> {
        if filename.ends_with(MINIFIED_EXTENSION) {
            tracing::debug!(filename, "skipping already minified stylesheet");
            return Ok(Vec::new());
        }
        Ok(vec![EngineResult::with_output(
            MINIFIED_EXTENSION,
            minified_filename(filename),
            self.minify(contents),
        )])
    }
}
