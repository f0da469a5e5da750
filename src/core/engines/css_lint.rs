use crate::core::engine::{Engine, EngineError, EngineResult};
use crate::core::script::ScriptRunner;
use serde_json::{Map, Value};
use std::sync::Arc;

const LINT_SCRIPT: &str = r#"
let css = external.css;
let line_no = 0;

for line in css.split("\n") {
    line_no += 1;

    if line.contains("{}") || line.contains("{ }") {
        log_warning("Rule is empty: " + line, line_no, line.index_of("{") + 1);
    }

    let important = line.index_of("!important");
    if important >= 0 {
        log_warning("Use of !important: " + line, line_no, important + 1);
    }

    for unit in ["px", "em", "rem", "%"] {
        for prefix in [" 0", ":0"] {
            let at = line.index_of(prefix + unit);
            if at >= 0 {
                log_warning("Values of 0 shouldn't have units specified: " + line, line_no, at + 2);
            }
        }
    }
}
"#;

/// Lints stylesheets with a script run through the injected [`ScriptRunner`].
pub struct CssLintEngine {
    runner: Arc<dyn ScriptRunner>,
}

impl CssLintEngine {
    pub fn new(runner: Arc<dyn ScriptRunner>) -> Self {
        Self { runner }
    }
}

impl Engine for CssLintEngine {
    fn process(&self, contents: &str, filename: &str) -> Result<Vec<EngineResult>, EngineError> {
        let mut properties = Map::new();
        properties.insert("css".to_string(), Value::String(contents.to_string()));
        properties.insert("filename".to_string(), Value::String(filename.to_string()));

        let outcome = self.runner.execute(LINT_SCRIPT, &properties)?;

        let mut result = EngineResult::new(filename);
        result.exceptions.extend(outcome.messages);
        Ok(vec![result])
    }
}
