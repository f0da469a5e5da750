//! Script runtime used by engines that express their transformation as a script.
//!
//! Scripts see the caller's properties as a read-only `external` map and report
//! findings through `log_message`, `log_warning` and `log_error`. Every logged
//! message is attributed to the `filename` property.

use crate::core::engine::{Diagnostic, DiagnosticCategory, EngineError};
use rhai::packages::{Package, StandardPackage};
use rhai::{Array, Dynamic, Engine, ImmutableString, Map, Scope, INT};
use serde_json::{Map as JsonMap, Value};
use std::sync::{Arc, Mutex, PoisonError};

pub const DEFAULT_MAX_OPERATIONS: u64 = 100_000;

/// What a script run produced.
#[derive(Debug, Clone, Default)]
pub struct ScriptOutcome {
    pub messages: Vec<Diagnostic>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script compile error: {0}")]
    Compile(String),
    #[error("script execution error: {0}")]
    Execution(String),
}

impl From<ScriptError> for EngineError {
    fn from(error: ScriptError) -> Self {
        EngineError::Failed(anyhow::Error::new(error))
    }
}

/// Runs transformation scripts on behalf of engines.
pub trait ScriptRunner: Send + Sync {
    fn execute(
        &self,
        script: &str,
        properties: &JsonMap<String, Value>,
    ) -> Result<ScriptOutcome, ScriptError>;
}

/// Script runner backed by a locked-down Rhai engine.
#[derive(Debug, Clone)]
pub struct RhaiScriptRunner {
    max_operations: u64,
}

impl Default for RhaiScriptRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OPERATIONS)
    }
}

impl RhaiScriptRunner {
    pub fn new(max_operations: u64) -> Self {
        Self { max_operations }
    }

    fn build_engine(&self, filename: &str, sink: &Arc<Mutex<Vec<Diagnostic>>>) -> Engine {
        let mut engine = Engine::new_raw();
        engine.register_global_module(StandardPackage::new().as_shared_module());
        engine.set_max_operations(self.max_operations);
        engine.set_max_call_levels(64);
        engine.set_max_expr_depths(64, 64);
        engine.on_print(|_| {});
        engine.on_debug(|_, _, _| {});

        for (function, category) in [
            ("log_message", DiagnosticCategory::Message),
            ("log_warning", DiagnosticCategory::Warning),
            ("log_error", DiagnosticCategory::Error),
        ] {
            let located_sink = Arc::clone(sink);
            let located_file = filename.to_string();
            engine.register_fn(
                function,
                move |text: ImmutableString, line: INT, column: INT| {
                    let diagnostic = Diagnostic {
                        message: text.to_string(),
                        filename: located_file.clone(),
                        line: None,
                        line_number: to_location(line),
                        position: to_location(column),
                        category,
                    };
                    push(&located_sink, diagnostic);
                },
            );

            let bare_sink = Arc::clone(sink);
            let bare_file = filename.to_string();
            engine.register_fn(function, move |text: ImmutableString| {
                push(
                    &bare_sink,
                    Diagnostic::new(text.to_string(), bare_file.clone(), category),
                );
            });
        }

        engine
    }
}

impl ScriptRunner for RhaiScriptRunner {
    fn execute(
        &self,
        script: &str,
        properties: &JsonMap<String, Value>,
    ) -> Result<ScriptOutcome, ScriptError> {
        let filename = properties
            .get("filename")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let sink = Arc::new(Mutex::new(Vec::new()));
        let engine = self.build_engine(filename, &sink);

        let ast = engine
            .compile(script)
            .map_err(|err| ScriptError::Compile(err.to_string()))?;

        let mut scope = Scope::new();
        scope.push_constant_dynamic("external", to_dynamic(&Value::Object(properties.clone())));

        engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|err| ScriptError::Execution(err.to_string()))?;

        drop(engine);
        let messages = std::mem::take(&mut *sink.lock().unwrap_or_else(PoisonError::into_inner));
        tracing::trace!(filename, messages = messages.len(), "script finished");

        Ok(ScriptOutcome { messages })
    }
}

fn push(sink: &Mutex<Vec<Diagnostic>>, diagnostic: Diagnostic) {
    sink.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(diagnostic);
}

fn to_location(value: INT) -> Option<u32> {
    u32::try_from(value).ok().filter(|location| *location > 0)
}

fn to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Dynamic::from(i)
            } else if let Some(f) = n.as_f64() {
                Dynamic::from(f)
            } else {
                Dynamic::from(0_i64)
            }
        }
        Value::String(s) => Dynamic::from(s.clone()),
        Value::Array(items) => {
            let arr: Array = items.iter().map(to_dynamic).collect();
            Dynamic::from_array(arr)
        }
        Value::Object(map) => {
            let mut rhai_map = Map::new();
            for (key, value) in map {
                rhai_map.insert(key.into(), to_dynamic(value));
            }
            Dynamic::from_map(rhai_map)
        }
    }
}
