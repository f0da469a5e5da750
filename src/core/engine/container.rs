use super::{Engine, EngineError, EngineResult, RegisteredEngine};
use crate::utils::text::{fold_case, join_distinct_sorted};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

/// Outcome of a single isolated engine invocation.
enum EngineOutcome<T> {
    Completed(T),
    Failed,
}

/// A group of engines presented as one logical engine.
///
/// `process` runs the members as a fail-fast chain: every member sees the same
/// source contents, and the first member that fails ends the chain. Results from
/// members that already succeeded are kept. `dependencies` is best-effort and
/// keeps going past failing members.
#[derive(Debug)]
pub struct EngineContainer {
    engines: Vec<RegisteredEngine>,
    name: String,
    category: String,
    minifier: bool,
    internal_flags: Vec<bool>,
}

impl EngineContainer {
    pub fn new(engines: Vec<RegisteredEngine>) -> Self {
        if engines.is_empty() {
            return Self {
                engines,
                name: String::new(),
                category: String::new(),
                minifier: false,
                internal_flags: Vec::new(),
            };
        }

        let name = join_distinct_sorted(engines.iter().map(|e| e.metadata().name.as_str()));
        let category =
            join_distinct_sorted(engines.iter().map(|e| e.metadata().category.as_str()));
        let minifier = engines.iter().any(|e| e.metadata().minifier);

        let mut internal_flags = Vec::with_capacity(2);
        for registered in &engines {
            let internal = registered.metadata().internal;
            if !internal_flags.contains(&internal) {
                internal_flags.push(internal);
            }
        }

        Self {
            engines,
            name,
            category,
            minifier,
            internal_flags,
        }
    }

    /// Distinct member names, sorted and joined by `|`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct member categories, sorted and joined by `|`.
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_minifier(&self) -> bool {
        self.minifier
    }

    /// Distinct `internal` values seen among the members.
    pub fn internal_flags(&self) -> &[bool] {
        &self.internal_flags
    }

    pub fn engines(&self) -> &[RegisteredEngine] {
        &self.engines
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn has_internal_engine(&self) -> bool {
        match self.internal_flags.as_slice() {
            [] => false,
            [only] => *only,
            _ => true,
        }
    }

    pub fn has_external_engine(&self) -> bool {
        match self.internal_flags.as_slice() {
            [] => false,
            [only] => !*only,
            _ => true,
        }
    }

    /// Collect dependencies from every member, skipping members that fail.
    ///
    /// Null entries are dropped and duplicates are removed ignoring case; the
    /// first spelling seen wins and first-seen order is kept.
    pub fn dependencies(&self, contents: &str, filename: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dependencies = Vec::new();

        for registered in &self.engines {
            let outcome = run_isolated(registered, filename, |engine| {
                engine.dependencies(contents, filename)
            });
            let EngineOutcome::Completed(found) = outcome else {
                continue;
            };
            for dependency in found.into_iter().flatten() {
                if seen.insert(fold_case(&dependency)) {
                    dependencies.push(dependency);
                }
            }
        }

        dependencies
    }

    /// Run the members in registration order, stopping at the first failure.
    pub fn process(&self, contents: &str, filename: &str) -> Vec<EngineResult> {
        let mut results = Vec::new();

        for (index, registered) in self.engines.iter().enumerate() {
            match run_isolated(registered, filename, |engine| engine.process(contents, filename)) {
                EngineOutcome::Completed(mut produced) => results.append(&mut produced),
                EngineOutcome::Failed => {
                    tracing::warn!(
                        container = %self.name,
                        engine = %registered.metadata().name,
                        filename,
                        skipped = self.engines.len() - index - 1,
                        "engine failed, halting the remaining chain"
                    );
                    break;
                }
            }
        }

        results
    }
}

impl Engine for EngineContainer {
    fn dependencies(
        &self,
        contents: &str,
        filename: &str,
    ) -> Result<Vec<Option<String>>, EngineError> {
        Ok(EngineContainer::dependencies(self, contents, filename)
            .into_iter()
            .map(Some)
            .collect())
    }

    fn process(&self, contents: &str, filename: &str) -> Result<Vec<EngineResult>, EngineError> {
        Ok(EngineContainer::process(self, contents, filename))
    }
}

fn run_isolated<T, F>(registered: &RegisteredEngine, filename: &str, action: F) -> EngineOutcome<T>
where
    F: FnOnce(&dyn Engine) -> Result<T, EngineError>,
{
    let engine = registered.engine();
    let name = registered.metadata().name.as_str();

    match panic::catch_unwind(AssertUnwindSafe(|| action(engine))) {
        Ok(Ok(value)) => EngineOutcome::Completed(value),
        Ok(Err(EngineError::Diagnostic(diagnostic))) => {
            tracing::debug!(engine = name, filename, %diagnostic, "engine reported a failure");
            EngineOutcome::Failed
        }
        Ok(Err(EngineError::Failed(error))) => {
            tracing::debug!(engine = name, filename, error = %error, "engine failed");
            EngineOutcome::Failed
        }
        Err(_) => {
            tracing::debug!(engine = name, filename, "engine panicked");
            EngineOutcome::Failed
        }
    }
}
