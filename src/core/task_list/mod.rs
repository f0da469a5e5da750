use crate::core::engine::{Diagnostic, DiagnosticCategory, EngineResult};
use crate::utils::text::same_document;
use serde::Serialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Receives diagnostics produced by engines.
pub trait DiagnosticSink: Send + Sync {
    fn add(&self, diagnostic: &Diagnostic);
    /// Remove every entry recorded for the given file.
    fn remove_file(&self, filename: &str);
    /// Remove every entry recorded under the given owning group.
    fn remove_group(&self, group: &str);
    fn remove_all(&self);
    fn has_error(&self, filename: &str) -> bool;
}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub category: DiagnosticCategory,
    pub document: String,
    pub line: u32,
    pub column: u32,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl Task {
    fn from_diagnostic(diagnostic: &Diagnostic, group: Option<&str>) -> Self {
        let text = match diagnostic.line.as_deref() {
            Some(line) if !line.is_empty() => format!("{}\n{}", diagnostic.message, line),
            _ => diagnostic.message.clone(),
        };
        Self {
            category: diagnostic.category,
            document: diagnostic.filename.clone(),
            line: diagnostic.line_number.unwrap_or(0),
            column: diagnostic.position.unwrap_or(0),
            text,
            group: group.map(str::to_string),
        }
    }
}

/// In-memory task list keyed by document and optional owning group.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: RwLock<Vec<Task>>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic owned by `group` (a project or similar grouping).
    pub fn add_grouped(&self, group: &str, diagnostic: &Diagnostic) {
        self.insert(diagnostic, Some(group));
    }

    /// Record every diagnostic carried by the results.
    pub fn publish(&self, results: &[EngineResult]) {
        for diagnostic in results.iter().flat_map(|result| result.exceptions.iter()) {
            self.add(diagnostic);
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn count(&self, category: DiagnosticCategory) -> usize {
        self.read()
            .iter()
            .filter(|task| task.category == category)
            .count()
    }

    fn insert(&self, diagnostic: &Diagnostic, group: Option<&str>) {
        if diagnostic.message.is_empty() || diagnostic.filename.is_empty() {
            tracing::trace!("ignoring diagnostic without message or filename");
            return;
        }
        self.write().push(Task::from_diagnostic(diagnostic, group));
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Task>> {
        self.tasks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Task>> {
        self.tasks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for TaskList {
    fn add(&self, diagnostic: &Diagnostic) {
        self.insert(diagnostic, None);
    }

    fn remove_file(&self, filename: &str) {
        self.write()
            .retain(|task| !same_document(&task.document, filename));
    }

    fn remove_group(&self, group: &str) {
        self.write()
            .retain(|task| task.group.as_deref() != Some(group));
    }

    fn remove_all(&self) {
        self.write().clear();
    }

    fn has_error(&self, filename: &str) -> bool {
        self.read()
            .iter()
            .any(|task| same_document(&task.document, filename))
    }
}
