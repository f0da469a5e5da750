use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a diagnostic produced by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Error,
    Warning,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A located message about a source file: lint finding, compile error, notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub filename: String,
    /// Source text of the offending line, when the engine has it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    pub fn new(
        message: impl Into<String>,
        filename: impl Into<String>,
        category: DiagnosticCategory,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            line: None,
            line_number: None,
            position: None,
            category,
        }
    }

    pub fn located(
        message: impl Into<String>,
        filename: impl Into<String>,
        line_number: u32,
        position: u32,
        line: Option<String>,
        category: DiagnosticCategory,
    ) -> Self {
        Self {
            message: message.into(),
            filename: filename.into(),
            line,
            line_number: Some(line_number),
            position: Some(position),
            category,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filename)?;
        if let Some(line_number) = self.line_number {
            write!(f, ":{}", line_number)?;
            if let Some(position) = self.position {
                write!(f, ":{}", position)?;
            }
        }
        write!(f, ": {}: {}", self.category, self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Output of a single engine processing step.
///
/// An engine that only reports diagnostics leaves `contents` empty; a compiler or
/// minifier sets `extension`, `filename` and `contents` for the file it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(default)]
    pub exceptions: Vec<Diagnostic>,
}

impl EngineResult {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn with_output(
        extension: impl Into<String>,
        filename: impl Into<String>,
        contents: impl Into<String>,
    ) -> Self {
        Self {
            extension: Some(extension.into()),
            filename: filename.into(),
            contents: Some(contents.into()),
            exceptions: Vec::new(),
        }
    }

    pub fn add_exception(&mut self, diagnostic: Diagnostic) {
        self.exceptions.push(diagnostic);
    }

    pub fn add_message(
        &mut self,
        message: impl Into<String>,
        filename: impl Into<String>,
        category: DiagnosticCategory,
    ) {
        self.add_exception(Diagnostic::new(message, filename, category));
    }

    pub fn add_located_exception(
        &mut self,
        message: impl Into<String>,
        filename: impl Into<String>,
        line_number: u32,
        position: u32,
        line: Option<String>,
        category: DiagnosticCategory,
    ) {
        self.add_exception(Diagnostic::located(
            message,
            filename,
            line_number,
            position,
            line,
            category,
        ));
    }

    pub fn has_errors(&self) -> bool {
        self.exceptions.iter().any(Diagnostic::is_error)
    }
}
