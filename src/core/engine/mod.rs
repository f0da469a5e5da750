//! Engines, their metadata, and the machinery that resolves and chains them.
//!
//! An [`Engine`] is a single transformer, linter or minifier. Engines are
//! registered once in an [`EngineRegistry`] together with their
//! [`EngineMetadata`]; the [`EngineResolver`] groups them by category, name or
//! filename into cached [`EngineContainer`]s, which run their members as a
//! fail-fast chain.

mod container;
mod registry;
mod resolver;
mod result;

pub use container::EngineContainer;
pub use registry::{EngineRegistry, EngineRegistryBuilder};
pub use resolver::{EngineResolver, EngineSource, ExtensionResolver};
pub use result::{Diagnostic, DiagnosticCategory, EngineResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Failure raised by an engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Structured failure carrying location and severity.
    #[error("{0}")]
    Diagnostic(Diagnostic),
    /// Anything else.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl From<Diagnostic> for EngineError {
    fn from(diagnostic: Diagnostic) -> Self {
        EngineError::Diagnostic(diagnostic)
    }
}

/// Capability implemented by every transformer, linter and minifier.
///
/// Implementations must be safe to call repeatedly and from several threads.
pub trait Engine: Send + Sync {
    /// Files the given contents depend on (imports, includes). `None` entries are
    /// tolerated and dropped by the container.
    fn dependencies(
        &self,
        _contents: &str,
        _filename: &str,
    ) -> Result<Vec<Option<String>>, EngineError> {
        Ok(Vec::new())
    }

    /// Process the contents, producing zero or more outputs with diagnostics.
    fn process(&self, contents: &str, filename: &str) -> Result<Vec<EngineResult>, EngineError>;
}

/// Registration-time attributes of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    pub name: String,
    pub category: String,
    /// Built-in implementation, as opposed to an optional external one.
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub minifier: bool,
}

impl EngineMetadata {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            internal: false,
            minifier: false,
        }
    }

    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    pub fn with_minifier(mut self, minifier: bool) -> Self {
        self.minifier = minifier;
        self
    }
}

/// An engine paired with the metadata it was registered under.
#[derive(Clone)]
pub struct RegisteredEngine {
    engine: Arc<dyn Engine>,
    metadata: EngineMetadata,
}

impl RegisteredEngine {
    pub fn new(metadata: EngineMetadata, engine: Arc<dyn Engine>) -> Self {
        Self { engine, metadata }
    }

    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

impl fmt::Debug for RegisteredEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredEngine")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
