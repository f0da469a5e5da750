use super::{Engine, EngineMetadata, RegisteredEngine};
use crate::utils::text::eq_ignore_case;
use std::sync::Arc;

/// Builder used to register engines at startup.
pub struct EngineRegistryBuilder {
    engines: Vec<RegisteredEngine>,
}

impl Default for EngineRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineRegistryBuilder {
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Register an engine. Registration order is the chain order.
    pub fn register<T: Engine + 'static>(&mut self, metadata: EngineMetadata, engine: T) -> &mut Self {
        self.register_shared(metadata, Arc::new(engine))
    }

    pub fn register_shared(&mut self, metadata: EngineMetadata, engine: Arc<dyn Engine>) -> &mut Self {
        tracing::trace!(
            name = %metadata.name,
            category = %metadata.category,
            internal = metadata.internal,
            "registering engine"
        );
        self.engines.push(RegisteredEngine::new(metadata, engine));
        self
    }

    /// Drop every engine whose name matches one of `names`, ignoring case.
    pub fn disable<S: AsRef<str>>(&mut self, names: &[S]) -> &mut Self {
        self.engines.retain(|registered| {
            let keep = !names
                .iter()
                .any(|name| eq_ignore_case(name.as_ref(), &registered.metadata().name));
            if !keep {
                tracing::debug!(name = %registered.metadata().name, "engine disabled by configuration");
            }
            keep
        });
        self
    }

    pub fn build(self) -> EngineRegistry {
        EngineRegistry {
            inner: Arc::new(self.engines),
        }
    }
}

/// Immutable, cheaply clonable set of registered engines.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    inner: Arc<Vec<RegisteredEngine>>,
}

impl EngineRegistry {
    pub fn builder() -> EngineRegistryBuilder {
        EngineRegistryBuilder::new()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredEngine> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Distinct categories in registration order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for registered in self.iter() {
            let category = registered.metadata().category.as_str();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}
