use super::{EngineContainer, EngineRegistry, RegisteredEngine};
use crate::utils::text::eq_ignore_case;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

const CATEGORY_KEY_PREFIX: &str = "Category::";

/// Maps an engine category to the file extension it handles.
pub trait ExtensionResolver: Send + Sync {
    /// Extension (with leading dot) for the category, or an empty string when unknown.
    fn extension_for_category(&self, category: &str) -> String;
}

/// Lookup surface for callers that only need containers.
pub trait EngineSource: Send + Sync {
    fn engine(&self, category: &str) -> Arc<EngineContainer>;
    fn engine_by_name(&self, name: &str) -> Arc<EngineContainer>;
    fn engine_by_filename(&self, filename: &str) -> Option<Arc<EngineContainer>>;
}

/// Resolves categories, names and filenames to cached engine containers.
///
/// Containers are built lazily, at most once per cache key, and live as long as
/// the resolver. Cache keys are the raw lookup strings: `"less"` and `"Less"`
/// select the same engines but occupy separate entries.
pub struct EngineResolver {
    registry: EngineRegistry,
    extension_resolver: Arc<dyn ExtensionResolver>,
    cache: DashMap<String, Arc<EngineContainer>>,
    extensions: OnceLock<HashMap<String, String>>,
}

impl EngineResolver {
    pub fn new(registry: EngineRegistry, extension_resolver: Arc<dyn ExtensionResolver>) -> Self {
        Self {
            registry,
            extension_resolver,
            cache: DashMap::new(),
            extensions: OnceLock::new(),
        }
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    /// Container for every engine whose category matches one of the
    /// `|`-separated categories, ignoring case.
    pub fn resolve_by_category(&self, category: &str) -> Arc<EngineContainer> {
        let key = format!("{}{}", CATEGORY_KEY_PREFIX, category);
        self.get_or_build(key, || {
            let categories: Vec<&str> = category.split('|').collect();
            self.select(|registered| {
                categories
                    .iter()
                    .any(|wanted| eq_ignore_case(wanted, &registered.metadata().category))
            })
        })
    }

    /// Container for every engine whose name matches one of the `|`-separated
    /// names, ignoring case.
    pub fn resolve_by_name(&self, name: &str) -> Arc<EngineContainer> {
        self.get_or_build(name.to_string(), || {
            let names: Vec<&str> = name.split('|').collect();
            self.select(|registered| {
                names
                    .iter()
                    .any(|wanted| eq_ignore_case(wanted, &registered.metadata().name))
            })
        })
    }

    /// Container for the engines handling `filename`, or `None` when no engine does.
    ///
    /// Engines whose category contains a `.` are tried first; the remaining
    /// engines are only considered when none of those match.
    pub fn resolve_by_filename(&self, filename: &str) -> Option<Arc<EngineContainer>> {
        let mut matched = self.match_filename(filename, true);
        if matched.is_empty() {
            matched = self.match_filename(filename, false);
        }
        if matched.is_empty() {
            tracing::debug!(filename, "no engine handles file");
            return None;
        }

        let mut names: Vec<&str> = Vec::with_capacity(matched.len());
        for registered in matched {
            let name = registered.metadata().name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Some(self.resolve_by_name(&names.join("|")))
    }

    fn match_filename(&self, filename: &str, dotted: bool) -> Vec<&RegisteredEngine> {
        let extensions = self.extensions();
        self.registry
            .iter()
            .filter(|registered| registered.metadata().category.contains('.') == dotted)
            .filter(|registered| {
                extensions
                    .get(&registered.metadata().category)
                    .is_some_and(|extension| !extension.is_empty() && filename.ends_with(extension.as_str()))
            })
            .collect()
    }

    fn extensions(&self) -> &HashMap<String, String> {
        self.extensions.get_or_init(|| {
            let table: HashMap<String, String> = self
                .registry
                .categories()
                .into_iter()
                .map(|category| {
                    let extension = self.extension_resolver.extension_for_category(category);
                    (category.to_string(), extension)
                })
                .collect();
            tracing::debug!(categories = table.len(), "built extension table");
            table
        })
    }

    fn select<P>(&self, predicate: P) -> EngineContainer
    where
        P: Fn(&RegisteredEngine) -> bool,
    {
        EngineContainer::new(self.registry.iter().filter(|e| predicate(e)).cloned().collect())
    }

    fn get_or_build<F>(&self, key: String, build: F) -> Arc<EngineContainer>
    where
        F: FnOnce() -> EngineContainer,
    {
        if let Some(existing) = self.cache.get(&key) {
            return Arc::clone(existing.value());
        }

        // Built outside the shard lock; a racing caller may build too, the first insert wins.
        let container = Arc::new(build());
        tracing::trace!(key = %key, engines = container.len(), "caching engine container");
        let entry = self.cache.entry(key).or_insert(container);
        Arc::clone(entry.value())
    }
}

impl EngineSource for EngineResolver {
    fn engine(&self, category: &str) -> Arc<EngineContainer> {
        self.resolve_by_category(category)
    }

    fn engine_by_name(&self, name: &str) -> Arc<EngineContainer> {
        self.resolve_by_name(name)
    }

    fn engine_by_filename(&self, filename: &str) -> Option<Arc<EngineContainer>> {
        self.resolve_by_filename(filename)
    }
}
