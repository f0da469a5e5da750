use super::ChirpyConfig;
use crate::core::engine::ExtensionResolver;
use std::collections::BTreeMap;

const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("coffee", ".coffee"),
    ("css", ".css"),
    ("js", ".js"),
    ("less", ".less"),
    ("sass", ".sass"),
    ("scss", ".scss"),
    ("ts", ".ts"),
];

/// Extension lookup backed by the built-in table plus configured overrides.
#[derive(Debug, Clone)]
pub struct ConfiguredExtensions {
    table: BTreeMap<String, String>,
}

impl Default for ConfiguredExtensions {
    fn default() -> Self {
        Self::from_config(&ChirpyConfig::default())
    }
}

impl ConfiguredExtensions {
    pub fn from_config(config: &ChirpyConfig) -> Self {
        let mut table: BTreeMap<String, String> = DEFAULT_EXTENSIONS
            .iter()
            .map(|(category, extension)| (category.to_string(), extension.to_string()))
            .collect();
        for (category, extension) in &config.extensions {
            table.insert(category.to_lowercase(), extension.clone());
        }
        Self { table }
    }

    pub fn table(&self) -> &BTreeMap<String, String> {
        &self.table
    }
}

impl ExtensionResolver for ConfiguredExtensions {
    fn extension_for_category(&self, category: &str) -> String {
        if let Some(extension) = self.table.get(&category.to_lowercase()) {
            return extension.clone();
        }
        // A dotted category doubles as a literal extension.
        if category.contains('.') {
            return category.to_string();
        }
        String::new()
    }
}
