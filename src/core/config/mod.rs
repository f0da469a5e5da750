use crate::core::script::DEFAULT_MAX_OPERATIONS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main Chirpy configuration loaded from chirpy.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChirpyConfig {
    /// Category to extension overrides, merged over the built-in table
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,

    /// Engine selection
    #[serde(default)]
    pub engines: EnginesConfig,

    /// Script runtime limits
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Engine selection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnginesConfig {
    /// Engine names excluded from the registry (case-insensitive)
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Script runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Maximum number of operations a single script run may perform
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,
}

fn default_max_operations() -> u64 {
    DEFAULT_MAX_OPERATIONS
}

impl Default for ScriptConfig {
    fn default() -> Self {
        ScriptConfig {
            max_operations: default_max_operations(),
        }
    }
}

pub mod extensions;
pub mod loader;
pub mod validation;

pub use extensions::ConfiguredExtensions;
pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
