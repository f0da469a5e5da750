pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod script;
pub mod task_list;
pub mod types;

pub use config::{ChirpyConfig, ConfigLoader, ConfigValidator, ConfiguredExtensions};
pub use engine::{
    Diagnostic, DiagnosticCategory, Engine, EngineContainer, EngineError, EngineMetadata,
    EngineRegistry, EngineResolver, EngineResult, EngineSource, ExtensionResolver,
};
pub use error::AppError;
pub use script::{RhaiScriptRunner, ScriptRunner};
pub use task_list::{DiagnosticSink, Task, TaskList};
pub use types::*;
