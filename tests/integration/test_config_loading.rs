use chirpy::core::config::ConfigLoader;
use chirpy::core::engines::{register_builtins, CSS_MINIFY};
use chirpy::core::{ConfiguredExtensions, EngineRegistry, EngineResolver, ErrorCategory};
use serial_test::serial;
use std::env;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn clear_chirpy_env() {
    for v in &["CHIRPY_DISABLED_ENGINES", "CHIRPY_SCRIPT_MAX_OPERATIONS"] {
        env::remove_var(v);
    }
}

fn resolver_for(workspace: &std::path::Path) -> EngineResolver {
    let config = ConfigLoader::load_from_workspace(workspace).unwrap();
    let mut builder = EngineRegistry::builder();
    register_builtins(&mut builder).unwrap();
    builder.disable(&config.engines.disabled);
    EngineResolver::new(
        builder.build(),
        Arc::new(ConfiguredExtensions::from_config(&config)),
    )
}

/// Configured extensions and disabled engines shape filename resolution
#[test]
#[serial]
fn test_config_drives_resolution() {
    clear_chirpy_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("chirpy.toml"),
        r#"
[extensions]
css = ".pcss"

[engines]
disabled = ["css lint"]
"#,
    )
    .unwrap();

    let resolver = resolver_for(temp_dir.path());
    assert!(resolver.resolve_by_filename("site.css").is_none());

    let container = resolver.resolve_by_filename("site.pcss").unwrap();
    assert_eq!(container.name(), CSS_MINIFY);
}

/// Environment disables win over the config file
#[test]
#[serial]
fn test_env_disables_override_file() {
    clear_chirpy_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("chirpy.toml"),
        "[engines]\ndisabled = [\"CSS Minify\"]\n",
    )
    .unwrap();
    env::set_var("CHIRPY_DISABLED_ENGINES", "LESS Imports");

    let resolver = resolver_for(temp_dir.path());
    assert!(resolver.resolve_by_filename("theme.less").is_none());
    assert_eq!(
        resolver.resolve_by_filename("site.css").unwrap().len(),
        2
    );

    clear_chirpy_env();
}

/// Invalid extension entries are rejected with a validation error
#[test]
#[serial]
fn test_invalid_extension_rejected() {
    clear_chirpy_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("chirpy.toml"),
        "[extensions]\nless = \"less\"\n",
    )
    .unwrap();

    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
}

/// A zero operation budget is rejected
#[test]
#[serial]
fn test_zero_operations_rejected() {
    clear_chirpy_env();
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("chirpy.toml"),
        "[script]\nmax_operations = 0\n",
    )
    .unwrap();

    let err = ConfigLoader::load_from_workspace(temp_dir.path()).unwrap_err();
    assert_eq!(err.category, ErrorCategory::ValidationError);
    assert!(err.message.contains("max_operations"));
}
