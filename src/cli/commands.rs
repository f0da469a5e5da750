#![allow(clippy::result_large_err)]

use crate::{
    cli::args::{DepsArgs, EnginesArgs, ProcessArgs},
    core::{
        engines::{register_builtins_with_deps, BuiltinEngineDeps},
        types::OutputFormat,
        ConfigLoader, ConfiguredExtensions, DiagnosticCategory, EngineMetadata, EngineRegistry,
        EngineResolver, EngineResult, RhaiScriptRunner, TaskList,
    },
    utils::files::OutputWriter,
    Result,
};
use anyhow::Context;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Outcome of running one file through its engines.
#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine: Option<String>,
    results: Vec<EngineResult>,
    outputs: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn new(file: PathBuf) -> Self {
        Self {
            file,
            engine: None,
            results: Vec::new(),
            outputs: Vec::new(),
            error: None,
        }
    }

    fn failed(file: PathBuf, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(file)
        }
    }
}

#[derive(Debug, Serialize)]
struct ProcessSummary<'a> {
    files: &'a [FileReport],
    errors: usize,
    warnings: usize,
    messages: usize,
}

fn workspace_root(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => env::current_dir().context("failed to determine current directory"),
    }
}

/// Build a resolver over the built-in engines as configured by the workspace.
pub fn build_resolver(workspace: &Path) -> Result<EngineResolver> {
    let config = ConfigLoader::load_from_workspace(workspace)?;

    let mut builder = EngineRegistry::builder();
    register_builtins_with_deps(
        &mut builder,
        BuiltinEngineDeps {
            script_runner: Some(Arc::new(RhaiScriptRunner::new(
                config.script.max_operations,
            ))),
        },
    )?;
    builder.disable(&config.engines.disabled);
    let registry = builder.build();

    tracing::debug!(
        workspace = %workspace.display(),
        engines = registry.len(),
        "engine registry ready"
    );

    Ok(EngineResolver::new(
        registry,
        Arc::new(ConfiguredExtensions::from_config(&config)),
    ))
}

fn process_file(
    resolver: &EngineResolver,
    path: PathBuf,
    engine: Option<&str>,
    writer: Option<&OutputWriter>,
) -> FileReport {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!(file = %path.display(), error = %e, "failed to read source file");
            let message = format!("failed to read {}: {}", path.display(), e);
            return FileReport::failed(path, message);
        }
    };

    let filename = path.to_string_lossy().into_owned();
    let container = match engine {
        Some(name) => Some(resolver.resolve_by_name(name)),
        None => resolver.resolve_by_filename(&filename),
    };
    let Some(container) = container.filter(|container| !container.is_empty()) else {
        tracing::info!(file = %path.display(), "no engine handles file");
        return FileReport::new(path);
    };

    let _span = tracing::info_span!("process", file = %path.display(), engine = container.name())
        .entered();
    let results = container.process(&contents, &filename);

    let mut report = FileReport::new(path);
    report.engine = Some(container.name().to_string());
    if let Some(writer) = writer {
        match writer.write_results(&report.file, &results) {
            Ok(outputs) => report.outputs = outputs,
            Err(e) => {
                tracing::error!(file = %report.file.display(), error = %e, "failed to write outputs");
                report.error = Some(e.to_string());
            }
        }
    }
    report.results = results;
    report
}

pub async fn process(args: ProcessArgs) -> Result<ExitCode> {
    let workspace = workspace_root(args.workspace)?;
    let resolver = Arc::new(build_resolver(&workspace)?);
    let writer = (!args.no_write).then(|| Arc::new(OutputWriter::new(None)));

    let mut handles = Vec::with_capacity(args.files.len());
    for file in args.files {
        let path = workspace.join(file);
        let resolver = Arc::clone(&resolver);
        let writer = writer.clone();
        let engine = args.engine.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            process_file(&resolver, path, engine.as_deref(), writer.as_deref())
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await.context("file processing task panicked")?);
    }

    let task_list = TaskList::new();
    for report in &reports {
        task_list.publish(&report.results);
    }
    let summary = ProcessSummary {
        files: &reports,
        errors: task_list.count(DiagnosticCategory::Error),
        warnings: task_list.count(DiagnosticCategory::Warning),
        messages: task_list.count(DiagnosticCategory::Message),
    };

    match OutputFormat::from(args.format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_text_report(&summary),
    }

    let failed = summary.errors > 0 || reports.iter().any(|report| report.error.is_some());
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_text_report(summary: &ProcessSummary<'_>) {
    for report in summary.files {
        if let Some(error) = &report.error {
            println!("{}: error: {}", report.file.display(), error);
        }
        if report.engine.is_none() && report.error.is_none() {
            println!("{}: skipped, no engine handles this file", report.file.display());
        }
        for diagnostic in report.results.iter().flat_map(|r| r.exceptions.iter()) {
            println!("{}", diagnostic);
        }
        for output in &report.outputs {
            println!("wrote {}", output.display());
        }
    }
    println!(
        "{} file(s) processed: {} error(s), {} warning(s), {} message(s)",
        summary.files.len(),
        summary.errors,
        summary.warnings,
        summary.messages
    );
}

pub async fn deps(args: DepsArgs) -> Result<ExitCode> {
    let workspace = workspace_root(args.workspace)?;
    let path = workspace.join(&args.file);
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let resolver = build_resolver(&workspace)?;
    let filename = path.to_string_lossy();
    let Some(container) = resolver.resolve_by_filename(&filename) else {
        tracing::info!(file = %path.display(), "no engine handles file");
        return Ok(ExitCode::SUCCESS);
    };

    for dependency in container.dependencies(&contents, &filename) {
        println!("{}", dependency);
    }
    Ok(ExitCode::SUCCESS)
}

pub async fn engines(args: EnginesArgs) -> Result<ExitCode> {
    let workspace = workspace_root(args.workspace)?;
    let resolver = build_resolver(&workspace)?;

    let rows: Vec<(String, String, String)> = match args.category.as_deref() {
        Some(category) => resolver
            .resolve_by_category(category)
            .engines()
            .iter()
            .map(|registered| describe(registered.metadata()))
            .collect(),
        None => resolver
            .registry()
            .iter()
            .map(|registered| describe(registered.metadata()))
            .collect(),
    };

    for (name, category, flags) in rows {
        println!("{:<16} {:<8} {}", name, category, flags);
    }
    Ok(ExitCode::SUCCESS)
}

fn describe(metadata: &EngineMetadata) -> (String, String, String) {
    let mut flags = vec![if metadata.internal {
        "internal"
    } else {
        "external"
    }];
    if metadata.minifier {
        flags.push("minifier");
    }
    (
        metadata.name.clone(),
        metadata.category.clone(),
        flags.join(","),
    )
}
