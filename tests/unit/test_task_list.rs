use chirpy::core::{Diagnostic, DiagnosticCategory, DiagnosticSink, EngineResult, TaskList};
use std::sync::Arc;

fn warning(file: &str, message: &str) -> Diagnostic {
    Diagnostic::new(message, file, DiagnosticCategory::Warning)
}

#[test]
fn publish_records_every_diagnostic_in_order() {
    let tasks = TaskList::new();
    let mut lint = EngineResult::new("site.css");
    lint.add_located_exception(
        "Use of !important",
        "site.css",
        4,
        12,
        Some("  color: red !important;".to_string()),
        DiagnosticCategory::Warning,
    );
    lint.add_message("Compiled", "site.css", DiagnosticCategory::Message);
    let minified = EngineResult::with_output(".min.css", "site.min.css", "a{}");

    tasks.publish(&[lint, minified]);

    let recorded = tasks.tasks();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].document, "site.css");
    assert_eq!((recorded[0].line, recorded[0].column), (4, 12));
    assert_eq!(recorded[0].text, "Use of !important\n  color: red !important;");
    assert_eq!(recorded[1].text, "Compiled");
    assert_eq!((recorded[1].line, recorded[1].column), (0, 0));
    assert_eq!(tasks.count(DiagnosticCategory::Warning), 1);
    assert_eq!(tasks.count(DiagnosticCategory::Error), 0);
}

#[test]
fn incomplete_diagnostics_are_ignored() {
    let tasks = TaskList::new();
    tasks.add(&warning("", "orphan"));
    tasks.add(&warning("site.css", ""));
    assert!(tasks.is_empty());
}

#[test]
fn removal_by_file_matches_loosely() {
    let tasks = TaskList::new();
    tasks.add(&warning(r"styles\Site.css", "one"));
    tasks.add(&warning("styles/other.css", "two"));

    assert!(tasks.has_error("styles/site.css"));
    tasks.remove_file("STYLES/site.css");
    assert!(!tasks.has_error("styles/site.css"));
    assert_eq!(tasks.len(), 1);

    tasks.remove_all();
    assert!(tasks.is_empty());
}

#[test]
fn removal_by_group_leaves_other_entries() {
    let tasks = TaskList::new();
    tasks.add_grouped("web", &warning("a.css", "grouped"));
    tasks.add(&warning("b.css", "loose"));

    tasks.remove_group("web");
    let remaining = tasks.tasks();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].document, "b.css");
    assert_eq!(remaining[0].group, None);
}

#[test]
fn concurrent_publishers_do_not_lose_entries() {
    let tasks = Arc::new(TaskList::new());

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let tasks = Arc::clone(&tasks);
            scope.spawn(move || {
                for i in 0..25 {
                    tasks.add(&warning(&format!("file{}.css", worker), &format!("w{}", i)));
                }
            });
        }
    });

    assert_eq!(tasks.len(), 100);
    assert_eq!(tasks.count(DiagnosticCategory::Warning), 100);
}
