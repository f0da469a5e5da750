use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, starts_with};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BIN: &str = "chirpy";

fn chirpy(workspace: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN).expect("binary should build");
    cmd.arg("--quiet")
        .env_remove("CHIRPY_DISABLED_ENGINES")
        .env_remove("CHIRPY_SCRIPT_MAX_OPERATIONS")
        .env_remove("RUST_LOG")
        .current_dir(workspace);
    cmd
}

#[test]
fn version_flag_prints_crate_version() {
    Command::cargo_bin(BIN)
        .expect("binary should build")
        .arg("--version")
        .assert()
        .success()
        .stdout(starts_with(format!("{BIN} {}", chirpy::VERSION)));
}

#[test]
fn engines_lists_builtins_with_flags() {
    let workspace = TempDir::new().unwrap();
    chirpy(workspace.path())
        .args(["engines", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(contains("CSS Lint"))
        .stdout(contains("internal,minifier"))
        .stdout(contains("LESS Imports"));
}

#[test]
fn engines_filters_by_category() {
    let workspace = TempDir::new().unwrap();
    chirpy(workspace.path())
        .args(["engines", "--category", "LESS", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(contains("LESS Imports"))
        .stdout(contains("CSS Lint").not());
}

#[test]
fn process_writes_minified_output_and_reports_warnings() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("site.css"),
        "a {\n  color: red !important;\n}\n",
    )
    .unwrap();

    chirpy(workspace.path())
        .args(["process", "site.css", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(contains("warning: Use of !important"))
        .stdout(contains("1 file(s) processed: 0 error(s), 1 warning(s)"));

    let minified = fs::read_to_string(workspace.path().join("site.min.css")).unwrap();
    assert_eq!(minified, "a{color:red !important}");
}

#[test]
fn process_without_write_leaves_disk_untouched() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("site.css"), "a { color: red; }\n").unwrap();

    chirpy(workspace.path())
        .args(["process", "site.css", "--no-write", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success();

    assert!(!workspace.path().join("site.min.css").exists());
}

#[test]
fn process_reports_json() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("site.css"), "p {}\n").unwrap();
    fs::write(workspace.path().join("notes.txt"), "hello").unwrap();

    let output = chirpy(workspace.path())
        .args(["process", "site.css", "notes.txt", "--format", "json", "--no-write"])
        .arg("--workspace")
        .arg(workspace.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["errors"], 0);
    assert_eq!(report["warnings"], 1);
    assert_eq!(report["files"][0]["engine"], "CSS Lint|CSS Minify");
    assert!(report["files"][1].get("engine").is_none());
}

#[test]
fn process_named_engine_skips_filename_resolution() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("site.txt"), "a {  top: 1px; }").unwrap();

    chirpy(workspace.path())
        .args(["process", "site.txt", "--engine", "css minify", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success();

    let minified = fs::read_to_string(workspace.path().join("site.txt.min.css")).unwrap();
    assert_eq!(minified, "a{top:1px}");
}

#[test]
fn process_missing_file_fails() {
    let workspace = TempDir::new().unwrap();
    chirpy(workspace.path())
        .args(["process", "missing.css", "--workspace"])
        .arg(workspace.path())
        .assert()
        .failure()
        .stdout(contains("failed to read"));
}

#[test]
fn deps_lists_less_imports() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("theme.less"),
        "@import \"base\";\n@import 'Base.less';\n@import url(\"print.css\");\n",
    )
    .unwrap();

    chirpy(workspace.path())
        .args(["deps", "theme.less", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success()
        .stdout("base.less\nprint.css\n");
}

#[test]
fn disabled_engines_are_not_resolved() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("chirpy.toml"),
        "[engines]\ndisabled = [\"CSS Minify\"]\n",
    )
    .unwrap();
    fs::write(workspace.path().join("site.css"), "a { color: red; }\n").unwrap();

    chirpy(workspace.path())
        .args(["process", "site.css", "--workspace"])
        .arg(workspace.path())
        .assert()
        .success();

    assert!(!workspace.path().join("site.min.css").exists());
}
