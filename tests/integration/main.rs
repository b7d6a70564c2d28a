//! Integration tests for Modgraph
//!
//! These tests drive the compiled binary against small projects on disk.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full_path = temp_dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
    temp_dir
}

fn modgraph(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modgraph").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn sample_project() -> TempDir {
    project(&[
        ("package.json", "{}"),
        ("src/index.ts", "import { greet } from './lib/greet';\nimport React from 'react';\n"),
        ("src/lib/greet.ts", "import { fmt } from '../util/fmt';\nexport function greet(): string { return fmt(); }\n"),
        ("src/util/fmt.ts", "import { greet } from '../lib/greet';\nexport const fmt = () => 'hi';\n"),
        ("node_modules/react/index.js", "module.exports = {};\n"),
    ])
}

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let temp_dir = project(&[]);
    modgraph(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Module dependency graphs"));
}

#[test]
fn test_missing_entry_is_fatal() {
    let temp_dir = project(&[]);
    modgraph(temp_dir.path())
        .arg("dot")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("expecting root argument"));
}

#[test]
fn test_nonexistent_entry_is_fatal() {
    let temp_dir = project(&[]);
    modgraph(temp_dir.path())
        .args(["dot", "nope.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_dot_output() {
    let temp_dir = sample_project();

    modgraph(temp_dir.path())
        .args(["dot", "src/index.ts"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph g {"))
        .stdout(predicate::str::contains("label=\"./src\""))
        .stdout(predicate::str::contains("\"./src/index.ts\" -> \"./src/lib/greet.ts\""))
        .stdout(predicate::str::contains("\"./src/lib/greet.ts\" -> \"./src/util/fmt.ts\""))
        .stdout(predicate::str::contains("\"./src/util/fmt.ts\" -> \"./src/lib/greet.ts\""))
        .stdout(predicate::str::contains("node_modules").not());
}

#[test]
fn test_dot_collapse_and_symbols_flags() {
    let temp_dir = sample_project();

    modgraph(temp_dir.path())
        .args(["dot", "src/index.ts", "--collapse", "^\\./src/util", "--symbols"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./src/util\" [label=\"{./src/util\\l|./src/util/fmt.ts\\l+ fmt\\l}\"]"))
        .stdout(predicate::str::contains("\"./src/lib/greet.ts\" [label=\"{./src/lib/greet.ts|greet\\l}\"]"))
        .stdout(predicate::str::contains("\"./src/util\" -> \"./src/lib/greet.ts\""));
}

#[test]
fn test_settings_file_and_override() {
    let temp_dir = sample_project();
    fs::write(
        temp_dir.path().join(".modgraph.toml"),
        "groups = false\nexclude = ['util']\n",
    )
    .unwrap();

    modgraph(temp_dir.path())
        .args(["dot", "src/index.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("subgraph").not())
        .stdout(predicate::str::contains("fmt.ts").not());

    modgraph(temp_dir.path())
        .args(["dot", "src/index.ts", "--exclude", "greet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./src/util/fmt.ts\" [label="))
        .stdout(predicate::str::contains("greet.ts").not());
}

#[test]
fn test_invalid_settings_are_fatal() {
    let temp_dir = sample_project();
    fs::write(temp_dir.path().join(".modgraph.toml"), "include = ['(']\n").unwrap();

    modgraph(temp_dir.path())
        .args(["dot", "src/index.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid path pattern"));
}

#[test]
fn test_unresolved_import_is_logged() {
    let temp_dir = project(&[
        ("package.json", "{}"),
        ("a.ts", "import './missing';\nimport './b';\n"),
        ("b.ts", ""),
    ]);

    modgraph(temp_dir.path())
        .args(["dot", "a.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./a.ts\" -> \"./b.ts\""))
        .stderr(predicate::str::contains("./missing"));
}

#[test]
fn test_tsconfig_paths() {
    let temp_dir = project(&[
        (
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@/*": ["src/*"] } } }"#,
        ),
        ("src/main.ts", "import { db } from '@/services/db';\n"),
        ("src/services/db.ts", "export const db = {};\n"),
    ]);

    modgraph(temp_dir.path())
        .args(["dot", "src/main.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"./src/main.ts\" -> \"./src/services/db.ts\""));
}

#[test]
fn test_json_output() {
    let temp_dir = sample_project();

    modgraph(temp_dir.path())
        .args(["json", "src/index.ts"])
        .assert()
        .success();

    let text = fs::read_to_string(temp_dir.path().join("result.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(value["links"].as_array().unwrap().len(), 3);
    assert_eq!(value["nodes"][0]["id"], "./src/index.ts");
    assert_eq!(value["links"][0]["value"], 1);
}

#[test]
fn test_json_custom_out() {
    let temp_dir = sample_project();

    modgraph(temp_dir.path())
        .args(["json", "src/index.ts", "--out", "graph.json"])
        .assert()
        .success();

    assert!(temp_dir.path().join("graph.json").is_file());
    assert!(!temp_dir.path().join("result.json").exists());
}

#[test]
fn test_symbols_report() {
    let temp_dir = project(&[
        ("package.json", "{}"),
        (
            "a.ts",
            "import './b';\n/** Greets someone. */\nexport function hello(name: string): string {\n  return name;\n}\n",
        ),
        ("b.ts", "export interface Options { loud: boolean }\n"),
    ]);

    modgraph(temp_dir.path())
        .args(["symbols", "a.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## ./a.ts"))
        .stdout(predicate::str::contains("### hello"))
        .stdout(predicate::str::contains("Greets someone."))
        .stdout(predicate::str::contains("export function hello(name: string): string;"))
        .stdout(predicate::str::contains("export interface Options { ... }"));
}
