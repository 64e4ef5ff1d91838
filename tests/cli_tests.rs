use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn gql_tg_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("gql-tg"))
}

const SCHEMA: &str = "\
type Query {
  post(id: ID!): Post
}

type Post {
  id: ID!
  title: String
  tags: [String!]!
}

enum Status {
  DRAFT
  PUBLISHED
}
";

fn write_schema(temp_dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    path
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    gql_tg_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("TypeScript"));
}

#[test]
fn test_version() {
    gql_tg_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gql-tg"));
}

#[test]
fn test_input_is_required() {
    gql_tg_cmd().arg("transpile").assert().failure();
}

// =============================================================================
// Transpile
// =============================================================================

#[test]
fn test_transpile_writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);
    let output = temp_dir.path().join("definitions.ts");

    gql_tg_cmd()
        .arg("transpile")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Transpiled").and(predicate::str::contains("3 type definitions into")));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("/*\n* Type Definitions automatically generated via gql-tg at "));
    assert!(contents.contains("export interface PostQueryArgs {\n  id: string;\n}\n"));
    assert!(contents.contains("export interface Post {\n  id: string;\n  title?: string;\n  tags: string[];\n}\n"));
    assert!(contents.contains("export enum Status {\n  DRAFT = 'DRAFT',\n  PUBLISHED = 'PUBLISHED',\n}\n"));
}

#[test]
fn test_transpile_to_stdout_without_header() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", "input P { x: Int }\n");

    gql_tg_cmd()
        .args(["transpile", "--no-header", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::eq("export interface P {\n  x?: number;\n}\n"));
}

#[test]
fn test_transpile_without_timestamp_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);

    let run = || {
        gql_tg_cmd()
            .args(["transpile", "--no-timestamp", "--order", "dependencies", "-i"])
            .arg(&input)
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(String::from_utf8_lossy(&first).starts_with("/*\n* Type Definitions automatically generated via gql-tg.\n"));
    assert_eq!(first, run());
}

#[test]
fn test_undeclared_type_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", "type Query { me: User }\n");
    let output = temp_dir.path().join("definitions.ts");

    gql_tg_cmd()
        .arg("transpile")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("[Error]:").and(predicate::str::contains("`User`")));

    assert!(!output.exists());
}

#[test]
fn test_wrong_input_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.gql", SCHEMA);

    gql_tg_cmd()
        .arg("transpile")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a graphql file"));
}

#[test]
fn test_wrong_output_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);
    let output = temp_dir.path().join("definitions.js");

    gql_tg_cmd()
        .arg("transpile")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TypeScript (.ts)"));

    assert!(!output.exists());
}

#[test]
fn test_empty_schema() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", "\n\n");

    gql_tg_cmd()
        .arg("transpile")
        .arg("-i")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No type definitions found"));
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_tokens_lists_root_operations_first() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);

    let output = gql_tg_cmd().arg("tokens").arg("-i").arg(&input).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("type::Query::"));
    assert!(lines[1].starts_with("type::Post::"));
    assert_eq!(lines[2], "enum::Status::DRAFT::PUBLISHED");
}

#[test]
fn test_model_prints_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);

    let output = gql_tg_cmd().arg("model").arg("-i").arg(&input).output().unwrap();
    assert!(output.status.success());
    let model: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(model["root_operations"]["QUERY"].is_object());
    assert!(model["non_scalar_types"]["Post"].is_object());
    assert!(model["non_scalar_types"]["Status"].is_object());
}

#[test]
fn test_model_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_schema(&temp_dir, "schema.graphql", SCHEMA);
    let output = temp_dir.path().join("model.json");

    gql_tg_cmd()
        .arg("model")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let model: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(model["non_scalar_types"].as_object().unwrap().len(), 2);
}
