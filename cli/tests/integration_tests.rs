use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

const CONFIG_YAML: &str = r#"name: Deploy Tool
program: deploy
version: "1.2"
commands:
  - name: build
    description: Build a target.
    operands:
      - name: target
    options:
      - name: force
        description: Force a rebuild.
        short: f
        long: force
      - name: jobs
        description: Parallel jobs.
        short: j
        flag: false
    parameters:
      task: build::run
  - name: status
    description: Show status.
"#;

fn write_config(dir: &Path, file: &str, contents: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn shellkit(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_shellkit"))
        .arg("--no-color")
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run shellkit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_prints_dispatch_result_as_json() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--",
        "build",
        "-fj",
        "4",
        "web",
    ]);

    assert!(output.status.success(), "run should succeed");
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["command"], "build");
    assert_eq!(value["parameters"]["task"], "build::run");
    assert_eq!(value["data"]["force"], true);
    assert_eq!(value["data"]["jobs"], "4");
    assert_eq!(value["data"]["target"], "web");
}

#[test]
fn run_prints_yaml_when_requested() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&[
        "run",
        "--config",
        config.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "status",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("command: status"), "got: {text}");
}

#[test]
fn run_unknown_command_suggests_and_fails() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["run", "--config", config.to_str().unwrap(), "--", "biuld"]);

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("command \"biuld\" not found"));
    assert!(text.contains("Did you mean \"build\"?"));
    assert!(text.contains("See 'deploy --help'"));
}

#[test]
fn run_missing_operand_prints_command_hint() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["run", "--config", config.to_str().unwrap(), "--", "build"]);

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("operand \"target\" is required"));
    assert!(text.contains("See 'deploy build --help' for more information about the command."));
}

#[test]
fn run_reads_json_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(
        dir.path(),
        "shell.json",
        r#"{"program": "deploy", "commands": [{"name": "status", "description": "Show status."}]}"#,
    );

    let output = shellkit(&["run", "--config", config.to_str().unwrap(), "--", "status"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["command"], "status");
    assert!(value["data"].as_object().unwrap().is_empty());
}

#[test]
fn run_missing_config_reports_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let output = shellkit(&[
        "run",
        "--config",
        dir.path().join("absent.yml").to_str().unwrap(),
        "--",
        "status",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Failed to load"), "got: {stderr}");
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

#[test]
fn describe_shell_lists_commands() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["describe", "--config", config.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Deploy Tool (version 1.2)\n"));
    assert!(text.contains("  build                 Build a target.\n"));
    assert!(text.contains("  status                Show status.\n"));
    assert!(text.contains("  -v+|--verbose+        Be more verbose.\n"));
}

#[test]
fn describe_command_lists_options() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["describe", "--config", config.to_str().unwrap(), "build"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("  deploy build <target> [<options>] \n"));
    assert!(text.contains("  -f|--force            Force a rebuild.\n"));
    assert!(text.contains("  -j=                   Parallel jobs.\n"));
}

#[test]
fn describe_unknown_command_fails() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["describe", "--config", config.to_str().unwrap(), "stats"]);

    assert!(!output.status.success());
    assert!(stdout(&output).contains("Did you mean \"status\"?"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_clean_config() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(dir.path(), "shell.yml", CONFIG_YAML);

    let output = shellkit(&["validate", "--config", config.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Validated 2 command(s)"));
}

#[test]
fn validate_reports_issues() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = write_config(
        dir.path(),
        "shell.yml",
        r#"commands:
  - name: copy
    options:
      - name: recursive
        short: r
      - name: reverse
        short: r
  - name: copy
"#,
    );

    let output = shellkit(&["validate", "--config", config.to_str().unwrap()]);

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("command \"copy\": duplicate short option: -r"));
    assert!(text.contains("duplicate command: copy"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: 2 issue(s) found"));
}
