// CLI integration tests for the chwire-bench runner.
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_chwire-bench");
    Command::new(exe)
}

fn parse_json(value: &str) -> Value {
    serde_json::from_str(value).expect("valid json")
}

#[test]
fn json_report_covers_every_column() {
    let output = cmd()
        .args(["--rows", "1000", "--iterations", "2", "--format", "json"])
        .output()
        .expect("bench");
    assert!(output.status.success());

    let report = parse_json(std::str::from_utf8(&output.stdout).expect("utf8"));
    assert_eq!(report["name"], "chwire");
    assert_eq!(report["params"]["rows"][0], 1000);

    let results = report["results"].as_array().expect("results array");
    assert_eq!(results.len(), 6);

    let int64_encode = results
        .iter()
        .find(|r| r["bench"] == "encode" && r["column"] == "Int64")
        .expect("int64 encode");
    assert_eq!(int64_encode["bytes"], 8000);
    assert_eq!(int64_encode["iterations"], 2);

    for column in ["Int64", "Float32", "String"] {
        assert!(
            results
                .iter()
                .any(|r| r["bench"] == "decode" && r["column"] == column),
            "{column} decode missing"
        );
    }
}

#[test]
fn table_goes_to_stderr_only() {
    let output = cmd()
        .args(["--rows", "10", "--iterations", "1", "--format", "table"])
        .output()
        .expect("bench");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chwire bench (table)"));
}

#[test]
fn invalid_format_exits_with_usage_code() {
    let output = cmd()
        .args(["--format", "yaml"])
        .output()
        .expect("bench");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid --format"));
}
