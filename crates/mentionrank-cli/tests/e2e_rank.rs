//! E2E tests for `mrank`: NDJSON input through ranking to each output mode,
//! plus the error paths and their codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn mrank_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mrank"));
    cmd.current_dir(dir);
    // Keep stderr free of log lines so error payloads can be parsed.
    cmd.env("MENTIONRANK_LOG", "off");
    cmd.env_remove("FORMAT");
    cmd
}

fn tweet(author: &str, mentions: &[&str]) -> String {
    let mentions: Vec<Value> = mentions
        .iter()
        .map(|m| serde_json::json!({ "screen_name": m, "id": 0 }))
        .collect();
    serde_json::json!({
        "id": 1,
        "text": "hello",
        "user": { "screen_name": author },
        "entities": { "hashtags": [], "user_mentions": mentions },
    })
    .to_string()
}

fn write_input(dir: &Path, lines: &[String]) -> PathBuf {
    let path = dir.join("tweets.ndjson");
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(&path, body).expect("input must be written");
    path
}

/// Scenario: a → {b, c}, d → b.
fn shared_target_input(dir: &Path) -> PathBuf {
    write_input(dir, &[tweet("a", &["b", "c"]), tweet("d", &["b"])])
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = mrank_cmd(dir)
        .args(args)
        .arg("--format")
        .arg("json")
        .output()
        .expect("mrank should not crash");
    assert!(
        output.status.success(),
        "mrank failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

fn identities(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("ranked list is an array")
        .iter()
        .map(|e| e["identity"].as_str().expect("identity").to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[test]
fn json_report_ranks_shared_target_first() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    let json = run_json(dir.path(), &[input.to_str().expect("utf8 path")]);

    assert_eq!(json["report"]["graph_nodes"], 4);
    assert_eq!(json["report"]["graph_edges"], 3);
    assert_eq!(json["report"]["iterations"], 300);
    assert_eq!(json["ingest"]["records"], 2);
    assert!(json.get("stats").is_none());

    let auth = identities(&json["report"]["authorities"]);
    assert_eq!(auth, vec!["b", "c", "a", "d"]);
    let hubs = identities(&json["report"]["hubs"]);
    assert_eq!(hubs[0], "a");
    assert_eq!(hubs[1], "d");
}

#[test]
fn top_k_truncates_both_lists() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    let json = run_json(dir.path(), &[input.to_str().expect("utf8 path"), "--top-k", "1"]);
    assert_eq!(identities(&json["report"]["authorities"]), vec!["b"]);
    assert_eq!(identities(&json["report"]["hubs"]), vec!["a"]);
}

#[test]
fn stats_flag_adds_graph_statistics() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(
        dir.path(),
        &[
            tweet("a", &["b", "c", "a"]),
            tweet("a", &["b"]),
            tweet("x", &["y"]),
        ],
    );

    let json = run_json(dir.path(), &[input.to_str().expect("utf8 path"), "--stats"]);
    let stats = &json["stats"];
    assert_eq!(stats["node_count"], 5);
    assert_eq!(stats["edge_count"], 3);
    assert_eq!(stats["component_count"], 2);
    assert_eq!(stats["component_sizes"], serde_json::json!([3, 2]));
    assert!(
        stats["content_hash"]
            .as_str()
            .expect("hash")
            .starts_with("blake3:")
    );
    assert_eq!(json["ingest"]["self_mentions"], 1);
    assert_eq!(json["ingest"]["duplicate_mentions"], 1);
    assert_eq!(json["report"]["component_nodes"], 3);
}

#[test]
fn stdin_input_is_supported() {
    let dir = TempDir::new().expect("tempdir");
    let body = format!("{}\n\n{}\n", tweet("a", &["b", "c"]), tweet("d", &["b"]));

    let output = mrank_cmd(dir.path())
        .args(["-", "--json"])
        .write_stdin(body)
        .output()
        .expect("mrank should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(identities(&json["report"]["authorities"])[0], "b");
}

#[test]
fn text_output_has_headers_and_rows() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .args(["--format", "text", "--top-k", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 2 Hubs\na\t"))
        .stdout(predicate::str::contains("Top 2 Authorities\nb\t"));
}

#[test]
fn pretty_output_from_format_env() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .env("FORMAT", "pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top 20 Hubs"))
        .stdout(predicate::str::contains("Top 20 Authorities"))
        .stdout(predicate::str::contains("  1. b"));
}

#[test]
fn config_file_is_read_and_flags_override_it() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());
    std::fs::write(
        dir.path().join("mentionrank.toml"),
        "iteration_count = 7\ntop_k = 2\n",
    )
    .expect("config must be written");

    let json = run_json(dir.path(), &[input.to_str().expect("utf8 path")]);
    assert_eq!(json["config"]["iteration_count"], 7);
    assert_eq!(json["report"]["iterations"], 7);
    assert_eq!(json["report"]["hubs"].as_array().map(Vec::len), Some(2));

    let json = run_json(
        dir.path(),
        &[input.to_str().expect("utf8 path"), "--iterations", "3"],
    );
    assert_eq!(json["report"]["iterations"], 3);
    assert_eq!(json["config"]["top_k"], 2);
}

// ---------------------------------------------------------------------------
// Error paths
// ---------------------------------------------------------------------------

#[test]
fn negative_top_k_is_invalid_count() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .args(["--top-k", "-1"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("E1001"));
}

#[test]
fn zero_iterations_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .args(["--iterations", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E1002"));
}

#[test]
fn empty_input_is_empty_graph() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("empty.ndjson");
    std::fs::write(&input, "\n\n").expect("input must be written");

    mrank_cmd(dir.path())
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[E2001]"));
}

#[test]
fn edgeless_input_is_degenerate() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(dir.path(), &[tweet("loner", &[]), tweet("solo", &["solo"])]);

    mrank_cmd(dir.path())
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E2002"))
        .stderr(predicate::str::contains("suggestion:"));
}

#[test]
fn malformed_line_reports_line_number_as_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_input(
        dir.path(),
        &[tweet("a", &["b"]), String::new(), "{not json".to_string()],
    );

    let output = mrank_cmd(dir.path())
        .arg(&input)
        .arg("--json")
        .output()
        .expect("mrank should not crash");
    assert_eq!(output.status.code(), Some(1));

    let json: Value = serde_json::from_slice(&output.stderr).expect("error is JSON");
    assert_eq!(json["error"]["error_code"], "E3001");
    let message = json["error"]["message"].as_str().expect("message");
    assert!(message.contains("line 3"), "got: {message}");
}

#[test]
fn missing_input_is_read_error() {
    let dir = TempDir::new().expect("tempdir");

    mrank_cmd(dir.path())
        .arg(dir.path().join("nope.ndjson"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E3002"));
}

#[test]
fn bad_config_is_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());
    let config = dir.path().join("custom.toml");
    std::fs::write(&config, "damping = 0.85\n").expect("config must be written");

    mrank_cmd(dir.path())
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E1003"));
}

#[test]
fn missing_explicit_config_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[E1004]"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_utf8_line_is_decode_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("tweets.ndjson");
    let mut body = tweet("a", &["b"]).into_bytes();
    body.extend_from_slice(b"\n{\"user\": {\"screen_name\": \"\xff\"}}\n");
    std::fs::write(&input, body).expect("input must be written");

    mrank_cmd(dir.path())
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("E3001"))
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn zero_scores_print_without_sign() {
    let dir = TempDir::new().expect("tempdir");
    let input = shared_target_input(dir.path());

    mrank_cmd(dir.path())
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\t-0").not())
        .stdout(predicate::str::contains("d\t0\n"));

    let json = run_json(dir.path(), &[input.to_str().expect("utf8 path")]);
    let zero_authority = json["report"]["authorities"]
        .as_array()
        .expect("authorities")
        .iter()
        .find(|e| e["identity"] == "d")
        .expect("d is ranked");
    let score = zero_authority["score"].as_f64().expect("numeric score");
    assert_eq!(score.to_bits(), 0, "expected +0.0, got {score}");
}
