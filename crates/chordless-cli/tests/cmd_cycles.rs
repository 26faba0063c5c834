//! Integration tests for `chordless cycles`.
#![allow(clippy::expect_used)]

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `chordless` binary.
fn chordless_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("chordless");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

/// Parses human output into sorted node sets, one per cycle.
fn cycle_sets(stdout: &str) -> BTreeSet<Vec<usize>> {
    stdout
        .lines()
        .map(|line| {
            let mut nodes: Vec<usize> = line
                .split_whitespace()
                .map(|t| t.parse().expect("node id"))
                .collect();
            nodes.sort_unstable();
            nodes
        })
        .collect()
}

// ---------------------------------------------------------------------------
// cycles: human mode
// ---------------------------------------------------------------------------

#[test]
fn cycles_square_with_chord_prints_two_triangles() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("square-chord.edges").to_str().expect("path"),
        ])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let expected: BTreeSet<Vec<usize>> = [vec![0, 1, 2], vec![0, 2, 3]].into_iter().collect();
    assert_eq!(cycle_sets(&stdout), expected);
}

#[test]
fn cycles_every_mode_and_level_agree_on_wheel() {
    let mut seen = Vec::new();
    for mode in ["destructive", "constructive"] {
        for level in ["exhaustive", "witness", "marked"] {
            let out = Command::new(chordless_bin())
                .args([
                    "cycles",
                    fixture("wheel5.edges").to_str().expect("path"),
                    "--mode",
                    mode,
                    "--level",
                    level,
                    "--order",
                    "largest-first",
                ])
                .output()
                .expect("run chordless cycles");
            assert!(out.status.success(), "{mode}/{level}: {:?}", out.status.code());
            seen.push(cycle_sets(&String::from_utf8_lossy(&out.stdout)));
        }
    }
    assert_eq!(seen[0].len(), 6, "five triangles plus the rim");
    assert!(seen.iter().all(|s| *s == seen[0]));
}

#[test]
fn cycles_first_node_shifts_ids_back() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("one-based.edges").to_str().expect("path"),
            "--first-node",
            "1",
            "--prune-bridges",
        ])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let expected: BTreeSet<Vec<usize>> = [vec![1, 2, 3]].into_iter().collect();
    assert_eq!(cycle_sets(&stdout), expected);
}

#[test]
fn cycles_max_cycles_limits_output() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("wheel5.edges").to_str().expect("path"),
            "--max-cycles",
            "2",
        ])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 2);
}

#[test]
fn cycles_forest_prints_nothing() {
    let out = Command::new(chordless_bin())
        .args(["cycles", fixture("path.edges").to_str().expect("path")])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cycles_stdin_exit_0() {
    use std::io::Write as _;
    let content = std::fs::read(fixture("square-chord.edges")).expect("read fixture");
    let mut child = Command::new(chordless_bin())
        .args(["cycles", "-"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .expect("spawn chordless cycles -");
    child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(&content)
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().count(), 2);
}

// ---------------------------------------------------------------------------
// cycles: JSON mode
// ---------------------------------------------------------------------------

#[test]
fn cycles_json_reports_state_and_stats() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("wheel5.edges").to_str().expect("path"),
            "--format",
            "json",
            "--max-cycles",
            "3",
        ])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("valid JSON from cycles");
    assert_eq!(value["count"], 3);
    assert_eq!(value["state"], "capped");
    assert_eq!(value["cycles"].as_array().expect("array").len(), 3);
    assert_eq!(value["stats"]["cycles"], 3);
}

// ---------------------------------------------------------------------------
// cycles: failures
// ---------------------------------------------------------------------------

#[test]
fn cycles_nonexistent_file_exits_2() {
    let out = Command::new(chordless_bin())
        .args(["cycles", "/no/such/file/graph.edges"])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn cycles_malformed_line_exits_2_with_line_number() {
    let out = Command::new(chordless_bin())
        .args(["cycles", fixture("malformed.edges").to_str().expect("path")])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
}

#[test]
fn cycles_self_loop_exits_2() {
    let out = Command::new(chordless_bin())
        .args(["cycles", fixture("self-loop.edges").to_str().expect("path")])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("self-loop"), "stderr: {stderr}");
}

#[test]
fn cycles_file_over_size_limit_exits_2() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("wheel5.edges").to_str().expect("path"),
            "--max-file-size",
            "8",
        ])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("too large"), "stderr: {stderr}");
}

#[test]
fn cycles_huge_node_id_exits_2() {
    use std::io::Write as _;
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(b"0 1099511627776\n").expect("write temp file");
    let out = Command::new(chordless_bin())
        .args(["cycles", file.path().to_str().expect("path")])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 1"), "stderr: {stderr}");
    assert!(stderr.contains("exceeds the limit"), "stderr: {stderr}");
}

#[test]
fn cycles_max_nodes_rejects_wheel() {
    let out = Command::new(chordless_bin())
        .args([
            "cycles",
            fixture("wheel5.edges").to_str().expect("path"),
            "--max-nodes",
            "4",
        ])
        .output()
        .expect("run chordless cycles");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn cycles_weighted_edge_list_from_temp_file() {
    use std::io::Write as _;
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(b"% weighted square, one chord\n0 1 0.5\n1 2 1.5\n2 3 2.0\n3 0 0.1\n1 3 9.9\n")
        .expect("write temp file");
    let out = Command::new(chordless_bin())
        .args(["cycles", file.path().to_str().expect("path")])
        .output()
        .expect("run chordless cycles");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let expected: BTreeSet<Vec<usize>> = [vec![0, 1, 3], vec![1, 2, 3]].into_iter().collect();
    assert_eq!(cycle_sets(&String::from_utf8_lossy(&out.stdout)), expected);
}
