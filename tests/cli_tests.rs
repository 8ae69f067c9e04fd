//! CLI integration tests for the squirrels binary.
//!
//! These launch the binary as a subprocess and inspect its exit status and
//! output, the same way external harnesses drive it.

use assert_cmd::Command;
use predicates::prelude::*;
use squirrel_cluster::report::format::parse_output;
use squirrel_cluster::report::types::SquirrelRecord;
use squirrel_cluster::report::verify::verify_ring;

const NUM_SQUIRRELS: usize = 4;
const TOTAL_NUTS: usize = 1_000_298;

const MISMATCH_MARKER: &str = "Ошибка: программу нужно запускать с";

/// Get a Command for the squirrels binary, isolated from ambient settings.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("squirrels").unwrap();
    cmd.env_remove("SQUIRRELS_WORKERS")
        .env_remove("SQUIRRELS_EXPECTED")
        .env_remove("RUST_LOG");
    cmd
}

fn run_correct() -> Vec<SquirrelRecord> {
    let output = cmd().output().unwrap();
    assert!(output.status.success(), "default run should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().count(),
        NUM_SQUIRRELS,
        "stdout must hold one line per squirrel and nothing else"
    );
    parse_output(&stdout)
}

// ============================================================================
// Launch contract
// ============================================================================

#[test]
fn test_correct_launch_exits_zero() {
    cmd()
        .args(["--workers", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Белка 0:"));
}

#[test]
fn test_wrong_launch_reports_error() {
    cmd()
        .args(["--workers", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Ошибка: программу нужно запускать с 4 процессами, а не с 3",
        ));
}

#[test]
fn test_wrong_launch_reports_diagnostic_once() {
    let output = cmd().args(["--workers", "3"]).output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches(MISMATCH_MARKER).count(),
        1,
        "diagnostic must appear exactly once, stderr was:\n{}",
        stderr
    );
    assert!(!stderr.contains("Ring exchange closed"));
}

#[test]
fn test_wrong_launch_prints_no_records() {
    cmd()
        .args(["--workers", "5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Белка").not());
}

#[test]
fn test_too_few_nuts_is_configuration_error() {
    cmd()
        .args(["--workers", "4", "--nuts", "3"])
        .assert()
        .failure()
        .code(1);
}

// ============================================================================
// Report contents
// ============================================================================

#[test]
fn test_exactly_one_record_per_squirrel() {
    let records = run_correct();

    assert_eq!(records.len(), NUM_SQUIRRELS);
    let mut ids: Vec<usize> = records.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn test_nut_counts_cover_dataset() {
    let records = run_correct();

    let total: usize = records.iter().map(|r| r.nuts).sum();
    assert_eq!(total, TOTAL_NUTS);
    assert!(records.iter().all(|r| r.nuts > 0));
}

#[test]
fn test_neighbors_match_ring() {
    let records = run_correct();

    verify_ring(&records, NUM_SQUIRRELS, TOTAL_NUTS).unwrap();

    let by_id = |id: usize| records.iter().find(|r| r.id == id).unwrap();
    assert!((by_id(0).left - by_id(3).avg).abs() <= 1e-9);
    assert!((by_id(0).right - by_id(1).avg).abs() <= 1e-9);
}

#[test]
fn test_averages_are_non_negative() {
    for record in run_correct() {
        assert!(record.avg >= 0.0);
        assert!(record.left >= 0.0);
        assert!(record.right >= 0.0);
    }
}

#[test]
fn test_json_format() {
    let output = cmd()
        .args(["--workers", "3", "--expected", "3", "--nuts", "300", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: Vec<SquirrelRecord> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    verify_ring(&records, 3, 300).unwrap();
}

#[test]
fn test_same_seed_same_report() {
    let run = |seed: &str| {
        cmd()
            .args(["--nuts", "5000", "--seed", seed])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run("11"), run("11"));
    assert_ne!(run("11"), run("12"));
}
