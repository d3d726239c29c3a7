#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two judges, three contestants, Talent (50/50) and Interview (60/40).
/// Judge 2 never scored contestant 3's interview.
const PAGEANT: &str = r#"{
  "events": [
    {"id": 1, "name": "Search 2025", "date": "2025-03-01", "status": "ACTIVE"},
    {"id": 2, "name": "Search 2024", "date": "2024-03-01", "status": "INACTIVE"}
  ],
  "contestants": [
    {"id": 1, "eventId": 1, "number": 1, "name": "Ana"},
    {"id": 2, "eventId": 1, "number": 2, "name": "Bea"},
    {"id": 3, "eventId": 1, "number": 3, "name": "Cora"}
  ],
  "judges": [
    {"id": 1, "eventId": 1, "number": 1, "name": "Chief", "locked": false},
    {"id": 2, "eventId": 1, "number": 2, "name": "Panel", "locked": true}
  ],
  "criteria": [
    {"id": 10, "eventId": 1, "name": "Talent", "identifier": "best-in-talent"},
    {"id": 11, "eventId": 1, "name": "Mastery", "parentId": 10, "weight": 50},
    {"id": 12, "eventId": 1, "name": "Stage Presence", "parentId": 10, "weight": 50},
    {"id": 20, "eventId": 1, "name": "Interview", "identifier": "best-in-interview"},
    {"id": 21, "eventId": 1, "name": "Substance", "parentId": 20, "weight": 60},
    {"id": 22, "eventId": 1, "name": "Delivery", "parentId": 20, "weight": 40, "autoAssignToAllContestants": false}
  ],
  "scores": [
    {"contestantId": 1, "judgeId": 1, "criteriaId": 11, "eventId": 1, "value": 50},
    {"contestantId": 1, "judgeId": 1, "criteriaId": 12, "eventId": 1, "value": 50},
    {"contestantId": 2, "judgeId": 1, "criteriaId": 11, "eventId": 1, "value": 40},
    {"contestantId": 2, "judgeId": 1, "criteriaId": 12, "eventId": 1, "value": 30},
    {"contestantId": 3, "judgeId": 1, "criteriaId": 11, "eventId": 1, "value": 20},
    {"contestantId": 3, "judgeId": 1, "criteriaId": 12, "eventId": 1, "value": 10},
    {"contestantId": 1, "judgeId": 1, "criteriaId": 21, "eventId": 1, "value": 50},
    {"contestantId": 1, "judgeId": 1, "criteriaId": 22, "eventId": 1, "value": 30},
    {"contestantId": 2, "judgeId": 1, "criteriaId": 21, "eventId": 1, "value": 55},
    {"contestantId": 2, "judgeId": 1, "criteriaId": 22, "eventId": 1, "value": 35},
    {"contestantId": 3, "judgeId": 1, "criteriaId": 21, "eventId": 1, "value": 40},
    {"contestantId": 3, "judgeId": 1, "criteriaId": 22, "eventId": 1, "value": 20},
    {"contestantId": 1, "judgeId": 2, "criteriaId": 11, "eventId": 1, "value": 45},
    {"contestantId": 1, "judgeId": 2, "criteriaId": 12, "eventId": 1, "value": 40},
    {"contestantId": 2, "judgeId": 2, "criteriaId": 11, "eventId": 1, "value": 45},
    {"contestantId": 2, "judgeId": 2, "criteriaId": 12, "eventId": 1, "value": 40},
    {"contestantId": 3, "judgeId": 2, "criteriaId": 11, "eventId": 1, "value": 30},
    {"contestantId": 3, "judgeId": 2, "criteriaId": 12, "eventId": 1, "value": 30},
    {"contestantId": 1, "judgeId": 2, "criteriaId": 21, "eventId": 1, "value": 50},
    {"contestantId": 1, "judgeId": 2, "criteriaId": 22, "eventId": 1, "value": 30},
    {"contestantId": 2, "judgeId": 2, "criteriaId": 21, "eventId": 1, "value": 50},
    {"contestantId": 2, "judgeId": 2, "criteriaId": 22, "eventId": 1, "value": 30}
  ]
}"#;

/// One 100-point category. Judge 1 totals 90/90/70, judge 2 totals 80/90/60.
const TIED_PANEL: &str = r#"{
  "events": [{"id": 7, "name": "Tied Panel", "date": "2025-06-01", "status": "ACTIVE"}],
  "contestants": [
    {"id": 1, "eventId": 7, "number": 1, "name": "Ana"},
    {"id": 2, "eventId": 7, "number": 2, "name": "Bea"},
    {"id": 3, "eventId": 7, "number": 3, "name": "Cora"}
  ],
  "judges": [
    {"id": 1, "eventId": 7, "number": 1, "name": "Chief"},
    {"id": 2, "eventId": 7, "number": 2, "name": "Panel"}
  ],
  "criteria": [
    {"id": 1, "eventId": 7, "name": "Gown", "identifier": "best-in-gown"},
    {"id": 2, "eventId": 7, "name": "Elegance", "parentId": 1, "weight": 100}
  ],
  "scores": [
    {"contestantId": 1, "judgeId": 1, "criteriaId": 2, "eventId": 7, "value": 90},
    {"contestantId": 2, "judgeId": 1, "criteriaId": 2, "eventId": 7, "value": 90},
    {"contestantId": 3, "judgeId": 1, "criteriaId": 2, "eventId": 7, "value": 70},
    {"contestantId": 1, "judgeId": 2, "criteriaId": 2, "eventId": 7, "value": 80},
    {"contestantId": 2, "judgeId": 2, "criteriaId": 2, "eventId": 7, "value": 90},
    {"contestantId": 3, "judgeId": 2, "criteriaId": 2, "eventId": 7, "value": 60}
  ]
}"#;

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").expect("binary should compile");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_snapshot(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("scores.json");
    fs::write(&path, content).expect("snapshot should write");
    path
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be json")
}

fn numbers(rows: &Value, field: &str) -> Vec<f64> {
    rows.as_array()
        .expect("rows should be an array")
        .iter()
        .map(|row| row[field].as_f64().expect("field should be numeric"))
        .collect()
}

#[test]
fn leaderboard_markdown_shows_averaged_ties() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("leaderboard")
        .arg(&snapshot)
        .args(["--category", "best-in-talent"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Search 2025 (2025-03-01)"))
        .stdout(predicate::str::contains(
            "| **1** | **Ana** | **100.00** | **1** | **85.00** | **1.5** | **2.5** | **1** |",
        ))
        .stdout(predicate::str::contains("| 2 | Bea | 70.00 | 2 | 85.00 | 1.5 | 3.5 | 2 |"));
}

#[test]
fn unknown_category_is_not_found() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("leaderboard")
        .arg(&snapshot)
        .args(["--category", "does-not-exist"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "not found: category 'does-not-exist' does not exist in event 1",
        ));
}

#[test]
fn first_seen_judges_cap_leaderboard_columns() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    let report = json_stdout(
        tally()
            .arg("leaderboard")
            .arg(&snapshot)
            .args(["--category", "best-in-interview"])
            .args(["--judges", "first-seen", "--max-judges", "1"])
            .args(["--format", "json"]),
    );
    assert_eq!(report["view"], "leaderboard");
    assert_eq!(report["judges"].as_array().map(Vec::len), Some(1));
    assert_eq!(numbers(&report["rows"], "final_rank"), vec![2.0, 1.0, 3.0]);
}

#[test]
fn winner_sums_raw_scores() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("winner")
        .arg(&snapshot)
        .args(["--category", "best-in-interview"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Winner: **#2 Bea** with 170.00"));
}

#[test]
fn rank_per_judge_labels_top_three() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    let report = json_stdout(
        tally()
            .arg("rank-per-judge")
            .arg(&snapshot)
            .args(["--format", "json"]),
    );
    assert_eq!(numbers(&report["rows"], "rank_sum"), vec![2.0, 3.0, 5.0]);
    let labels = report["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["placement"].as_str().unwrap_or("").to_string())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["1st", "2nd", "3rd"]);
}

#[test]
fn tied_panel_aggregates_to_expected_final_ranks() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), TIED_PANEL);
    fs::write(
        dir.path().join("tally.toml"),
        "[ranking]\njudge_ties = \"competition\"\n",
    )
    .expect("config should write");

    let report = json_stdout(
        tally()
            .arg("rank-per-judge")
            .arg(&snapshot)
            .args(["--format", "json"]),
    );
    let ranks = report["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["ranks"].clone())
        .collect::<Vec<_>>();
    assert_eq!(
        ranks,
        vec![
            serde_json::json!([1.0, 2.0]),
            serde_json::json!([1.0, 1.0]),
            serde_json::json!([3.0, 3.0])
        ]
    );
    assert_eq!(numbers(&report["rows"], "rank_sum"), vec![3.0, 2.0, 6.0]);

    let finals = json_stdout(
        tally()
            .arg("final-rank")
            .arg(&snapshot)
            .args(["--format", "json"]),
    );
    let order = finals["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| (row["contestant"]["number"].as_u64(), row["final_rank"].as_f64()))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            (Some(2), Some(1.0)),
            (Some(1), Some(2.0)),
            (Some(3), Some(3.0))
        ]
    );
}

#[test]
fn repeated_runs_print_identical_output() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    let run = || {
        tally()
            .arg("final-rank")
            .arg(&snapshot)
            .output()
            .expect("command should run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn breakdown_and_scoresheet_lookups() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("breakdown")
        .arg(&snapshot)
        .args(["--contestant", "2"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| J2 Panel | 85.00 | 80.00 | 165.00 | 1 |"))
        .stdout(predicate::str::contains("Final rank: 2"));

    tally()
        .arg("breakdown")
        .arg(&snapshot)
        .args(["--contestant", "9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("contestant #9 does not exist"));

    tally()
        .arg("scoresheet")
        .arg(&snapshot)
        .args(["--judge", "2"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Scoresheet: J2 Panel (locked)"));
}

#[test]
fn explicit_event_without_scores_still_ranks() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("final-rank")
        .arg(&snapshot)
        .args(["--event", "2"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("# Search 2024 (2024-03-01)"));

    tally()
        .arg("final-rank")
        .arg(&snapshot)
        .args(["--event", "99"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("event 99 does not exist"));
}

#[test]
fn lint_reports_warnings_and_blocking() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);

    tally()
        .arg("lint")
        .arg(&snapshot)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[WARN] judges.unlocked"));

    let broken = PAGEANT.replace(
        r#""parentId": 20, "weight": 40"#,
        r#""parentId": 99, "weight": 40"#,
    );
    let snapshot = write_snapshot(dir.path(), &broken);
    tally()
        .arg("lint")
        .arg(&snapshot)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[BLOCKING] criteria.orphan_sub"));
}

#[test]
fn submit_replaces_judge_scores_and_writes_receipt() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);
    let batch = dir.path().join("batch.json");
    fs::write(
        &batch,
        r#"[
  {"contestantId": 3, "subCriteriaId": 11, "value": 50},
  {"contestantId": 3, "subCriteriaId": 12, "value": 50}
]"#,
    )
    .expect("batch should write");

    tally()
        .arg("submit")
        .arg(&snapshot)
        .args(["--judge", "1"])
        .arg("--batch")
        .arg(&batch)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "submitted 2 score(s) for judge #1 in event 1",
        ))
        .stdout(predicate::str::contains("receipt:"));

    let receipts = fs::read_dir(dir.path().join(".tally/receipts"))
        .expect("receipts dir should exist")
        .count();
    assert_eq!(receipts, 1);

    // Judge 1 now only scored contestant 3, so Cora wins talent on that sheet.
    tally()
        .arg("scoresheet")
        .arg(&snapshot)
        .args(["--judge", "1"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "| 1 | Ana | - | - | 0.00 | - | - | 0.00 | 0.00 |",
        ))
        .stdout(predicate::str::contains(
            "| 3 | Cora | 50.00 | 50.00 | 100.00 | - | - | 0.00 | 100.00 |",
        ));
}

#[test]
fn submit_rejects_locked_judge_and_bad_values() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), PAGEANT);
    let batch = dir.path().join("batch.json");
    fs::write(
        &batch,
        r#"[{"contestantId": 1, "subCriteriaId": 22, "value": 41}]"#,
    )
    .expect("batch should write");

    tally()
        .arg("submit")
        .arg(&snapshot)
        .args(["--judge", "2"])
        .arg("--batch")
        .arg(&batch)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("judge #2 is locked"));

    tally()
        .arg("submit")
        .arg(&snapshot)
        .args(["--judge", "1"])
        .arg("--batch")
        .arg(&batch)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("exceeds its weight of 40"));

    let unchanged = fs::read_to_string(&snapshot).expect("snapshot should read");
    assert_eq!(unchanged, PAGEANT);
}
