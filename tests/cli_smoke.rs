use assert_cmd::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const HEADER: &str = "commit,file,line,depth,length,type,author,date,time,timezone,datetime";

fn write_log(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("loc.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "{HEADER}").unwrap();
    for row in rows {
        writeln!(f, "{row}").unwrap();
    }
    f.sync_all().unwrap();
    path
}

fn sample_log(dir: &Path) -> PathBuf {
    write_log(
        dir,
        &[
            "aaaaaaa1,index.html,1,0,15,html,ana,2024-01-01,02:00:00-08:00,-08:00,2024-01-01T02:00:00-08:00",
            "aaaaaaa1,index.html,2,1,40,html,ana,2024-01-01,02:00:00-08:00,-08:00,2024-01-01T02:00:00-08:00",
            "bbbbbbb2,style.css,1,0,12,css,ana,2024-01-02,14:30:00-08:00,-08:00,2024-01-02T14:30:00-08:00",
            "bbbbbbb2,main.js,1,0,30,js,ana,2024-01-02,14:30:00-08:00,-08:00,2024-01-02T14:30:00-08:00",
            "bbbbbbb2,main.js,2,2,22,js,ana,2024-01-02,14:30:00-08:00,-08:00,2024-01-02T14:30:00-08:00",
            "ccccccc3,main.js,3,1,18,js,ana,2024-01-04,20:00:00-08:00,-08:00,2024-01-04T20:00:00-08:00",
        ],
    )
}

fn run_json(log: &Path, args: &[&str]) -> serde_json::Value {
    let mut cmd = Command::cargo_bin("gloc").unwrap();
    cmd.arg("--log").arg(log).args(args);
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn stats_json_has_twelve_entries() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["stats", "--json"]);
    let stats = v["stats"].as_array().unwrap();
    assert_eq!(stats.len(), 12);
    assert_eq!(stats[0]["label"], "Total LOC");
    assert_eq!(stats[0]["value"], 6);
    assert_eq!(stats[1]["value"], 3);
    assert_eq!(stats[3]["value"], "main.js (3)");
}

#[test]
fn commits_json_is_chronological_without_lines() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["commits", "--json"]);
    let commits = v["commits"].as_array().unwrap();
    let ids: Vec<&str> = commits.iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["aaaaaaa1", "bbbbbbb2", "ccccccc3"]);
    assert_eq!(commits[1]["hour_frac"], 14.5);
    assert_eq!(commits[1]["total_lines"], 3);
    assert!(commits[1].get("lines").is_none());
}

#[test]
fn select_by_hours_returns_breakdown() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["select", "--hours", "12-18", "--json"]);
    assert_eq!(v["selected"], serde_json::json!(["bbbbbbb2"]));
    let breakdown = v["breakdown"].as_array().unwrap();
    assert_eq!(breakdown[0]["type"], "js");
    assert_eq!(breakdown[0]["count"], 2);
    assert_eq!(breakdown[1]["type"], "css");
}

#[test]
fn select_progress_brushes_only_visible_commits() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["select", "--hours", "0-24", "--json"]);
    assert_eq!(v["selected"].as_array().unwrap().len(), 3);

    let v = run_json(&log, &["select", "--hours", "0-24", "--progress", "0", "--json"]);
    assert_eq!(v["selected"], serde_json::json!(["aaaaaaa1"]));
    assert_eq!(v["breakdown"][0]["type"], "html");
}

#[test]
fn select_without_region_selects_nothing() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["select", "--json"]);
    assert!(v["region"].is_null());
    assert_eq!(v["selected"].as_array().unwrap().len(), 0);
    assert_eq!(v["breakdown"].as_array().unwrap().len(), 0);

    let v = run_json(&log, &["select", "--region", "0,0,1,1", "--json"]);
    assert_eq!(v["selected"].as_array().unwrap().len(), 0);
}

#[test]
fn timeline_progress_limits_commits() {
    let dir = tempdir().unwrap();
    let log = sample_log(dir.path());

    let v = run_json(&log, &["timeline", "--progress", "0", "--narrative", "--json"]);
    assert_eq!(v["commit_count"], 1);
    assert_eq!(v["narrative"].as_array().unwrap().len(), 1);

    let v = run_json(&log, &["timeline", "--json"]);
    assert_eq!(v["commit_count"], 3);
    assert_eq!(v["files"][0]["file"], "main.js");
}

#[test]
fn malformed_rows_fail_unless_skipped() {
    let dir = tempdir().unwrap();
    let log = write_log(
        dir.path(),
        &[
            "c1,a.js,1,0,10,js,ana,2024-01-01,,,2024-01-01T10:00:00",
            "c1,a.js,x,0,10,js,ana,2024-01-01,,,2024-01-01T10:00:00",
        ],
    );

    let mut cmd = Command::cargo_bin("gloc").unwrap();
    cmd.arg("--log").arg(&log).args(["stats", "--json"]);
    cmd.assert().failure();

    let mut cmd = Command::cargo_bin("gloc").unwrap();
    cmd.arg("--log")
        .arg(&log)
        .arg("--skip-invalid")
        .args(["stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["stats"][0]["value"], 1);
}

#[test]
fn empty_log_reports_no_data() {
    let dir = tempdir().unwrap();
    let log = write_log(dir.path(), &[]);

    let mut cmd = Command::cargo_bin("gloc").unwrap();
    cmd.arg("--log").arg(&log).args(["stats"]);
    cmd.assert().failure();

    let v = run_json(&log, &["select", "--hours", "0-24", "--json"]);
    assert_eq!(v["selected"].as_array().unwrap().len(), 0);
}
