#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

/// Run worklog against the database and config inside `dir`.
pub fn worklog(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("worklog");
    cmd.current_dir(dir.path())
        .arg("--db")
        .arg(dir.path().join("logs.db"))
        .arg("--config")
        .arg(dir.path().join("config.toml"));
    cmd
}

/// Run worklog with only `--config` pinned, so the db path comes from config.
pub fn worklog_without_db(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("worklog");
    cmd.current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("config.toml"));
    cmd
}

/// Run a command that must succeed and parse its stdout as JSON.
pub fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

/// Add an entry and return its id.
pub fn add(dir: &assert_fs::TempDir, args: &[&str]) -> i64 {
    let result = run_json(worklog(dir).arg("add").args(args));
    result["log_id"].as_i64().expect("log_id")
}

/// Total number of stored entries.
pub fn total(dir: &assert_fs::TempDir) -> i64 {
    run_json(worklog(dir).arg("stats"))["total"]
        .as_i64()
        .expect("total")
}
