//! End-to-end tests for the `navden` binary.
//!
//! Each test points `HOME` at a temporary directory so config, plan and log
//! files never touch the real `~/.navden`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn navden(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_navden"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run navden binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_plan_edits_persist_between_runs() {
    let home = TempDir::new().unwrap();

    let listing = navden(home.path(), &["plan", "list"]);
    assert!(listing.status.success());
    assert!(stdout(&listing).contains("4 waypoints"));

    assert!(navden(home.path(), &["plan", "clear"]).status.success());
    let added = navden(home.path(), &["plan", "add", "120", "80"]);
    assert!(added.status.success(), "{}", stderr(&added));
    assert!(stdout(&added).contains("Added waypoint"));

    let listing = navden(home.path(), &["plan", "list"]);
    assert!(stdout(&listing).contains("1 waypoints"));
    assert!(home.path().join(".navden/waypoints.json").exists());
}

#[test]
fn test_plan_unknown_waypoint_fails() {
    let home = TempDir::new().unwrap();
    let output = navden(home.path(), &["plan", "remove", "99"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error:"));
}

#[test]
fn test_plan_rejects_nan_and_keeps_file_loadable() {
    let home = TempDir::new().unwrap();
    assert!(navden(home.path(), &["plan", "clear"]).status.success());

    let output = navden(home.path(), &["plan", "add", "NaN", "10"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("finite"));

    let listing = navden(home.path(), &["plan", "list"]);
    assert!(listing.status.success(), "{}", stderr(&listing));
    assert!(stdout(&listing).contains("No waypoints planned"));
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();

    let set = navden(home.path(), &["config", "set", "jamming.start", "2.5"]);
    assert!(set.status.success(), "{}", stderr(&set));

    let get = navden(home.path(), &["config", "get", "jamming.start"]);
    assert_eq!(stdout(&get).trim(), "2.5");

    let bad = navden(home.path(), &["config", "set", "demo.blend", "7"]);
    assert_eq!(bad.status.code(), Some(1));
}

#[test]
fn test_unreachable_backend_prints_hint() {
    let home = TempDir::new().unwrap();
    let output = navden(
        home.path(),
        &["health", "--backend", "http://127.0.0.1:1"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Could not reach the NAVDEN backend"));
}

#[test]
fn test_headless_demo_runs_to_duration() {
    let home = TempDir::new().unwrap();
    let output = navden(
        home.path(),
        &["demo", "--headless", "--seed", "7", "--duration", "0.5"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("t="));
    assert!(text.contains("Session summary"));
}
