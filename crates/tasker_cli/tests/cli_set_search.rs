mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn show_prints_details() {
    let env = TestEnv::new();
    env.add(&[
        "Submit essay",
        "--priority",
        "high",
        "--due",
        "2024-03-20",
        "--project",
        "english",
    ]);

    let stdout = env.run_ok(&["show", "1"]);
    assert!(stdout.starts_with("Task 1: Submit essay\n"));
    assert!(stdout.contains("  Status: pending"));
    assert!(stdout.contains("  Priority: high"));
    assert!(stdout.contains("  Due: 2024-03-20"));
    assert!(stdout.contains("  Project: english"));
}

#[test]
fn show_missing_task_is_not_found() {
    let env = TestEnv::new();
    env.cmd()
        .args(["show", "7"])
        .assert()
        .code(1)
        .stderr("ERROR: not_found - task 7 not found\n");
}

#[test]
fn set_updates_and_clears_fields() {
    let env = TestEnv::new();
    env.add(&["Submit essay", "--due", "2024-03-20", "--project", "english"]);

    env.cmd()
        .args(["set", "1", "--priority", "low", "--due", "", "--tags", "school"])
        .assert()
        .success()
        .stdout("Updated task 1: Submit essay\n");

    let task = env.run_json(&["show", "1"]);
    assert_eq!(task["priority"], "low");
    assert!(task["due"].is_null());
    assert_eq!(task["tags"], serde_json::json!(["school"]));
    assert_eq!(task["project"], "english");
}

#[test]
fn set_without_changes_is_rejected() {
    let env = TestEnv::new();
    env.add(&["Submit essay"]);
    let before = env.read_store();

    env.cmd()
        .args(["set", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: invalid_input - "));
    env.cmd()
        .args(["set", "1", "--description", " "])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: invalid_input - "));

    assert_eq!(env.read_store(), before);
}

#[test]
fn search_matches_description_and_note() {
    let env = TestEnv::new();
    env.add(&["Call dentist"]);
    env.add(&["Groceries", "--note", "ask the Dentist about floss"]);
    env.add(&["Pay rent"]);

    let hits = env.run_json(&["search", "DENTIST"]);
    let ids: Vec<u64> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2]);

    env.cmd()
        .args(["search", "plumber"])
        .assert()
        .success()
        .stdout("No matching tasks.\n");
}

#[test]
fn suggest_ranks_pending_tasks() {
    let env = TestEnv::new();
    env.add(&["Undated", "--priority", "high"]);
    env.add(&["Later", "--due", "2024-05-01"]);
    env.add(&["Sooner", "--due", "2024-04-01"]);
    env.add(&["Finished", "--due", "2024-01-01"]);
    env.run_ok(&["complete", "4"]);

    let stdout = env.run_ok(&["suggest", "--limit", "2"]);
    assert!(stdout.starts_with("Top 2 suggestions:\n"));
    assert!(stdout.contains("Sooner"));
    assert!(stdout.contains("Later"));
    assert!(!stdout.contains("Undated"));
    assert!(!stdout.contains("Finished"));
}

#[test]
fn suggest_on_empty_store() {
    let env = TestEnv::new();
    env.cmd()
        .arg("suggest")
        .assert()
        .success()
        .stdout("No suggestions.\n");
}

#[test]
fn export_writes_markdown_and_json() {
    let env = TestEnv::new();
    env.add(&["Submit essay", "--priority", "high", "--due", "2024-03-20"]);
    env.add(&["Undated chore"]);

    let markdown = env.dir.path().join("out").join("tasks.md");
    env.cmd()
        .arg("export")
        .arg(&markdown)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Exported 2 tasks to "));
    let written = fs::read_to_string(&markdown).unwrap();
    assert_eq!(
        written,
        "# Tasks Export\n\n\
         - [ ] Submit essay (priority: high, due 2024-03-20)\n\
         - [ ] Undated chore (priority: medium)\n"
    );

    let backup = env.dir.path().join("backup.json");
    env.cmd().arg("export").arg(&backup).assert().success();
    assert_eq!(fs::read_to_string(&backup).unwrap(), env.read_store());
}

#[test]
fn export_rejects_unknown_extension() {
    let env = TestEnv::new();
    env.add(&["Submit essay"]);
    let target = env.dir.path().join("tasks.csv");

    env.cmd()
        .arg("export")
        .arg(&target)
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: invalid_input - "));
    assert!(!target.exists());
}
