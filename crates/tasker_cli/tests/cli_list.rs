mod common;

use common::TestEnv;
use predicates::prelude::*;

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} missing from:\n{haystack}"))
}

fn ids(value: &serde_json::Value) -> Vec<u64> {
    value
        .as_array()
        .expect("array output")
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn empty_store_says_so() {
    let env = TestEnv::new();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks stored.\n");
}

#[test]
fn list_shows_table_of_pending_tasks() {
    let env = TestEnv::new();
    env.add(&["Write report", "--priority", "high", "--due", "2024-03-20"]);
    env.add(&["Water plants"]);
    env.run_ok(&["complete", "2"]);

    let stdout = env.run_ok(&["list"]);
    let header = stdout.lines().next().unwrap();
    for column in ["ID", "Status", "Priority", "Due", "Description"] {
        assert!(header.contains(column), "missing {column} in {header}");
    }
    assert!(stdout.contains("Write report"));
    assert!(stdout.contains("2024-03-20"));
    assert!(!stdout.contains("Water plants"));
}

#[test]
fn view_flags_select_tasks() {
    let env = TestEnv::new();
    env.add(&["open"]);
    env.add(&["done"]);
    env.run_ok(&["complete", "2"]);

    assert_eq!(ids(&env.run_json(&["list"])), [1]);
    assert_eq!(ids(&env.run_json(&["list", "--pending"])), [1]);
    assert_eq!(ids(&env.run_json(&["list", "--completed"])), [2]);
    assert_eq!(ids(&env.run_json(&["list", "--all"])), [1, 2]);
}

#[test]
fn view_flags_are_mutually_exclusive() {
    let env = TestEnv::new();
    env.cmd()
        .args(["list", "--all", "--completed"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: invalid_input - "));
}

#[test]
fn filter_with_no_hits_has_its_own_message() {
    let env = TestEnv::new();
    env.add(&["open"]);

    env.cmd()
        .args(["list", "--completed"])
        .assert()
        .success()
        .stdout("No tasks found for the selected filter.\n");
}

#[test]
fn sort_by_priority_and_due() {
    let env = TestEnv::new();
    env.add(&["Undated chore"]);
    env.add(&["Submit essay", "--priority", "high", "--due", "2024-03-20"]);
    env.add(&["Pay rent", "--priority", "low", "--due", "2024-03-01"]);

    assert_eq!(ids(&env.run_json(&["list", "--sort", "priority"])), [2, 1, 3]);
    assert_eq!(ids(&env.run_json(&["list", "--sort", "due"])), [3, 2, 1]);
    assert_eq!(ids(&env.run_json(&["list"])), [1, 2, 3]);

    let table = env.run_ok(&["list", "--sort", "due"]);
    assert!(position(&table, "Pay rent") < position(&table, "Submit essay"));
    assert!(position(&table, "Submit essay") < position(&table, "Undated chore"));
}

#[test]
fn unknown_sort_key_is_rejected() {
    let env = TestEnv::new();
    env.cmd()
        .args(["list", "--sort", "colour"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: invalid_input - "));
}

#[test]
fn default_sort_comes_from_config() {
    let env = TestEnv::new();
    std::fs::write(env.config_path(), r#"{"default_sort": "due"}"#).unwrap();
    env.add(&["Undated chore"]);
    env.add(&["Pay rent", "--due", "2024-03-01"]);

    assert_eq!(ids(&env.run_json(&["list"])), [2, 1]);
    assert_eq!(
        ids(&env.run_json(&["--config-override", "sort=creation", "list"])),
        [1, 2]
    );
}

#[test]
fn tag_project_and_due_filters() {
    let env = TestEnv::new();
    env.add(&["Essay", "--tags", "school,urgent", "--due", "2024-03-20"]);
    env.add(&["Lab report", "--tags", "school", "--project", "chemistry"]);
    env.add(&["Groceries", "--due", "2024-04-02"]);

    assert_eq!(ids(&env.run_json(&["list", "--tag", "school"])), [1, 2]);
    assert_eq!(
        ids(&env.run_json(&["list", "--tag", "school", "--tag", "urgent"])),
        [1]
    );
    assert_eq!(ids(&env.run_json(&["list", "--project", "chemistry"])), [2]);
    assert_eq!(ids(&env.run_json(&["list", "--before", "2024-03-31"])), [1]);
    assert_eq!(ids(&env.run_json(&["list", "--after", "2024-03-20"])), [1, 3]);
}

#[test]
fn color_flag_uses_theme_palette() {
    let env = TestEnv::new();
    env.add(&["open"]);

    let plain = env.run_ok(&["list"]);
    assert!(!plain.contains('\x1b'));

    let noir = env.run_ok(&["--color", "--config-override", "theme=dark", "list"]);
    assert!(noir.contains("\x1b[38;5;208m[ ]\x1b[0m"));
}
