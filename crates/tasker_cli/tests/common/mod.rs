#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Isolated home for one test: its own task file and config path.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create tempdir"),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    /// Command with no `--data` flag; the store comes from env or config.
    pub fn bare_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tasker").expect("binary");
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("TASKER_CONFIG_PATH", self.config_path())
            .env_remove("TASKER_STORE_PATH")
            .env_remove("TASKER_LOG")
            .write_stdin("");
        cmd
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--data").arg(self.store_path());
        cmd
    }

    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.cmd().args(args).output().expect("run");
        assert!(
            output.status.success(),
            "tasker {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut all: Vec<&str> = args.to_vec();
        all.push("--json");
        let stdout = self.run_ok(&all);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|err| panic!("parse JSON failed: {err}\nstdout: {stdout}"))
    }

    pub fn add(&self, args: &[&str]) -> u64 {
        let mut all = vec!["add"];
        all.extend_from_slice(args);
        let task = self.run_json(&all);
        task["id"].as_u64().expect("numeric id")
    }

    pub fn read_store(&self) -> String {
        fs::read_to_string(self.store_path()).expect("read store")
    }

    pub fn write_store(&self, content: &str) {
        fs::write(self.store_path(), content).expect("write store");
    }

    pub fn stored_records(&self) -> Vec<Value> {
        match serde_json::from_str(&self.read_store()).expect("store is JSON") {
            Value::Array(records) => records,
            other => panic!("store is not an array: {other}"),
        }
    }
}
