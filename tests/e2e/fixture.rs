use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Instant;

use serde_json::Value;
use tempfile::TempDir;

use super::common::rbl;

/// Isolated working directory plus step logging for a workflow.
pub struct E2EFixture {
    pub scenario: String,
    pub temp_dir: TempDir,
    started: Instant,
    step: usize,
}

impl E2EFixture {
    pub fn new(scenario: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        println!("[E2E] {scenario}: {}", temp_dir.path().display());
        Self {
            scenario: scenario.to_string(),
            temp_dir,
            started: Instant::now(),
            step: 0,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn log_step(&mut self, description: &str) {
        self.step += 1;
        println!(
            "[E2E] {} step {}: {description} (+{:?})",
            self.scenario,
            self.step,
            self.started.elapsed()
        );
    }

    pub fn run(&self, args: &[&str]) -> Output {
        rbl(self.root()).args(args).output().expect("run rbl")
    }

    pub fn run_robot(&self, args: &[&str]) -> Value {
        let output = rbl(self.root())
            .arg("--robot")
            .args(args)
            .output()
            .expect("run rbl");
        self.assert_success(&output, &args.join(" "));
        serde_json::from_slice(&output.stdout).expect("robot output is JSON")
    }

    pub fn assert_success(&self, output: &Output, what: &str) {
        assert!(
            output.status.success(),
            "[{}] `{what}` failed\nstdout: {}\nstderr: {}",
            self.scenario,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    pub fn read_json(&self, relative: &str) -> Value {
        let raw = std::fs::read_to_string(self.path(relative)).expect("read json");
        serde_json::from_str(&raw).expect("parse json")
    }
}
