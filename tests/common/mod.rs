//! Common test utilities shared across integration tests.
//!
//! Helpers here drive the `rbl` binary and parse its robot output without
//! depending on the library's internal types.

#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;

/// `rbl` with logging silenced and no ambient config.
pub fn rbl(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rbl").expect("rbl binary");
    cmd.current_dir(workdir)
        .env_remove("RUST_LOG")
        .env_remove("RBL_CONFIG")
        .env("XDG_CONFIG_HOME", workdir.join(".xdg"))
        .env("HOME", workdir)
        .arg("--quiet");
    for key in [
        "RBL_STEPS",
        "RBL_SLATE_SIZE",
        "RBL_SEED",
        "RBL_MODEL",
        "RBL_ALGO",
        "RBL_EPSILON",
        "RBL_ALPHA_PRIOR",
        "RBL_BETA_PRIOR",
        "RBL_UCB_CONFIDENCE",
        "RBL_TEMPERATURE",
        "RBL_DEFAULT_SATISFACTION",
        "RBL_OUTPUT_FORMAT",
        "RBL_LOG_DIR",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Run `rbl --robot <args>` and return the parsed JSON envelope.
pub fn robot_json(workdir: &Path, args: &[&str]) -> Value {
    let output = rbl(workdir)
        .arg("--robot")
        .args(args)
        .output()
        .expect("run rbl");
    assert!(
        output.status.success(),
        "rbl {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("robot output is JSON")
}
