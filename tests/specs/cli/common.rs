// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Tree response with a root, a closed child, a closed root and an orphan.
pub const TREE_JSON: &str = r#"{
    "AAH-1": {"key": "AAH-1", "type": "Epic", "status": "Open", "summary": "Platform", "parent_key": null, "fix_versions": ["2.4"]},
    "AAH-2": {"key": "AAH-2", "type": "Story", "status": "Closed", "summary": "Login", "parent_key": "AAH-1", "completed": "2024-01-02"},
    "AAH-10": {"key": "AAH-10", "type": "Task", "status": "In Progress", "summary": "Wire <form>", "parent_key": "AAH-2"},
    "AAH-3": {"key": "AAH-3", "type": "Bug", "status": "Closed", "summary": "Old crash", "parent_key": null},
    "AAP-1": {"key": "AAP-1", "type": null, "status": "Open", "summary": "Orphan", "parent_key": "ZZZ-404"}
}"#;

pub const BURNDOWN_JSON: &str = r#"{"2024-01-01": 12, "2024-01-08": 9, "2024-01-15": 4}"#;

pub const FIX_BURNDOWN_JSON: &str = r#"{
    "2.4": {"2024-01-01": 5, "2024-02-01": 3},
    "2.5": {"2024-02-01": 8}
}"#;

pub const CHURN_JSON: &str = r#"{
    "opened": {"2024-01-01": 2},
    "closed": {"2024-01-02": 1}
}"#;

pub fn tix() -> Command {
    cargo_bin_cmd!("tix")
}

/// Temporary working directory isolated from the caller's environment.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Workspace {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Writes a file relative to the workspace and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp.path().join(name)).unwrap()
    }

    /// `tix` running inside the workspace without ambient configuration.
    pub fn tix(&self) -> Command {
        let mut cmd = tix();
        cmd.current_dir(self.temp.path())
            .env_remove("TIX_SERVER")
            .env_remove("TIX_CONFIG")
            .env_remove("TIX_TIMINGS")
            .env_remove("RUST_LOG");
        cmd
    }
}
