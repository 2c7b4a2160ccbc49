//! End-to-end tests for the complete logging flow.
//!
//! Runs the real binary against a temporary data file:
//! add → list → summary → analytics → delete → reload.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn tl_binary() -> String {
    env!("CARGO_BIN_EXE_tl").to_string()
}

/// Scratch environment: HOME points at the temp dir so no user config is read.
struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn data_path(&self) -> PathBuf {
        self.temp.path().join("data/time_logs.json")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(tl_binary())
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join(".config"))
            .env("TL_DATA_PATH", self.data_path())
            .env_remove("RUST_LOG")
            .args(args)
            .output()
            .expect("failed to run tl")
    }

    /// Runs `args`, asserting success, and returns stdout.
    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "tl {} should succeed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).unwrap()
    }
}

fn stored_entries(path: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_full_flow() {
    let env = Sandbox::new();

    // Empty store: helpful hints, no data file yet
    assert!(env.ok(&["list"]).contains("No entries yet"));
    assert!(!env.data_path().exists());

    env.ok(&[
        "add",
        "--description",
        "Sprint planning",
        "--project",
        "Backend",
        "--date",
        "2024-01-15",
        "--range",
        "09:00-12:00",
        "--range",
        "1:00 PM-5:30 PM",
    ]);
    env.ok(&[
        "add",
        "-d",
        "Inbox triage",
        "--date",
        "2024-01-10",
        "--hours",
        "2",
    ]);
    env.ok(&[
        "add",
        "-d",
        "Quarterly review",
        "-p",
        "Client Meeting",
        "--date",
        "2024-01-12",
        "--hours",
        "10",
    ]);

    // Write-through: the file already holds all three entries
    let stored = stored_entries(&env.data_path());
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0]["hours"], 7.5);
    assert_eq!(stored[0]["time_ranges"][0]["start"], "09:00 AM");
    assert_eq!(stored[0]["time_ranges"][1]["end"], "05:30 PM");

    // Newest first
    let listed = env.json(&["list", "--json"]);
    let dates: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, ["2024-01-15", "2024-01-12", "2024-01-10"]);

    let found = env.json(&["list", "--json", "--search", "client"]);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let summary = env.json(&["summary", "--json"]);
    assert_eq!(summary["from"], "2024-01-10");
    assert_eq!(summary["to"], "2024-01-15");
    assert_eq!(summary["total_hours"], 19.5);
    assert_eq!(summary["avg_hours_per_day"], 6.5);
    assert_eq!(summary["days_logged"], 3);

    let analytics = env.json(&["analytics", "--json"]);
    assert_eq!(analytics["by_project"][0]["project"], "Client Meeting");
    assert_eq!(analytics["by_week"].as_array().unwrap().len(), 2);

    // Delete by ID prefix
    let target = listed[1]["id"].as_str().unwrap();
    let deleted = env.ok(&["delete", &target[..8]]);
    assert!(deleted.starts_with("Deleted 2024-01-12 Client Meeting"));

    let remaining = env.json(&["list", "--json"]);
    assert_eq!(remaining.as_array().unwrap().len(), 2);
    assert!(
        remaining
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["id"] != target)
    );

    let status = env.ok(&["status"]);
    assert!(status.contains("Entries: 2"));
}

#[test]
fn test_rejected_input_leaves_store_untouched() {
    let env = Sandbox::new();
    env.ok(&["add", "-d", "Setup", "--date", "2024-03-01", "--hours", "1.5"]);
    let before = std::fs::read_to_string(env.data_path()).unwrap();

    let cases: &[&[&str]] = &[
        // End before start
        &["add", "-d", "Late", "--range", "17:00-09:00"],
        // Blank description
        &["add", "-d", "  ", "--hours", "2"],
        // Hours out of bounds
        &["add", "-d", "Marathon", "--hours", "30"],
        // Both duration modes at once
        &["add", "-d", "Both", "--hours", "2", "--range", "09:00-10:00"],
        // Neither duration mode
        &["add", "-d", "Neither"],
        // Unknown ID
        &["delete", "does-not-exist"],
    ];
    for args in cases {
        let output = env.run(args);
        assert!(!output.status.success(), "tl {} should fail", args.join(" "));
    }

    let after = std::fs::read_to_string(env.data_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_loads_file_without_ids() {
    let env = Sandbox::new();
    std::fs::create_dir_all(env.data_path().parent().unwrap()).unwrap();
    std::fs::write(
        env.data_path(),
        r#"[
  {
    "date": "2024-02-01",
    "hours": 3.0,
    "description": "Imported",
    "project": "",
    "timestamp": "2024-02-01 17:00:00"
  }
]"#,
    )
    .unwrap();

    let listed = env.json(&["list", "--json"]);
    assert_eq!(listed[0]["description"], "Imported");

    // IDs are assigned once and then stay stable
    let stored = stored_entries(&env.data_path());
    let id = stored[0]["id"].as_str().unwrap().to_string();
    let listed_again = env.json(&["list", "--json"]);
    assert_eq!(listed_again[0]["id"], id.as_str());
}

#[test]
fn test_no_subcommand_prints_help() {
    let env = Sandbox::new();
    let output = env.ok(&[]);
    assert!(output.contains("Usage:"));
}
