//! End-to-end CLI tests for chatpulse.
//!
//! These tests run the actual binary against transcript fixtures and check
//! the report, the optional message export and the console output.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const CHAT: &str = "\
Messages and calls are end-to-end encrypted.
[15/01/24, 10:30:00 AM] Alice: Good morning! Coffee later?
[15/01/24, 10:35 AM] Bob: Sure, the usual place
see you at noon
[15/01/24, 10:36 AM] Bob: <Media omitted>
[16/01/24, 9:00 PM] Alice: That was a great coffee
[17/01/24, 12:15 AM] Alice: Good night
";

/// Creates a temporary directory holding the transcript fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("chat.txt"), CHAT).unwrap();
    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("orphans.txt"), "no headers here\nat all\n").unwrap();

    // Two messages a day for 4 days, then eight a day
    let mut busy = String::new();
    for day in 1..=8u32 {
        let per_day = if day <= 4 { 2 } else { 8 };
        for k in 0..per_day {
            let sender = if k % 2 == 0 { "Alice" } else { "Bob" };
            busy.push_str(&format!("[{day:02}/03/24, 9:{k:02} AM] {sender}: message {k}\n"));
        }
    }
    fs::write(dir.path().join("busy.txt"), busy).unwrap();
    dir
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn input(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn read_json(path: &PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn chatpulse_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatpulse"));
    Command::from_std(cmd)
}

// ============================================================================
// Basic functionality
// ============================================================================

mod basic {
    use super::*;

    #[test]
    fn test_report_written() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        chatpulse_cmd()
            .args([input(&fixtures, "chat.txt").as_str(), "-o", report.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 5 messages"))
            .stdout(predicate::str::contains("Skipped 1 line"))
            .stdout(predicate::str::contains("Report saved"));

        let json = read_json(&report);
        assert_eq!(json["basicStats"]["totalMessages"], 5);
        assert_eq!(json["basicStats"]["participants"], serde_json::json!(["Alice", "Bob"]));
        assert_eq!(json["contentAnalysis"]["mediaBySender"]["Bob"], 1);
        assert_eq!(json["temporalAnalysis"]["avgResponseTimes"]["Bob"], 5.0);
    }

    #[test]
    fn test_default_report_path() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .current_dir(fixtures.path())
            .arg("chat.txt")
            .assert()
            .success();

        assert!(fixtures.path().join("chat_report.json").exists());
    }

    #[test]
    fn test_compact_report() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        chatpulse_cmd()
            .args([
                input(&fixtures, "chat.txt").as_str(),
                "-o",
                report.to_str().unwrap(),
                "--compact",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&report).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_help_and_version() {
        chatpulse_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--window-days"));

        chatpulse_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Windows and shifts
// ============================================================================

mod windows {
    use super::*;

    #[test]
    fn test_window_flags() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        chatpulse_cmd()
            .args([
                input(&fixtures, "busy.txt").as_str(),
                "-o",
                report.to_str().unwrap(),
                "--window-days",
                "4",
                "--window-step",
                "4",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Shifts:       1"));

        let json = read_json(&report);
        let relationship = &json["relationshipAnalysis"];
        assert_eq!(relationship["windowMetrics"].as_array().unwrap().len(), 2);
        let shift = &relationship["patternShifts"][0];
        assert_eq!(shift["date"], "2024-03-05");
        assert_eq!(shift["frequencyChange"], 3.0);
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");
        let config = output_path(&fixtures, "config.json");
        fs::write(&config, r#"{"window_days": 2, "shift_threshold": 10.0}"#).unwrap();

        chatpulse_cmd()
            .args([
                input(&fixtures, "busy.txt").as_str(),
                "-o",
                report.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
                "--threshold",
                "0.3",
            ])
            .assert()
            .success();

        let json = read_json(&report);
        // 8 days, window 2, step 1; volume jumps entering and completing the busy days
        let relationship = &json["relationshipAnalysis"];
        assert_eq!(relationship["windowMetrics"].as_array().unwrap().len(), 7);
        let shifts = relationship["patternShifts"].as_array().unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0]["date"], "2024-03-04");
        assert_eq!(shifts[1]["date"], "2024-03-05");
    }
}

// ============================================================================
// Filters and export
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_sender_and_date_filters() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        chatpulse_cmd()
            .args([
                input(&fixtures, "chat.txt").as_str(),
                "-o",
                report.to_str().unwrap(),
                "--from",
                "alice",
                "--after",
                "2024-01-16",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 messages after filtering"));

        let json = read_json(&report);
        assert_eq!(json["basicStats"]["participants"], serde_json::json!(["Alice"]));
        assert_eq!(json["basicStats"]["firstMessageDate"], "16/01/24");
    }

    #[test]
    fn test_messages_export_formats() {
        let fixtures = setup_fixtures();
        let report = output_path(&fixtures, "report.json");

        for (name, marker) in [
            ("messages.csv", "Line;Timestamp;Date;Time;Sender;Content;IsMedia;IsDeleted"),
            ("messages.json", "\"lineNumber\""),
            ("messages.jsonl", "\"sender\":\"Alice\""),
        ] {
            let export = output_path(&fixtures, name);
            chatpulse_cmd()
                .args([
                    input(&fixtures, "chat.txt").as_str(),
                    "-o",
                    report.to_str().unwrap(),
                    "--messages",
                    export.to_str().unwrap(),
                ])
                .assert()
                .success();

            let content = fs::read_to_string(&export).unwrap();
            assert!(content.contains(marker), "{name}: {content}");
        }
    }

    #[test]
    fn test_explicit_export_format() {
        let fixtures = setup_fixtures();
        let export = output_path(&fixtures, "messages.txt");

        chatpulse_cmd()
            .args([
                input(&fixtures, "chat.txt").as_str(),
                "-o",
                output_path(&fixtures, "report.json").to_str().unwrap(),
                "--messages",
                export.to_str().unwrap(),
                "--messages-format",
                "ndjson",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&export).unwrap();
        assert_eq!(content.lines().count(), 5);
    }

    #[test]
    fn test_recompute_flags() {
        let fixtures = setup_fixtures();
        let chat = output_path(&fixtures, "late_media.txt");
        fs::write(&chat, "[15/01/24, 10:30 AM] Alice: look\n<Media omitted>\n").unwrap();
        let report = output_path(&fixtures, "report.json");

        let run = |extra: &[&str]| {
            let mut cmd = chatpulse_cmd();
            cmd.args([chat.to_str().unwrap(), "-o", report.to_str().unwrap()])
                .args(extra)
                .assert()
                .success();
            read_json(&report)["contentAnalysis"]["mediaBySender"]["Alice"].clone()
        };

        assert_eq!(run(&[]), 0);
        assert_eq!(run(&["--recompute-flags"]), 1);
    }
}

// ============================================================================
// Error handling
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_input() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "missing.txt").as_str()])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_empty_transcript() {
        let fixtures = setup_fixtures();

        for name in ["empty.txt", "orphans.txt"] {
            chatpulse_cmd()
                .args([input(&fixtures, name).as_str()])
                .current_dir(fixtures.path())
                .assert()
                .failure()
                .stderr(predicate::str::contains("empty transcript"));
        }
    }

    #[test]
    fn test_invalid_window() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "chat.txt").as_str(), "--window-days", "0"])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("window_days"));
    }

    #[test]
    fn test_invalid_filter_date() {
        let fixtures = setup_fixtures();

        chatpulse_cmd()
            .args([input(&fixtures, "chat.txt").as_str(), "--after", "15/01/2024"])
            .current_dir(fixtures.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("15/01/2024"));
    }

    #[test]
    fn test_format_requires_messages() {
        chatpulse_cmd()
            .args(["chat.txt", "--messages-format", "json"])
            .assert()
            .failure();
    }
}
