//! End-to-end tests for the planner CLI.
//!
//! Drives the compiled `wk` binary through add → day/week → edit → remove,
//! with the database redirected into a temp directory via `WK_DATABASE_PATH`.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn wk(temp: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wk"));
    cmd.env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env("WK_DATABASE_PATH", temp.join("wk.db"));
    cmd
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Pulls the `[shortid]` suffix out of an add/edit confirmation line.
fn short_id_from(confirmation: &str) -> String {
    let start = confirmation.rfind('[').expect("confirmation contains [id]");
    let end = confirmation.rfind(']').expect("confirmation contains [id]");
    confirmation[start + 1..end].to_string()
}

#[test]
fn add_then_day_shows_event() {
    let temp = TempDir::new().unwrap();

    let added = wk(temp.path())
        .args(["add", "Algebra", "--date", "2025-03-10"])
        .args(["--start", "09:00", "--end", "10:00"])
        .output()
        .unwrap();
    assert!(stdout_of(&added).contains("Added \"Algebra\""));

    let day = wk(temp.path()).args(["day", "2025-03-10"]).output().unwrap();
    let day = stdout_of(&day);
    assert!(day.contains("SCHEDULE: Monday, Mar 10, 2025"));
    assert!(day.contains("[1] Algebra"));
    assert!(day.contains("09:00-10:00"));
}

#[test]
fn day_json_exposes_overlap_geometry() {
    let temp = TempDir::new().unwrap();

    // A-B overlap, B-C overlap, A and C do not: all three share one group.
    for (title, start, end) in [
        ("A", "09:00", "10:00"),
        ("B", "09:30", "11:00"),
        ("C", "10:30", "11:30"),
    ] {
        let output = wk(temp.path())
            .args(["add", title, "--date", "2025-03-10"])
            .args(["--start", start, "--end", end])
            .output()
            .unwrap();
        stdout_of(&output);
    }

    let day = wk(temp.path())
        .args(["day", "2025-03-10", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&day)).unwrap();

    let events = json["events"].as_array().unwrap();
    assert_eq!(events.len(), 3);

    let third_width = 1.0 / 3.0 - 0.01;
    for event in events {
        let width = event["width"].as_f64().unwrap();
        assert!((width - third_width).abs() < 1e-9, "width was {width}");
    }
    let second_left = events[1]["left"].as_f64().unwrap();
    assert!((second_left - 1.0 / 3.0).abs() < 1e-9);

    // Vertical mapping: 09:00 at 64 units/hour.
    let first_top = events[0]["top"].as_f64().unwrap();
    assert!((first_top - 576.0).abs() < 1e-9);
}

#[test]
fn remove_by_short_id_prefix() {
    let temp = TempDir::new().unwrap();

    let added = wk(temp.path())
        .args(["add", "Doomed", "--date", "2025-03-10"])
        .args(["--start", "09:00", "--end", "10:00"])
        .output()
        .unwrap();
    let short = short_id_from(&stdout_of(&added));
    assert_eq!(short.len(), 8);

    let removed = wk(temp.path()).args(["remove", short.as_str()]).output().unwrap();
    assert!(stdout_of(&removed).contains("Removed \"Doomed\""));

    let day = wk(temp.path()).args(["day", "2025-03-10"]).output().unwrap();
    assert!(stdout_of(&day).contains("No events on this day."));
}

#[test]
fn edit_moves_event_between_days() {
    let temp = TempDir::new().unwrap();

    let added = wk(temp.path())
        .args(["add", "Movable", "--date", "2025-03-10"])
        .args(["--start", "09:00", "--end", "10:00"])
        .output()
        .unwrap();
    let short = short_id_from(&stdout_of(&added));

    let edited = wk(temp.path())
        .args(["edit", short.as_str(), "--date", "2025-03-11"])
        .args(["--start", "10:00", "--end", "11:00"])
        .output()
        .unwrap();
    assert!(stdout_of(&edited).contains("Updated \"Movable\""));

    let old_day = wk(temp.path()).args(["day", "2025-03-10"]).output().unwrap();
    assert!(stdout_of(&old_day).contains("No events on this day."));

    let new_day = wk(temp.path()).args(["day", "2025-03-11"]).output().unwrap();
    let new_day = stdout_of(&new_day);
    assert!(new_day.contains("[1] Movable"));
    assert!(new_day.contains("10:00-11:00"));
}

#[test]
fn category_color_flows_into_events() {
    let temp = TempDir::new().unwrap();

    let created = wk(temp.path())
        .args(["categories", "add", "Deadline", "--color", "#D0021B"])
        .output()
        .unwrap();
    assert!(stdout_of(&created).contains("Added category 'deadline'"));

    let listed = wk(temp.path()).args(["categories", "list"]).output().unwrap();
    assert!(stdout_of(&listed).contains("deadline"));

    // Zero-length deadline: accepted, and it inherits the category color.
    let added = wk(temp.path())
        .args(["add", "Essay due", "--date", "2025-03-10"])
        .args(["--start", "17:00", "--end", "17:00", "--category", "Deadline"])
        .output()
        .unwrap();
    stdout_of(&added);

    let day = wk(temp.path())
        .args(["day", "2025-03-10", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout_of(&day)).unwrap();
    let event = &json["events"][0];
    assert_eq!(event["color"], "#D0021B");
    assert_eq!(event["category"], "deadline");
    // Height floors at the configured minimum even for a zero-length event.
    let height = event["height"].as_f64().unwrap();
    assert!((height - 24.0).abs() < 1e-9);
}

#[test]
fn week_lists_each_day_of_the_target_week() {
    let temp = TempDir::new().unwrap();

    for (title, date) in [
        ("Monday lecture", "2025-03-10"),
        ("Wednesday lab", "2025-03-12"),
    ] {
        let output = wk(temp.path())
            .args(["add", title, "--date", date])
            .args(["--start", "09:00", "--end", "10:00"])
            .output()
            .unwrap();
        stdout_of(&output);
    }

    let week = wk(temp.path()).args(["week", "2025-03-12"]).output().unwrap();
    let week = stdout_of(&week);
    assert!(week.contains("WEEK: Mar 10 - Mar 16, 2025"));
    assert!(week.contains("Monday lecture"));
    assert!(week.contains("Wednesday lab"));
    assert!(week.contains("Sunday, Mar 16"));
    assert!(week.contains("Total: 2 events, 2h 0m scheduled"));
}

#[test]
fn rejects_malformed_time() {
    let temp = TempDir::new().unwrap();

    let output = wk(temp.path())
        .args(["add", "Broken", "--date", "2025-03-10"])
        .args(["--start", "25:00", "--end", "26:00"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid --start"));

    let day = wk(temp.path()).args(["day", "2025-03-10"]).output().unwrap();
    assert!(stdout_of(&day).contains("No events on this day."));
}
