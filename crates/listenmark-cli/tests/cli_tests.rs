//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn listenmark() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("listenmark").unwrap()
}

/// A working directory without a `listenmark.toml`, so no config leaks in.
fn isolated() -> (TempDir, Command) {
    let dir = TempDir::new().unwrap();
    let mut cmd = listenmark();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    (dir, cmd)
}

fn sheet(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn show_built_in_bank() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping Habits"))
        .stdout(predicate::str::contains("Questions 21-24"))
        .stdout(predicate::str::contains("28-30. Most of the people"))
        .stdout(predicate::str::contains("E. Shoes"))
        .stdout(predicate::str::contains("cashier").not());
}

#[test]
fn show_filters_by_range_and_kind() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["show", "--from", "25", "--to", "27"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25. 50% of the people"))
        .stdout(predicate::str::contains("21.").not())
        .stdout(predicate::str::contains("Questions 28-30").not());

    let (_dir, mut cmd) = isolated();
    cmd.args(["show", "--kind", "trio"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sportswear"))
        .stdout(predicate::str::contains("Questions 21-24").not());
}

#[test]
fn show_json() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["show", "--kind", "free_text", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let questions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 7);
    assert_eq!(questions[0]["id"], "q21");
    assert_eq!(questions[0]["type"], "free_text");
    assert!(questions[0].get("accepted").is_none());
}

#[test]
fn show_rejects_unknown_kind() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["show", "--kind", "essay"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question type"));
}

#[test]
fn check_sample_sheet() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["check", "--answers"])
        .arg(std::fs::canonicalize("../../answer-sheets/sample.toml").unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 5.0/10  Good job!"))
        .stdout(predicate::str::contains("Excellent! You selected all 3 correct options."));
}

#[test]
fn check_partial_trio_json() {
    let (_dir, mut cmd) = isolated();
    let output = cmd
        .args(["check", "--format", "json", "--answers"])
        .arg(std::fs::canonicalize("../../answer-sheets/partial-trio.toml").unwrap())
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["bank"], "shopping-habits");
    assert_eq!(report["display_score"], "1.0");
    assert_eq!(report["band"], "keep_practicing");
    assert_eq!(report["result"]["raw_score"], 1);
    assert_eq!(report["result"]["total_weight"], 10);
    let trio = report["result"]["outcomes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["id"] == "q28-30")
        .unwrap();
    assert_eq!(trio["verdict"], "partial");
    assert_eq!(trio["points"], 1);
}

#[test]
fn check_reveal_shows_accepted_answers() {
    let (dir, mut cmd) = isolated();
    let path = sheet(&dir, "answers.toml", "[answers]\nq22 = \"fifty\"\n");
    cmd.args(["check", "--reveal", "--answers"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("fifty pounds"))
        .stdout(predicate::str::contains("Incorrect"));
}

#[test]
fn check_uses_config_defaults() {
    let (dir, mut cmd) = isolated();
    sheet(&dir, "listenmark.toml", "format = \"json\"\n");
    let path = sheet(&dir, "answers.toml", "[answers]\nq24 = \" JEANS \"\n");
    cmd.args(["check", "--answers"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display_score\": \"1.0\""));
}

#[test]
fn check_rejects_bad_letters() {
    let (dir, mut cmd) = isolated();
    let path = sheet(&dir, "answers.toml", "[answers]\n\"q28-30\" = [\"D\", \"42\"]\n");
    cmd.args(["check", "--answers"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid option letter"));
}

#[test]
fn check_skips_letters_without_options() {
    let (dir, mut cmd) = isolated();
    let path = sheet(
        &dir,
        "answers.toml",
        "[answers]\n\"q28-30\" = [\"G\", \"D\", \"E\", \"F\"]\n",
    );
    cmd.args(["check", "--format", "json", "--answers"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display_score\": \"3.0\""))
        .stdout(predicate::str::contains("\"verdict\": \"correct\""))
        .stderr(predicate::str::contains("no such option"));
}

#[test]
fn check_missing_sheet() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["check", "--answers", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn take_interactive_session() {
    let (_dir, mut cmd) = isolated();
    cmd.arg("take")
        .write_stdin("cashier\n\n\n\n\n\n\nA D\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Select up to 3 letters"))
        .stdout(predicate::str::contains("Score: 2.0/10  Keep practicing!"))
        .stdout(predicate::str::contains("Marks were awarded per correct letter"));
}

#[test]
fn validate_shipped_bank() {
    listenmark()
        .args(["validate", "--bank", "../../banks/shopping-habits.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8 questions, 10 points"))
        .stdout(predicate::str::contains("All question banks valid"));
}

#[test]
fn validate_directory() {
    listenmark()
        .args(["validate", "--bank", "../../banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shopping Habits"));
}

#[test]
fn validate_reports_warnings() {
    let (dir, mut cmd) = isolated();
    let path = sheet(
        &dir,
        "bank.toml",
        r#"
[bank]
id = "warn"
title = "Warn"

[[questions]]
id = "q1"
number = 1
prompt = "p"
accepted = ["Jeans", "jeans"]
"#,
    );
    cmd.args(["validate", "--bank"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[q1] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    listenmark()
        .args(["validate", "--bank", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let (dir, mut cmd) = isolated();
    cmd.arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created listenmark.toml"))
        .stdout(predicate::str::contains("Created banks/example.toml"))
        .stdout(predicate::str::contains("Created answers/example.toml"));

    assert!(dir.path().join("listenmark.toml").exists());

    // The generated files work together
    listenmark()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .args([
            "check",
            "--bank",
            "banks/example.toml",
            "--answers",
            "answers/example.toml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 6.0/10  Good job!"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    listenmark().current_dir(dir.path()).arg("init").assert().success();

    listenmark()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    listenmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IELTS listening practice and scoring"));
}

#[test]
fn version_output() {
    listenmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("listenmark"));
}
