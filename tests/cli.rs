use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn transcript_file_without_arguments_prints_usage() {
    Command::cargo_bin("transcript-file")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn transcript_file_with_only_video_id_prints_usage() {
    Command::cargo_bin("transcript-file")
        .unwrap()
        .arg("dQw4w9WgXcQ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OUTPUT_FILE"));
}

#[test]
fn transcript_file_writes_empty_file_for_invalid_video() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("transcript.txt");
    std::fs::write(&output, "previous run").unwrap();

    Command::cargo_bin("transcript-file")
        .unwrap()
        .current_dir(dir.path())
        .args(["--quiet", "not a video"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error occurred: invalid video id"))
        .stdout(predicate::str::contains("Empty file created."));

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn transcript_json_reports_invalid_video_as_failure_envelope() {
    let dir = tempfile::tempdir().unwrap();

    let assert = Command::cargo_bin("transcript-json")
        .unwrap()
        .current_dir(dir.path())
        .arg("https://vimeo.com/123456789")
        .assert()
        .code(1);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);

    let envelope: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(envelope["success"], false);
    assert!(envelope["error"].as_str().unwrap().contains("invalid video id"));
}

#[test]
fn transcript_json_reports_argument_errors_as_json() {
    Command::cargo_bin("transcript-json")
        .unwrap()
        .args(["--policy", "nonsense"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(r#"{"success":false,"error":"#));
}

#[test]
fn transcript_json_reads_local_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("yt-transcript.yaml"), "http:\n  timeout_secs: 0\n").unwrap();

    Command::cargo_bin("transcript-json")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("timeout_secs must be greater than zero"));
}

#[test]
fn transcript_json_version_is_plain_text() {
    Command::cargo_bin("transcript-json")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("transcript-json "));
}
