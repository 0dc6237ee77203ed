//! Integration tests for the `gold` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn gold() -> Command {
    Command::cargo_bin("gold").unwrap()
}

#[test]
fn show_prints_bytes_verbatim() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("out.golden");
    fs::write(&file, "a: 1\r\n").unwrap();

    gold()
        .arg("show")
        .arg(&file)
        .assert()
        .success()
        .stdout("a: 1\r\n");
}

#[test]
fn show_missing_file_fails() {
    let tmp = tempfile::tempdir().unwrap();
    gold()
        .arg("show")
        .arg(tmp.path().join("absent.golden"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unable to read"));
}

#[test]
fn diff_ignores_line_ending_style() {
    let tmp = tempfile::tempdir().unwrap();
    let expected = tmp.path().join("expected.golden");
    let actual = tmp.path().join("actual.yaml");
    fs::write(&expected, "a: 1\nb: 2\n").unwrap();
    fs::write(&actual, "a: 1\r\nb: 2\r\n").unwrap();

    gold()
        .args(["diff", "--plain"])
        .arg(&expected)
        .arg(&actual)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn diff_reports_changed_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let expected = tmp.path().join("expected.golden");
    let actual = tmp.path().join("actual.yaml");
    fs::write(&expected, "b:\n  - 2\n  - 3\n").unwrap();
    fs::write(&actual, "b:\n  - 2\n  - 4\n").unwrap();

    gold()
        .args(["diff", "--plain"])
        .arg(&expected)
        .arg(&actual)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("-  - 3").and(predicate::str::contains("+  - 4")));
}

#[test]
fn normalize_write_rewrites_in_place() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("mac.golden");
    fs::write(&file, "x\ry\r").unwrap();

    gold().arg("normalize").arg("--write").arg(&file).assert().success();
    assert_eq!(fs::read(&file).unwrap(), b"x\ny\n");
}

#[test]
fn normalize_prints_by_default() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("win.golden");
    fs::write(&file, "x\r\ny\r\n").unwrap();

    gold().arg("normalize").arg(&file).assert().success().stdout("x\ny\n");
    assert_eq!(fs::read(&file).unwrap(), b"x\r\ny\r\n");
}

#[test]
fn list_finds_goldens() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("suite");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("one.golden"), "1").unwrap();
    fs::write(dir.join("skip.txt"), "x").unwrap();

    gold()
        .arg("list")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("one.golden").and(predicate::str::contains("skip.txt").not()));
}
