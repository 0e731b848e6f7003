//! Integration tests for salesdesk-cli.

use std::{fs, path::Path};

use assert_cmd::{Command, cargo};
use predicates::prelude::*;
use tempfile::TempDir;

/// A `salesdesk` invocation isolated in `dir`: its own config file, its own
/// data file, no prompts.
fn salesdesk(dir: &Path) -> Command {
    let config = dir.join("config.toml");
    if !config.exists() {
        fs::write(&config, "[output]\nformat = \"plain\"\n").unwrap();
    }

    let mut cmd = cargo::cargo_bin_cmd!("salesdesk");
    cmd.env_remove("NO_COLOR")
        .arg("--config")
        .arg(&config)
        .arg("--data-file")
        .arg(dir.join("data.json"))
        .arg("--no-input");
    cmd
}

fn add_seller(dir: &Path, name: &str, department: &str) {
    salesdesk(dir)
        .args([
            "seller",
            "add",
            "--name",
            name,
            "--email",
            "someone@gmail.com",
            "--birth-date",
            "21/04/1998",
            "--base-salary",
            "2500",
            "--department",
            department,
        ])
        .assert()
        .success();
}

#[test]
fn help_lists_record_commands() {
    cargo::cargo_bin_cmd!("salesdesk")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("department"))
        .stdout(predicate::str::contains("seller"));
}

#[test]
fn version_flag() {
    cargo::cargo_bin_cmd!("salesdesk")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn fresh_store_is_seeded_with_sample_departments() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["department", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id,name"))
        .stdout(predicate::str::contains("1,Computers"))
        .stdout(predicate::str::contains("4,Books"));

    assert!(temp.path().join("data.json").exists());
}

#[test]
fn removed_sample_departments_are_not_restored() {
    let temp = TempDir::new().unwrap();

    for id in ["1", "2", "3", "4"] {
        salesdesk(temp.path())
            .args(["department", "remove", id])
            .assert()
            .success();
    }

    salesdesk(temp.path())
        .args(["department", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::diff("id,name\n"));
}

#[test]
fn verbose_flag_shows_store_events() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .env_remove("RUST_LOG")
        .args(["-v", "department", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Sample departments added"));

    let quiet = TempDir::new().unwrap();
    salesdesk(quiet.path())
        .env_remove("RUST_LOG")
        .args(["department", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Sample departments added").not());
}

#[test]
fn department_add_edit_remove() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["department", "add", "--name", "Garden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Department 5 saved: Garden"));

    salesdesk(temp.path())
        .args(["department", "edit", "5", "--name", "Garden & Patio"])
        .assert()
        .success();

    salesdesk(temp.path())
        .args(["department", "list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Garden & Patio\""));

    salesdesk(temp.path())
        .args(["department", "remove", "5"])
        .assert()
        .success();

    salesdesk(temp.path())
        .args(["department", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Garden").not());
}

#[test]
fn blank_department_name_is_rejected() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["department", "add", "--name", "   "])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("name: Field can't be empty"))
        .stderr(predicate::str::contains("Cannot save department"));
}

#[test]
fn over_long_department_name_is_refused() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["department", "add", "--name", &"x".repeat(31)])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("longer than 30"));
}

#[test]
fn editing_unknown_department_is_not_found() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["department", "edit", "99", "--name", "Toys"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Department 99 not found"));
}

#[test]
fn seller_add_and_list() {
    let temp = TempDir::new().unwrap();

    add_seller(temp.path(), "Bob Brown", "2");

    salesdesk(temp.path())
        .args(["seller", "list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "1,Bob Brown,someone@gmail.com,21/04/1998,2500.00,Electronics",
        ));

    salesdesk(temp.path())
        .args(["seller", "list", "--department", "1", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob Brown").not());
}

#[test]
fn seller_without_fields_reports_every_label() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["seller", "add"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("name: Field can't be empty"))
        .stdout(predicate::str::contains("email: Field can't be empty"))
        .stdout(predicate::str::contains("birth date: Field can't be empty"))
        .stdout(predicate::str::contains("base salary: Field can't be empty"));
}

#[test]
fn seller_birth_date_must_match_format() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["seller", "add", "--name", "Ann", "--birth-date", "1998-04-21"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not match %d/%m/%Y"));
}

#[test]
fn seller_in_unknown_department_is_not_found() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["seller", "add", "--name", "Ann", "--department", "42"])
        .assert()
        .code(3);
}

#[test]
fn department_in_use_cannot_be_removed() {
    let temp = TempDir::new().unwrap();

    add_seller(temp.path(), "Alex Grey", "1");

    salesdesk(temp.path())
        .args(["department", "remove", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("assigned to 1 seller(s)"));

    salesdesk(temp.path())
        .args(["seller", "remove", "1"])
        .assert()
        .success();

    salesdesk(temp.path())
        .args(["department", "remove", "1"])
        .assert()
        .success();
}

#[test]
fn removing_unknown_seller_is_not_found() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["seller", "remove", "7"])
        .assert()
        .code(3);
}

#[test]
fn config_get_reports_data_file_override() {
    let temp = TempDir::new().unwrap();

    salesdesk(temp.path())
        .args(["config", "get", "storage.path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data.json"));

    salesdesk(temp.path())
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plain"));
}

#[test]
fn unreadable_config_exits_with_configuration_code() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), "[storage]\nbackend = \"postgres\"\n").unwrap();

    salesdesk(temp.path())
        .args(["department", "list"])
        .assert()
        .code(4);
}

#[test]
fn unusable_date_format_exits_with_configuration_code() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), "[forms]\ndate_format = \"%Q\"\n").unwrap();

    salesdesk(temp.path())
        .args(["seller", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("forms.date_format"));
}

#[test]
fn init_writes_config_once() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("salesdesk.toml");

    salesdesk(temp.path())
        .args(["init", "--path"])
        .arg(&target)
        .assert()
        .success();
    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("[storage]"));
    assert!(written.contains("date_format"));

    fs::write(&target, "# edited\n").unwrap();
    salesdesk(temp.path())
        .args(["init", "--path"])
        .arg(&target)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&target).unwrap(), "# edited\n");
}

#[test]
fn completions_for_bash() {
    cargo::cargo_bin_cmd!("salesdesk")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("salesdesk"));
}
