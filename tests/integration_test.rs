use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: &str = include_str!("../appsettings.json");
const ALL_EMPLOYEES: &str = include_str!("../Data/Employees.csv");
const F_MALE_EMPLOYEES: &str = include_str!("../Data/FMaleEmployees.csv");

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("appsettings.json"), SETTINGS).unwrap();
    temp_dir
}

fn write_example_data(dir: &Path, all: &str, f_male: &str) {
    fs::create_dir_all(dir.join("Data")).unwrap();
    fs::write(dir.join("Data/Employees.csv"), all).unwrap();
    fs::write(dir.join("Data/FMaleEmployees.csv"), f_male).unwrap();
}

fn employees(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("employees").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_no_args_prints_menu() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a numeric argument."))
        .stdout(predicate::str::contains("5 - Get time in milliseconds"));
}

#[test]
fn test_unknown_action() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .arg("9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown action: 9"))
        .stdout(predicate::str::contains("1 - Create an employee table."));
}

#[test]
fn test_hyphen_token_is_unknown_action() {
    let temp_dir = setup();
    for token in ["-5", "--foo"] {
        employees(temp_dir.path())
            .arg(token)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("Unknown action: {token}")))
            .stdout(predicate::str::contains("1 - Create an employee table."));
    }
}

#[test]
fn test_help_flag_still_works() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Employee table manager"));
}

#[test]
fn test_missing_settings_file() {
    let temp_dir = TempDir::new().unwrap();
    employees(temp_dir.path())
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load appsettings.json."));
}

#[test]
fn test_full_workflow() {
    let temp_dir = setup();
    let dir = temp_dir.path();

    employees(dir)
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed successfully."));
    assert!(dir.join("employees.db").exists());

    employees(dir)
        .args(["2", "Petrov Ivan Ivanovich", "1990-05-10", "Male"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed successfully."));

    let today = Local::now().date_naive();
    let mut age = today.year() - 1990;
    if (5, 10) > (today.month(), today.day()) {
        age -= 1;
    }

    employees(dir)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "1. Petrov Ivan Ivanovich 1990-05-10 Male {age}"
        )))
        .stdout(predicate::str::contains("Completed successfully."));
}

#[test]
fn test_invalid_sex_rejected_without_write() {
    let temp_dir = setup();
    let dir = temp_dir.path();

    employees(dir).arg("1").assert().success();

    employees(dir)
        .args(["2", "Petrov Ivan Ivanovich", "1990-05-10", "unknown"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The sex was entered in an incorrect format",
        ))
        .stdout(predicate::str::contains("Completed successfully.").not());

    employees(dir)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There are no employees in the database.",
        ));
}

#[test]
fn test_invalid_date_rejected() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .args(["2", "Petrov Ivan Ivanovich", "May 10th", "male"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "The date was entered in an incorrect format",
        ));
}

#[test]
fn test_insert_missing_arguments() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .args(["2", "Petrov Ivan Ivanovich"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Required arguments are missing. Example: 2 'Ivanov Petr Sergeevich' 2009-07-12 Male",
        ));
}

#[test]
fn test_insert_before_create_reports_failure() {
    let temp_dir = setup();
    employees(temp_dir.path())
        .args(["2", "Petrov Ivan Ivanovich", "1990-05-10", "male"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Something went wrong with inserting employee.",
        ));
}

#[test]
fn test_example_load_and_f_man_query() {
    let temp_dir = setup();
    let dir = temp_dir.path();
    write_example_data(dir, ALL_EMPLOYEES, F_MALE_EMPLOYEES);

    employees(dir).arg("1").assert().success();

    employees(dir)
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inserted 12 employees from Data/Employees.csv.",
        ))
        .stdout(predicate::str::contains(
            "Inserted 6 employees from Data/FMaleEmployees.csv.",
        ))
        .stdout(predicate::str::contains("Completed successfully."));

    employees(dir)
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Employee count: 6. Execution time in milliseconds:",
        ));

    employees(dir)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("18. "));
}

#[test]
fn test_example_load_rejects_bad_file() {
    let temp_dir = setup();
    let dir = temp_dir.path();
    let broken = format!("{F_MALE_EMPLOYEES}Fokin Broken;1990-01-01;true\n");
    write_example_data(dir, ALL_EMPLOYEES, &broken);

    employees(dir).arg("1").assert().success();

    employees(dir)
        .arg("4")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Something went wrong with reading Data/FMaleEmployees.csv.",
        ));

    // Nothing from the valid file was inserted either
    employees(dir)
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There are no employees in the database.",
        ));
}

#[test]
fn test_f_man_query_on_empty_table() {
    let temp_dir = setup();
    let dir = temp_dir.path();

    employees(dir).arg("1").assert().success();
    employees(dir)
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There are no male employees whose last name begins with the letter F in the database.",
        ));
}
