use crate::cli::{Action, INSERT_EXAMPLE};
use crate::config::Settings;
use crate::csv_source;
use crate::error::EmployeeError;
use crate::models::{Employee, NewEmployee, Sex, parse_birth_date};
use crate::service::EmployeesService;
use std::path::PathBuf;

const SUCCESS: &str = "Completed successfully.";

/// Run one action against the configured database
pub async fn run(action: Action, args: &[String], settings: Settings) {
    let example_files = settings.example_data.files.clone();
    let service = EmployeesService::new(settings);

    match action {
        Action::CreateTable => handle_create_table(&service).await,
        Action::InsertEmployee => handle_insert_employee(&service, args).await,
        Action::ListEmployees => handle_list(&service).await,
        Action::InsertExamples => handle_insert_examples(&service, &example_files).await,
        Action::SelectFMan => handle_select_f_man(&service).await,
    }
}

/// Handle action 1
pub async fn handle_create_table(service: &EmployeesService) {
    if !service.create_table().await {
        println!("Something went wrong with creating table.");
        return;
    }
    println!("{SUCCESS}");
}

/// Handle action 2
pub async fn handle_insert_employee(service: &EmployeesService, args: &[String]) {
    let employee = match parse_new_employee(args) {
        Ok(employee) => employee,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    if !service.insert_employee(&employee).await {
        println!("Something went wrong with inserting employee.");
        return;
    }
    println!("{SUCCESS}");
}

/// Handle action 3
pub async fn handle_list(service: &EmployeesService) {
    let Some(employees) = service.select_all_employees().await else {
        println!("There are no employees in the database.");
        return;
    };

    for (i, employee) in employees.iter().enumerate() {
        println!("{}", format_employee_line(i + 1, employee));
    }
    println!("{SUCCESS}");
}

/// Handle action 4.
///
/// Every file is read before anything is inserted.
pub async fn handle_insert_examples(service: &EmployeesService, files: &[PathBuf]) {
    let mut batches = Vec::with_capacity(files.len());
    for file in files {
        let Some(employees) = csv_source::get_employees(file) else {
            println!("Something went wrong with reading {}.", file.display());
            return;
        };
        batches.push((file, employees));
    }

    for (file, employees) in batches {
        let count = employees.len();
        if !service.insert_employees(employees).await {
            println!(
                "Something went wrong with inserting example employees from {}.",
                file.display()
            );
            return;
        }
        println!("Inserted {count} employees from {}.", file.display());
    }
    println!("{SUCCESS}");
}

/// Handle action 5
pub async fn handle_select_f_man(service: &EmployeesService) {
    let Some(timed) = service.select_all_f_man().await else {
        println!(
            "There are no male employees whose last name begins with the letter F in the database."
        );
        return;
    };

    println!(
        "Employee count: {}. Execution time in milliseconds: {}",
        timed.employees.len(),
        timed.elapsed_ms
    );
    println!("{SUCCESS}");
}

/// Validate the arguments of action 2: full name, birth date, sex
pub fn parse_new_employee(args: &[String]) -> Result<NewEmployee, EmployeeError> {
    let [full_name, birth_date, sex, ..] = args else {
        return Err(EmployeeError::MissingArguments {
            example: INSERT_EXAMPLE,
        });
    };

    let birth_date = parse_birth_date(birth_date)
        .map_err(|_| EmployeeError::InvalidDate(birth_date.clone()))?;
    let sex = Sex::try_from(sex.as_str()).map_err(|_| EmployeeError::InvalidSex(sex.clone()))?;

    Ok(NewEmployee::new(full_name.as_str(), birth_date, sex))
}

/// One line of the action 3 listing
pub fn format_employee_line(position: usize, employee: &Employee) -> String {
    format!(
        "{position}. {} {} {} {}",
        employee.full_name(),
        employee.birth_date().format("%Y-%m-%d"),
        employee.sex(),
        employee.age
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_new_employee() {
        let employee =
            parse_new_employee(&args(&["Petrov Ivan Ivanovich", "1990-05-10", "Male"])).unwrap();
        assert_eq!(employee.full_name, "Petrov Ivan Ivanovich");
        assert_eq!(
            employee.birth_date,
            NaiveDate::from_ymd_opt(1990, 5, 10).unwrap()
        );
        assert_eq!(employee.sex, Sex::Male);
    }

    #[test]
    fn test_parse_new_employee_missing_args() {
        let result = parse_new_employee(&args(&["Petrov Ivan Ivanovich", "1990-05-10"]));
        match result {
            Err(e @ EmployeeError::MissingArguments { .. }) => {
                assert!(e.to_string().contains(INSERT_EXAMPLE));
            }
            other => panic!("expected missing arguments, got {other:?}"),
        }
        assert!(parse_new_employee(&[]).is_err());
    }

    #[test]
    fn test_parse_new_employee_bad_date() {
        let result = parse_new_employee(&args(&["A", "10th of May", "male"]));
        assert!(matches!(result, Err(EmployeeError::InvalidDate(d)) if d == "10th of May"));
    }

    #[test]
    fn test_parse_new_employee_bad_sex() {
        let result = parse_new_employee(&args(&["A", "1990-05-10", "unknown"]));
        match result {
            Err(e @ EmployeeError::InvalidSex(_)) => {
                assert!(e.to_string().contains("Enter 'male' or 'female'"));
            }
            other => panic!("expected invalid sex, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_new_employee_extra_args_ignored() {
        let employee = parse_new_employee(&args(&["A", "1990-05-10", "FEMALE", "extra"])).unwrap();
        assert_eq!(employee.sex, Sex::Female);
    }

    #[test]
    fn test_format_employee_line() {
        let record = NewEmployee::new(
            "Petrov Ivan Ivanovich",
            NaiveDate::from_ymd_opt(1990, 5, 10).unwrap(),
            Sex::Male,
        );
        let employee = Employee::from_record(record, NaiveDate::from_ymd_opt(2026, 5, 9).unwrap());
        assert_eq!(
            format_employee_line(1, &employee),
            "1. Petrov Ivan Ivanovich 1990-05-10 Male 35"
        );
    }
}
