use clap::Parser;

#[derive(Parser)]
#[command(name = "employees")]
#[command(about = "Employee table manager")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Action number, 1 to 5 (omit to print the menu)
    pub action: Option<String>,

    /// Arguments for the action
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Usage example for action 2
pub const INSERT_EXAMPLE: &str = "2 'Ivanov Petr Sergeevich' 2009-07-12 Male";

pub const MENU: &str = "Please enter a numeric argument.

1 - Create an employee table.
2 - Add an employee to the table. Required data: full name, date of birth and sex. Example: 2 'Ivanov Petr Sergeevich' 2009-07-12 Male
3 - Get all employees.
4 - Add example employees to the table.
5 - Get time in milliseconds of selecting all male employees whose last name begins with the letter F.";

/// Action selected by the first argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateTable,
    InsertEmployee,
    ListEmployees,
    InsertExamples,
    SelectFMan,
}

impl Action {
    /// Rejection line for a token that names no action
    pub fn unknown(token: &str) -> String {
        format!("Unknown action: {token}")
    }
}

impl TryFrom<&str> for Action {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "1" => Ok(Action::CreateTable),
            "2" => Ok(Action::InsertEmployee),
            "3" => Ok(Action::ListEmployees),
            "4" => Ok(Action::InsertExamples),
            "5" => Ok(Action::SelectFMan),
            _ => Err(Action::unknown(s)),
        }
    }
}
