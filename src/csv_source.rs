use crate::error::{EmployeeError, Result};
use crate::models::{NewEmployee, Sex};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use std::path::Path;
use tracing::{debug, error};

/// Field delimiter of employee CSV files
pub const DELIMITER: u8 = b';';

/// Birth date format of employee CSV files
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// One CSV row, headers `FullName;BirthDate;IsMale`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CsvEmployee {
    full_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    birth_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_flag")]
    is_male: bool,
}

impl From<CsvEmployee> for NewEmployee {
    fn from(row: CsvEmployee) -> Self {
        NewEmployee {
            full_name: row.full_name,
            birth_date: row.birth_date,
            sex: Sex::from_is_male(row.is_male),
        }
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&s, DATE_FORMAT)
        .map_err(|e| de::Error::custom(format!("invalid date {s:?}, expected dd-MM-yyyy: {e}")))
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(de::Error::custom(format!("invalid boolean {s:?}"))),
    }
}

/// Read every employee in `path`.
///
/// All rows are attempted; if any row fails, the whole file is rejected
/// with the collected errors and no records are returned.
pub fn read_employees<P: AsRef<Path>>(path: P) -> Result<Vec<NewEmployee>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut employees = Vec::new();
    let mut errors = Vec::new();

    for row in reader.deserialize::<CsvEmployee>() {
        match row {
            Ok(row) => employees.push(row.into()),
            Err(e) => errors.push(e.to_string()),
        }
    }

    if !errors.is_empty() {
        return Err(EmployeeError::RejectedFile {
            path: path.display().to_string(),
            errors: errors.join("\n"),
        });
    }

    debug!(path = %path.display(), rows = employees.len(), "read employees file");
    Ok(employees)
}

/// Like [`read_employees`], logging the failure and returning `None`
pub fn get_employees<P: AsRef<Path>>(path: P) -> Option<Vec<NewEmployee>> {
    let path = path.as_ref();
    match read_employees(path) {
        Ok(employees) => Some(employees),
        Err(e) => {
            error!(path = %path.display(), "{e}");
            None
        }
    }
}
