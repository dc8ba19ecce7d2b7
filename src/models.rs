use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// Sex flag, persisted as `IsMale`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Sex::Male)
    }

    pub fn from_is_male(is_male: bool) -> Self {
        if is_male { Sex::Male } else { Sex::Female }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Sex {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(format!("Invalid sex: {s}")),
        }
    }
}

/// Employee as entered on the command line or read from a CSV row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
}

impl NewEmployee {
    pub fn new(full_name: impl Into<String>, birth_date: NaiveDate, sex: Sex) -> Self {
        NewEmployee {
            full_name: full_name.into(),
            birth_date,
            sex,
        }
    }
}

/// Employee read back from the table, with the age derived on `today`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub record: NewEmployee,
    pub age: i32,
}

impl Employee {
    pub fn from_record(record: NewEmployee, today: NaiveDate) -> Self {
        let age = age_on(record.birth_date, today);
        Employee { record, age }
    }

    pub fn full_name(&self) -> &str {
        &self.record.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.record.birth_date
    }

    pub fn sex(&self) -> Sex {
        self.record.sex
    }
}

/// Employees returned by a timed query
#[derive(Debug, Clone)]
pub struct TimedEmployees {
    pub elapsed_ms: u64,
    pub employees: Vec<Employee>,
}

/// Full years between `birth_date` and `today`.
///
/// One year is subtracted while this year's birthday is still ahead, so a
/// 29 February birthday is reached on 1 March in non-leap years.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (birth_date.month(), birth_date.day()) > (today.month(), today.day()) {
        age -= 1;
    }
    age
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d.%m.%Y", "%d-%m-%Y", "%d/%m/%Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a birth date typed on the command line
pub fn parse_birth_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }
    // Time of day is accepted and dropped
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }
    Err(format!("Cannot parse date: {s}"))
}
