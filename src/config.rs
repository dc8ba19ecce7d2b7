//! Settings loaded from `appsettings.json`.

use crate::db::schema;
use crate::error::{EmployeeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "appsettings.json";

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub connection_strings: ConnectionStrings,
    pub queries: Queries,
    pub example_data: ExampleData,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConnectionStrings {
    pub default: Option<String>,
}

/// Named SQL statements run by the record service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Queries {
    pub create_table: Option<String>,
    pub insert_employee: Option<String>,
    pub select_all_employees: Option<String>,
    #[serde(rename = "SelectAllFMan")]
    pub select_all_f_man: Option<String>,
}

impl Queries {
    /// The statements shipped in `appsettings.json`
    pub fn standard() -> Self {
        Queries {
            create_table: Some(schema::create_table_sql()),
            insert_employee: Some(schema::insert_sql()),
            select_all_employees: Some(schema::select_all_sql()),
            select_all_f_man: Some(schema::select_f_man_sql()),
        }
    }
}

/// Which configured statement to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    CreateTable,
    InsertEmployee,
    SelectAllEmployees,
    SelectAllFMan,
}

impl QueryKind {
    /// Settings path of the statement, for error reports
    pub fn key(&self) -> &'static str {
        match self {
            QueryKind::CreateTable => "Queries:CreateTable",
            QueryKind::InsertEmployee => "Queries:InsertEmployee",
            QueryKind::SelectAllEmployees => "Queries:SelectAllEmployees",
            QueryKind::SelectAllFMan => "Queries:SelectAllFMan",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExampleData {
    pub files: Vec<PathBuf>,
}

impl Default for ExampleData {
    fn default() -> Self {
        ExampleData {
            files: vec![
                PathBuf::from("Data/Employees.csv"),
                PathBuf::from("Data/FMaleEmployees.csv"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Read and parse a settings file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let wrap = |source: EmployeeError| EmployeeError::Settings {
            path: path.display().to_string(),
            source: Box::new(source),
        };
        let text = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
        Self::from_json(&text).map_err(wrap)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn connection_string(&self) -> Result<&str> {
        self.connection_strings
            .default
            .as_deref()
            .ok_or(EmployeeError::MissingSetting("ConnectionStrings:Default"))
    }

    pub fn query(&self, kind: QueryKind) -> Result<&str> {
        let query = match kind {
            QueryKind::CreateTable => &self.queries.create_table,
            QueryKind::InsertEmployee => &self.queries.insert_employee,
            QueryKind::SelectAllEmployees => &self.queries.select_all_employees,
            QueryKind::SelectAllFMan => &self.queries.select_all_f_man,
        };
        query
            .as_deref()
            .ok_or(EmployeeError::MissingSetting(kind.key()))
    }
}
