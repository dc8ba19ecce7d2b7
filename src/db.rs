use crate::error::{EmployeeError, Result};
use crate::models::{Employee, NewEmployee, Sex};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, named_params};
use std::path::PathBuf;
use tracing::debug;

/// Table and column names of the employees store.
///
/// The bulk insert and the shipped `CreateTable` text are both built from
/// these, so the table is defined only here.
pub mod schema {
    pub const TABLE: &str = "Employees";
    pub const FULL_NAME: &str = "FullName";
    pub const BIRTH_DATE: &str = "BirthDate";
    pub const IS_MALE: &str = "IsMale";

    pub const COLUMNS: [&str; 3] = [FULL_NAME, BIRTH_DATE, IS_MALE];

    pub fn create_table_sql() -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {TABLE} (
                {FULL_NAME} TEXT NOT NULL,
                {BIRTH_DATE} TEXT NOT NULL,
                {IS_MALE} INTEGER NOT NULL CHECK ({IS_MALE} IN (0, 1))
            );
            CREATE INDEX IF NOT EXISTS idx_{TABLE}_{IS_MALE}_{FULL_NAME}
                ON {TABLE} ({IS_MALE}, {FULL_NAME});"
        )
    }

    /// Insert statement with named parameters matching the column names
    pub fn insert_sql() -> String {
        let params = COLUMNS
            .iter()
            .map(|c| format!("@{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("INSERT INTO {TABLE} ({}) VALUES ({params})", COLUMNS.join(", "))
    }

    pub fn select_all_sql() -> String {
        format!(
            "SELECT DISTINCT {FULL_NAME}, {BIRTH_DATE}, {IS_MALE} FROM {TABLE} ORDER BY {FULL_NAME}"
        )
    }

    pub fn select_f_man_sql() -> String {
        format!(
            "SELECT {FULL_NAME}, {BIRTH_DATE}, {IS_MALE} FROM {TABLE} \
             WHERE {IS_MALE} = 1 AND {FULL_NAME} LIKE 'F%'"
        )
    }
}

/// Resolve the database file named by a connection string.
///
/// Accepts a bare path or an ADO-style `key=value;` list whose
/// `Data Source` (also `DataSource` or `Filename`) entry names the file.
pub fn data_source(connection_string: &str) -> Result<PathBuf> {
    let trimmed = connection_string.trim();
    if !trimmed.contains('=') {
        if trimmed.is_empty() {
            return Err(EmployeeError::InvalidConnectionString(
                "empty data source".to_string(),
            ));
        }
        return Ok(PathBuf::from(trimmed));
    }

    for part in trimmed.split(';') {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if matches!(key.as_str(), "data source" | "datasource" | "filename") {
            let value = value.trim();
            if value.is_empty() {
                break;
            }
            return Ok(PathBuf::from(value));
        }
    }

    Err(EmployeeError::InvalidConnectionString(
        connection_string.to_string(),
    ))
}

/// Database handle, one per operation
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database named by `connection_string`
    pub fn open(connection_string: &str) -> Result<Self> {
        let path = data_source(connection_string)?;
        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        Ok(Database { conn })
    }

    /// Open an in-memory database for testing
    #[cfg(test)]
    fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Database { conn })
    }

    /// Run one or more statements that return no rows
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Insert one employee through `sql`, binding `@FullName`, `@BirthDate`
    /// and `@IsMale`
    pub fn insert_employee(&self, sql: &str, employee: &NewEmployee) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.execute(named_params! {
            "@FullName": employee.full_name,
            "@BirthDate": employee.birth_date,
            "@IsMale": employee.sex.is_male(),
        })?;
        Ok(rows)
    }

    /// Insert all `employees` in a single transaction
    pub fn bulk_insert(&mut self, employees: &[NewEmployee]) -> Result<usize> {
        let sql = schema::insert_sql();
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(&sql)?;
            for employee in employees {
                inserted += stmt.execute(named_params! {
                    "@FullName": employee.full_name,
                    "@BirthDate": employee.birth_date,
                    "@IsMale": employee.sex.is_male(),
                })?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Run a select returning `FullName, BirthDate, IsMale` and derive ages on `today`
    pub fn select_employees(&self, sql: &str, today: NaiveDate) -> Result<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            employee_from_row(row).map(|record| Employee::from_record(record, today))
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into())
    }

    /// Number of rows in the employees table
    #[cfg(test)]
    fn count(&self) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", schema::TABLE);
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Check whether the employees table exists
    #[cfg(test)]
    fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [schema::TABLE],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

// ==================== Row Parsers ====================

fn employee_from_row(row: &Row) -> std::result::Result<NewEmployee, rusqlite::Error> {
    let is_male: bool = row.get(2)?;
    Ok(NewEmployee {
        full_name: row.get(0)?,
        birth_date: row.get(1)?,
        sex: Sex::from_is_male(is_male),
    })
}
