//! Employee record service.
//!
//! Every operation opens its own connection on the blocking pool and drops
//! it before returning. The `try_*` methods report errors; the plain methods
//! log them and return `false` / `None`.

use crate::config::{QueryKind, Settings};
use crate::db::Database;
use crate::error::Result;
use crate::models::{Employee, NewEmployee, TimedEmployees};
use chrono::{Local, NaiveDate};
use std::time::Instant;
use tracing::{error, info};

pub struct EmployeesService {
    settings: Settings,
}

impl EmployeesService {
    pub fn new(settings: Settings) -> Self {
        EmployeesService { settings }
    }

    fn connection_string(&self) -> Result<String> {
        self.settings.connection_string().map(str::to_owned)
    }

    fn query(&self, kind: QueryKind) -> Result<String> {
        self.settings.query(kind).map(str::to_owned)
    }

    /// Run `f` against a freshly opened database on the blocking pool
    async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let connection_string = self.connection_string()?;
        tokio::task::spawn_blocking(move || {
            let mut db = Database::open(&connection_string)?;
            f(&mut db)
        })
        .await?
    }

    // ==================== Create ====================

    pub async fn try_create_table(&self) -> Result<()> {
        let sql = self.query(QueryKind::CreateTable)?;
        self.with_database(move |db| db.execute_batch(&sql)).await?;
        info!("employees table created");
        Ok(())
    }

    pub async fn create_table(&self) -> bool {
        log_failure(self.try_create_table().await, "creating the employees table").is_some()
    }

    // ==================== Insert ====================

    pub async fn try_insert_employee(&self, employee: &NewEmployee) -> Result<()> {
        let sql = self.query(QueryKind::InsertEmployee)?;
        let employee = employee.clone();
        self.with_database(move |db| db.insert_employee(&sql, &employee))
            .await?;
        Ok(())
    }

    pub async fn insert_employee(&self, employee: &NewEmployee) -> bool {
        log_failure(
            self.try_insert_employee(employee).await,
            "inserting an employee",
        )
        .is_some()
    }

    /// Bulk load through the schema's insert statement, in one transaction
    pub async fn try_insert_employees(&self, employees: Vec<NewEmployee>) -> Result<usize> {
        let inserted = self
            .with_database(move |db| db.bulk_insert(&employees))
            .await?;
        info!(rows = inserted, "bulk insert finished");
        Ok(inserted)
    }

    pub async fn insert_employees(&self, employees: Vec<NewEmployee>) -> bool {
        log_failure(
            self.try_insert_employees(employees).await,
            "bulk inserting employees",
        )
        .is_some()
    }

    // ==================== Select ====================

    pub async fn try_select_all_employees(&self) -> Result<Vec<Employee>> {
        let sql = self.query(QueryKind::SelectAllEmployees)?;
        let today = today();
        self.with_database(move |db| db.select_employees(&sql, today))
            .await
    }

    /// All employees, or `None` when there are none or the query failed
    pub async fn select_all_employees(&self) -> Option<Vec<Employee>> {
        log_failure(
            self.try_select_all_employees().await,
            "selecting all employees",
        )
        .filter(|employees| !employees.is_empty())
    }

    pub async fn try_select_all_f_man(&self) -> Result<TimedEmployees> {
        let sql = self.query(QueryKind::SelectAllFMan)?;
        let today = today();
        self.with_database(move |db| {
            let started = Instant::now();
            let employees = db.select_employees(&sql, today)?;
            let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            Ok(TimedEmployees {
                elapsed_ms,
                employees,
            })
        })
        .await
    }

    /// Male employees whose surname starts with F, with the query time
    pub async fn select_all_f_man(&self) -> Option<TimedEmployees> {
        log_failure(
            self.try_select_all_f_man().await,
            "selecting male employees with surname F",
        )
        .filter(|timed| !timed.employees.is_empty())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn log_failure<T>(result: Result<T>, action: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "{action} failed");
            None
        }
    }
}
