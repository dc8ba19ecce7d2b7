pub mod cli;
pub mod cli_handlers;
pub mod config;
pub mod csv_source;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use error::{EmployeeError, Result};
pub use models::*;
