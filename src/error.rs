use thiserror::Error;

/// All possible errors in the employees tool
#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("Setting `{0}` cannot be null")]
    MissingSetting(&'static str),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("The date was entered in an incorrect format: {0}")]
    InvalidDate(String),

    #[error("The sex was entered in an incorrect format: {0}. Enter 'male' or 'female'.")]
    InvalidSex(String),

    #[error("Required arguments are missing. Example: {example}")]
    MissingArguments { example: &'static str },

    #[error("{path} exceptions:\n\n{errors}")]
    RejectedFile { path: String, errors: String },

    #[error("Cannot read settings file {path}: {source}")]
    Settings {
        path: String,
        #[source]
        source: Box<EmployeeError>,
    },

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EmployeeError>;
