use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Column mismatch for table '{table}': expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        table: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("'{name}' already exists as {kind} and cannot be loaded into")]
    IncompatibleObject { name: String, kind: String },
}

impl EtlError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::IoError(e) => format!("Could not read input: {}", e),
            EtlError::CsvError(e) => format!("The CSV file is malformed: {}", e),
            EtlError::DatabaseError(e) => format!("The database rejected the operation: {}", e),
            EtlError::ConfigError { message } => format!("Configuration problem: {}", message),
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            EtlError::ValidationError { message } => format!("Invalid data: {}", message),
            EtlError::SchemaMismatch { table, .. } => {
                format!("CSV columns do not match table '{}'", table)
            }
            EtlError::IncompatibleObject { name, kind } => {
                format!("'{}' exists as {} and cannot receive rows", name, kind)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::IoError(_) => "Check that the --csv path exists and is readable",
            EtlError::CsvError(_) => {
                "Make sure the file is UTF-8, comma separated and every row has the header's column count"
            }
            EtlError::DatabaseError(sqlx::Error::Database(_)) => {
                "The server refused the statement: check the CSV values against the table's column types, constraints and the user's privileges"
            }
            EtlError::DatabaseError(_) => {
                "Check POSTGRES_HOST/PORT/DB/USER/PASSWORD and that the server is reachable"
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the command line flags or environment variables"
            }
            EtlError::ValidationError { .. } => "Fix the CSV header row",
            EtlError::SchemaMismatch { .. } => {
                "Load into a different --table or align the CSV header with the existing table"
            }
            EtlError::IncompatibleObject { .. } => "Choose a different --table name",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
