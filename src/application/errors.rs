//! Application layer errors

use thiserror::Error;

/// General phonebook errors
#[derive(Error, Debug)]
pub enum PhonebookError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No handler registered for event: {0}")]
    UnknownEvent(String),

    #[error("Please select a record to delete")]
    NothingSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Contact store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Malformed seed record on line {line}: {reason}")]
    MalformedSeedRecord { line: usize, reason: String },

    #[error("Seed file error: {0}")]
    SeedFile(#[source] csv::Error),

    #[error("Query error: {0}")]
    Query(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        use rusqlite::ErrorCode;

        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::ConstraintViolation(err.to_string()),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::ReadOnly,
            ) => StoreError::ConnectionFailure(err.to_string()),
            _ => StoreError::Query(err),
        }
    }
}

/// Form validation errors, worded as they are shown to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the first name")]
    MissingFirstName,

    #[error("Please enter the last name")]
    MissingLastName,

    #[error("Please enter the Number")]
    MissingNumber,

    #[error("Please enter a valid number")]
    NonNumeric,

    #[error("The phone number must be between 8 and 11 digits")]
    BadLength(usize),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_error_mapping() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT_CHECK),
            Some("CHECK constraint failed: first_name".to_string()),
        );
        assert!(matches!(StoreError::from(err), StoreError::ConstraintViolation(_)));
    }

    #[test]
    fn test_cannot_open_maps_to_connection_failure() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
            None,
        );
        assert!(matches!(StoreError::from(err), StoreError::ConnectionFailure(_)));
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(PhonebookError::from(err), PhonebookError::Json(_)));
    }

    #[test]
    fn test_validation_message_passthrough() {
        let err = PhonebookError::from(ValidationError::BadLength(5));
        assert_eq!(err.to_string(), "The phone number must be between 8 and 11 digits");
    }
}
