//! Error types for Gazette.

use thiserror::Error;

/// Common error type for Gazette.
#[derive(Error, Debug)]
pub enum GazetteError {
    /// Database error.
    ///
    /// Any store failure other than a uniqueness conflict ends up here.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// A unique constraint rejected an insert.
    #[error("conflict: {0}")]
    Conflict(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Feed fetch or parse error.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GazetteError {
    /// Returns true if this error came from a unique constraint violation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GazetteError::Conflict(_))
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for GazetteError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return GazetteError::Conflict(db_err.message().to_string());
            }
        }
        GazetteError::Database(e.to_string())
    }
}

/// Result type alias for Gazette operations.
pub type Result<T> = std::result::Result<T, GazetteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = GazetteError::Auth("no token provided".to_string());
        assert_eq!(err.to_string(), "authentication error: no token provided");
    }

    #[test]
    fn test_validation_error_display() {
        let err = GazetteError::Validation("name cannot be empty".to_string());
        assert_eq!(err.to_string(), "validation error: name cannot be empty");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = GazetteError::NotFound("feed".to_string());
        assert_eq!(err.to_string(), "feed not found");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = GazetteError::Fetch("HTTP error: 500".to_string());
        assert_eq!(err.to_string(), "fetch error: HTTP error: 500");
    }

    #[test]
    fn test_is_conflict() {
        assert!(GazetteError::Conflict("feeds.url".to_string()).is_conflict());
        assert!(!GazetteError::Database("disk full".to_string()).is_conflict());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GazetteError = io_err.into();
        assert!(matches!(err, GazetteError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_row_not_found_is_database_error() {
        let err: GazetteError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, GazetteError::Database(_)));
    }
}
