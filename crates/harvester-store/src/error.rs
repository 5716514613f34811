//! Error types for store operations.

use thiserror::Error;

/// Errors raised while reading or writing the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error on the store file or its directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Existing file has a different header than the store schema
    #[error("store {path} has unexpected header {found:?}")]
    SchemaMismatch {
        /// Store path
        path: String,
        /// Header found in the file
        found: Vec<String>,
    },

    /// Replacing the store with the freshly written file failed
    #[error("failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_display() {
        let err = StoreError::SchemaMismatch {
            path: "out.csv".to_string(),
            found: vec!["Name".to_string()],
        };
        assert!(err.to_string().contains("out.csv"));
        assert!(err.to_string().contains("Name"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(matches!(StoreError::from(io_err), StoreError::Io(_)));
    }
}
