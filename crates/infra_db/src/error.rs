//! Database error types
//!
//! The warehouse workload is read-only, so the error surface is small:
//! connection problems, failed queries, and rows that cannot be turned into
//! domain records.

use thiserror::Error;

/// Errors that can occur during warehouse operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to warehouse: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A fetched row is missing a required column value
    #[error("Malformed row: {0}")]
    MalformedRow(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a malformed-row error naming the offending column
    pub fn malformed_row(column: &str, detail: impl std::fmt::Display) -> Self {
        DatabaseError::MalformedRow(format!("column '{}': {}", column, detail))
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors to the appropriate DatabaseError variant
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => {
                DatabaseError::QueryFailed(db_err.message().to_string())
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}
