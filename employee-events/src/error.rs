//! Error types for the employee events query layer

use thiserror::Error;

/// Result type for query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reaching or querying the events database
#[derive(Error, Debug)]
pub enum Error {
    /// Connection or statement failure (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Database file is missing
    #[error("Database not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
