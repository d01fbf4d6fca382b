//! Error types for dbstruct

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for dbstruct operations
pub type Result<T> = std::result::Result<T, DbStructError>;

/// Errors that can occur while reading the catalog or writing generated code
#[derive(Error, Debug)]
pub enum DbStructError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Connection or query failure against the schema catalog
    #[error("Catalog query failed: {0}")]
    QueryError(String),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DbStructError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DbStructError::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl From<mysql_async::Error> for DbStructError {
    fn from(err: mysql_async::Error) -> Self {
        DbStructError::QueryError(err.to_string())
    }
}

impl From<sqlparser::parser::ParserError> for DbStructError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        DbStructError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for DbStructError {
    fn from(err: config::ConfigError) -> Self {
        DbStructError::ConfigError(err.to_string())
    }
}
