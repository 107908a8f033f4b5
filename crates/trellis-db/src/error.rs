//! Database error handling module for trellis-db
//!
//! Error types for store and query operations, with context about what
//! was being attempted.

use thiserror::Error;

/// Result type for database operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Connection-related errors
    #[error("Database connection failed: {message}")]
    ConnectionError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query execution errors
    #[error("Query execution failed: {query}")]
    QueryError {
        query: String,
        #[source]
        source: turso::Error,
    },

    /// Schema-related errors
    #[error("Schema error: {message}")]
    SchemaError {
        message: String,
        #[source]
        source: turso::Error,
    },

    /// Data validation errors
    #[error("Data validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Filesystem I/O errors
    #[error("Filesystem error: {path}")]
    FilesystemError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Generic database errors
    #[error("Database error: {message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DatabaseError {
    /// Create a new connection error with source
    pub fn connection_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::ConnectionError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new query error
    pub fn query<S: Into<String>>(query: S, source: turso::Error) -> Self {
        Self::QueryError {
            query: query.into(),
            source,
        }
    }

    /// Create a new schema error from the failing statement's error
    pub fn schema_with_source<S: Into<String>>(message: S, source: turso::Error) -> Self {
        Self::SchemaError {
            message: message.into(),
            source,
        }
    }

    /// Create a new validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new filesystem error
    pub fn filesystem<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::FilesystemError {
            path: path.into(),
            source,
        }
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(message: S, source: serde_json::Error) -> Self {
        Self::SerializationError {
            message: message.into(),
            source,
        }
    }

    /// Create a new generic error with source
    pub fn generic_with_source<
        S: Into<String>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Generic {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether the caller sent something unusable rather than the store failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationError { field, message } => {
                format!("Validation failed for {field}: {message}")
            }
            Self::ConnectionError { message, .. } => {
                format!("Database connection failed: {message}")
            }
            _ => self.to_string(),
        }
    }
}
