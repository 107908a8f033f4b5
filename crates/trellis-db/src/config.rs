//! Database configuration module for trellis-db
//!
//! Location of the content store and how it is opened.

/// Configuration for the content store
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file path; missing parent directories are created on open
    pub path: String,
}

impl DatabaseConfig {
    /// Create a new database configuration with default settings
    pub fn new<P: Into<String>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:" || self.path.contains("mode=memory")
    }

    /// Get database type description
    pub fn database_type(&self) -> &'static str {
        if self.is_memory() {
            "in-memory SQLite"
        } else {
            "local SQLite"
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("db/trellis.db")
    }
}

impl<P: Into<String>> From<P> for DatabaseConfig {
    fn from(path: P) -> Self {
        Self::new(path)
    }
}
