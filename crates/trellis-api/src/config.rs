//! Server configuration from environment variables

use std::path::PathBuf;
use trellis_constants::{
    ENV_CONTENT_ROOT, ENV_DATABASE_PATH, ENV_PORT, ENV_RECIPE_ADMINS, ENV_SITE_NAME,
};
use trellis_db::DatabaseConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "db/trellis.db";
const DEFAULT_SITE_NAME: &str = "Trellis";

/// Runtime settings of the API server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_path: String,
    /// Directory holding `Recipes/`, `modules/` and `themes/`
    pub content_root: PathBuf,
    pub site_name: String,
    /// Users granted the recipe permission
    pub recipe_admins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            content_root: PathBuf::from("."),
            site_name: DEFAULT_SITE_NAME.to_string(),
            recipe_admins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Read the process environment; call `dotenvy::dotenv()` first to
    /// pick up a `.env` file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            port: lookup(ENV_PORT)
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(defaults.port),
            database_path: lookup(ENV_DATABASE_PATH)
                .filter(|path| !path.trim().is_empty())
                .unwrap_or(defaults.database_path),
            content_root: lookup(ENV_CONTENT_ROOT)
                .filter(|root| !root.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.content_root),
            site_name: lookup(ENV_SITE_NAME)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.site_name),
            recipe_admins: lookup(ENV_RECIPE_ADMINS)
                .map(|admins| parse_admins(&admins))
                .unwrap_or_default(),
        }
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_path.clone())
    }
}

/// Split a comma-separated user list, dropping blanks
fn parse_admins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
