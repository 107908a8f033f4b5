use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Values handed to the recipe executor for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExecutionContext {
    pub site_name: String,
    /// Name of the admin who triggered the run
    pub admin_username: Option<String>,
}

impl ExecutionContext {
    pub fn new(site_name: impl Into<String>, admin_username: Option<String>) -> Self {
        Self {
            site_name: site_name.into(),
            admin_username,
        }
    }

    /// Look up a context value by its recipe variable name
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "SiteName" => Some(self.site_name.as_str()),
            "AdminUsername" => self.admin_username.as_deref(),
            _ => None,
        }
    }
}

/// Fresh execution id: a v4 UUID as 32 lowercase hex characters
pub fn new_execution_id() -> String {
    Uuid::new_v4().simple().to_string()
}
