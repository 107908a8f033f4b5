use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current site settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub base_url: Option<String>,
    pub time_zone: Option<String>,
    /// Free-form values written by recipe steps
    #[serde(default)]
    pub properties: BTreeMap<String, serde_json::Value>,
}

impl SiteSettings {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            base_url: None,
            time_zone: None,
            properties: BTreeMap::new(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::new("Trellis")
    }
}
