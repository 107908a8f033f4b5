use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Opaque identifier
    pub content_item_id: String,
    pub content_type: String,
    pub display_text: String,
    pub published: bool,
    /// Whether this is the latest version of the item
    pub latest: bool,
    pub owner: Option<String>,
    pub created_utc: DateTime<Utc>,
    pub modified_utc: DateTime<Utc>,
    /// Part and field data
    pub content: serde_json::Value,
}

impl ContentItem {
    /// Create a new, unpublished latest version
    pub fn new(
        content_item_id: impl Into<String>,
        content_type: impl Into<String>,
        display_text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            content_item_id: content_item_id.into(),
            content_type: content_type.into(),
            display_text: display_text.into(),
            published: false,
            latest: true,
            owner: None,
            created_utc: now,
            modified_utc: now,
            content: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    pub fn published(mut self) -> Self {
        self.published = true;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Membership of an item in a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainedPart {
    pub list_content_item_id: String,
    /// Position inside the list
    pub order: i64,
}

impl ContainedPart {
    pub fn new(list_content_item_id: impl Into<String>, order: i64) -> Self {
        Self {
            list_content_item_id: list_content_item_id.into(),
            order,
        }
    }
}
