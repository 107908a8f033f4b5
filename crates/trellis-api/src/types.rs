use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use trellis_db::{ContentStore, ItemPredicate};
use trellis_recipes::RecipeAdmin;
use trellis_types::{NotifyEntry, RecipeViewModel};

/// Notifications waiting for the next listing, keyed by user name
pub type NotificationQueue = Arc<Mutex<HashMap<Option<String>, Vec<NotifyEntry>>>>;

/// API state shared by every handler
#[derive(Clone)]
pub struct ApiState {
    pub admin: Arc<RecipeAdmin>,
    pub store: Arc<ContentStore>,
    pub notifications: NotificationQueue,
}

impl ApiState {
    pub fn new(admin: Arc<RecipeAdmin>, store: Arc<ContentStore>) -> Self {
        Self {
            admin,
            store,
            notifications: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Queue messages for `user`'s next listing
    pub async fn push_notifications(&self, user: Option<String>, entries: Vec<NotifyEntry>) {
        if entries.is_empty() {
            return;
        }
        self.notifications
            .lock()
            .await
            .entry(user)
            .or_default()
            .extend(entries);
    }

    /// Remove and return everything queued for `user`
    pub async fn take_notifications(&self, user: &Option<String>) -> Vec<NotifyEntry> {
        self.notifications
            .lock()
            .await
            .remove(user)
            .unwrap_or_default()
    }
}

/// Recipe listing response
#[derive(Debug, Serialize)]
pub struct RecipesIndexResponse {
    pub recipes: Vec<RecipeViewModel>,
    pub notifications: Vec<NotifyEntry>,
}

/// Execute request; missing fields select no recipe
#[derive(Debug, Default, Deserialize)]
pub struct ExecuteRecipeRequest {
    #[serde(default, rename = "basePath")]
    pub base_path: String,
    #[serde(default, rename = "fileName")]
    pub file_name: String,
}

/// Publication filter of the list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishedFilter {
    All,
    Published,
    Draft,
}

impl PublishedFilter {
    pub fn predicate(self) -> ItemPredicate {
        match self {
            PublishedFilter::All => ItemPredicate::And(Vec::new()),
            PublishedFilter::Published => ItemPredicate::Published,
            PublishedFilter::Draft => ItemPredicate::Published.negate(),
        }
    }
}

/// Query string of the list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub published: Option<PublishedFilter>,
}

impl ListItemsQuery {
    /// `None` keeps the store default (published only)
    pub fn predicate(&self) -> Option<ItemPredicate> {
        self.published.map(PublishedFilter::predicate)
    }
}

/// Item count response
#[derive(Debug, Serialize, Deserialize)]
pub struct CountResponse {
    pub list_id: String,
    pub count: i64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Error response type
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}
