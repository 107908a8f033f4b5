//! In-memory site settings

use crate::error::Result;
use crate::services::SiteService;
use tokio::sync::RwLock;
use trellis_types::SiteSettings;

/// Site settings held in memory, updated by the `settings` recipe step
#[derive(Debug, Default)]
pub struct InMemorySiteService {
    settings: RwLock<SiteSettings>,
}

impl InMemorySiteService {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Apply `update` to the current settings
    pub async fn update<F>(&self, update: F)
    where
        F: FnOnce(&mut SiteSettings),
    {
        let mut settings = self.settings.write().await;
        update(&mut settings);
    }
}

#[async_trait::async_trait]
impl SiteService for InMemorySiteService {
    async fn site_settings(&self) -> Result<SiteSettings> {
        Ok(self.settings.read().await.clone())
    }
}
