//! Collaborator traits used by the recipe admin flow
//!
//! Implementations are shared as `Arc<dyn Trait>`; all of them must be
//! `Send + Sync` so a single instance can serve concurrent requests.

use crate::error::Result;
use std::sync::Arc;
use trellis_types::{
    ExecutionContext, FeatureDescriptor, NotifyLevel, Permission, RecipeDescriptor, SiteSettings,
    User,
};

/// Decides whether a user holds a permission
#[async_trait::async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn authorize(&self, user: &User, permission: &Permission) -> bool;
}

/// Discovers recipes from one source
#[async_trait::async_trait]
pub trait RecipeHarvester: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Current recipes of this source; reflects the source at call time
    async fn harvest_recipes(&self) -> Result<Vec<RecipeDescriptor>>;
}

/// Runs a recipe
#[async_trait::async_trait]
pub trait RecipeExecutor: Send + Sync {
    async fn execute(
        &self,
        execution_id: &str,
        recipe: &RecipeDescriptor,
        context: &ExecutionContext,
    ) -> Result<()>;
}

/// Provides the current site settings
#[async_trait::async_trait]
pub trait SiteService: Send + Sync {
    async fn site_settings(&self) -> Result<SiteSettings>;
}

/// Collects user-facing messages for the next rendered page
pub trait Notifier: Send + Sync {
    fn add(&self, level: NotifyLevel, message: String);
}

/// Lists installed features
#[async_trait::async_trait]
pub trait ExtensionManager: Send + Sync {
    /// Features in enumeration order, as installed at call time
    async fn features(&self) -> Result<Vec<FeatureDescriptor>>;
}

/// Type alias for a shared harvester
pub type SharedHarvester = Arc<dyn RecipeHarvester>;
