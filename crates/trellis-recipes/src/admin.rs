//! Recipe admin flow
//!
//! Two independent operations: list the visible recipes, and run one
//! recipe picked by `(base_path, file_name)`. Both authorize first and
//! harvest fresh on every call.

use crate::error::Result;
use crate::services::{
    AuthorizationService, ExtensionManager, Notifier, RecipeExecutor, SharedHarvester,
    SiteService,
};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};
use trellis_constants::RECIPE_NOT_FOUND_MESSAGE;
use trellis_types::{
    find_owning_feature, new_execution_id, ExecutionContext, NotifyLevel, Permission,
    RecipeDescriptor, RecipeViewModel, User,
};

/// Outcome of an admin operation, mapped to an HTTP response by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum AdminResponse<T> {
    /// Caller lacks the recipe permission
    Unauthorized,
    /// Render this model
    View(T),
    /// Go back to the recipe listing
    RedirectToIndex,
}

/// Lists and executes recipes on behalf of an admin user
pub struct RecipeAdmin {
    authorization: Arc<dyn AuthorizationService>,
    harvesters: Vec<SharedHarvester>,
    executor: Arc<dyn RecipeExecutor>,
    site: Arc<dyn SiteService>,
    extensions: Arc<dyn ExtensionManager>,
}

impl RecipeAdmin {
    pub fn new(
        authorization: Arc<dyn AuthorizationService>,
        harvesters: Vec<SharedHarvester>,
        executor: Arc<dyn RecipeExecutor>,
        site: Arc<dyn SiteService>,
        extensions: Arc<dyn ExtensionManager>,
    ) -> Self {
        Self {
            authorization,
            harvesters,
            executor,
            site,
            extensions,
        }
    }

    /// Visible recipes, each attributed to the feature that ships it
    pub async fn index(&self, user: &User) -> Result<AdminResponse<Vec<RecipeViewModel>>> {
        if !self.is_authorized(user).await {
            return Ok(AdminResponse::Unauthorized);
        }

        let recipes = self.harvest_all().await?;
        let features = self.extensions.features().await?;

        let model: Vec<RecipeViewModel> = recipes
            .iter()
            .filter(|recipe| !recipe.is_hidden())
            .map(|recipe| {
                let feature = find_owning_feature(&features, &recipe.base_path)
                    .map(|feature| feature.name.clone());
                RecipeViewModel::from_descriptor(recipe, feature)
            })
            .collect();

        debug!(
            "Listing {} of {} harvested recipes",
            model.len(),
            recipes.len()
        );
        Ok(AdminResponse::View(model))
    }

    /// Run the recipe identified by `base_path` and `file_name`
    pub async fn execute(
        &self,
        user: &User,
        base_path: &str,
        file_name: &str,
        notifier: &dyn Notifier,
    ) -> Result<AdminResponse<()>> {
        if !self.is_authorized(user).await {
            return Ok(AdminResponse::Unauthorized);
        }

        let recipes = self.harvest_all().await?;
        let Some(recipe) = recipes
            .into_iter()
            .find(|recipe| recipe.matches(base_path, file_name))
        else {
            warn!(
                base_path = %base_path,
                file_name = %file_name,
                "Recipe not found"
            );
            notifier.add(NotifyLevel::Error, RECIPE_NOT_FOUND_MESSAGE.to_string());
            return Ok(AdminResponse::RedirectToIndex);
        };

        let site = self.site.site_settings().await?;
        let execution_id = new_execution_id();
        let context = ExecutionContext::new(site.site_name, user.name.clone());

        info!(
            execution_id = %execution_id,
            recipe = %recipe.name,
            admin = ?context.admin_username,
            "Executing recipe"
        );
        self.executor
            .execute(&execution_id, &recipe, &context)
            .await?;

        notifier.add(
            NotifyLevel::Success,
            format!("The recipe '{}' has been run successfully", recipe.name),
        );
        Ok(AdminResponse::RedirectToIndex)
    }

    async fn is_authorized(&self, user: &User) -> bool {
        let allowed = self
            .authorization
            .authorize(user, &Permission::execute_recipes())
            .await;
        if !allowed {
            debug!(user = ?user.name, "Recipe admin access denied");
        }
        allowed
    }

    /// Harvest every source concurrently; the first failure aborts the lot
    async fn harvest_all(&self) -> Result<Vec<RecipeDescriptor>> {
        let collections = try_join_all(self.harvesters.iter().map(|harvester| async move {
            harvester.harvest_recipes().await.inspect_err(|e| {
                warn!(harvester = %harvester.name(), "Harvest failed: {}", e);
            })
        }))
        .await?;
        Ok(collections.into_iter().flatten().collect())
    }
}
