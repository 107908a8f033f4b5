//! HTTP surface for recipe administration and list queries

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use trellis_constants::{RECIPES_EXECUTE_ROUTE, RECIPES_INDEX_ROUTE};
use trellis_db::ContentStore;
use trellis_recipes::{
    ApplicationRecipeHarvester, DirectoryExtensionManager, ExtensionRecipeHarvester,
    InMemorySiteService, LogStepHandler, PermissionAuthorizer, RecipeAdmin, SettingsStepHandler,
    SharedHarvester, StepRecipeExecutor,
};
use trellis_types::{Permission, SiteSettings};

pub mod config;
pub mod handlers;
pub mod types;

use config::ServerConfig;
use handlers::*;
use types::ApiState;

/// Create API router with all endpoints
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_check))
        .route(RECIPES_INDEX_ROUTE, get(list_recipes))
        .route(RECIPES_EXECUTE_ROUTE, post(execute_recipe))
        .route("/api/v1/lists/{list_id}/items", get(list_items))
        .route("/api/v1/lists/{list_id}/items/count", get(count_items))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Open the item store and wire the recipe admin from `config`
pub async fn build_state(config: &ServerConfig) -> anyhow::Result<ApiState> {
    info!("Connecting to database at: {}", config.database_path);
    let store = Arc::new(ContentStore::new(config.database_config()).await?);
    info!("Database connection established");

    let root = config.content_root.clone();
    let extensions = Arc::new(DirectoryExtensionManager::new(root.clone()));
    let site = Arc::new(InMemorySiteService::new(SiteSettings::new(
        config.site_name.clone(),
    )));

    let executor = StepRecipeExecutor::new(root.clone())
        .with_handler(Arc::new(LogStepHandler))
        .with_handler(Arc::new(SettingsStepHandler::new(site.clone())));

    let permission = Permission::execute_recipes();
    let authorizer = config
        .recipe_admins
        .iter()
        .fold(PermissionAuthorizer::new(), |authorizer, name| {
            authorizer.grant(name.clone(), &permission)
        });
    info!(
        "Recipe administration granted to {} user(s)",
        config.recipe_admins.len()
    );

    let harvesters: Vec<SharedHarvester> = vec![
        Arc::new(ApplicationRecipeHarvester::new(root.clone())),
        Arc::new(ExtensionRecipeHarvester::new(root, extensions.clone())),
    ];

    let admin = RecipeAdmin::new(
        Arc::new(authorizer),
        harvesters,
        Arc::new(executor),
        site,
        extensions,
    );

    Ok(ApiState::new(Arc::new(admin), store))
}
