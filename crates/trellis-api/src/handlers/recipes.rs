//! Recipe admin endpoints
//!
//! `GET /admin/recipes` lists the visible recipes together with any
//! notifications queued for the caller. `POST /admin/recipes/execute` runs
//! one recipe and redirects back to the listing, where the outcome is shown.
use crate::handlers::health::create_error_response;
use crate::handlers::identity::CurrentUser;
use crate::types::*;
use axum::{
    extract::{rejection::FormRejection, Form, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use tracing::{debug, error, info};
use trellis_constants::RECIPES_INDEX_ROUTE;
use trellis_recipes::{AdminResponse, InMemoryNotifier, RecipeError};

/// List recipes available to the caller
pub async fn list_recipes(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
) -> impl IntoResponse {
    match state.admin.index(&user).await {
        Ok(AdminResponse::View(recipes)) => {
            let notifications = state.take_notifications(&user.name).await;
            Json(RecipesIndexResponse {
                recipes,
                notifications,
            })
            .into_response()
        }
        Ok(AdminResponse::RedirectToIndex) => Redirect::to(RECIPES_INDEX_ROUTE).into_response(),
        Ok(AdminResponse::Unauthorized) => unauthorized(),
        Err(e) => recipe_error_response("list recipes", e),
    }
}

/// Run the recipe identified by `basePath` and `fileName`.
/// An unreadable body counts as empty fields so authorization still decides.
pub async fn execute_recipe(
    State(state): State<ApiState>,
    CurrentUser(user): CurrentUser,
    form: Result<Form<ExecuteRecipeRequest>, FormRejection>,
) -> impl IntoResponse {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            debug!("Ignoring unreadable recipe form: {}", rejection);
            ExecuteRecipeRequest::default()
        }
    };
    info!(
        base_path = %request.base_path,
        file_name = %request.file_name,
        "Recipe execution requested"
    );

    let notifier = InMemoryNotifier::new();
    let result = state
        .admin
        .execute(&user, &request.base_path, &request.file_name, &notifier)
        .await;

    // Keep messages raised before a failure as well
    state
        .push_notifications(user.name.clone(), notifier.take())
        .await;

    match result {
        Ok(AdminResponse::Unauthorized) => unauthorized(),
        Ok(_) => Redirect::to(RECIPES_INDEX_ROUTE).into_response(),
        Err(e) => recipe_error_response("execute recipe", e),
    }
}

fn unauthorized() -> Response {
    create_error_response(
        StatusCode::UNAUTHORIZED,
        "Recipe administration requires the ExecuteRecipes permission".to_string(),
    )
    .into_response()
}

fn recipe_error_response(action: &str, e: RecipeError) -> Response {
    error!("Failed to {}: {}", action, e);
    create_error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to {action}: {e}"),
    )
    .into_response()
}
