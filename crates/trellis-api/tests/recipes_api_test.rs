//! Integration tests for the recipe admin endpoints
//!
//! Each test serves a content root and item store from a temporary
//! directory, with `admin` and `editor` granted the recipe permission.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;
use trellis_api::{build_state, config::ServerConfig, create_router};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Create a content root and an app serving it
async fn setup_test_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("site");

    write(
        &root,
        "Recipes/agency.recipe.json",
        r#"{
            "name": "Agency",
            "displayName": "Agency site",
            "issetuprecipe": true,
            "steps": [
                { "name": "settings", "SiteName": "{{SiteName}} Agency" },
                { "name": "log", "message": "Agency recipe ran for {{AdminUsername}}" }
            ]
        }"#,
    );
    write(
        &root,
        "Recipes/broken.recipe.json",
        r#"{ "name": "Broken", "tags": ["Hidden"], "steps": [{ "name": "missing-step" }] }"#,
    );
    write(&root, "modules/Blog/manifest.json", r#"{ "name": "Blog" }"#);
    write(
        &root,
        "modules/Blog/Recipes/blog.recipe.json",
        r#"{ "name": "Blog", "description": "A blog", "tags": ["blog"], "steps": [] }"#,
    );

    let config = ServerConfig {
        database_path: temp_dir
            .path()
            .join("db")
            .join("test.db")
            .to_string_lossy()
            .into_owned(),
        content_root: root,
        site_name: "Test Site".to_string(),
        recipe_admins: vec!["admin".to_string(), "editor".to_string()],
        ..ServerConfig::default()
    };

    let state = build_state(&config)
        .await
        .expect("Failed to build API state");
    (create_router(state), temp_dir)
}

fn index_request(user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/admin/recipes").method("GET");
    if let Some(user) = user {
        builder = builder.header("x-remote-user", user);
    }
    builder.body(Body::empty()).unwrap()
}

fn execute_request(user: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .uri("/admin/recipes/execute")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(user) = user {
        builder = builder.header("x-remote-user", user);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_anonymous_listing_is_unauthorized() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app.oneshot(index_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error_response = json_body(response).await;
    assert_eq!(error_response["error"], "401");
}

#[tokio::test]
async fn test_user_without_permission_is_unauthorized() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(index_request(Some("visitor")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(execute_request(
            Some("visitor"),
            "basePath=Recipes&fileName=agency.recipe.json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_form_body_is_still_authorized_first() {
    let (app, _temp_dir) = setup_test_app().await;
    let json_request = |user: Option<&str>| {
        let mut builder = Request::builder()
            .uri("/admin/recipes/execute")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header("x-remote-user", user);
        }
        builder
            .body(Body::from(r#"{"basePath":"Recipes"}"#))
            .unwrap()
    };

    let response = app.clone().oneshot(json_request(None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // An admin gets the empty-fields outcome
    let response = app
        .clone()
        .oneshot(json_request(Some("admin")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    assert_eq!(body["notifications"][0]["message"], "Recipe was not found");
}

#[tokio::test]
async fn test_extension_installed_after_startup_is_listed() {
    let (app, temp_dir) = setup_test_app().await;
    write(
        &temp_dir.path().join("site"),
        "modules/Late/Recipes/late.recipe.json",
        r#"{ "name": "Late", "steps": [] }"#,
    );

    let response = app.oneshot(index_request(Some("admin"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let late = body["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|recipe| recipe["name"] == "Late")
        .expect("late recipe listed");
    assert_eq!(late["basePath"], "modules/Late/Recipes");
    assert_eq!(late["feature"], "Late");
}

#[tokio::test]
async fn test_listing_hides_hidden_and_attributes_features() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app.oneshot(index_request(Some("admin"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 2);

    assert_eq!(recipes[0]["name"], "Agency");
    assert_eq!(recipes[0]["displayName"], "Agency site");
    assert_eq!(recipes[0]["basePath"], "Recipes");
    assert_eq!(recipes[0]["isSetupRecipe"], true);
    assert_eq!(recipes[0]["feature"], Value::Null);

    assert_eq!(recipes[1]["name"], "Blog");
    assert_eq!(recipes[1]["basePath"], "modules/Blog/Recipes");
    assert_eq!(recipes[1]["feature"], "Blog");

    assert!(body["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_redirects_and_notifies_next_listing() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(execute_request(
            Some("admin"),
            "basePath=Recipes&fileName=agency.recipe.json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/recipes"
    );

    let body = json_body(
        app.clone()
            .oneshot(index_request(Some("admin")))
            .await
            .unwrap(),
    )
    .await;
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["level"], "success");
    assert!(notifications[0]["message"]
        .as_str()
        .unwrap()
        .contains("Agency"));

    // Shown once
    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    assert!(body["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_execute_unknown_recipe_notifies_error() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(execute_request(
            Some("admin"),
            "basePath=modules/Blog&fileName=blog.recipe.json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["level"], "error");
    assert_eq!(notifications[0]["message"], "Recipe was not found");
}

#[tokio::test]
async fn test_execute_without_fields_finds_nothing() {
    let (app, _temp_dir) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(execute_request(Some("admin"), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    assert_eq!(body["notifications"][0]["level"], "error");
}

#[tokio::test]
async fn test_notifications_are_kept_per_user() {
    let (app, _temp_dir) = setup_test_app().await;

    app.clone()
        .oneshot(execute_request(
            Some("admin"),
            "basePath=modules/Blog/Recipes&fileName=blog.recipe.json",
        ))
        .await
        .unwrap();

    let body = json_body(
        app.clone()
            .oneshot(index_request(Some("editor")))
            .await
            .unwrap(),
    )
    .await;
    assert!(body["notifications"].as_array().unwrap().is_empty());

    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    assert_eq!(body["notifications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failing_recipe_returns_server_error() {
    let (app, _temp_dir) = setup_test_app().await;

    // Hidden recipes are not listed but can still be run
    let response = app
        .clone()
        .oneshot(execute_request(
            Some("admin"),
            "basePath=Recipes&fileName=broken.recipe.json",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error_response = json_body(response).await;
    assert_eq!(error_response["error"], "500");
    assert!(error_response["message"]
        .as_str()
        .unwrap()
        .contains("missing-step"));

    let body = json_body(app.oneshot(index_request(Some("admin"))).await.unwrap()).await;
    assert!(body["notifications"].as_array().unwrap().is_empty());
}
