//! List content item endpoints
use crate::handlers::health::create_error_response;
use crate::types::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error};
use trellis_db::{query_list_items, query_list_items_count, DatabaseError};

/// Items contained in a list
pub async fn list_items(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
    Query(query): Query<ListItemsQuery>,
) -> impl IntoResponse {
    debug!(list_id = %list_id, published = ?query.published, "Listing list items");

    match query_list_items(&state.store, &list_id, query.predicate()).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => database_error_response(&list_id, e),
    }
}

/// Number of items contained in a list
pub async fn count_items(
    State(state): State<ApiState>,
    Path(list_id): Path<String>,
    Query(query): Query<ListItemsQuery>,
) -> impl IntoResponse {
    match query_list_items_count(&state.store, &list_id, query.predicate()).await {
        Ok(count) => Json(CountResponse { list_id, count }).into_response(),
        Err(e) => database_error_response(&list_id, e),
    }
}

fn database_error_response(list_id: &str, e: DatabaseError) -> Response {
    if e.is_client_error() {
        return create_error_response(StatusCode::BAD_REQUEST, e.user_message()).into_response();
    }

    error!("Failed to query list {}: {}", list_id, e);
    create_error_response(StatusCode::INTERNAL_SERVER_ERROR, e.user_message()).into_response()
}
