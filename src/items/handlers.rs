use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{present, ApiError, ApiJson, ApiPath},
    items::{
        dto::{CreateItemRequest, MessageResponse, UpdateItemRequest},
        repo_types::{Item, ItemPatch, NewItem},
        services,
    },
    state::AppState,
};

pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.items.list().await?))
}

#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    _caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(services::get_item(state.items.as_ref(), id).await?))
}

#[instrument(skip(state, body))]
pub async fn create_item(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let (Some(title), Some(description)) = (present(body.title), present(body.description))
    else {
        return Err(ApiError::Validation(
            "Title and description are required".into(),
        ));
    };

    let new_item = NewItem {
        title,
        description,
        status: body.status.unwrap_or_default(),
        created_by: caller.username.clone(),
    };
    let item = services::create_item(state.items.as_ref(), &caller, new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state, body))]
pub async fn update_item(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let patch = ItemPatch {
        title: present(body.title),
        description: present(body.description),
        status: body.status,
    };
    Ok(Json(
        services::update_item(state.items.as_ref(), &caller, id, patch).await?,
    ))
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::delete_item(state.items.as_ref(), &caller, id).await?;
    Ok(Json(MessageResponse {
        message: "Item deleted successfully",
    }))
}
