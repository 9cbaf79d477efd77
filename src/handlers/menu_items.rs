use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::TransactionTrait;

use crate::error::ApiError;
use crate::models::menu_item::{
    CreateMenuItemRequest, MenuItemListQuery, MenuItemResponse, UpdateMenuItemRequest,
};
use crate::repositories::menu_items::MenuItemRepo;
use crate::AppState;

pub async fn list_menu_items(
    State(state): State<AppState>,
    Query(query): Query<MenuItemListQuery>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let items = MenuItemRepo::list(&state.db, query).await?;
    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

pub async fn create_menu_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItemResponse>), ApiError> {
    let item = MenuItemRepo::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = MenuItemRepo::get(&state.db, id).await?;
    Ok(Json(item.into()))
}

pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let item = MenuItemRepo::update(&state.db, id, payload).await?;
    Ok(Json(item.into()))
}

pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    MenuItemRepo::delete(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
