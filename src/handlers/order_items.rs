use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::models::order_item::{
    CreateOrderItemRequest, OrderItemListQuery, OrderItemResponse, UpdateOrderItemRequest,
};
use crate::services::orders::OrderService;
use crate::AppState;

pub async fn list_order_items(
    State(state): State<AppState>,
    Query(query): Query<OrderItemListQuery>,
) -> Result<Json<Vec<OrderItemResponse>>, ApiError> {
    let items = OrderService::list_items(&state.db, query.order_id).await?;
    Ok(Json(items.into_iter().map(OrderItemResponse::from).collect()))
}

pub async fn create_order_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItemResponse>), ApiError> {
    let item = OrderService::add_item(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn get_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderItemResponse>, ApiError> {
    let item = OrderService::get_item(&state.db, id).await?;
    Ok(Json(item.into()))
}

pub async fn update_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderItemRequest>,
) -> Result<Json<OrderItemResponse>, ApiError> {
    let item = OrderService::update_item(&state.db, id, payload).await?;
    Ok(Json(item.into()))
}

pub async fn delete_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    OrderService::remove_item(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
