use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::TransactionTrait;

use crate::error::ApiError;
use crate::models::order::{
    CreateOrderRequest, OrderItemInput, OrderListQuery, OrderResponse, StatusUpdateRequest,
    UpdateOrderRequest,
};
use crate::models::order_item::{CreateOrderItemRequest, OrderItemResponse};
use crate::repositories::orders::OrderRepo;
use crate::services::orders::OrderService;
use crate::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = OrderRepo::list(&state.db, &query).await?;
    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let items = OrderRepo::get_items(&state.db, order.id).await?;
        responses.push(OrderResponse::from_model_with_items(order, items));
    }
    Ok(Json(responses))
}

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = OrderService::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderService::get(&state.db, id).await?;
    Ok(Json(order))
}

pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderService::update(&state.db, id, payload).await?;
    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    OrderRepo::delete(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = OrderService::transition(&state.db, id, payload).await?;
    Ok(Json(order))
}

/// Nested convenience route: POST /api/orders/{id}/items
pub async fn add_order_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OrderItemInput>,
) -> Result<(StatusCode, Json<OrderItemResponse>), ApiError> {
    let item = OrderService::add_item(
        &state.db,
        CreateOrderItemRequest {
            order_id: id,
            menu_item_id: payload.menu_item_id,
            quantity: payload.quantity,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}
