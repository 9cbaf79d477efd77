use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::TransactionTrait;

use crate::error::ApiError;
use crate::models::table::{CreateTableRequest, TableListQuery, TableResponse, UpdateTableRequest};
use crate::repositories::tables::TableRepo;
use crate::AppState;

pub async fn list_tables(
    State(state): State<AppState>,
    Query(query): Query<TableListQuery>,
) -> Result<Json<Vec<TableResponse>>, ApiError> {
    let tables = TableRepo::list(&state.db, query.restaurant_id).await?;
    Ok(Json(tables.into_iter().map(TableResponse::from).collect()))
}

pub async fn create_table(
    State(state): State<AppState>,
    Json(payload): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<TableResponse>), ApiError> {
    let txn = state.db.begin().await?;
    let table = TableRepo::create(&txn, payload).await?;
    txn.commit().await?;
    Ok((StatusCode::CREATED, Json(table.into())))
}

pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TableResponse>, ApiError> {
    let table = TableRepo::get(&state.db, id).await?;
    Ok(Json(table.into()))
}

pub async fn update_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTableRequest>,
) -> Result<Json<TableResponse>, ApiError> {
    let txn = state.db.begin().await?;
    let table = TableRepo::update(&txn, id, payload).await?;
    txn.commit().await?;
    Ok(Json(table.into()))
}

pub async fn delete_table(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    TableRepo::delete(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
