use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::TransactionTrait;

use crate::error::ApiError;
use crate::models::customer::{CreateCustomerRequest, CustomerResponse, UpdateCustomerRequest};
use crate::repositories::customers::CustomerRepo;
use crate::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = CustomerRepo::list(&state.db).await?;
    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    let customer = CustomerRepo::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = CustomerRepo::get(&state.db, id).await?;
    Ok(Json(customer.into()))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = CustomerRepo::update(&state.db, id, payload).await?;
    Ok(Json(customer.into()))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    CustomerRepo::delete(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
