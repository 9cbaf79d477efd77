use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sea_orm::TransactionTrait;

use crate::error::ApiError;
use crate::models::restaurant::{
    CreateRestaurantRequest, RestaurantResponse, UpdateRestaurantRequest,
};
use crate::repositories::restaurants::RestaurantRepo;
use crate::AppState;

pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let restaurants = RestaurantRepo::list(&state.db).await?;
    Ok(Json(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    let restaurant = RestaurantRepo::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(restaurant.into())))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant = RestaurantRepo::get(&state.db, id).await?;
    Ok(Json(restaurant.into()))
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRestaurantRequest>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant = RestaurantRepo::update(&state.db, id, payload).await?;
    Ok(Json(restaurant.into()))
}

pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let txn = state.db.begin().await?;
    RestaurantRepo::delete(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}
