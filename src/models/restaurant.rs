//! Request/response DTOs for the restaurants resource.
//!
//! Fields are listed explicitly per DTO; schema additions never leak into the
//! API by accident.

use serde::{Deserialize, Serialize};

use crate::entities::restaurants;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Partial update: absent fields keep their current value
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<restaurants::Model> for RestaurantResponse {
    fn from(model: restaurants::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            description: model.description,
            photo: model.photo,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }
}
