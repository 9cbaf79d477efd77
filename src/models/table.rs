use serde::{Deserialize, Serialize};

use crate::entities::tables;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableRequest {
    pub restaurant_id: i32,
    pub number: String,
    pub seats: i16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTableRequest {
    pub number: Option<String>,
    pub seats: Option<i16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableListQuery {
    pub restaurant_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub number: String,
    pub seats: i16,
}

impl From<tables::Model> for TableResponse {
    fn from(model: tables::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            number: model.number,
            seats: model.seats,
        }
    }
}
