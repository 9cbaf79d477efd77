use serde::{Deserialize, Serialize};

use crate::entities::customers;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i32,
    pub user_id: Option<i64>,
    pub name: String,
    pub phone: String,
}

impl From<customers::Model> for CustomerResponse {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            phone: model.phone,
        }
    }
}
