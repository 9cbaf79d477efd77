use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::menu_items;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItemRequest {
    pub restaurant_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub photo: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemListQuery {
    pub restaurant_id: Option<i32>,
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemResponse {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub photo: Option<String>,
    pub available: bool,
}

impl From<menu_items::Model> for MenuItemResponse {
    fn from(model: menu_items::Model) -> Self {
        Self {
            id: model.id,
            restaurant_id: model.restaurant_id,
            name: model.name,
            description: model.description,
            price: model.price,
            photo: model.photo,
            available: model.available,
        }
    }
}
