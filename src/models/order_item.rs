use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::order_items;

/// Create a line on an existing order via the flat /api/order-items resource
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderItemRequest {
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
}

/// Only the quantity may change; the price snapshot is immutable
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemListQuery {
    pub order_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: i32,
    pub order_id: i32,
    pub menu_item_id: i32,
    pub quantity: i32,
    pub price_at_order: Decimal,
    pub line_total: Decimal,
}

impl From<order_items::Model> for OrderItemResponse {
    fn from(model: order_items::Model) -> Self {
        let line_total = model.price_at_order * Decimal::from(model.quantity);
        Self {
            id: model.id,
            order_id: model.order_id,
            menu_item_id: model.menu_item_id,
            quantity: model.quantity,
            price_at_order: model.price_at_order,
            line_total,
        }
    }
}
