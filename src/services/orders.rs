//! The order aggregate: price snapshotting, total recalculation and the
//! status lifecycle. This is the only non-CRUD logic in the backend.
//!
//! Every mutating operation runs inside a single transaction so the stored
//! `total_amount` snapshot always matches the item rows it was computed from.

use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{order_items, orders, prelude::*};
use crate::error::ApiError;
use crate::models::order::{
    CreateOrderRequest, OrderItemInput, OrderResponse, OrderStatus, StatusUpdateRequest,
    UpdateOrderRequest,
};
use crate::models::order_item::{CreateOrderItemRequest, UpdateOrderItemRequest};
use crate::repositories::customers::CustomerRepo;
use crate::repositories::menu_items::MenuItemRepo;
use crate::repositories::orders::OrderRepo;
use crate::repositories::restaurants::RestaurantRepo;
use crate::repositories::tables::TableRepo;

/// `price_at_order × quantity` for one line
pub fn line_total(price_at_order: Decimal, quantity: i32) -> Decimal {
    price_at_order * Decimal::from(quantity)
}

/// Sum of line totals over stored snapshots. Never reads live menu prices.
pub fn order_total(items: &[order_items::Model]) -> Decimal {
    items
        .iter()
        .map(|item| line_total(item.price_at_order, item.quantity))
        .sum()
}

pub struct OrderService;

impl OrderService {
    pub async fn create(
        db: &DatabaseConnection,
        req: CreateOrderRequest,
    ) -> Result<OrderResponse, ApiError> {
        let txn = db.begin().await?;

        RestaurantRepo::get(&txn, req.restaurant_id).await?;
        if let Some(customer_id) = req.customer_id {
            CustomerRepo::get(&txn, customer_id).await?;
        }
        if let Some(table_id) = req.table_id {
            let table = TableRepo::get(&txn, table_id).await?;
            if table.restaurant_id != req.restaurant_id {
                return Err(ApiError::Validation(format!(
                    "Table {} does not belong to restaurant {}",
                    table_id, req.restaurant_id
                )));
            }
        }
        if let Some(people) = req.number_of_people {
            if people < 1 {
                return Err(ApiError::Validation(
                    "Number of people must be >= 1".to_string(),
                ));
            }
        }

        let order = orders::ActiveModel {
            customer_id: Set(req.customer_id),
            restaurant_id: Set(req.restaurant_id),
            table_id: Set(req.table_id),
            created_at: Set(chrono::Utc::now().into()),
            scheduled_for: Set(req.scheduled_for),
            number_of_people: Set(req.number_of_people),
            is_table_booking: Set(req.is_table_booking),
            status: Set(OrderStatus::Pending.to_string()),
            notes: Set(req.notes),
            contact_phone: Set(req.contact_phone),
            delivery_address: Set(req.delivery_address),
            total_amount: Set(Decimal::ZERO),
            ..Default::default()
        };
        let order = order.insert(&txn).await?;

        for input in &req.items {
            Self::insert_line(&txn, &order, input).await?;
        }
        let order = Self::recalculate_total(&txn, order).await?;
        let items = OrderRepo::get_items(&txn, order.id).await?;

        txn.commit().await?;

        info!(order_id = order.id, total = %order.total_amount, "order created");
        Ok(OrderResponse::from_model_with_items(order, items))
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<OrderResponse, ApiError> {
        let order = OrderRepo::get(db, id).await?;
        let items = OrderRepo::get_items(db, id).await?;
        Ok(OrderResponse::from_model_with_items(order, items))
    }

    /// Booking detail updates. Items and status have their own endpoints;
    /// the total is untouched here.
    pub async fn update(
        db: &DatabaseConnection,
        id: i32,
        req: UpdateOrderRequest,
    ) -> Result<OrderResponse, ApiError> {
        let txn = db.begin().await?;

        let order = OrderRepo::get(&txn, id).await?;

        if let Some(Some(customer_id)) = req.customer_id {
            CustomerRepo::get(&txn, customer_id).await?;
        }
        if let Some(Some(table_id)) = req.table_id {
            let table = TableRepo::get(&txn, table_id).await?;
            if table.restaurant_id != order.restaurant_id {
                return Err(ApiError::Validation(format!(
                    "Table {} does not belong to restaurant {}",
                    table_id, order.restaurant_id
                )));
            }
        }
        if let Some(Some(people)) = req.number_of_people {
            if people < 1 {
                return Err(ApiError::Validation(
                    "Number of people must be >= 1".to_string(),
                ));
            }
        }

        // Outer None: field absent, untouched. Inner None: explicit null, cleared.
        let mut model: orders::ActiveModel = order.into();
        if let Some(customer_id) = req.customer_id {
            model.customer_id = Set(customer_id);
        }
        if let Some(table_id) = req.table_id {
            model.table_id = Set(table_id);
        }
        if let Some(scheduled_for) = req.scheduled_for {
            model.scheduled_for = Set(scheduled_for);
        }
        if let Some(people) = req.number_of_people {
            model.number_of_people = Set(people);
        }
        if let Some(is_table_booking) = req.is_table_booking {
            model.is_table_booking = Set(is_table_booking);
        }
        if let Some(notes) = req.notes {
            model.notes = Set(notes);
        }
        if let Some(contact_phone) = req.contact_phone {
            model.contact_phone = Set(contact_phone);
        }
        if let Some(delivery_address) = req.delivery_address {
            model.delivery_address = Set(delivery_address);
        }
        let order = model.update(&txn).await?;
        let items = OrderRepo::get_items(&txn, order.id).await?;

        txn.commit().await?;
        Ok(OrderResponse::from_model_with_items(order, items))
    }

    /// Forward transitions one step at a time, or cancellation from any
    /// non-terminal state. No side effects beyond persisting the status.
    pub async fn transition(
        db: &DatabaseConnection,
        id: i32,
        req: StatusUpdateRequest,
    ) -> Result<OrderResponse, ApiError> {
        let new_status =
            OrderStatus::from_str(&req.status).map_err(ApiError::Validation)?;

        let txn = db.begin().await?;

        let order = OrderRepo::get(&txn, id).await?;
        let current = Self::parse_status(&order)?;
        if !current.can_transition_to(new_status) {
            return Err(ApiError::InvalidTransition {
                from: current.to_string(),
                to: new_status.to_string(),
            });
        }

        let mut model: orders::ActiveModel = order.into();
        model.status = Set(new_status.to_string());
        let order = model.update(&txn).await?;
        let items = OrderRepo::get_items(&txn, order.id).await?;

        txn.commit().await?;

        info!(order_id = order.id, from = %current, to = %new_status, "order status changed");
        Ok(OrderResponse::from_model_with_items(order, items))
    }

    pub async fn add_item(
        db: &DatabaseConnection,
        req: CreateOrderItemRequest,
    ) -> Result<order_items::Model, ApiError> {
        let txn = db.begin().await?;

        let order = OrderRepo::get(&txn, req.order_id).await?;
        Self::ensure_mutable(&order)?;

        let item = Self::insert_line(
            &txn,
            &order,
            &OrderItemInput {
                menu_item_id: req.menu_item_id,
                quantity: req.quantity,
            },
        )
        .await?;
        Self::recalculate_total(&txn, order).await?;

        txn.commit().await?;
        Ok(item)
    }

    /// Quantity-only update; `price_at_order` stays whatever it was when the
    /// line was created.
    pub async fn update_item(
        db: &DatabaseConnection,
        item_id: i32,
        req: UpdateOrderItemRequest,
    ) -> Result<order_items::Model, ApiError> {
        if req.quantity < 1 {
            return Err(ApiError::Validation("Quantity must be >= 1".to_string()));
        }

        let txn = db.begin().await?;

        let item = Self::get_item(&txn, item_id).await?;
        let order = OrderRepo::get(&txn, item.order_id).await?;
        Self::ensure_mutable(&order)?;

        let mut model: order_items::ActiveModel = item.into();
        model.quantity = Set(req.quantity);
        let item = model.update(&txn).await?;
        Self::recalculate_total(&txn, order).await?;

        txn.commit().await?;
        Ok(item)
    }

    pub async fn remove_item(db: &DatabaseConnection, item_id: i32) -> Result<(), ApiError> {
        let txn = db.begin().await?;

        let item = Self::get_item(&txn, item_id).await?;
        let order = OrderRepo::get(&txn, item.order_id).await?;
        Self::ensure_mutable(&order)?;

        OrderItems::delete_by_id(item_id).exec(&txn).await?;
        Self::recalculate_total(&txn, order).await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_item<C: ConnectionTrait>(
        db: &C,
        item_id: i32,
    ) -> Result<order_items::Model, ApiError> {
        OrderItems::find_by_id(item_id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Order item {} not found", item_id)))
    }

    pub async fn list_items(
        db: &DatabaseConnection,
        order_id: Option<i32>,
    ) -> Result<Vec<order_items::Model>, ApiError> {
        let mut find = OrderItems::find();
        if let Some(order_id) = order_id {
            find = find.filter(order_items::Column::OrderId.eq(order_id));
        }
        Ok(find.all(db).await?)
    }

    /// Captures the menu item's current price as the immutable line snapshot.
    /// The item must come from the order's own restaurant.
    async fn insert_line<C: ConnectionTrait>(
        db: &C,
        order: &orders::Model,
        input: &OrderItemInput,
    ) -> Result<order_items::Model, ApiError> {
        if input.quantity < 1 {
            return Err(ApiError::Validation("Quantity must be >= 1".to_string()));
        }
        let menu_item = MenuItemRepo::get(db, input.menu_item_id).await?;
        if menu_item.restaurant_id != order.restaurant_id {
            return Err(ApiError::Validation(format!(
                "Menu item {} does not belong to restaurant {}",
                menu_item.id, order.restaurant_id
            )));
        }
        if !menu_item.available {
            return Err(ApiError::Validation(format!(
                "Menu item {} ({}) is not available",
                menu_item.id, menu_item.name
            )));
        }

        let model = order_items::ActiveModel {
            order_id: Set(order.id),
            menu_item_id: Set(menu_item.id),
            quantity: Set(input.quantity),
            price_at_order: Set(menu_item.price),
            ..Default::default()
        };
        Ok(model.insert(db).await?)
    }

    /// Recomputes the persisted total from the stored snapshots. Idempotent.
    async fn recalculate_total<C: ConnectionTrait>(
        db: &C,
        order: orders::Model,
    ) -> Result<orders::Model, ApiError> {
        let items = OrderRepo::get_items(db, order.id).await?;
        let total = order_total(&items);

        let mut model: orders::ActiveModel = order.into();
        model.total_amount = Set(total);
        Ok(model.update(db).await?)
    }

    fn parse_status(order: &orders::Model) -> Result<OrderStatus, ApiError> {
        OrderStatus::from_str(&order.status).map_err(|e| {
            ApiError::Database(sea_orm::DbErr::Custom(format!(
                "Order {} carries an invalid status: {}",
                order.id, e
            )))
        })
    }

    /// Terminal orders have a frozen total; item mutations are rejected.
    fn ensure_mutable(order: &orders::Model) -> Result<(), ApiError> {
        let status = Self::parse_status(order)?;
        if status.is_terminal() {
            return Err(ApiError::Validation(format!(
                "Order {} is {} and can no longer be modified",
                order.id, status
            )));
        }
        Ok(())
    }
}
