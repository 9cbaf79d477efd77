use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{menu_items, order_items, prelude::*};
use crate::error::ApiError;
use crate::models::menu_item::{CreateMenuItemRequest, MenuItemListQuery, UpdateMenuItemRequest};
use crate::repositories::restaurants::RestaurantRepo;

pub struct MenuItemRepo;

impl MenuItemRepo {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        req: CreateMenuItemRequest,
    ) -> Result<menu_items::Model, ApiError> {
        RestaurantRepo::get(db, req.restaurant_id).await?;

        if req.name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Menu item name cannot be empty".to_string(),
            ));
        }
        if req.price < Decimal::ZERO {
            return Err(ApiError::Validation("Price must be >= 0".to_string()));
        }

        let model = menu_items::ActiveModel {
            restaurant_id: Set(req.restaurant_id),
            name: Set(req.name),
            description: Set(req.description),
            price: Set(req.price),
            photo: Set(req.photo),
            available: Set(req.available),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<menu_items::Model, ApiError> {
        MenuItems::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        query: MenuItemListQuery,
    ) -> Result<Vec<menu_items::Model>, ApiError> {
        let mut find = MenuItems::find().order_by(menu_items::Column::Name, Order::Asc);
        if let Some(restaurant_id) = query.restaurant_id {
            find = find.filter(menu_items::Column::RestaurantId.eq(restaurant_id));
        }
        if let Some(available) = query.available {
            find = find.filter(menu_items::Column::Available.eq(available));
        }
        Ok(find.all(db).await?)
    }

    /// Price changes here never touch existing order items; they hold their
    /// own snapshot.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        req: UpdateMenuItemRequest,
    ) -> Result<menu_items::Model, ApiError> {
        let existing = Self::get(db, id).await?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Menu item name cannot be empty".to_string(),
                ));
            }
        }
        if let Some(price) = req.price {
            if price < Decimal::ZERO {
                return Err(ApiError::Validation("Price must be >= 0".to_string()));
            }
        }

        let mut model: menu_items::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(description) = req.description {
            model.description = Set(description);
        }
        if let Some(price) = req.price {
            model.price = Set(price);
        }
        if let Some(photo) = req.photo {
            model.photo = Set(Some(photo));
        }
        if let Some(available) = req.available {
            model.available = Set(available);
        }

        Ok(model.update(db).await?)
    }

    /// Rejected while any order item references the row, to preserve
    /// historical pricing.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
        Self::get(db, id).await?;

        let references = OrderItems::find()
            .filter(order_items::Column::MenuItemId.eq(id))
            .count(db)
            .await?;
        if references > 0 {
            return Err(ApiError::ProtectedReference(format!(
                "Menu item {} is referenced by {} order item(s) and cannot be deleted",
                id, references
            )));
        }

        MenuItems::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
