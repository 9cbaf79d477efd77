use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{menu_items, order_items, orders, prelude::*, restaurants, tables};
use crate::error::ApiError;
use crate::models::restaurant::{CreateRestaurantRequest, UpdateRestaurantRequest};

pub struct RestaurantRepo;

impl RestaurantRepo {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        req: CreateRestaurantRequest,
    ) -> Result<restaurants::Model, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Restaurant name cannot be empty".to_string(),
            ));
        }

        let model = restaurants::ActiveModel {
            name: Set(req.name),
            address: Set(req.address),
            description: Set(req.description),
            photo: Set(req.photo),
            latitude: Set(req.latitude),
            longitude: Set(req.longitude),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<restaurants::Model, ApiError> {
        Restaurants::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Restaurant {} not found", id)))
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<restaurants::Model>, ApiError> {
        Ok(Restaurants::find()
            .order_by(restaurants::Column::Name, Order::Asc)
            .all(db)
            .await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        req: UpdateRestaurantRequest,
    ) -> Result<restaurants::Model, ApiError> {
        let existing = Self::get(db, id).await?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Restaurant name cannot be empty".to_string(),
                ));
            }
        }

        let mut model: restaurants::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(address) = req.address {
            model.address = Set(address);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        if let Some(photo) = req.photo {
            model.photo = Set(Some(photo));
        }
        if let Some(latitude) = req.latitude {
            model.latitude = Set(Some(latitude));
        }
        if let Some(longitude) = req.longitude {
            model.longitude = Set(Some(longitude));
        }

        Ok(model.update(db).await?)
    }

    /// Deletes the restaurant and everything that hangs off it. Spelled out
    /// row by row so behavior does not depend on driver cascade settings.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
        Self::get(db, id).await?;

        let order_ids: Vec<i32> = Orders::find()
            .filter(orders::Column::RestaurantId.eq(id))
            .all(db)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();

        if !order_ids.is_empty() {
            OrderItems::delete_many()
                .filter(order_items::Column::OrderId.is_in(order_ids))
                .exec(db)
                .await?;
        }
        Orders::delete_many()
            .filter(orders::Column::RestaurantId.eq(id))
            .exec(db)
            .await?;
        Tables::delete_many()
            .filter(tables::Column::RestaurantId.eq(id))
            .exec(db)
            .await?;
        MenuItems::delete_many()
            .filter(menu_items::Column::RestaurantId.eq(id))
            .exec(db)
            .await?;
        Restaurants::delete_by_id(id).exec(db).await?;

        Ok(())
    }
}
