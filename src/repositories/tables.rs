use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::{orders, prelude::*, tables};
use crate::error::ApiError;
use crate::models::table::{CreateTableRequest, UpdateTableRequest};
use crate::repositories::restaurants::RestaurantRepo;

pub struct TableRepo;

impl TableRepo {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        req: CreateTableRequest,
    ) -> Result<tables::Model, ApiError> {
        RestaurantRepo::get(db, req.restaurant_id).await?;

        if req.number.trim().is_empty() {
            return Err(ApiError::Validation(
                "Table number cannot be empty".to_string(),
            ));
        }
        if req.seats < 1 {
            return Err(ApiError::Validation("Seats must be >= 1".to_string()));
        }

        Self::ensure_number_free(db, req.restaurant_id, &req.number, None).await?;

        let model = tables::ActiveModel {
            restaurant_id: Set(req.restaurant_id),
            number: Set(req.number),
            seats: Set(req.seats),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<tables::Model, ApiError> {
        Tables::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Table {} not found", id)))
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        restaurant_id: Option<i32>,
    ) -> Result<Vec<tables::Model>, ApiError> {
        let mut query = Tables::find()
            .order_by(tables::Column::RestaurantId, Order::Asc)
            .order_by(tables::Column::Number, Order::Asc);
        if let Some(restaurant_id) = restaurant_id {
            query = query.filter(tables::Column::RestaurantId.eq(restaurant_id));
        }
        Ok(query.all(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        req: UpdateTableRequest,
    ) -> Result<tables::Model, ApiError> {
        let existing = Self::get(db, id).await?;

        if let Some(number) = &req.number {
            if number.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Table number cannot be empty".to_string(),
                ));
            }
            if *number != existing.number {
                Self::ensure_number_free(db, existing.restaurant_id, number, Some(id)).await?;
            }
        }
        if let Some(seats) = req.seats {
            if seats < 1 {
                return Err(ApiError::Validation("Seats must be >= 1".to_string()));
            }
        }

        let mut model: tables::ActiveModel = existing.into();
        if let Some(number) = req.number {
            model.number = Set(number);
        }
        if let Some(seats) = req.seats {
            model.seats = Set(seats);
        }

        Ok(model.update(db).await?)
    }

    /// Orders keep their history when a table goes away; the reference is
    /// nulled, matching the schema's SET NULL.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
        Self::get(db, id).await?;

        Orders::update_many()
            .col_expr(orders::Column::TableId, sea_orm::sea_query::Expr::value(sea_orm::Value::Int(None)))
            .filter(orders::Column::TableId.eq(id))
            .exec(db)
            .await?;
        Tables::delete_by_id(id).exec(db).await?;

        Ok(())
    }

    async fn ensure_number_free<C: ConnectionTrait>(
        db: &C,
        restaurant_id: i32,
        number: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ApiError> {
        let mut query = Tables::find()
            .filter(tables::Column::RestaurantId.eq(restaurant_id))
            .filter(tables::Column::Number.eq(number));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(tables::Column::Id.ne(exclude_id));
        }
        if query.one(db).await?.is_some() {
            return Err(ApiError::DuplicateTable {
                restaurant_id,
                number: number.to_string(),
            });
        }
        Ok(())
    }
}
