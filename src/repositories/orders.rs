use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder};

use crate::entities::{order_items, orders, prelude::*};
use crate::error::ApiError;
use crate::models::order::OrderListQuery;

pub struct OrderRepo;

impl OrderRepo {
    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<orders::Model, ApiError> {
        Orders::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn get_items<C: ConnectionTrait>(
        db: &C,
        order_id: i32,
    ) -> Result<Vec<order_items::Model>, ApiError> {
        Ok(OrderItems::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .order_by(order_items::Column::Id, Order::Asc)
            .all(db)
            .await?)
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        query: &OrderListQuery,
    ) -> Result<Vec<orders::Model>, ApiError> {
        let mut find = Orders::find().order_by(orders::Column::CreatedAt, Order::Desc);
        if let Some(restaurant_id) = query.restaurant_id {
            find = find.filter(orders::Column::RestaurantId.eq(restaurant_id));
        }
        if let Some(status) = &query.status {
            find = find.filter(orders::Column::Status.eq(status.to_uppercase()));
        }
        Ok(find.all(db).await?)
    }

    /// The order owns its items: they go first, then the order row.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
        Self::get(db, id).await?;

        OrderItems::delete_many()
            .filter(order_items::Column::OrderId.eq(id))
            .exec(db)
            .await?;
        Orders::delete_by_id(id).exec(db).await?;

        Ok(())
    }
}
