use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::{customers, orders, prelude::*};
use crate::error::ApiError;
use crate::models::customer::{CreateCustomerRequest, UpdateCustomerRequest};

pub struct CustomerRepo;

impl CustomerRepo {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        req: CreateCustomerRequest,
    ) -> Result<customers::Model, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::Validation(
                "Customer name cannot be empty".to_string(),
            ));
        }

        let model = customers::ActiveModel {
            user_id: Set(req.user_id),
            name: Set(req.name),
            phone: Set(req.phone),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> Result<customers::Model, ApiError> {
        Customers::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<customers::Model>, ApiError> {
        Ok(Customers::find().all(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        req: UpdateCustomerRequest,
    ) -> Result<customers::Model, ApiError> {
        let existing = Self::get(db, id).await?;

        if let Some(name) = &req.name {
            if name.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Customer name cannot be empty".to_string(),
                ));
            }
        }

        let mut model: customers::ActiveModel = existing.into();
        if let Some(user_id) = req.user_id {
            model.user_id = Set(Some(user_id));
        }
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(phone) = req.phone {
            model.phone = Set(phone);
        }

        Ok(model.update(db).await?)
    }

    /// Orders survive the customer; the reference is nulled (SET NULL).
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ApiError> {
        Self::get(db, id).await?;

        Orders::update_many()
            .col_expr(
                orders::Column::CustomerId,
                sea_orm::sea_query::Expr::value(sea_orm::Value::Int(None)),
            )
            .filter(orders::Column::CustomerId.eq(id))
            .exec(db)
            .await?;
        Customers::delete_by_id(id).exec(db).await?;

        Ok(())
    }
}
