//! SeaORM Entity for orders
//!
//! An order is either a table booking or a takeaway pickup
//! (`is_table_booking`). `total_amount` is a persisted snapshot recalculated
//! whenever the order's items change, never derived live from menu prices.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: Option<i32>,
    pub restaurant_id: i32,
    pub table_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    /// Booking time, or expected pickup time for takeaway
    pub scheduled_for: Option<DateTimeWithTimeZone>,
    pub number_of_people: Option<i16>,
    /// true => table booking, false => takeaway
    pub is_table_booking: bool,
    /// One of the OrderStatus values, stored as text
    pub status: String,
    pub notes: String,
    /// Contact number for guests without a profile
    pub contact_phone: String,
    pub delivery_address: String,
    /// Persisted total snapshot, 2 decimal places
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::restaurants::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurants::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Restaurant,
    #[sea_orm(
        belongs_to = "super::tables::Entity",
        from = "Column::TableId",
        to = "super::tables::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Table,
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::restaurants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::tables::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Table.def()
    }
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
