use sea_orm_migration::prelude::*;

use super::m20260829_000001_create_restaurants::Restaurants;
use super::m20260829_000002_create_tables::Tables;
use super::m20260829_000003_create_customers::Customers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerId).integer().null())
                    .col(ColumnDef::new(Orders::RestaurantId).integer().not_null())
                    .col(ColumnDef::new(Orders::TableId).integer().null())
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::ScheduledFor)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Orders::NumberOfPeople).small_integer().null())
                    .col(
                        ColumnDef::new(Orders::IsTableBooking)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Orders::Notes).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Orders::ContactPhone)
                            .string_len(30)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Orders::DeliveryAddress)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    // Persisted snapshot, recalculated whenever items change
                    .col(
                        ColumnDef::new(Orders::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default("0"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_restaurant")
                            .from(Orders::Table, Orders::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_table")
                            .from(Orders::Table, Orders::TableId)
                            .to(Tables::Table, Tables::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing defaults to newest-first per restaurant
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_restaurant_created_at")
                    .table(Orders::Table)
                    .col(Orders::RestaurantId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Orders {
    Table,
    Id,
    CustomerId,
    RestaurantId,
    TableId,
    CreatedAt,
    ScheduledFor,
    NumberOfPeople,
    IsTableBooking,
    Status,
    Notes,
    ContactPhone,
    DeliveryAddress,
    TotalAmount,
}
