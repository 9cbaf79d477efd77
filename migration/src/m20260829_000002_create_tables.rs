use sea_orm_migration::prelude::*;

use super::m20260829_000001_create_restaurants::Restaurants;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tables::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tables::RestaurantId).integer().not_null())
                    .col(ColumnDef::new(Tables::Number).string_len(20).not_null())
                    .col(ColumnDef::new(Tables::Seats).small_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tables_restaurant")
                            .from(Tables::Table, Tables::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One table number per restaurant
        manager
            .create_index(
                Index::create()
                    .name("idx_tables_restaurant_number")
                    .table(Tables::Table)
                    .col(Tables::RestaurantId)
                    .col(Tables::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Tables {
    Table,
    Id,
    RestaurantId,
    Number,
    Seats,
}
