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
                    .table(MenuItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MenuItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MenuItems::RestaurantId).integer().not_null())
                    .col(ColumnDef::new(MenuItems::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(MenuItems::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(MenuItems::Price)
                            .decimal_len(8, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(MenuItems::Photo).string_len(500).null())
                    .col(
                        ColumnDef::new(MenuItems::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_items_restaurant")
                            .from(MenuItems::Table, MenuItems::RestaurantId)
                            .to(Restaurants::Table, Restaurants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Menus are browsed per restaurant
        manager
            .create_index(
                Index::create()
                    .name("idx_menu_items_restaurant")
                    .table(MenuItems::Table)
                    .col(MenuItems::RestaurantId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum MenuItems {
    Table,
    Id,
    RestaurantId,
    Name,
    Description,
    Price,
    Photo,
    Available,
}
