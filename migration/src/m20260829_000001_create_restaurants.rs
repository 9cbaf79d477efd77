use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Restaurants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Restaurants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Restaurants::Name)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Restaurants::Address).text().not_null())
                    .col(ColumnDef::new(Restaurants::Description).text().null())
                    .col(ColumnDef::new(Restaurants::Photo).string_len(500).null())
                    .col(ColumnDef::new(Restaurants::Latitude).double().null())
                    .col(ColumnDef::new(Restaurants::Longitude).double().null())
                    .to_owned(),
            )
            .await?;

        // Restaurants are listed alphabetically
        manager
            .create_index(
                Index::create()
                    .name("idx_restaurants_name")
                    .table(Restaurants::Table)
                    .col(Restaurants::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Restaurants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(crate) enum Restaurants {
    Table,
    Id,
    Name,
    Address,
    Description,
    Photo,
    Latitude,
    Longitude,
}
