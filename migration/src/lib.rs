pub use sea_orm_migration::prelude::*;

mod m20260829_000001_create_restaurants;
mod m20260829_000002_create_tables;
mod m20260829_000003_create_customers;
mod m20260829_000004_create_menu_items;
mod m20260829_000005_create_orders;
mod m20260829_000006_create_order_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260829_000001_create_restaurants::Migration),
            Box::new(m20260829_000002_create_tables::Migration),
            Box::new(m20260829_000003_create_customers::Migration),
            Box::new(m20260829_000004_create_menu_items::Migration),
            Box::new(m20260829_000005_create_orders::Migration),
            Box::new(m20260829_000006_create_order_items::Migration),
        ]
    }
}
