// src/lib.rs

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;
    pub mod customers;
    pub mod menu_items;
    pub mod order_items;
    pub mod orders;
    pub mod restaurants;
    pub mod tables;
}

pub mod services {
    pub mod orders;
}

pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;

/// Full REST surface. Shared by `main` and the integration tests.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello_bistro))
        .route(
            "/api/restaurants",
            get(handlers::restaurants::list_restaurants).post(handlers::restaurants::create_restaurant),
        )
        .route(
            "/api/restaurants/{id}",
            get(handlers::restaurants::get_restaurant)
                .put(handlers::restaurants::update_restaurant)
                .delete(handlers::restaurants::delete_restaurant),
        )
        .route(
            "/api/tables",
            get(handlers::tables::list_tables).post(handlers::tables::create_table),
        )
        .route(
            "/api/tables/{id}",
            get(handlers::tables::get_table)
                .put(handlers::tables::update_table)
                .delete(handlers::tables::delete_table),
        )
        .route(
            "/api/customers",
            get(handlers::customers::list_customers).post(handlers::customers::create_customer),
        )
        .route(
            "/api/customers/{id}",
            get(handlers::customers::get_customer)
                .put(handlers::customers::update_customer)
                .delete(handlers::customers::delete_customer),
        )
        .route(
            "/api/menu-items",
            get(handlers::menu_items::list_menu_items).post(handlers::menu_items::create_menu_item),
        )
        .route(
            "/api/menu-items/{id}",
            get(handlers::menu_items::get_menu_item)
                .put(handlers::menu_items::update_menu_item)
                .delete(handlers::menu_items::delete_menu_item),
        )
        .route(
            "/api/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route("/api/orders/{id}/status", post(handlers::orders::update_order_status))
        .route("/api/orders/{id}/items", post(handlers::orders::add_order_item))
        .route(
            "/api/order-items",
            get(handlers::order_items::list_order_items).post(handlers::order_items::create_order_item),
        )
        .route(
            "/api/order-items/{id}",
            get(handlers::order_items::get_order_item)
                .put(handlers::order_items::update_order_item)
                .delete(handlers::order_items::delete_order_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello_bistro() -> &'static str {
    "Hello from Bistro Backend!"
}
