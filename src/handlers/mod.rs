pub mod customers;
pub mod menu_items;
pub mod order_items;
pub mod orders;
pub mod restaurants;
pub mod tables;
