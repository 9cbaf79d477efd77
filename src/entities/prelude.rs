pub use super::customers::Entity as Customers;
pub use super::menu_items::Entity as MenuItems;
pub use super::order_items::Entity as OrderItems;
pub use super::orders::Entity as Orders;
pub use super::restaurants::Entity as Restaurants;
pub use super::tables::Entity as Tables;
