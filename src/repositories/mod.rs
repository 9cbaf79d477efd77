//! Explicit repository per entity (create/get/list/update/delete).
//!
//! Every method is generic over `ConnectionTrait`, so the same repository
//! runs against the pooled connection or inside a transaction. Uniqueness
//! and reference-protection invariants are explicit checks here rather than
//! driver-specific constraint-violation parsing.

pub mod customers;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod tables;
