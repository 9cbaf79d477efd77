//! Order DTOs and the status lifecycle enum.
//!
//! Status progresses: PENDING → CONFIRMED → PREPARING → READY → COMPLETED
//!                                                            ↘ CANCELLED (from any non-terminal state)

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{order_items, orders};
use crate::models::common::double_option;
use crate::models::order_item::OrderItemResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// COMPLETED and CANCELLED orders accept no further changes
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Next state in the forward chain, if any
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    /// Forward transitions one step at a time, or cancellation from any
    /// non-terminal state. Everything else is rejected.
    pub fn can_transition_to(self, new_status: OrderStatus) -> bool {
        if new_status == OrderStatus::Cancelled {
            return !self.is_terminal();
        }
        self.next() == Some(new_status)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
            OrderStatus::Preparing => write!(f, "PREPARING"),
            OrderStatus::Ready => write!(f, "READY"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PREPARING" => Ok(OrderStatus::Preparing),
            "READY" => Ok(OrderStatus::Ready),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_id: Option<i32>,
    pub restaurant_id: i32,
    #[serde(default)]
    pub table_id: Option<i32>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub number_of_people: Option<i16>,
    #[serde(default = "default_is_table_booking")]
    pub is_table_booking: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub delivery_address: String,
    /// Line items added atomically with the order
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

fn default_is_table_booking() -> bool {
    true
}

/// Line item as submitted by the client; the price is never accepted from
/// the wire, it is snapshotted server-side from the menu.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i32,
    pub quantity: i32,
}

/// Partial update of booking details. Status is deliberately excluded;
/// it only moves through POST /api/orders/{id}/status.
///
/// Nullable references are double-wrapped: a missing field leaves the value
/// alone, an explicit `null` clears it (a booking can drop its table).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub customer_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub table_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub scheduled_for: Option<Option<DateTime<FixedOffset>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub number_of_people: Option<Option<i16>>,
    pub is_table_booking: Option<bool>,
    pub notes: Option<String>,
    pub contact_phone: Option<String>,
    pub delivery_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderListQuery {
    pub restaurant_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub restaurant_id: i32,
    pub table_id: Option<i32>,
    pub created_at: String,
    pub scheduled_for: Option<String>,
    pub number_of_people: Option<i16>,
    pub is_table_booking: bool,
    pub status: String,
    pub notes: String,
    pub contact_phone: String,
    pub delivery_address: String,
    pub total_amount: Decimal,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_model_with_items(order: orders::Model, items: Vec<order_items::Model>) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            restaurant_id: order.restaurant_id,
            table_id: order.table_id,
            created_at: order.created_at.to_rfc3339(),
            scheduled_for: order.scheduled_for.map(|t| t.to_rfc3339()),
            number_of_people: order.number_of_people,
            is_table_booking: order.is_table_booking,
            status: order.status,
            notes: order.notes,
            contact_phone: order.contact_phone,
            delivery_address: order.delivery_address,
            total_amount: order.total_amount,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_forward_chain_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn test_skipping_states_rejected() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Ready));
    }

    #[test]
    fn test_backward_transitions_rejected() {
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Ready));
    }

    #[test]
    fn test_cancel_from_any_non_terminal_state() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_frozen() {
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_self_transition_rejected() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Preparing));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()), Ok(status));
        }
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(OrderStatus::from_str("pending"), Ok(OrderStatus::Pending));
        assert!(OrderStatus::from_str("DELIVERED").is_err());
    }
}
