mod common;

use axum::http::StatusCode;
use axum::Router;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::common::{decimal, delete, get, post_json, put_json, setup_test_app};

/// Restaurant with one table and two dishes: Roast 50.00, Salad 20.00
async fn seed(app: &Router) -> (i64, i64, i64, i64) {
    let (status, restaurant) = post_json(
        app,
        "/api/restaurants",
        json!({ "name": "Chez Test", "address": "1 Main St" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let restaurant_id = restaurant["id"].as_i64().unwrap();

    let (_, table) = post_json(
        app,
        "/api/tables",
        json!({ "restaurant_id": restaurant_id, "number": "7", "seats": 4 }),
    )
    .await;
    let (_, roast) = post_json(
        app,
        "/api/menu-items",
        json!({ "restaurant_id": restaurant_id, "name": "Roast", "price": "50.00" }),
    )
    .await;
    let (_, salad) = post_json(
        app,
        "/api/menu-items",
        json!({ "restaurant_id": restaurant_id, "name": "Salad", "price": "20.00" }),
    )
    .await;

    (
        restaurant_id,
        table["id"].as_i64().unwrap(),
        roast["id"].as_i64().unwrap(),
        salad["id"].as_i64().unwrap(),
    )
}

async fn create_order(app: &Router, body: Value) -> Value {
    let (status, order) = post_json(app, "/api/orders", body).await;
    assert_eq!(status, StatusCode::CREATED, "order creation failed: {}", order);
    order
}

#[tokio::test]
async fn test_order_total_worked_example() {
    let app = setup_test_app().await;
    let (restaurant_id, table_id, roast_id, salad_id) = seed(&app).await;

    // [(50.00 x 2), (20.00 x 1)] => 120.00
    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "table_id": table_id,
            "number_of_people": 3,
            "items": [
                { "menu_item_id": roast_id, "quantity": 2 },
                { "menu_item_id": salad_id, "quantity": 1 }
            ]
        }),
    )
    .await;

    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["is_table_booking"], true);
    assert_eq!(decimal(&order["total_amount"]), dec!(120.00));

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(decimal(&items[0]["price_at_order"]), dec!(50.00));
    assert_eq!(decimal(&items[0]["line_total"]), dec!(100.00));
    assert_eq!(decimal(&items[1]["line_total"]), dec!(20.00));
}

#[tokio::test]
async fn test_price_snapshot_survives_menu_price_change() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, _) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, _) = put_json(
        &app,
        &format!("/api/menu-items/{}", roast_id),
        json!({ "price": "75.00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Existing line holds the old price
    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["items"][0]["price_at_order"]), dec!(50.00));
    assert_eq!(decimal(&order["total_amount"]), dec!(50.00));

    // A new line snapshots the new price
    let (status, item) = post_json(
        &app,
        &format!("/api/orders/{}/items", order_id),
        json!({ "menu_item_id": roast_id, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal(&item["price_at_order"]), dec!(75.00));

    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["total_amount"]), dec!(125.00));
}

#[tokio::test]
async fn test_referenced_menu_item_cannot_be_deleted() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, _) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;

    let (status, body) = delete(&app, &format!("/api/menu-items/{}", roast_id)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "PROTECTED_REFERENCE");

    // Once the order (and its items) are gone, deletion goes through
    let (status, _) = delete(&app, &format!("/api/orders/{}", order["id"])).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = delete(&app, &format!("/api/menu-items/{}", roast_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

async fn set_status(app: &Router, order_id: i64, status: &str) -> (StatusCode, Value) {
    post_json(
        app,
        &format!("/api/orders/{}/status", order_id),
        json!({ "status": status }),
    )
    .await
}

#[tokio::test]
async fn test_status_forward_chain() {
    let app = setup_test_app().await;
    let (restaurant_id, _, _, _) = seed(&app).await;
    let order = create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    let id = order["id"].as_i64().unwrap();

    for next in ["CONFIRMED", "PREPARING", "READY", "COMPLETED"] {
        let (status, body) = set_status(&app, id, next).await;
        assert_eq!(status, StatusCode::OK, "{} failed: {}", next, body);
        assert_eq!(body["status"], next);
    }
}

#[tokio::test]
async fn test_status_skip_and_backward_rejected() {
    let app = setup_test_app().await;
    let (restaurant_id, _, _, _) = seed(&app).await;
    let order = create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    let id = order["id"].as_i64().unwrap();

    // Skipping a state
    let (status, body) = set_status(&app, id, "PREPARING").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // Going backward
    let (status, _) = set_status(&app, id, "CONFIRMED").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = set_status(&app, id, "PENDING").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // Unknown status is a validation error, not a transition error
    let (status, body) = set_status(&app, id, "DELIVERED").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cancellation_rules() {
    let app = setup_test_app().await;
    let (restaurant_id, _, _, _) = seed(&app).await;

    // Cancellable from any non-terminal state
    let order = create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    let id = order["id"].as_i64().unwrap();
    let (status, _) = set_status(&app, id, "CONFIRMED").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = set_status(&app, id, "CANCELLED").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELLED");

    // But not from COMPLETED
    let order = create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    let id = order["id"].as_i64().unwrap();
    for next in ["CONFIRMED", "PREPARING", "READY", "COMPLETED"] {
        set_status(&app, id, next).await;
    }
    let (status, body) = set_status(&app, id, "CANCELLED").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_item_mutations_recalculate_total() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, salad_id) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(decimal(&order["total_amount"]), dec!(50.00));

    // Add via the flat resource
    let (status, salad_item) = post_json(
        &app,
        "/api/order-items",
        json!({ "order_id": order_id, "menu_item_id": salad_id, "quantity": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["total_amount"]), dec!(90.00));

    // Quantity change keeps the snapshot and refreshes the total
    let salad_item_id = salad_item["id"].as_i64().unwrap();
    let (status, updated) = put_json(
        &app,
        &format!("/api/order-items/{}", salad_item_id),
        json!({ "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&updated["price_at_order"]), dec!(20.00));
    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["total_amount"]), dec!(70.00));

    // Removal refreshes it again
    let (status, _) = delete(&app, &format!("/api/order-items/{}", salad_item_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["total_amount"]), dec!(50.00));
}

#[tokio::test]
async fn test_item_validation() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, _) = seed(&app).await;

    // Zero quantity
    let (status, body) = post_json(
        &app,
        "/api/orders",
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 0 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Unknown menu item
    let (status, body) = post_json(
        &app,
        "/api/orders",
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": 9999, "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // Unavailable menu item
    let (_, off_menu) = post_json(
        &app,
        "/api/menu-items",
        json!({ "restaurant_id": restaurant_id, "name": "86'd", "price": "9.00", "available": false }),
    )
    .await;
    let (status, body) = post_json(
        &app,
        "/api/orders",
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": off_menu["id"], "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_menu_items_must_belong_to_the_orders_restaurant() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, _) = seed(&app).await;

    let (_, other) = post_json(
        &app,
        "/api/restaurants",
        json!({ "name": "Other", "address": "2 Side St" }),
    )
    .await;
    let other_id = other["id"].as_i64().unwrap();

    // An order at the other restaurant cannot carry this restaurant's dish
    let (status, body) = post_json(
        &app,
        "/api/orders",
        json!({
            "restaurant_id": other_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Nor can one sneak in through the item endpoints later
    let foreign = create_order(&app, json!({ "restaurant_id": other_id })).await;
    let foreign_id = foreign["id"].as_i64().unwrap();
    let (status, body) = post_json(
        &app,
        &format!("/api/orders/{}/items", foreign_id),
        json!({ "menu_item_id": roast_id, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let (status, _) = post_json(
        &app,
        "/api/order-items",
        json!({ "order_id": foreign_id, "menu_item_id": roast_id, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // With no external references, deleting the dish's restaurant still works
    let (status, _) = delete(&app, &format!("/api/restaurants/{}", restaurant_id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, foreign) = get(&app, &format!("/api/orders/{}", foreign_id)).await;
    assert_eq!(foreign["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_terminal_orders_freeze_items() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, salad_id) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();
    let item_id = order["items"][0]["id"].as_i64().unwrap();

    let (status, _) = set_status(&app, order_id, "CANCELLED").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        &format!("/api/orders/{}/items", order_id),
        json!({ "menu_item_id": salad_id, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = put_json(
        &app,
        &format!("/api/order-items/{}", item_id),
        json!({ "quantity": 5 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = delete(&app, &format!("/api/order-items/{}", item_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Total is untouched
    let (_, order) = get(&app, &format!("/api/orders/{}", order_id)).await;
    assert_eq!(decimal(&order["total_amount"]), dec!(50.00));
}

#[tokio::test]
async fn test_order_validation() {
    let app = setup_test_app().await;
    let (restaurant_id, table_id, _, _) = seed(&app).await;

    // Unknown restaurant
    let (status, _) = post_json(&app, "/api/orders", json!({ "restaurant_id": 9999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Table from another restaurant
    let (_, other) = post_json(
        &app,
        "/api/restaurants",
        json!({ "name": "Other", "address": "2 Side St" }),
    )
    .await;
    let (status, body) = post_json(
        &app,
        "/api/orders",
        json!({ "restaurant_id": other["id"], "table_id": table_id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Party of zero
    let (status, _) = post_json(
        &app,
        "/api/orders",
        json!({ "restaurant_id": restaurant_id, "number_of_people": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_list_filters() {
    let app = setup_test_app().await;
    let (restaurant_id, _, _, _) = seed(&app).await;

    let first = create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    create_order(&app, json!({ "restaurant_id": restaurant_id })).await;
    set_status(&app, first["id"].as_i64().unwrap(), "CONFIRMED").await;

    let (status, list) = get(&app, &format!("/api/orders?restaurant_id={}", restaurant_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, list) = get(
        &app,
        &format!("/api/orders?restaurant_id={}&status=confirmed", restaurant_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let confirmed = list.as_array().unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0]["id"], first["id"]);
}

#[tokio::test]
async fn test_order_update_keeps_status_and_total() {
    let app = setup_test_app().await;
    let (restaurant_id, table_id, roast_id, _) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 2 }]
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, updated) = put_json(
        &app,
        &format!("/api/orders/{}", order_id),
        json!({
            "table_id": table_id,
            "number_of_people": 4,
            "notes": "window seat please",
            "is_table_booking": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["table_id"], table_id);
    assert_eq!(updated["notes"], "window seat please");
    assert_eq!(updated["status"], "PENDING");
    assert_eq!(decimal(&updated["total_amount"]), dec!(100.00));
}

#[tokio::test]
async fn test_order_update_clears_table_with_explicit_null() {
    let app = setup_test_app().await;
    let (restaurant_id, table_id, _, _) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "table_id": table_id,
            "scheduled_for": "2026-09-01T19:00:00+00:00"
        }),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();
    assert_eq!(order["table_id"], table_id);

    // Absent fields stay untouched
    let (status, updated) = put_json(
        &app,
        &format!("/api/orders/{}", order_id),
        json!({ "notes": "running late" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["table_id"], table_id);
    assert!(updated["scheduled_for"].is_string());

    // An explicit null drops the booking's table and schedule
    let (status, updated) = put_json(
        &app,
        &format!("/api/orders/{}", order_id),
        json!({ "table_id": null, "scheduled_for": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["table_id"], Value::Null);
    assert_eq!(updated["scheduled_for"], Value::Null);
    assert_eq!(updated["notes"], "running late");
}

#[tokio::test]
async fn test_order_items_listed_by_order() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, salad_id) = seed(&app).await;

    let first = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;
    create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "items": [
                { "menu_item_id": roast_id, "quantity": 1 },
                { "menu_item_id": salad_id, "quantity": 1 }
            ]
        }),
    )
    .await;

    let (status, list) = get(
        &app,
        &format!("/api/order-items?order_id={}", first["id"].as_i64().unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, list) = get(&app, "/api/order-items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_takeaway_order() {
    let app = setup_test_app().await;
    let (restaurant_id, _, roast_id, _) = seed(&app).await;

    let order = create_order(
        &app,
        json!({
            "restaurant_id": restaurant_id,
            "is_table_booking": false,
            "contact_phone": "+380501112233",
            "delivery_address": "5 Elm St, apt 2",
            "items": [{ "menu_item_id": roast_id, "quantity": 1 }]
        }),
    )
    .await;

    assert_eq!(order["is_table_booking"], false);
    assert_eq!(order["table_id"], Value::Null);
    assert_eq!(order["contact_phone"], "+380501112233");
    assert_eq!(decimal(&order["total_amount"]), dec!(50.00));
}
