use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::ConnectOptions;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::str::FromStr;
use tower::ServiceExt;

use bistro_backend::{api_router, AppState};

/// Fresh app over an isolated in-memory database, fully migrated.
/// One connection only: every pooled connection of `sqlite::memory:` would
/// otherwise get its own empty database.
pub async fn setup_test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    api_router(AppState { db })
}

/// Sends one request and returns (status, parsed JSON body).
/// Empty bodies (204s) come back as Value::Null.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "PUT", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "DELETE", uri, None).await
}

/// Decimal fields serialize as strings; sqlite may shorten trailing zeros,
/// so comparisons go through Decimal, never through raw strings.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("expected a decimal value, got {:?}", other),
    }
}
