#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use expense_tracker_server::database::{Db, init_db};
use expense_tracker_server::models::{Category, Expense, NewExpense};
use expense_tracker_server::service::ExpenseService;
use expense_tracker_server::store::{ExpenseStore, LibsqlStore};
use serde_json::Value;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use time::macros::datetime;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_BASE_DATE: OffsetDateTime = datetime!(2025-11-10 00:00 UTC);

/// Fresh expense database in its own temporary directory. Keep the `TempDir`
/// alive for the duration of the test.
pub async fn setup_test_db() -> (Db, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize database at {}: {}", data_path, e));

    (db, temp_dir)
}

pub async fn setup_test_environment() -> (LibsqlStore, TempDir) {
    let (db, temp_dir) = setup_test_db().await;
    (LibsqlStore::new(db), temp_dir)
}

pub async fn setup_test_service() -> (ExpenseService, LibsqlStore, TempDir) {
    let (store, temp_dir) = setup_test_environment().await;
    let service = ExpenseService::new(Arc::new(store.clone()));
    (service, store, temp_dir)
}

/// Service plus the raw connection behind its store, for tests that tamper
/// with the database directly.
pub async fn setup_test_service_with_db() -> (ExpenseService, Db, TempDir) {
    let (db, temp_dir) = setup_test_db().await;
    let service = ExpenseService::new(Arc::new(LibsqlStore::new(db.clone())));
    (service, db, temp_dir)
}

pub async fn setup_test_app() -> (Router, TempDir) {
    let (service, _store, temp_dir) = setup_test_service().await;
    (expense_tracker_server::app(service), temp_dir)
}

pub async fn setup_test_app_with_db() -> (Router, Db, TempDir) {
    let (service, db, temp_dir) = setup_test_service_with_db().await;
    (expense_tracker_server::app(service), db, temp_dir)
}

pub async fn drop_expenses_table(db: &Db) {
    let conn = db.write().await;
    conn.execute("DROP TABLE expenses", ())
        .await
        .expect("Failed to drop expenses table");
}

/// Writes a row bypassing validation, e.g. with a category outside the enum.
pub async fn insert_raw_expense_row(db: &Db, description: &str, category: &str) {
    let conn = db.write().await;
    conn.execute(
        "INSERT INTO expenses (id, description, amount, category, date, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        libsql::params![
            Uuid::new_v4().to_string(),
            description,
            5.0f64,
            category,
            0i64,
            0i64,
            0i64
        ],
    )
    .await
    .unwrap_or_else(|e| panic!("Failed to insert raw row '{}': {}", description, e));
}

pub async fn create_test_expense(
    store: &dyn ExpenseStore,
    description: &str,
    amount: f64,
    category: Category,
    date: OffsetDateTime,
) -> Expense {
    store
        .insert(NewExpense {
            description: description.to_string(),
            amount,
            category,
            date,
        })
        .await
        .unwrap_or_else(|e| panic!("Failed to insert test expense '{}': {}", description, e))
}

/// Sends one request through the router and decodes the JSON body (Null when empty).
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };
    (status, json)
}
