use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod expenses;
pub mod memory_store;
pub mod models;
pub mod service;
pub mod store;
pub mod utils;

use constants::{EXPENSES_ROUTE, MSG_WELCOME};
use models::MessageResponse;
use service::ExpenseService;

/// Builds the HTTP router around an already-constructed service.
pub fn app(service: ExpenseService) -> Router {
    let expense_routes = Router::new()
        .route(
            "/",
            post(expenses::create_expense).get(expenses::get_expenses),
        )
        .route("/stats/summary", get(expenses::get_summary))
        .route(
            "/{id}",
            get(expenses::get_expense)
                .put(expenses::update_expense)
                .delete(expenses::delete_expense),
        );

    Router::new()
        .route("/", get(root))
        .nest(EXPENSES_ROUTE, expense_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(MSG_WELCOME))
}
