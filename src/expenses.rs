use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::constants::MSG_EXPENSE_DELETED;
use crate::error::ServiceError;
use crate::models::{
    CreateExpensePayload, Expense, ExpenseSummary, MessageResponse, UpdateExpensePayload,
};
use crate::service::ExpenseService;

pub async fn create_expense(
    State(service): State<ExpenseService>,
    payload: Result<Json<CreateExpensePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServiceError> {
    let Json(payload) = payload?;
    let expense = service.create(payload).await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn get_expenses(
    State(service): State<ExpenseService>,
) -> Result<(StatusCode, Json<Vec<Expense>>), ServiceError> {
    let expenses = service.list().await?;

    Ok((StatusCode::OK, Json(expenses)))
}

pub async fn get_expense(
    State(service): State<ExpenseService>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Expense>), ServiceError> {
    let expense = service.get(&id).await?;

    Ok((StatusCode::OK, Json(expense)))
}

pub async fn update_expense(
    State(service): State<ExpenseService>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateExpensePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServiceError> {
    let Json(payload) = payload?;
    let expense = service.update(&id, payload).await?;

    Ok((StatusCode::OK, Json(expense)))
}

pub async fn delete_expense(
    State(service): State<ExpenseService>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ServiceError> {
    service.delete(&id).await?;

    Ok((StatusCode::OK, Json(MessageResponse::new(MSG_EXPENSE_DELETED))))
}

pub async fn get_summary(
    State(service): State<ExpenseService>,
) -> Result<(StatusCode, Json<ExpenseSummary>), ServiceError> {
    let summary = service.summarize().await?;

    Ok((StatusCode::OK, Json(summary)))
}
