use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ServiceError;
use crate::models::{
    CreateExpensePayload, Expense, ExpenseSummary, NewExpense, UpdateExpensePayload,
};
use crate::store::{ExpenseStore, SortOrder};
use crate::utils::{
    format_total, now_utc, parse_category, parse_date, validate_amount, validate_description,
};

/// Validates expense input and orchestrates the store. Holds no state of its own.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: CreateExpensePayload) -> Result<Expense, ServiceError> {
        let new_expense = validate_new_expense(payload)?;
        let expense = self.store.insert(new_expense).await?;

        tracing::info!(id = %expense.id, category = %expense.category, "expense created");
        Ok(expense)
    }

    pub async fn list(&self) -> Result<Vec<Expense>, ServiceError> {
        Ok(self.store.find_all(SortOrder::DateDescending).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Expense, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: UpdateExpensePayload,
    ) -> Result<Expense, ServiceError> {
        let existing = self.get(id).await?;
        let merged = merge_update(existing, payload)?;
        let expense = self.store.save(merged).await?;

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete_by_id(id).await?;

        tracing::info!(id, "expense deleted");
        Ok(())
    }

    pub async fn summarize(&self) -> Result<ExpenseSummary, ServiceError> {
        let expenses = self.store.find_all(SortOrder::Insertion).await?;
        Ok(summarize_expenses(&expenses))
    }
}

/// Checks a create request; nothing is persisted if this fails.
pub fn validate_new_expense(payload: CreateExpensePayload) -> Result<NewExpense, ServiceError> {
    let description = payload
        .description
        .as_deref()
        .ok_or_else(|| ServiceError::invalid("Description is required"))
        .and_then(validate_description)?;
    let amount = payload
        .amount
        .ok_or_else(|| ServiceError::invalid("Amount is required"))
        .and_then(validate_amount)?;
    let category = payload
        .category
        .as_deref()
        .ok_or_else(|| ServiceError::invalid("Category is required"))
        .and_then(parse_category)?;
    let date = match payload.date.as_deref() {
        Some(date) if !date.trim().is_empty() => parse_date(date)?,
        _ => now_utc(),
    };

    Ok(NewExpense {
        description,
        amount,
        category,
        date,
    })
}

/// Applies the non-empty fields of `payload` to `expense`. Absent, null and
/// empty-string fields leave the stored value untouched.
pub fn merge_update(
    mut expense: Expense,
    payload: UpdateExpensePayload,
) -> Result<Expense, ServiceError> {
    if let Some(description) = payload.description.filter(|d| !d.is_empty()) {
        expense.description = validate_description(&description)?;
    }
    if let Some(amount) = payload.amount {
        expense.amount = validate_amount(amount)?;
    }
    if let Some(category) = payload.category.filter(|c| !c.is_empty()) {
        expense.category = parse_category(&category)?;
    }
    if let Some(date) = payload.date.filter(|d| !d.trim().is_empty()) {
        expense.date = parse_date(&date)?;
    }
    Ok(expense)
}

pub fn summarize_expenses(expenses: &[Expense]) -> ExpenseSummary {
    let mut total = 0.0;
    let mut by_category = BTreeMap::new();

    for expense in expenses {
        total += expense.amount;
        *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    ExpenseSummary {
        total: format_total(total),
        count: expenses.len(),
        by_category,
    }
}
