use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Expense, NewExpense};
use crate::store::{ExpenseStore, SortOrder, parse_expense_id};
use crate::utils::now_utc;

/// In-process `ExpenseStore`. Vector order is insertion order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    expenses: Arc<RwLock<Vec<Expense>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.expenses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.expenses.read().await.is_empty()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let now = now_utc();
        let stored = Expense {
            id: Uuid::new_v4().to_string(),
            description: expense.description,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            created_at: now,
            updated_at: now,
        };

        self.expenses.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_all(&self, order: SortOrder) -> Result<Vec<Expense>, StoreError> {
        let mut expenses = self.expenses.read().await.clone();
        if order == SortOrder::DateDescending {
            // sort_by is stable, so equal dates stay in insertion order
            expenses.sort_by(|a, b| b.date.cmp(&a.date));
        }
        Ok(expenses)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StoreError> {
        parse_expense_id(id)?;
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn save(&self, mut expense: Expense) -> Result<Expense, StoreError> {
        parse_expense_id(&expense.id)?;
        let mut expenses = self.expenses.write().await;
        let slot = expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or(StoreError::NotFound)?;

        // created_at is owned by the store
        expense.created_at = slot.created_at;
        expense.updated_at = now_utc().max(slot.created_at);
        *slot = expense.clone();
        Ok(expense)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        parse_expense_id(id)?;
        let mut expenses = self.expenses.write().await;
        let position = expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound)?;
        expenses.remove(position);
        Ok(())
    }
}
