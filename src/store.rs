use async_trait::async_trait;
use uuid::Uuid;

use crate::database::Db;
use crate::error::StoreError;
use crate::models::{Category, Expense, NewExpense};
use crate::utils::{from_unix_millis, now_utc, to_unix_millis};

const SELECT_EXPENSE_COLUMNS: &str =
    "SELECT id, description, amount, category, date, created_at, updated_at FROM expenses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent `date` first; equal dates keep insertion order.
    DateDescending,
    Insertion,
}

/// Persistence capability the expense service is built on.
///
/// Implementations assign ids and the `created_at`/`updated_at` stamps. Ids that
/// are not well-formed for the backend are reported as `StoreError::InvalidId`.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError>;

    async fn find_all(&self, order: SortOrder) -> Result<Vec<Expense>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StoreError>;

    /// Writes every mutable field of `expense` and refreshes `updated_at`.
    async fn save(&self, expense: Expense) -> Result<Expense, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;
}

pub fn parse_expense_id(id: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

pub fn extract_expense_from_row(row: libsql::Row) -> Result<Expense, StoreError> {
    let id: String = row
        .get(0)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get expense id: {}", e)))?;
    let description: String = row
        .get(1)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get description: {}", e)))?;
    let amount: f64 = row
        .get(2)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get amount: {}", e)))?;
    let category: String = row
        .get(3)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get category: {}", e)))?;
    let date: i64 = row
        .get(4)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get date: {}", e)))?;
    let created_at: i64 = row
        .get(5)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get created_at: {}", e)))?;
    let updated_at: i64 = row
        .get(6)
        .map_err(|e| StoreError::CorruptRow(format!("failed to get updated_at: {}", e)))?;

    let category = category
        .parse::<Category>()
        .map_err(|e| StoreError::CorruptRow(e.to_string()))?;

    Ok(Expense {
        id,
        description,
        amount,
        category,
        date: from_unix_millis(date)?,
        created_at: from_unix_millis(created_at)?,
        updated_at: from_unix_millis(updated_at)?,
    })
}

/// `ExpenseStore` backed by a local libsql database file.
#[derive(Clone)]
pub struct LibsqlStore {
    db: Db,
}

impl LibsqlStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Removes every expense. Used to isolate tests sharing one database.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let conn = self.db.write().await;
        conn.execute("DELETE FROM expenses", ()).await?;
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for LibsqlStore {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = now_utc();

        let conn = self.db.write().await;
        conn.execute(
            "INSERT INTO expenses (id, description, amount, category, date, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            libsql::params![
                id.as_str(),
                expense.description.as_str(),
                expense.amount,
                expense.category.as_str(),
                to_unix_millis(expense.date),
                to_unix_millis(now),
                to_unix_millis(now)
            ],
        )
        .await?;

        Ok(Expense {
            id,
            description: expense.description,
            amount: expense.amount,
            category: expense.category,
            date: expense.date,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_all(&self, order: SortOrder) -> Result<Vec<Expense>, StoreError> {
        let order_by = match order {
            SortOrder::DateDescending => "ORDER BY date DESC, seq ASC",
            SortOrder::Insertion => "ORDER BY seq ASC",
        };
        let query = format!("{} {}", SELECT_EXPENSE_COLUMNS, order_by);

        let conn = self.db.read().await;
        let mut rows = conn.query(&query, ()).await?;

        let mut expenses = Vec::new();
        while let Some(row) = rows.next().await? {
            expenses.push(extract_expense_from_row(row)?);
        }
        Ok(expenses)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Expense>, StoreError> {
        parse_expense_id(id)?;

        let query = format!("{} WHERE id = ?", SELECT_EXPENSE_COLUMNS);
        let conn = self.db.read().await;
        let mut rows = conn.query(&query, [id]).await?;

        match rows.next().await? {
            Some(row) => Ok(Some(extract_expense_from_row(row)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, mut expense: Expense) -> Result<Expense, StoreError> {
        parse_expense_id(&expense.id)?;
        expense.updated_at = now_utc().max(expense.created_at);

        let conn = self.db.write().await;
        let affected_rows = conn
            .execute(
                "UPDATE expenses SET description = ?, amount = ?, category = ?, date = ?, updated_at = ? WHERE id = ?",
                libsql::params![
                    expense.description.as_str(),
                    expense.amount,
                    expense.category.as_str(),
                    to_unix_millis(expense.date),
                    to_unix_millis(expense.updated_at),
                    expense.id.as_str()
                ],
            )
            .await?;

        if affected_rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(expense)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        parse_expense_id(id)?;

        let conn = self.db.write().await;
        let affected_rows = conn
            .execute("DELETE FROM expenses WHERE id = ?", [id])
            .await?;

        if affected_rows == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
