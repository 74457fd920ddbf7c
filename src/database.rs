use anyhow::Result;
use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use tokio::sync::RwLock;

use crate::constants::DATABASE_FILE;

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    id             TEXT    UNIQUE NOT NULL,
    description    TEXT    NOT NULL,
    amount         REAL    NOT NULL CHECK (amount >= 0),
    category       TEXT    NOT NULL,
    date           INTEGER NOT NULL,
    created_at     INTEGER NOT NULL,
    updated_at     INTEGER NOT NULL
);
"#;

const CREATE_EXPENSES_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses (date DESC, seq ASC);";

pub type Db = Arc<RwLock<Connection>>;

/// Expense DB (expenses.db) inside `data_dir`, created on first use.
pub async fn init_db(data_dir: &str) -> Result<Db> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_EXPENSES_TABLE, ()).await?;
    conn.execute(CREATE_EXPENSES_DATE_INDEX, ()).await?;
    Ok(Arc::new(RwLock::new(conn)))
}
