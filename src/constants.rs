// Server configuration
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Storage
pub const DATABASE_FILE: &str = "expenses.db";

// Routes
pub const EXPENSES_ROUTE: &str = "/api/expenses";

// Response messages
pub const MSG_WELCOME: &str = "Welcome to Expense Tracker API";
pub const MSG_EXPENSE_DELETED: &str = "Expense deleted successfully";
pub const ERR_EXPENSE_NOT_FOUND: &str = "Expense not found";
pub const ERR_STORE_UNAVAILABLE: &str = "Expense store unavailable";
