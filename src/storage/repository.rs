use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;

use crate::domain::{parse_amount, Amount, Expense, ExpenseId, Month, User, UserId};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying users and expenses.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    /// Foreign keys are enabled so expenses cannot reference missing users.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .context("Invalid database URL")?
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // User operations
    // ========================

    /// Save a new user and return the assigned id.
    /// Username uniqueness is checked by the caller before inserting.
    pub async fn save_user(&self, username: &str, password: &str) -> Result<UserId> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await
            .context("Failed to save user")?;

        Ok(result.last_insert_rowid())
    }

    /// Get a user by username.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by username")?;

        Ok(row.map(|row| Self::row_to_user(&row)))
    }

    /// Get the id of the user matching both username and password exactly.
    pub async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>> {
        let row = sqlx::query(
            r#"
            SELECT id
            FROM users
            WHERE username = ? AND password = ?
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by credentials")?;

        Ok(row.map(|row| row.get("id")))
    }

    fn row_to_user(row: &SqliteRow) -> User {
        User {
            id: row.get("id"),
            username: row.get("username"),
            password: row.get("password"),
        }
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense to the database.
    /// Assigns the autoincremented id back onto the expense.
    pub async fn save_expense(&self, expense: &mut Expense) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, month, category, amount, note)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.user_id)
        .bind(expense.month.as_str())
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.note)
        .execute(&self.pool)
        .await
        .context("Failed to save expense")?;

        expense.id = result.last_insert_rowid();
        Ok(())
    }

    /// Overwrite all mutable fields of an expense.
    /// Returns the number of rows affected (zero when the id does not exist).
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        month: Month,
        category: &str,
        amount: Amount,
        note: Option<&str>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET month = ?, category = ?, amount = ?, note = ?
            WHERE id = ?
            "#,
        )
        .bind(month.as_str())
        .bind(category)
        .bind(amount)
        .bind(note)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update expense")?;

        Ok(result.rows_affected())
    }

    /// Delete an expense.
    /// Returns the number of rows affected (zero when the id does not exist).
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;

        Ok(result.rows_affected())
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, month, category, amount, note
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// List a user's expenses, restricted to one month when given.
    /// Ordered by id, which is insertion order.
    pub async fn list_expenses(
        &self,
        user_id: UserId,
        month: Option<Month>,
    ) -> Result<Vec<Expense>> {
        let rows = match month {
            Some(month) => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, month, category, amount, note
                    FROM expenses
                    WHERE user_id = ? AND month = ?
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .bind(month.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, month, category, amount, note
                    FROM expenses
                    WHERE user_id = ?
                    ORDER BY id
                    "#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    fn row_to_expense(row: &SqliteRow) -> Result<Expense> {
        let month_str: String = row.get("month");

        Ok(Expense {
            id: row.get("id"),
            user_id: row.get("user_id"),
            month: Month::from_str(&month_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid month: {}", month_str))?,
            category: row.get("category"),
            amount: Self::decode_amount(row),
            note: row.get("note"),
        })
    }

    /// The amount column is REAL, but legacy rows may carry text in that
    /// slot. Anything that does not read as a number decodes as NaN, which
    /// the aggregation layer skips.
    fn decode_amount(row: &SqliteRow) -> Amount {
        if let Ok(value) = row.try_get::<f64, _>("amount") {
            return value;
        }

        row.try_get::<String, _>("amount")
            .ok()
            .and_then(|raw| parse_amount(&raw).ok())
            .unwrap_or(f64::NAN)
    }
}
