use crate::domain::{
    chart_series, sum_by_category, total, total_for_month, Amount, Expense, ExpenseId, Month,
    UserId,
};
use crate::storage::Repository;

use super::{AppError, CategorySummary, ExpenseReport};

/// Application service providing high-level operations for the expense
/// ledger. This is the primary interface for any client (CLI, API, TUI, etc.).
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Account operations
    // ========================

    /// Register a new account.
    /// Returns false when the username is already taken, true on success.
    pub async fn register(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::EmptyCredentials);
        }

        if self.repo.get_user_by_username(username).await?.is_some() {
            return Ok(false);
        }

        self.repo.save_user(username, password).await?;
        Ok(true)
    }

    /// Check credentials and return the matching user's id.
    /// None covers both unknown usernames and wrong passwords; callers must
    /// not report which one failed.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserId>, AppError> {
        Ok(self
            .repo
            .get_user_by_credentials(username, password)
            .await?)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense and return it with its assigned id.
    pub async fn add_expense(
        &self,
        user_id: UserId,
        month: Month,
        category: String,
        amount: Amount,
        note: Option<String>,
    ) -> Result<Expense, AppError> {
        Self::validate_amount(amount)?;

        let mut expense = Expense::new(user_id, month, category, amount);
        if let Some(note) = note {
            expense = expense.with_note(note);
        }

        self.repo.save_expense(&mut expense).await?;
        Ok(expense)
    }

    /// Overwrite all mutable fields of an existing expense.
    pub async fn edit_expense(
        &self,
        expense_id: ExpenseId,
        month: Month,
        category: String,
        amount: Amount,
        note: Option<String>,
    ) -> Result<Expense, AppError> {
        Self::validate_amount(amount)?;

        let updated = self
            .repo
            .update_expense(expense_id, month, &category, amount, note.as_deref())
            .await?;
        if updated == 0 {
            return Err(AppError::ExpenseNotFound(expense_id));
        }

        self.repo
            .get_expense(expense_id)
            .await?
            .ok_or(AppError::ExpenseNotFound(expense_id))
    }

    /// Delete an expense.
    pub async fn delete_expense(&self, expense_id: ExpenseId) -> Result<(), AppError> {
        let deleted = self.repo.delete_expense(expense_id).await?;
        if deleted == 0 {
            return Err(AppError::ExpenseNotFound(expense_id));
        }
        Ok(())
    }

    /// Point lookup, used to pre-populate edits.
    pub async fn get_expense(&self, expense_id: ExpenseId) -> Result<Option<Expense>, AppError> {
        Ok(self.repo.get_expense(expense_id).await?)
    }

    /// List a user's expenses in insertion order, optionally restricted to
    /// one month.
    pub async fn list_expenses(
        &self,
        user_id: UserId,
        month: Option<Month>,
    ) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses(user_id, month).await?)
    }

    // ========================
    // Reporting operations
    // ========================

    /// Build the aggregated report for a user, optionally restricted to one
    /// month.
    pub async fn expense_report(
        &self,
        user_id: UserId,
        month: Option<Month>,
    ) -> Result<ExpenseReport, AppError> {
        let expenses = self.repo.list_expenses(user_id, month).await?;

        let overall = total(&expenses);
        let categories = sum_by_category(&expenses)
            .into_iter()
            .map(|(category, category_total)| CategorySummary {
                category,
                total: category_total,
                percentage: if overall != 0.0 {
                    category_total / overall * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Ok(ExpenseReport {
            month,
            categories,
            total: overall,
            monthly_total: month.map(|m| total_for_month(&expenses, m)),
            chart: chart_series(&expenses),
        })
    }

    fn validate_amount(amount: Amount) -> Result<(), AppError> {
        if !amount.is_finite() {
            return Err(AppError::InvalidAmount(amount.to_string()));
        }
        Ok(())
    }
}
