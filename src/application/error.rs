use thiserror::Error;

use crate::domain::ExpenseId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
