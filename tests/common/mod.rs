// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use financebook::application::LedgerService;
use financebook::domain::{Amount, Expense, Month, UserId};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Register an account and log in, returning the user id
pub async fn register_and_login(
    service: &LedgerService,
    username: &str,
    password: &str,
) -> Result<UserId> {
    assert!(service.register(username, password).await?);
    let user_id = service
        .authenticate(username, password)
        .await?
        .expect("freshly registered account must authenticate");
    Ok(user_id)
}

/// Shorthand for recording an expense without a note
pub async fn add_expense(
    service: &LedgerService,
    user_id: UserId,
    month: Month,
    category: &str,
    amount: Amount,
) -> Result<Expense> {
    Ok(service
        .add_expense(user_id, month, category.to_string(), amount, None)
        .await?)
}
