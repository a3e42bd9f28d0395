use serde::{Deserialize, Serialize};

use super::{Amount, Month, UserId};

pub type ExpenseId = i64;

/// A single categorized expense owned by one user.
/// The repository is the sole writer of persisted expenses; aggregation
/// never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub user_id: UserId,
    pub month: Month,
    /// Free-form at this layer; the CLI advertises a default vocabulary.
    pub category: String,
    /// Finite when written through a boundary; legacy rows may decode as
    /// non-finite and are skipped during aggregation.
    pub amount: Amount,
    pub note: Option<String>,
}

impl Expense {
    /// Create a new expense. The id is assigned by the repository on save.
    pub fn new(user_id: UserId, month: Month, category: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: 0,
            user_id,
            month,
            category: category.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
