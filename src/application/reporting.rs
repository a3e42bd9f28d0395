use serde::{Deserialize, Serialize};

use crate::domain::{Amount, ChartSeries, Month};

/// Aggregated view of a user's expenses, optionally restricted to one month.
/// Recomputed from the ledger on every request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub month: Option<Month>,
    pub categories: Vec<CategorySummary>,
    pub total: Amount,
    /// Present only when the report is restricted to a month.
    pub monthly_total: Option<Amount>,
    pub chart: ChartSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total: Amount,
    pub percentage: f64,
}
