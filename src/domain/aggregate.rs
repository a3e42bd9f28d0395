use serde::{Deserialize, Serialize};

use super::{Amount, Expense, Month};

/// Filter out expenses whose amount is not a finite number.
/// Legacy databases can carry junk in the amount column; such rows are
/// silently excluded from every aggregate instead of failing the request.
pub fn skip_invalid(expenses: &[Expense]) -> impl Iterator<Item = &Expense> {
    expenses.iter().filter(|e| e.amount.is_finite())
}

/// Group expenses by category, summing amounts.
/// Categories appear in order of first appearance; sums are unrounded.
pub fn sum_by_category(expenses: &[Expense]) -> Vec<(String, Amount)> {
    let mut totals: Vec<(String, Amount)> = Vec::new();

    for expense in skip_invalid(expenses) {
        match totals
            .iter_mut()
            .find(|(category, _)| *category == expense.category)
        {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }

    totals
}

/// Sum of all expense amounts.
pub fn total(expenses: &[Expense]) -> Amount {
    skip_invalid(expenses).map(|e| e.amount).sum()
}

/// Sum of expense amounts for a single month. Zero when nothing matches.
pub fn total_for_month(expenses: &[Expense], month: Month) -> Amount {
    skip_invalid(expenses)
        .filter(|e| e.month == month)
        .map(|e| e.amount)
        .sum()
}

/// Chart-ready category labels with proportional sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub sizes: Vec<Amount>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Derive a chart series from the per-category totals.
/// A proportional chart cannot render an all-zero series, so in that case
/// every label gets a uniform weight of 1.
pub fn chart_series(expenses: &[Expense]) -> ChartSeries {
    let totals = sum_by_category(expenses);
    let (labels, mut sizes): (Vec<String>, Vec<Amount>) = totals.into_iter().unzip();

    if !sizes.is_empty() && sizes.iter().all(|&size| size == 0.0) {
        sizes = vec![1.0; labels.len()];
    }

    ChartSeries { labels, sizes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(month: Month, category: &str, amount: Amount) -> Expense {
        Expense::new(1, month, category, amount)
    }

    #[test]
    fn test_sum_by_category_groups_in_first_appearance_order() {
        let expenses = vec![
            expense(Month::January, "food", 100.0),
            expense(Month::January, "transport", 50.0),
            expense(Month::February, "food", 30.0),
        ];

        let totals = sum_by_category(&expenses);
        assert_eq!(
            totals,
            vec![("food".to_string(), 130.0), ("transport".to_string(), 50.0)]
        );
    }

    #[test]
    fn test_sum_by_category_is_idempotent() {
        let expenses = vec![
            expense(Month::March, "housing", 700.0),
            expense(Month::March, "food", 120.0),
            expense(Month::April, "housing", 700.0),
        ];

        assert_eq!(sum_by_category(&expenses), sum_by_category(&expenses));
    }

    #[test]
    fn test_total_matches_category_sums() {
        let expenses = vec![
            expense(Month::January, "food", 100.0),
            expense(Month::January, "transport", 50.0),
            expense(Month::February, "food", 30.0),
            expense(Month::February, "sport", 15.5),
        ];

        let by_category: Amount = sum_by_category(&expenses)
            .iter()
            .map(|(_, total)| total)
            .sum();

        assert_eq!(total(&expenses), by_category);
    }

    #[test]
    fn test_total_for_month_equals_filtered_total() {
        let expenses = vec![
            expense(Month::January, "food", 100.0),
            expense(Month::January, "transport", 50.0),
            expense(Month::February, "food", 30.0),
        ];

        for month in crate::domain::MONTHS {
            let filtered: Vec<Expense> = expenses
                .iter()
                .filter(|e| e.month == month)
                .cloned()
                .collect();
            assert_eq!(total_for_month(&expenses, month), total(&filtered));
        }

        assert_eq!(total_for_month(&expenses, Month::January), 150.0);
        assert_eq!(total_for_month(&expenses, Month::March), 0.0);
    }

    #[test]
    fn test_non_finite_amounts_are_skipped() {
        let expenses = vec![
            expense(Month::January, "food", 100.0),
            expense(Month::January, "food", f64::NAN),
            expense(Month::January, "transport", 50.0),
        ];

        assert_eq!(total(&expenses), 150.0);
        assert_eq!(
            sum_by_category(&expenses),
            vec![("food".to_string(), 100.0), ("transport".to_string(), 50.0)]
        );
    }

    #[test]
    fn test_chart_series_tracks_category_totals() {
        let expenses = vec![
            expense(Month::January, "food", 100.0),
            expense(Month::January, "transport", 50.0),
            expense(Month::February, "food", 30.0),
        ];

        let series = chart_series(&expenses);
        assert_eq!(series.labels, vec!["food", "transport"]);
        assert_eq!(series.sizes, vec![130.0, 50.0]);
    }

    #[test]
    fn test_chart_series_all_zero_falls_back_to_uniform_weights() {
        let expenses = vec![
            expense(Month::January, "food", 0.0),
            expense(Month::January, "transport", 0.0),
        ];

        let series = chart_series(&expenses);
        assert_eq!(series.labels, vec!["food", "transport"]);
        assert_eq!(series.sizes, vec![1.0, 1.0]);
    }

    #[test]
    fn test_mixed_sign_totals_keep_real_proportions() {
        // Sizes that sum to zero but are not all zero must not be replaced.
        let expenses = vec![
            expense(Month::January, "food", 25.0),
            expense(Month::January, "transport", -25.0),
        ];

        let series = chart_series(&expenses);
        assert_eq!(series.sizes, vec![25.0, -25.0]);
    }

    #[test]
    fn test_empty_input_yields_empty_aggregates() {
        assert_eq!(total(&[]), 0.0);
        assert_eq!(total_for_month(&[], Month::June), 0.0);
        assert!(sum_by_category(&[]).is_empty());
        assert!(chart_series(&[]).is_empty());
    }
}
