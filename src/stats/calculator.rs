//! Alert Calculator Module
//! Flags expenses well above their category's average for the month.

use crate::currency::format_brl;
use crate::data::Expense;
use rayon::prelude::*;
use std::collections::HashMap;

/// An expense is flagged when it exceeds this multiple of its category mean.
pub const ALERT_RATIO: f64 = 1.5;

/// Per-category aggregates for one month of expenses.
#[derive(Debug, Clone)]
pub struct CategoryStats {
    pub category: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
}

/// A single flagged expense.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingAlert {
    pub category: String,
    pub amount: f64,
    pub category_mean: f64,
}

impl SpendingAlert {
    /// Human-readable pt-BR alert message.
    pub fn describe(&self) -> String {
        format!(
            "Gasto alto detectado em {} ({}, acima da média de {})",
            self.category,
            format_brl(self.amount),
            format_brl(self.category_mean)
        )
    }
}

/// Computes category aggregates and high-spending alerts.
pub struct AlertCalculator;

impl AlertCalculator {
    /// Per-category stats, computed in parallel across categories.
    pub fn category_stats(expenses: &[Expense]) -> HashMap<String, CategoryStats> {
        let mut by_category: HashMap<String, Vec<f64>> = HashMap::new();
        for expense in expenses {
            by_category
                .entry(expense.category.clone())
                .or_default()
                .push(expense.amount);
        }

        by_category
            .into_par_iter()
            .map(|(category, amounts)| {
                let count = amounts.len();
                let total: f64 = amounts.iter().sum();
                let mean = if count > 0 { total / count as f64 } else { 0.0 };
                let stats = CategoryStats {
                    category: category.clone(),
                    count,
                    total,
                    mean,
                };
                (category, stats)
            })
            .collect()
    }

    /// Flag every expense above [`ALERT_RATIO`] times its category mean.
    /// Input order is preserved.
    pub fn detect_high_spending(expenses: &[Expense]) -> Vec<SpendingAlert> {
        let stats = Self::category_stats(expenses);

        expenses
            .iter()
            .filter_map(|expense| {
                let mean = stats.get(&expense.category)?.mean;
                if mean > 0.0 && expense.amount > ALERT_RATIO * mean {
                    Some(SpendingAlert {
                        category: expense.category.clone(),
                        amount: expense.amount,
                        category_mean: mean,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: &str, amount: f64, day: u32) -> Expense {
        Expense {
            category: category.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
        }
    }

    #[test]
    fn computes_category_means() {
        let expenses = vec![
            expense("Mercado", 40.0, 1),
            expense("Mercado", 60.0, 2),
            expense("Lazer", 10.0, 3),
        ];

        let stats = AlertCalculator::category_stats(&expenses);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["Mercado"].count, 2);
        assert_eq!(stats["Mercado"].total, 100.0);
        assert_eq!(stats["Mercado"].mean, 50.0);
    }

    #[test]
    fn flags_only_outliers() {
        // Mean for Mercado is 60; threshold at 90
        let expenses = vec![
            expense("Mercado", 40.0, 1),
            expense("Mercado", 140.0, 2),
            expense("Mercado", 0.0, 3),
            expense("Lazer", 30.0, 4),
        ];

        let alerts = AlertCalculator::detect_high_spending(&expenses);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, "Mercado");
        assert_eq!(alerts[0].amount, 140.0);
        assert_eq!(alerts[0].category_mean, 60.0);
    }

    #[test]
    fn single_expense_is_never_flagged() {
        let expenses = vec![expense("Lazer", 500.0, 1)];
        assert!(AlertCalculator::detect_high_spending(&expenses).is_empty());
    }

    #[test]
    fn alert_message_uses_brl_formatting() {
        let alert = SpendingAlert {
            category: "Mercado".to_string(),
            amount: 140.0,
            category_mean: 60.0,
        };
        assert_eq!(
            alert.describe(),
            "Gasto alto detectado em Mercado (R$ 140,00, acima da média de R$ 60,00)"
        );
    }
}
