//! Expense Processor Module
//! Aggregates raw expense records into the per-day series the chart plots.

use crate::charts::config::TICK_STEP;
use crate::data::Expense;
use std::collections::BTreeMap;

/// Day labels paired with daily totals, in left-to-right plotting order.
///
/// `totals[i]` is the amount for `days[i]`. The two vectors are equal
/// length when built by [`ExpenseProcessor::daily_totals`]; a hand-built
/// mismatched pair is a caller error.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub days: Vec<String>,
    pub totals: Vec<f64>,
}

impl DailySeries {
    pub fn new(days: Vec<String>, totals: Vec<f64>) -> Self {
        Self { days, totals }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Largest daily total, 0 for an empty series.
    pub fn max_total(&self) -> f64 {
        self.totals.iter().copied().fold(0.0, f64::max)
    }
}

/// Turns expense records into chart inputs.
pub struct ExpenseProcessor;

impl ExpenseProcessor {
    /// Keep only expenses from the given `YYYY-MM` month.
    pub fn filter_by_month(expenses: &[Expense], month: &str) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| e.date.format("%Y-%m").to_string() == month)
            .cloned()
            .collect()
    }

    /// Sum amounts per day of month ("01", "02", ...), days ascending.
    pub fn daily_totals(expenses: &[Expense]) -> DailySeries {
        let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
        for expense in expenses {
            let day = expense.date.format("%d").to_string();
            *by_day.entry(day).or_insert(0.0) += expense.amount;
        }

        let mut days = Vec::with_capacity(by_day.len());
        let mut totals = Vec::with_capacity(by_day.len());
        for (day, total) in by_day {
            days.push(day);
            totals.push(total);
        }

        DailySeries::new(days, totals)
    }

    /// Upper bound for the Y axis: the next multiple of the tick step
    /// above the largest total. An exact multiple still rounds up, so the
    /// tallest bar never touches the top of the plot.
    pub fn axis_bound(series: &DailySeries) -> f64 {
        ((series.max_total() / TICK_STEP).floor() + 1.0) * TICK_STEP
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(category: &str, amount: f64, date: &str) -> Expense {
        Expense {
            category: category.to_string(),
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn sums_per_day_in_order() {
        let expenses = vec![
            expense("Mercado", 50.0, "2026-08-12"),
            expense("Lazer", 30.0, "2026-08-03"),
            expense("Mercado", 20.0, "2026-08-12"),
        ];

        let series = ExpenseProcessor::daily_totals(&expenses);
        assert_eq!(series.days, vec!["03", "12"]);
        assert_eq!(series.totals, vec![30.0, 70.0]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn filters_by_month() {
        let expenses = vec![
            expense("Mercado", 50.0, "2026-08-12"),
            expense("Mercado", 99.0, "2026-07-12"),
        ];

        let august = ExpenseProcessor::filter_by_month(&expenses, "2026-08");
        assert_eq!(august.len(), 1);
        assert_eq!(august[0].amount, 50.0);
    }

    #[test]
    fn axis_bound_rounds_up_to_next_step() {
        let series = DailySeries::new(vec!["01".into()], vec![620.0]);
        assert_eq!(ExpenseProcessor::axis_bound(&series), 750.0);
    }

    #[test]
    fn axis_bound_bumps_exact_multiples() {
        let series = DailySeries::new(vec!["01".into()], vec![500.0]);
        assert_eq!(ExpenseProcessor::axis_bound(&series), 750.0);
    }

    #[test]
    fn axis_bound_of_empty_series() {
        let series = ExpenseProcessor::daily_totals(&[]);
        assert!(series.is_empty());
        assert_eq!(ExpenseProcessor::axis_bound(&series), 250.0);
    }
}
