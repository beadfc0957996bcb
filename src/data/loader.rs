//! Expense Loader Module
//! Handles JSON expense file loading and month extraction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read expense file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse expense file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No data loaded")]
    NoData,
}

/// A single expense record.
///
/// Field names on the wire follow the original database schema
/// (`categoria`, `valor`, `data`), dates in ISO format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "data")]
    pub date: NaiveDate,
}

/// Handles expense file loading and month listing.
pub struct ExpenseLoader {
    expenses: Option<Vec<Expense>>,
    file_path: Option<PathBuf>,
}

impl Default for ExpenseLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseLoader {
    pub fn new() -> Self {
        Self {
            expenses: None,
            file_path: None,
        }
    }

    /// Load a JSON array of expenses.
    pub fn load_json(&mut self, file_path: &str) -> Result<&[Expense], LoaderError> {
        self.file_path = Some(PathBuf::from(file_path));

        let contents = fs::read_to_string(file_path)?;
        let expenses: Vec<Expense> = serde_json::from_str(&contents)?;

        self.expenses = Some(expenses);
        self.expenses.as_deref().ok_or(LoaderError::NoData)
    }

    /// Parse expenses from an in-memory JSON string.
    pub fn parse_json(contents: &str) -> Result<Vec<Expense>, LoaderError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Sorted unique `YYYY-MM` keys across all loaded expenses.
    pub fn available_months(&self) -> Vec<String> {
        let Some(expenses) = &self.expenses else {
            return Vec::new();
        };

        let months: BTreeSet<String> = expenses
            .iter()
            .map(|e| e.date.format("%Y-%m").to_string())
            .collect();
        months.into_iter().collect()
    }

    /// Get all loaded expenses.
    pub fn get_expenses(&self) -> Option<&[Expense]> {
        self.expenses.as_deref()
    }

    /// Get the number of loaded expense records.
    pub fn expense_count(&self) -> usize {
        self.expenses.as_ref().map(|e| e.len()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set expenses directly (used for async loading)
    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = Some(expenses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"categoria": "Mercado", "valor": 120.5, "data": "2026-08-03"},
        {"categoria": "Transporte", "valor": 35.0, "data": "2026-08-03"},
        {"categoria": "Mercado", "valor": 89.9, "data": "2026-07-21"}
    ]"#;

    #[test]
    fn parses_expense_records() {
        let expenses = ExpenseLoader::parse_json(SAMPLE).unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[0].category, "Mercado");
        assert_eq!(expenses[0].amount, 120.5);
        assert_eq!(expenses[0].date.format("%d").to_string(), "03");
    }

    #[test]
    fn lists_months_sorted_and_deduped() {
        let mut loader = ExpenseLoader::new();
        loader.set_expenses(ExpenseLoader::parse_json(SAMPLE).unwrap());
        assert_eq!(loader.available_months(), vec!["2026-07", "2026-08"]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ExpenseLoader::parse_json("{not json").is_err());
    }

    #[test]
    fn loads_expense_file_from_disk() {
        let path = std::env::temp_dir().join("gastoview_loader_test.json");
        fs::write(&path, SAMPLE).unwrap();

        let mut loader = ExpenseLoader::new();
        let loaded = loader.load_json(&path.to_string_lossy()).unwrap().len();
        assert_eq!(loaded, 3);
        assert_eq!(loader.expense_count(), 3);
        assert_eq!(loader.get_file_path(), Some(&path));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn empty_loader_has_no_months() {
        let loader = ExpenseLoader::new();
        assert!(loader.available_months().is_empty());
        assert_eq!(loader.expense_count(), 0);
    }
}
