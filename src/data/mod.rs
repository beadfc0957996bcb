//! Data module - expense loading and aggregation

mod loader;
mod processor;

pub use loader::{Expense, ExpenseLoader, LoaderError};
pub use processor::{DailySeries, ExpenseProcessor};
