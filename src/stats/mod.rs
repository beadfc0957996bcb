//! Stats module - spending alerts

mod calculator;

pub use calculator::{AlertCalculator, CategoryStats, SpendingAlert, ALERT_RATIO};
