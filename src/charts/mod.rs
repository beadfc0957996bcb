//! Charts module - chart configuration and rendering

pub mod config;
mod plotter;
mod renderer;

pub use config::BarChartConfig;
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
