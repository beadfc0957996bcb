//! GUI module - application window and widgets

mod app;
mod chart_viewer;
mod control_panel;

pub use app::GastoApp;
pub use chart_viewer::{ChartView, ChartViewer};
pub use control_panel::{ControlPanel, ControlPanelAction};
