//! GastoView - Daily Expense Bar Charts
//!
//! A Rust application for viewing daily expense totals as bar charts with
//! Brazilian Real formatting, and exporting them as images.

mod charts;
mod currency;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::GastoApp;

fn main() -> eframe::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("GastoView"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "GastoView",
        options,
        Box::new(|cc| Ok(Box::new(GastoApp::new(cc)))),
    )
}
