//! Chart Viewer Widget
//! Central panel showing the monthly bar chart and spending alerts.

use crate::charts::{BarChartConfig, ChartPlotter};
use crate::data::DailySeries;
use crate::stats::SpendingAlert;
use egui::{Color32, RichText, ScrollArea};

const ALERT_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Everything needed to draw one month's chart.
#[derive(Clone)]
pub struct ChartView {
    pub series: DailySeries,
    pub config: BarChartConfig,
    pub alerts: Vec<SpendingAlert>,
}

/// Central chart display area.
pub struct ChartViewer {
    view: Option<ChartView>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self { view: None }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
    }

    pub fn set_view(&mut self, view: ChartView) {
        self.view = Some(view);
    }

    pub fn current_view(&self) -> Option<&ChartView> {
        self.view.as_ref()
    }

    /// Draw the chart card, or a placeholder when nothing is loaded.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.view.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Sem dados").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(2.0, Color32::from_rgb(75, 192, 192)))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&view.config.title).size(18.0).strong());
                            ui.add_space(8.0);

                            let alert_space = if view.alerts.is_empty() {
                                0.0
                            } else {
                                30.0 + 20.0 * view.alerts.len() as f32
                            };
                            ui.allocate_ui(
                                egui::vec2(
                                    ui.available_width(),
                                    (ui.available_height() - alert_space).max(240.0),
                                ),
                                |ui| {
                                    ChartPlotter::draw_bar_chart(ui, &view.series, &view.config);
                                },
                            );

                            if !view.alerts.is_empty() {
                                ui.add_space(10.0);
                                ui.label(RichText::new("⚠ Alertas").size(14.0).strong());
                                for alert in &view.alerts {
                                    ui.label(
                                        RichText::new(alert.describe())
                                            .size(12.0)
                                            .color(ALERT_COLOR),
                                    );
                                }
                            }
                        });
                    });
            });
    }
}
