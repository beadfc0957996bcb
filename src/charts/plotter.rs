//! Chart Plotter Module
//! Interactive bar chart rendering using egui_plot.

use crate::charts::config::{
    BarChartConfig, BAR_BORDER, BAR_BORDER_WIDTH, BAR_FILL, VALUE_LABEL_FONT_SIZE,
};
use crate::currency::format_brl;
use crate::data::DailySeries;
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, GridMark, Plot, PlotPoint, Text};

/// Translucent teal fill for bars.
pub fn bar_fill_color() -> Color32 {
    Color32::from_rgba_unmultiplied(BAR_FILL[0], BAR_FILL[1], BAR_FILL[2], BAR_FILL[3])
}

/// Solid teal border for bars.
pub fn bar_border_color() -> Color32 {
    Color32::from_rgba_unmultiplied(BAR_BORDER[0], BAR_BORDER[1], BAR_BORDER[2], BAR_BORDER[3])
}

/// Draws the daily expense bar chart into an egui `Ui`.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one bar per day with currency ticks and value labels.
    /// The legend is never shown; the Y axis runs from zero to the
    /// configured bound in fixed steps.
    pub fn draw_bar_chart(ui: &mut egui::Ui, series: &DailySeries, config: &BarChartConfig) {
        let n = series.len();
        let day_labels = series.days.clone();
        let tick_step = config.tick_step;
        let max_y = config.max_y;

        let bars: Vec<Bar> = series
            .totals
            .iter()
            .enumerate()
            .map(|(i, &total)| {
                Bar::new(i as f64, total)
                    .width(0.6)
                    .fill(bar_fill_color())
                    .stroke(Stroke::new(BAR_BORDER_WIDTH, bar_border_color()))
                    .name(&config.series_label)
            })
            .collect();

        let totals = series.totals.clone();
        let show_value_labels = config.show_value_labels;

        Plot::new("gastos_por_dia")
            .height(ui.available_height().max(240.0))
            .allow_scroll(false)
            .clamp_grid(true)
            .include_x(-0.5)
            .include_x(n as f64 - 0.5)
            .include_y(0.0)
            .include_y(max_y)
            .x_axis_label(config.x_title.clone())
            .y_axis_label(config.y_title.clone())
            // One mark per bar so every day label is shown, never skipped
            .x_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < day_labels.len() {
                    day_labels[idx].clone()
                } else {
                    String::new()
                }
            })
            // Fixed currency ticks from zero up to the axis bound
            .y_grid_spacer(move |_input| {
                let mut marks = Vec::new();
                let mut value = 0.0;
                while value <= max_y + 1e-9 {
                    marks.push(GridMark {
                        value,
                        step_size: tick_step,
                    });
                    value += tick_step;
                }
                marks
            })
            .y_axis_formatter(|mark, _range| format_brl(mark.value))
            // No vertical gridlines, matching the category axis
            .show_grid([false, true])
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));

                if show_value_labels {
                    let offset = max_y * 0.015;
                    for (i, &total) in totals.iter().enumerate() {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(i as f64, total.min(max_y) + offset),
                                RichText::new(format_brl(total))
                                    .size(VALUE_LABEL_FONT_SIZE)
                                    .strong(),
                            )
                            .anchor(Align2::CENTER_BOTTOM)
                            .color(Color32::BLACK),
                        );
                    }
                }
            });
    }
}
