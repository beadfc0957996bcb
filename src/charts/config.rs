//! Chart Configuration Module
//! The declarative options for the daily expense bar chart.

/// Bar fill, translucent teal (RGBA).
pub const BAR_FILL: [u8; 4] = [75, 192, 192, 178];
/// Bar border, solid teal.
pub const BAR_BORDER: [u8; 4] = [75, 192, 192, 255];
/// Bar border width in pixels.
pub const BAR_BORDER_WIDTH: f32 = 1.0;
/// Fixed visual bar thickness in pixels.
pub const BAR_THICKNESS: u32 = 15;

/// Spacing between Y-axis ticks, in currency units.
pub const TICK_STEP: f64 = 250.0;

/// X-axis label rotation range in degrees. The smaller angle is used when
/// the widest label fits its column, the larger one otherwise.
pub const LABEL_ROTATION_MIN: f32 = 30.0;
pub const LABEL_ROTATION_MAX: f32 = 45.0;

/// Font sizes in points.
pub const TITLE_FONT_SIZE: f32 = 18.0;
pub const VALUE_LABEL_FONT_SIZE: f32 = 14.0;

/// Options consumed by both the interactive plotter and the static
/// renderer. Defaults mirror the canonical configuration: title and value
/// labels on, legend off, Y axis from zero to `max_y` in steps of 250.
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    /// Name of the single series ("Gastos"); never shown as a legend.
    pub series_label: String,
    pub show_legend: bool,
    pub show_value_labels: bool,
    /// Fixed upper bound of the Y axis, supplied by the caller.
    pub max_y: f64,
    pub tick_step: f64,
    pub bar_thickness: u32,
}

impl BarChartConfig {
    /// Canonical expense chart configuration for a given axis bound.
    pub fn new(max_y: f64) -> Self {
        Self {
            title: "Gastos por Dia".to_string(),
            x_title: "Dia".to_string(),
            y_title: "Valor (R$)".to_string(),
            series_label: "Gastos".to_string(),
            show_legend: false,
            show_value_labels: true,
            max_y,
            tick_step: TICK_STEP,
            bar_thickness: BAR_THICKNESS,
        }
    }

    /// Append the selected month to the title.
    pub fn with_month(mut self, month: &str) -> Self {
        self.title = format!("Gastos por Dia ({})", month);
        self
    }

    /// Tick values from zero up to `max_y`, inclusive.
    pub fn tick_values(&self) -> Vec<f64> {
        let mut ticks = Vec::new();
        let mut value = 0.0;
        while value <= self.max_y + 1e-9 {
            ticks.push(value);
            value += self.tick_step;
        }
        ticks
    }
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self::new(TICK_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_is_suppressed_by_default() {
        let config = BarChartConfig::new(1000.0);
        assert!(!config.show_legend);
        assert!(config.show_value_labels);
    }

    #[test]
    fn ticks_cover_zero_to_bound() {
        let config = BarChartConfig::new(1000.0);
        assert_eq!(
            config.tick_values(),
            vec![0.0, 250.0, 500.0, 750.0, 1000.0]
        );
    }

    #[test]
    fn ticks_stop_below_partial_step() {
        let config = BarChartConfig::new(600.0);
        assert_eq!(config.tick_values(), vec![0.0, 250.0, 500.0]);
    }

    #[test]
    fn month_suffix_in_title() {
        let config = BarChartConfig::new(500.0).with_month("2026-08");
        assert_eq!(config.title, "Gastos por Dia (2026-08)");
    }
}
