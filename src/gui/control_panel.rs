//! Control Panel Widget
//! Left side panel with file selection, month choice and export controls.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User settings for the chart
#[derive(Default, Clone)]
pub struct UserSettings {
    pub json_path: Option<PathBuf>,
    /// Selected month as `YYYY-MM`
    pub month: String,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub months: Vec<String>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            months: Vec::new(),
            progress: 0.0,
            status: "Pronto".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available months after a file load. Prefers the current
    /// month when present, otherwise the most recent one.
    pub fn update_months(&mut self, months: Vec<String>, current_month: &str) {
        self.settings.month = if months.iter().any(|m| m == current_month) {
            current_month.to_string()
        } else {
            months.last().cloned().unwrap_or_default()
        };
        self.months = months;
        self.export_enabled = !self.months.is_empty();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 GastoView")
                    .size(22.0)
                    .color(Color32::from_rgb(75, 192, 192)),
            );
            ui.label(
                RichText::new("Gastos diários em R$")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Arquivo de Gastos").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .json_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "Nenhum arquivo".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.json_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Abrir").clicked() {
                            action = ControlPanelAction::BrowseJson;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Month Section =====
        ui.label(RichText::new("🗓 Mês").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([80.0, 20.0], egui::Label::new("Mês:"));
            ComboBox::from_id_salt("month")
                .width(150.0)
                .selected_text(&self.settings.month)
                .show_ui(ui, |ui| {
                    for month in &self.months {
                        if ui
                            .selectable_label(self.settings.month == *month, month)
                            .clicked()
                        {
                            self.settings.month = month.clone();
                            action = ControlPanelAction::MonthChanged;
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Exportar PNG").size(16.0))
                    .min_size(egui::vec2(180.0, 32.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progresso").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Erro") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Concluído") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseJson,
    MonthChanged,
    ExportPng,
}
