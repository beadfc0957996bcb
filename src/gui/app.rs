//! GastoView Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{BarChartConfig, StaticChartRenderer};
use crate::data::{Expense, ExpenseLoader, ExpenseProcessor};
use crate::gui::{ChartView, ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::AlertCalculator;
use anyhow::Context;
use egui::SidePanel;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Exported image size
const EXPORT_WIDTH: u32 = 1400;
const EXPORT_HEIGHT: u32 = 900;

/// Expense loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        expenses: Vec<Expense>,
        months: Vec<String>,
    },
    Error(String),
}

/// Main application window.
pub struct GastoApp {
    loader: ExpenseLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async file loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl GastoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: ExpenseLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle expense file selection - loads in the background.
    fn handle_browse_json(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Arquivos JSON", &["json"])
            .pick_file()
        {
            self.chart_viewer.clear();
            self.control_panel.settings.json_path = Some(path.clone());
            self.control_panel.set_progress(0.0, "Lendo arquivo...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            let path_str = path.to_string_lossy().to_string();

            thread::spawn(move || {
                let _ = tx.send(LoadResult::Progress("Lendo arquivo...".to_string()));

                let result = std::fs::read_to_string(&path_str)
                    .map_err(|e| e.to_string())
                    .and_then(|contents| {
                        ExpenseLoader::parse_json(&contents).map_err(|e| e.to_string())
                    });

                match result {
                    Ok(expenses) => {
                        let mut loader = ExpenseLoader::new();
                        loader.set_expenses(expenses);
                        let months = loader.available_months();
                        let expenses = loader.get_expenses().unwrap_or_default().to_vec();
                        let _ = tx.send(LoadResult::Complete { expenses, months });
                    }
                    Err(e) => {
                        let _ = tx.send(LoadResult::Error(e));
                    }
                }
            });
        }
    }

    /// Check for file loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete { expenses, months } => {
                        let count = expenses.len();
                        self.loader.set_expenses(expenses);

                        let current = chrono::Local::now().format("%Y-%m").to_string();
                        self.control_panel.update_months(months, &current);
                        self.rebuild_view();

                        self.control_panel.set_progress(
                            100.0,
                            &format!("Concluído: {} lançamentos carregados", count),
                        );
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Erro: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Rebuild the chart for the selected month: filter, aggregate,
    /// derive the axis bound and detect alerts.
    fn rebuild_view(&mut self) {
        let Some(expenses) = self.loader.get_expenses() else {
            self.chart_viewer.clear();
            return;
        };

        let month = self.control_panel.settings.month.clone();
        let monthly = ExpenseProcessor::filter_by_month(expenses, &month);
        let series = ExpenseProcessor::daily_totals(&monthly);
        let max_y = ExpenseProcessor::axis_bound(&series);
        let alerts = AlertCalculator::detect_high_spending(&monthly);

        self.chart_viewer.set_view(ChartView {
            series,
            config: BarChartConfig::new(max_y).with_month(&month),
            alerts,
        });
    }

    /// Handle PNG export of the current chart.
    fn handle_export_png(&mut self) {
        let Some(view) = self.chart_viewer.current_view().cloned() else {
            self.control_panel.set_progress(0.0, "Nada para exportar");
            return;
        };

        let default_name = format!("gastos_{}.png", self.control_panel.settings.month);
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(&default_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        self.control_panel.set_progress(50.0, "Gerando imagem...");

        match Self::export_png(&view, &output_path) {
            Ok(()) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Concluído: {}", output_path.to_string_lossy()),
                );
                let _ = open::that(&output_path);
            }
            Err(e) => {
                self.control_panel
                    .set_progress(0.0, &format!("Erro: {:#}", e));
            }
        }
    }

    fn export_png(view: &ChartView, path: &Path) -> anyhow::Result<()> {
        let bytes = StaticChartRenderer::render_to_png_bytes(
            &view.series,
            &view.config,
            EXPORT_WIDTH,
            EXPORT_HEIGHT,
        )
        .context("falha ao renderizar o gráfico")?;
        std::fs::write(path, bytes).context("falha ao gravar o arquivo PNG")?;
        Ok(())
    }
}

impl eframe::App for GastoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseJson => self.handle_browse_json(),
                        ControlPanelAction::MonthChanged => self.rebuild_view(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
