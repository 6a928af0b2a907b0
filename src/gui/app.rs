//! ANP Dashboard Main Application
//! Main window with the view menu and the report viewer.

use crate::config::DashboardConfig;
use crate::data::{AnpTable, DataLoader, TerritoryReference};
use crate::export;
use crate::gui::{MenuAction, MenuPanel, ReportViewer};
use crate::reports::{CategoryFilter, ViewContent};
use egui::SidePanel;
use log::{error, info};
use std::sync::Arc;

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    reference: TerritoryReference,
    /// Loaded once at startup. A load failure halts every view.
    table: Result<Arc<AnpTable>, String>,
    menu: MenuPanel,
    viewer: ReportViewer,
    filter: CategoryFilter,
    content: Result<ViewContent, String>,
}

impl DashboardApp {
    /// Loads the dataset once. The loader is dropped afterwards; the app
    /// holds the table through its `Arc`.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut loader = DataLoader::with_row_limit(config.row_limit);
        let table = loader.load(&config.data_path).map_err(|e| {
            error!("{}", e);
            e.to_string()
        });

        let mut app = Self {
            config,
            reference: TerritoryReference::peru(),
            table,
            menu: MenuPanel::new(),
            viewer: ReportViewer::new(),
            filter: CategoryFilter::All,
            content: Err("No dataset loaded".to_string()),
        };

        if let Ok(table) = &app.table {
            app.viewer.filter_options = CategoryFilter::options(table);
            app.menu.enabled = true;
            app.menu.set_status(format!("Loaded {} rows", table.height()));
        } else {
            app.menu.set_status("Error: dataset unavailable");
        }

        app.rebuild();
        app
    }

    /// Recompute the selected view over the loaded table.
    fn rebuild(&mut self) {
        let Ok(table) = &self.table else {
            return;
        };

        let view = self.menu.selected;
        self.content = view
            .build(table, &self.reference, &self.filter)
            .map_err(|e| {
                error!("Failed to build {:?}: {}", view, e);
                e.to_string()
            });
    }

    /// Write every chart as PNG into a folder picked by the user.
    fn handle_export_charts(&mut self) {
        let Ok(table) = &self.table else {
            return;
        };

        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export charts to folder")
            .pick_folder()
        else {
            return; // User cancelled
        };

        let result = export::build_all(table, &self.reference)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                export::export_charts(&contents, &dir, self.config.export)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(written) => {
                info!("Exported {} charts to {:?}", written.len(), dir);
                self.menu
                    .set_status(format!("Exported {} charts to {}", written.len(), dir.display()));
            }
            Err(e) => {
                error!("Chart export failed: {}", e);
                self.menu.set_status(format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Menu
        SidePanel::left("menu_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| match self.menu.show(ui) {
                    MenuAction::ViewChanged(view) => {
                        info!("Switched to {}", view.label());
                        self.rebuild();
                    }
                    MenuAction::ExportCharts => self.handle_export_charts(),
                    MenuAction::None => {}
                });
            });

        // Central panel - Report Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Err(load_error) = &self.table {
                ReportViewer::show_load_error(ui, load_error);
                return;
            }

            let view = self.menu.selected;
            if self.viewer.show(ui, view, &self.content, &mut self.filter) {
                info!("Category filter set to {}", self.filter);
                self.rebuild();
            }
        });
    }
}
